use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use axum::Router;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DIST: &str = "frontend/dist";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Output directory of `trunk build`.
    pub dist: PathBuf,
}

impl ServerConfig {
    /// Reads `MAPTY_ADDR` and `MAPTY_DIST`, falling back to the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(std::env::var("MAPTY_ADDR").ok(), std::env::var("MAPTY_DIST").ok())
    }

    fn from_vars(addr: Option<String>, dist: Option<String>) -> anyhow::Result<Self> {
        let addr = addr.unwrap_or_else(|| DEFAULT_ADDR.into());
        let addr = addr.parse::<SocketAddr>().with_context(|| format!("invalid MAPTY_ADDR {addr:?}"))?;

        Ok(Self {
            addr,
            dist: dist.unwrap_or_else(|| DEFAULT_DIST.into()).into(),
        })
    }
}

/// Serves the built app. Unknown paths get index.html.
pub fn router(dist: &Path) -> Router {
    let index = ServeFile::new(dist.join("index.html"));

    Router::new()
        .fallback_service(ServeDir::new(dist).fallback(index))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    if !config.dist.join("index.html").exists() {
        tracing::warn!("No index.html in {}, run `trunk build` in frontend/", config.dist.display());
    }

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(&config.dist)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ServerConfig::from_vars(None, None).unwrap();
        assert_eq!(config.addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.dist, PathBuf::from("frontend/dist"));
    }

    #[test]
    fn config_rejects_bad_addr() {
        assert!(ServerConfig::from_vars(Some("localhost".into()), None).is_err());

        let config = ServerConfig::from_vars(Some("0.0.0.0:3000".into()), Some("/srv/mapty".into())).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.dist, PathBuf::from("/srv/mapty"));
    }

    #[tokio::test]
    async fn serves_app_files() {
        let dist = tempfile::tempdir().unwrap();
        std::fs::write(dist.path().join("index.html"), "<html>mapty</html>").unwrap();
        std::fs::write(dist.path().join("style.css"), "body {}").unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(dist.path());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let css = reqwest::get(format!("http://{addr}/style.css")).await.unwrap();
        assert_eq!(css.status(), 200);
        assert_eq!(css.text().await.unwrap(), "body {}");

        // client side routes fall back to the app
        let page = reqwest::get(format!("http://{addr}/some/where")).await.unwrap();
        assert_eq!(page.text().await.unwrap(), "<html>mapty</html>");
    }
}
