use gloo_console::info;
use leaflet::{LatLng, Map, MapOptions, Marker, Popup, PopupOptions, TileLayer, TileLayerOptions};
use mapty_lib::{
    config::{AppConfig, PanOptions},
    map::{MapWidget, MarkerPopup},
    Coordinates,
};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{
    HtmlElement,
    js_sys::{Object, Reflect},
};
use yew::Callback;

#[wasm_bindgen]
extern "C" {
    /// Evented and Layer methods the leaflet bindings do not expose.
    type LeafletObject;

    #[wasm_bindgen(method)]
    fn on(this: &LeafletObject, kind: &str, handler: &JsValue);

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &LeafletObject);

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view_with_options(this: &LeafletObject, center: &LatLng, zoom: f64, options: &JsValue);

    type MapClick;

    #[wasm_bindgen(method, getter)]
    fn latlng(this: &MapClick) -> LatLng;
}

/// Leaflet map living in a container owned by the root component.
pub struct LeafletMap {
    map: Map,
    _on_click: Closure<dyn FnMut(MapClick)>,
}

impl LeafletMap {
    pub fn create(container: &HtmlElement, center: Coordinates, config: &AppConfig, on_click: Callback<Coordinates>) -> Self {
        let map = Map::new_with_element(container, &MapOptions::default());
        map.set_max_zoom(config.map.max_zoom);
        map.set_view(&to_lat_lng(center), config.zoom);
        add_tile_layer(&map, config);

        let on_click = Closure::<dyn FnMut(MapClick)>::new(move |event: MapClick| {
            let at = event.latlng();
            on_click.emit(Coordinates::new(at.lat(), at.lng()));
        });
        map.unchecked_ref::<LeafletObject>().on("click", on_click.as_ref());

        // The container may have been laid out before it had its final size
        map.invalidate_size(false);
        info!(format!("Map created at {:?}", center));

        Self {
            map,
            _on_click: on_click,
        }
    }
}

impl MapWidget for LeafletMap {
    fn set_view(&mut self, center: Coordinates, zoom: f64, pan: &PanOptions) {
        self.map
            .unchecked_ref::<LeafletObject>()
            .set_view_with_options(&to_lat_lng(center), zoom, &pan_options(pan));
    }

    fn add_marker(&mut self, at: Coordinates, popup: &MarkerPopup) {
        let marker = Marker::new(&to_lat_lng(at));
        marker.add_to(&self.map);
        marker.bind_popup(&make_popup(popup));
        marker.unchecked_ref::<LeafletObject>().open_popup();
    }
}

fn make_popup(popup: &MarkerPopup) -> Popup {
    let opts = PopupOptions::default();
    if let Some(max_width) = popup.max_width {
        opts.set_max_width(max_width);
    }
    if let Some(min_width) = popup.min_width {
        opts.set_min_width(min_width);
    }
    if let Some(class_name) = &popup.class_name {
        opts.set_class_name(class_name.clone());
    }
    opts.set_auto_close(popup.auto_close);
    opts.set_close_on_click(popup.close_on_click);

    let leaflet_popup = Popup::new(&opts, None);
    leaflet_popup.set_content(&popup.content.as_str().into());
    leaflet_popup
}

/// `{ animate, pan: { duration } }` as taken by `Map.setView`.
fn pan_options(pan: &PanOptions) -> JsValue {
    let pan_part = Object::new();
    let _ = Reflect::set(&pan_part, &"duration".into(), &pan.duration_secs.into());

    let options = Object::new();
    let _ = Reflect::set(&options, &"animate".into(), &pan.animate.into());
    let _ = Reflect::set(&options, &"pan".into(), &pan_part);
    options.into()
}

fn to_lat_lng(coordinates: Coordinates) -> LatLng {
    LatLng::new(coordinates.latitude, coordinates.longitude)
}

fn add_tile_layer(map: &Map, config: &AppConfig) {
    let opts = TileLayerOptions::new();
    opts.set_attribution(config.map.attribution.clone());
    opts.set_update_when_idle(true);
    TileLayer::new_options(&config.map.tile_url, &opts).add_to(map);
}
