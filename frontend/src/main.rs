use crate::{
    browser::{BrowserGeolocation, BrowserSurface, PageStore},
    components::{
        map_component::LeafletMap,
        workout_form::{FormField, FormInputs, WorkoutFormView},
        workout_list::WorkoutList,
    },
};
use gloo_console::info;
use gloo_timers::callback::Timeout;
use gloo_utils::document;
use mapty_lib::{config::AppConfig, error::GeolocationError, geolocation::Geolocation, App, Coordinates, WorkoutKind};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, Node};
use yew::prelude::*;

mod browser;
mod components;

/// How long the form stays out of the layout after a submission.
const FORM_RESTORE_MS: u32 = 1000;

type WorkoutApp = App<LeafletMap, PageStore, BrowserSurface>;

enum MainMsg {
    PositionResolved(Result<Coordinates, GeolocationError>),
    MapClicked(Coordinates),
    Input(FormField, String),
    KindChanged(WorkoutKind),
    Submit,
    SelectWorkout(String),
    Reset,
    RestoreForm,
}

struct Model {
    app: WorkoutApp,
    map_container: HtmlElement,
    inputs: FormInputs,
    distance_ref: NodeRef,
    collapsing: bool,
    restore_form: Option<Timeout>,
}

impl Model {
    fn render_map(&self) -> Html {
        let node: &Node = &self.map_container.clone().into();
        Html::VRef(node.clone())
    }
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let map_container: HtmlElement = document()
            .create_element("div")
            .expect("failed to create map container")
            .unchecked_into();
        map_container.set_id("map");

        let mut app = App::new(AppConfig::default(), PageStore::open(), BrowserSurface::default());
        let loaded = app.load();
        info!(format!("Loaded {} workouts", loaded));

        let cb = ctx.link().callback(MainMsg::PositionResolved);
        BrowserGeolocation.request_position(Box::new(move |result| cb.emit(result)));

        Self {
            app,
            map_container,
            inputs: FormInputs::default(),
            distance_ref: NodeRef::default(),
            collapsing: false,
            restore_form: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::PositionResolved(result) => {
                let container = self.map_container.clone();
                let on_click = ctx.link().callback(MainMsg::MapClicked);
                self.app.position_resolved(result, move |center, config| {
                    LeafletMap::create(&container, center, config, on_click)
                });
            }
            MainMsg::MapClicked(at) => {
                self.app.open_form(at);
            }
            MainMsg::Input(field, value) => {
                self.inputs.set(field, value);
            }
            MainMsg::KindChanged(kind) => {
                self.inputs.kind = kind;
            }
            MainMsg::Submit => {
                if let Err(err) = self.app.submit(self.inputs.to_form()) {
                    info!(format!("Workout rejected: {}", err));
                }
            }
            MainMsg::SelectWorkout(id) => {
                self.app.move_to_workout(&id);
                return false;
            }
            MainMsg::Reset => {
                self.app.reset();
            }
            MainMsg::RestoreForm => {
                self.collapsing = false;
                self.restore_form = None;
            }
        }

        if self.app.surface_mut().take_cleared() {
            self.inputs.clear();
            self.collapsing = true;
            let link = ctx.link().clone();
            self.restore_form = Some(Timeout::new(FORM_RESTORE_MS, move || link.send_message(MainMsg::RestoreForm)));
        }

        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if self.app.surface_mut().take_focus_request() {
            if let Some(input) = self.distance_ref.cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let surface = self.app.surface();

        let on_input = link.callback(|(field, value): (FormField, String)| MainMsg::Input(field, value));
        let on_kind = link.callback(MainMsg::KindChanged);
        let on_submit = link.callback(|()| MainMsg::Submit);
        let on_select = link.callback(MainMsg::SelectWorkout);
        let on_reset = link.callback(|_: MouseEvent| MainMsg::Reset);

        html! {
            <>
                <div class="sidebar">
                    <ul class="workouts">
                        <WorkoutFormView
                            inputs={self.inputs.clone()}
                            open={surface.form_open}
                            collapsing={self.collapsing}
                            distance_ref={self.distance_ref.clone()}
                            {on_input}
                            {on_kind}
                            {on_submit}
                        />
                        <WorkoutList rows={surface.rows.clone()} {on_select} />
                    </ul>
                    <button class="reset-btn" onclick={on_reset}>{"Reset"}</button>
                </div>
                <div class="map">
                    {self.render_map()}
                </div>
            </>
        }
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
