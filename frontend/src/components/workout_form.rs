use mapty_lib::{form::WorkoutForm, WorkoutKind};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

/// Raw input values, kept as typed so a rejected submission leaves them intact.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInputs {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl Default for FormInputs {
    fn default() -> Self {
        Self {
            kind: WorkoutKind::Running,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
        }
    }
}

impl FormInputs {
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Distance => self.distance = value,
            FormField::Duration => self.duration = value,
            FormField::Cadence => self.cadence = value,
            FormField::Elevation => self.elevation = value,
        }
    }

    /// Empties the inputs but keeps the chosen kind, like a browser form does.
    pub fn clear(&mut self) {
        *self = Self {
            kind: self.kind,
            ..Self::default()
        };
    }

    pub fn to_form(&self) -> WorkoutForm {
        WorkoutForm::from_inputs(self.kind, &self.distance, &self.duration, &self.cadence, &self.elevation)
    }
}

#[derive(PartialEq, Properties, Clone)]
pub struct WorkoutFormProps {
    pub inputs: FormInputs,
    pub open: bool,
    /// Set right after hiding, so the form vanishes without its slide animation.
    pub collapsing: bool,
    pub distance_ref: NodeRef,
    pub on_input: Callback<(FormField, String)>,
    pub on_kind: Callback<WorkoutKind>,
    pub on_submit: Callback<()>,
}

#[function_component]
pub fn WorkoutFormView(props: &WorkoutFormProps) -> Html {
    let inputs = &props.inputs;

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let onchange = {
        let on_kind = props.on_kind.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(kind) = WorkoutKind::parse(&select.value()) {
                on_kind.emit(kind);
            }
        })
    };

    let input = |field: FormField| {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit((field, input.value()));
        })
    };

    let running = inputs.kind == WorkoutKind::Running;
    let style = props.collapsing.then_some("display: none");

    html! {
        <form class={classes!("form", (!props.open).then_some("hidden"))} {style} {onsubmit}>
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" {onchange}>
                    <option value="running" selected={running}>{"Running"}</option>
                    <option value="cycling" selected={!running}>{"Cycling"}</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">{"Distance"}</label>
                <input class="form__input form__input--distance" placeholder="km" ref={props.distance_ref.clone()}
                    value={inputs.distance.clone()} oninput={input(FormField::Distance)} />
            </div>
            <div class="form__row">
                <label class="form__label">{"Duration"}</label>
                <input class="form__input form__input--duration" placeholder="min"
                    value={inputs.duration.clone()} oninput={input(FormField::Duration)} />
            </div>
            <div class={classes!("form__row", (!running).then_some("form__row--hidden"))}>
                <label class="form__label">{"Cadence"}</label>
                <input class="form__input form__input--cadence" placeholder="step/min"
                    value={inputs.cadence.clone()} oninput={input(FormField::Cadence)} />
            </div>
            <div class={classes!("form__row", running.then_some("form__row--hidden"))}>
                <label class="form__label">{"Elev Gain"}</label>
                <input class="form__input form__input--elevation" placeholder="meters"
                    value={inputs.elevation.clone()} oninput={input(FormField::Elevation)} />
            </div>
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_cycling() -> FormInputs {
        let mut inputs = FormInputs {
            kind: WorkoutKind::Cycling,
            ..FormInputs::default()
        };
        inputs.set(FormField::Distance, "27".into());
        inputs.set(FormField::Duration, "95".into());
        inputs.set(FormField::Elevation, "523".into());
        inputs
    }

    #[test]
    fn set_fills_the_matching_field() {
        let mut inputs = filled_cycling();
        inputs.set(FormField::Cadence, "170".into());

        assert_eq!(inputs.distance, "27");
        assert_eq!(inputs.duration, "95");
        assert_eq!(inputs.cadence, "170");
        assert_eq!(inputs.elevation, "523");
    }

    #[test]
    fn clear_keeps_the_kind() {
        let mut inputs = filled_cycling();
        inputs.clear();

        assert_eq!(inputs.kind, WorkoutKind::Cycling);
        assert_eq!(inputs, FormInputs { kind: WorkoutKind::Cycling, ..FormInputs::default() });
    }

    #[test]
    fn to_form_parses_the_inputs() {
        let form = filled_cycling().to_form();
        assert_eq!(form.kind, WorkoutKind::Cycling);
        assert_eq!(form.distance_km, 27.);
        assert_eq!(form.duration_min, 95.);
        assert_eq!(form.elevation_gain_m, 523.);
        assert!(form.cadence_spm.is_nan());

        let mut inputs = FormInputs::default();
        inputs.set(FormField::Distance, "five".into());
        assert!(inputs.to_form().distance_km.is_nan());
        assert_eq!(inputs.to_form().kind, WorkoutKind::Running);
    }
}
