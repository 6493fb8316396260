use mapty_lib::view::WorkoutRow;
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct WorkoutListProps {
    pub rows: Vec<WorkoutRow>,
    pub on_select: Callback<String>,
}

#[function_component]
pub fn WorkoutList(props: &WorkoutListProps) -> Html {
    html! { <>
        { for props.rows.iter().map(|row| html! {
            <WorkoutItem row={row.clone()} on_select={props.on_select.clone()} />
        }) }
    </> }
}

#[derive(PartialEq, Properties, Clone)]
struct WorkoutItemProps {
    row: WorkoutRow,
    on_select: Callback<String>,
}

#[function_component]
fn WorkoutItem(props: &WorkoutItemProps) -> Html {
    let row = &props.row;

    let onclick = {
        let id = row.id.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |_| on_select.emit(id.clone()))
    };

    html! {
        <li class={classes!("workout", format!("workout--{}", row.kind.as_str()))} data-id={row.id.clone()} {onclick}>
            <h2 class="workout__title">{&row.title}</h2>
            { for row.details.iter().map(|detail| html! {
                <div class="workout__details">
                    <span class="workout__icon">{detail.icon}</span>
                    <span class="workout__value">{&detail.value}</span>
                    <span class="workout__unit">{detail.unit}</span>
                </div>
            }) }
        </li>
    }
}
