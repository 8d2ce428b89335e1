use workout_tracker_lib::{ListEntry, WorkoutId, WorkoutKind};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct WorkoutListProps {
    pub entries: Vec<ListEntry>,
    pub on_select: Callback<WorkoutId>,
}

#[function_component]
pub fn WorkoutList(props: &WorkoutListProps) -> Html {
    html! {
        <ul class="workouts">
            { for props.entries.iter().map(|entry| entry_view(entry, &props.on_select)) }
        </ul>
    }
}

fn entry_view(entry: &ListEntry, on_select: &Callback<WorkoutId>) -> Html {
    let onclick = {
        let on_select = on_select.clone();
        let id = entry.id.clone();
        Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
    };

    let detail_icon = match entry.kind {
        WorkoutKind::Running => "🦶🏼",
        WorkoutKind::Cycling => "⛰",
    };

    html! {
        <li
            key={entry.id.to_string()}
            class={classes!("workout", format!("workout--{}", entry.kind.tag()))}
            data-id={entry.id.to_string()}
            {onclick}
        >
            <h2 class="workout__title">{&entry.title}</h2>
            <div class="workout__details">
                <span class="workout__icon">{entry.icon()}</span>
                <span class="workout__value">{entry.distance_km}</span>
                <span class="workout__unit">{"km"}</span>
            </div>
            <div class="workout__details">
                <span class="workout__icon">{"⏱"}</span>
                <span class="workout__value">{entry.duration_min}</span>
                <span class="workout__unit">{"min"}</span>
            </div>
            <div class="workout__details">
                <span class="workout__icon">{"⚡️"}</span>
                <span class="workout__value">{entry.metric_text()}</span>
                <span class="workout__unit">{entry.metric_unit}</span>
            </div>
            <div class="workout__details">
                <span class="workout__icon">{detail_icon}</span>
                <span class="workout__value">{entry.detail_text()}</span>
                <span class="workout__unit">{entry.detail_unit}</span>
            </div>
        </li>
    }
}
