use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::{FormInput, WorkoutKind};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WorkoutFormProps {
    pub visible: bool,
    /// Focus request counter, every change focuses the distance field.
    pub focus: u32,
    pub on_submit: Callback<FormInput>,
}

/// Sidebar form for a new workout. Field state is local; the parent remounts
/// the form (via its key) to clear it.
#[function_component]
pub fn WorkoutForm(props: &WorkoutFormProps) -> Html {
    let kind = use_state(|| WorkoutKind::Running);
    let distance = use_state(String::new);
    let duration = use_state(String::new);
    let cadence = use_state(String::new);
    let elevation = use_state(String::new);
    let distance_ref = use_node_ref();

    {
        let distance_ref = distance_ref.clone();
        let visible = props.visible;
        use_effect_with(props.focus, move |focus| {
            if visible && *focus > 0 {
                if let Some(input) = distance_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
        });
    }

    let on_kind_change = {
        let kind = kind.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(selected) = select.value().parse() {
                kind.set(selected);
            }
        })
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        let (kind, distance, duration, cadence, elevation) =
            (kind.clone(), distance.clone(), duration.clone(), cadence.clone(), elevation.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(FormInput {
                kind: kind.tag().to_owned(),
                distance: (*distance).clone(),
                duration: (*duration).clone(),
                cadence: (*cadence).clone(),
                elevation: (*elevation).clone(),
            });
        })
    };

    let running = *kind == WorkoutKind::Running;

    html! {
        <form class={classes!("form", (!props.visible).then_some("hidden"))} onsubmit={on_submit}>
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" onchange={on_kind_change}>
                    <option value="running" selected={running}>{"Running"}</option>
                    <option value="cycling" selected={!running}>{"Cycling"}</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">{"Distance"}</label>
                <input
                    ref={distance_ref}
                    class="form__input form__input--distance"
                    placeholder="km"
                    value={(*distance).clone()}
                    oninput={bind(&distance)}
                />
            </div>
            <div class="form__row">
                <label class="form__label">{"Duration"}</label>
                <input
                    class="form__input form__input--duration"
                    placeholder="min"
                    value={(*duration).clone()}
                    oninput={bind(&duration)}
                />
            </div>
            <div class={classes!("form__row", (!running).then_some("form__row--hidden"))}>
                <label class="form__label">{"Cadence"}</label>
                <input
                    class="form__input form__input--cadence"
                    placeholder="step/min"
                    value={(*cadence).clone()}
                    oninput={bind(&cadence)}
                />
            </div>
            <div class={classes!("form__row", running.then_some("form__row--hidden"))}>
                <label class="form__label">{"Elev Gain"}</label>
                <input
                    class="form__input form__input--elevation"
                    placeholder="meters"
                    value={(*elevation).clone()}
                    oninput={bind(&elevation)}
                />
            </div>
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}

fn bind(field: &UseStateHandle<String>) -> Callback<InputEvent> {
    let field = field.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        field.set(input.value());
    })
}
