use crate::events::UiEvent;
use crate::focus::FocusTarget;
use dioxus::prelude::*;
use std::rc::Rc;

/// Labelled search input. Every keystroke is forwarded as a
/// [`UiEvent::QueryInput`]; debouncing happens in the session.
#[component]
pub fn SearchField(
    value: String,
    on_event: EventHandler<UiEvent>,
    #[props(default)] on_mounted: EventHandler<Rc<MountedData>>,
    #[props(default = "Search movies...".to_string())] placeholder: String,
) -> Element {
    rsx! {
        div { class: "search-bar",
            label { r#for: "searchInput", class: "visually-hidden", "Search movies" }
            input {
                id: "searchInput",
                r#type: "search",
                autocomplete: "off",
                placeholder: "{placeholder}",
                aria_controls: "resultsContainer",
                value: "{value}",
                oninput: move |evt: FormEvent| on_event.call(UiEvent::QueryInput(evt.value())),
                onfocus: move |_| on_event.call(UiEvent::FocusChanged(Some(FocusTarget::SearchInput))),
                onblur: move |_| on_event.call(UiEvent::FocusChanged(None)),
                onmounted: move |evt: MountedEvent| on_mounted.call(evt.data()),
            }
        }
    }
}
