use crate::events::{ActivationSource, UiEvent};
use crate::focus::FocusTarget;
use crate::view::{ElementNode, Hook, Tag, ViewNode};
use dioxus::prelude::*;
use std::rc::Rc;

fn spread(node: &ElementNode) -> Vec<Attribute> {
    node.attributes
        .iter()
        .map(|(name, value)| Attribute::new(*name, value.clone(), None, false))
        .collect()
}

/// Materializes a renderer [`ViewNode`] and reports input on hooked elements.
///
/// Card activation always suppresses the browser default, so the handlers
/// here call `prevent_default` themselves; window-level keys are handled by
/// the page.
#[component]
pub fn ViewTree(
    node: ViewNode,
    on_event: EventHandler<UiEvent>,
    on_mounted: EventHandler<(Hook, Rc<MountedData>)>,
) -> Element {
    let element = match node {
        ViewNode::Text(value) => return rsx! { "{value}" },
        ViewNode::Element(element) => element,
    };

    let attrs = spread(&element);
    let kids = rsx! {
        for child in element.children.iter().cloned() {
            ViewTree { node: child, on_event, on_mounted }
        }
    };

    match element.hook.clone() {
        Some(Hook::Card(id)) => card(id, attrs, kids, on_event, on_mounted),
        Some(Hook::Surface(id)) => {
            let enter_id = id.clone();
            rsx! {
                div {
                    onmouseenter: move |_| on_event.call(UiEvent::SurfacePointerEnter(enter_id.clone())),
                    onmouseleave: move |_| on_event.call(UiEvent::SurfacePointerLeave(id.clone())),
                    ..attrs,
                    {kids}
                }
            }
        }
        Some(Hook::Poster(id)) => rsx! {
            img {
                onerror: move |_| on_event.call(UiEvent::PosterFailed(id.clone())),
                ..attrs,
            }
        },
        Some(Hook::ModalClose) => rsx! {
            button {
                onclick: move |evt| {
                    evt.stop_propagation();
                    on_event.call(UiEvent::ModalDismissed);
                },
                onfocus: move |_| on_event.call(UiEvent::FocusChanged(Some(FocusTarget::ModalClose))),
                onblur: move |_| on_event.call(UiEvent::FocusChanged(None)),
                onmounted: move |evt: MountedEvent| on_mounted.call((Hook::ModalClose, evt.data())),
                ..attrs,
                {kids}
            }
        },
        Some(Hook::Overlay) => rsx! {
            div {
                onclick: move |_| on_event.call(UiEvent::ModalDismissed),
                ..attrs,
                {kids}
            }
        },
        Some(Hook::Modal) => rsx! {
            div {
                onclick: move |evt| evt.stop_propagation(),
                ..attrs,
                {kids}
            }
        },
        None => plain(element.tag, attrs, kids),
    }
}

fn card(
    id: String,
    attrs: Vec<Attribute>,
    kids: Element,
    on_event: EventHandler<UiEvent>,
    on_mounted: EventHandler<(Hook, Rc<MountedData>)>,
) -> Element {
    let activate = move |id: String, source: ActivationSource| {
        on_event.call(UiEvent::CardActivated { id, source });
    };
    let (click_id, key_id, touch_id, enter_id, leave_id, focus_id, mount_id) = (
        id.clone(),
        id.clone(),
        id.clone(),
        id.clone(),
        id.clone(),
        id.clone(),
        id,
    );

    rsx! {
        button {
            onclick: move |evt| {
                evt.prevent_default();
                evt.stop_propagation();
                activate(click_id.clone(), ActivationSource::Pointer);
            },
            onkeydown: move |evt: KeyboardEvent| {
                let activates = match evt.key() {
                    Key::Enter => true,
                    Key::Character(ref c) => c == " ",
                    _ => false,
                };
                if activates {
                    evt.prevent_default();
                    activate(key_id.clone(), ActivationSource::Keyboard);
                }
            },
            ontouchend: move |evt| {
                evt.prevent_default();
                activate(touch_id.clone(), ActivationSource::Touch);
            },
            onmouseenter: move |_| on_event.call(UiEvent::CardPointerEnter(enter_id.clone())),
            onmouseleave: move |_| on_event.call(UiEvent::CardPointerLeave(leave_id.clone())),
            onfocus: move |_| on_event.call(UiEvent::FocusChanged(Some(FocusTarget::Card(focus_id.clone())))),
            onblur: move |_| on_event.call(UiEvent::FocusChanged(None)),
            onmounted: move |evt: MountedEvent| on_mounted.call((Hook::Card(mount_id.clone()), evt.data())),
            ..attrs,
            {kids}
        }
    }
}

fn plain(tag: Tag, attrs: Vec<Attribute>, kids: Element) -> Element {
    match tag {
        Tag::Div => rsx! { div { ..attrs, {kids} } },
        Tag::Span => rsx! { span { ..attrs, {kids} } },
        Tag::Strong => rsx! { strong { ..attrs, {kids} } },
        Tag::Img => rsx! { img { ..attrs } },
        Tag::H2 => rsx! { h2 { ..attrs, {kids} } },
        Tag::P => rsx! { p { ..attrs, {kids} } },
        Tag::Button => rsx! { button { ..attrs, {kids} } },
    }
}
