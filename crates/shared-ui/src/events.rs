use crate::focus::FocusTarget;
use crate::layout::Rect;

/// How a card was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationSource {
    Pointer,
    /// Enter or Space on a focused card.
    Keyboard,
    /// A tap; always opens the modal.
    Touch,
}

/// Keys the session reacts to outside card activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Escape,
    Tab { shift: bool },
}

/// Input delivered by the UI runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    QueryInput(String),
    CardPointerEnter(String),
    CardPointerLeave(String),
    SurfacePointerEnter(String),
    SurfacePointerLeave(String),
    CardActivated {
        id: String,
        source: ActivationSource,
    },
    CardMeasured {
        id: String,
        rect: Rect,
    },
    PosterFailed(String),
    ViewportResized(f64),
    FocusChanged(Option<FocusTarget>),
    /// Close button or overlay click.
    ModalDismissed,
    Key(KeyInput),
}

/// Side effect the runtime must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchSearch { ticket: u64, query: String },
    FetchDetails { id: String },
    Focus(FocusTarget),
    SetScrollLock(bool),
}

/// Outcome of handling one [`UiEvent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatch {
    pub commands: Vec<Command>,
    /// The runtime should suppress the browser's default action.
    pub prevent_default: bool,
}
