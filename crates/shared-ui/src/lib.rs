//! Client core for the movie search page: input debouncing, the details
//! cache, result rendering, tooltip/modal presentation and screen reader
//! announcements, plus the Dioxus components that put them on screen.

pub mod announce;
pub mod cache;
pub mod components;
pub mod debounce;
pub mod events;
pub mod focus;
pub mod layout;
pub mod presentation;
pub mod render;
pub mod session;
pub mod timers;
pub mod view;

pub use components::*;
pub use events::{ActivationSource, Command, Dispatch, KeyInput, UiEvent};
pub use session::{Session, SessionConfig};
pub use view::{Hook, ViewNode};
