//! Which details surface is visible, and why.
//!
//! Pointer, touch and keyboard input all funnel through one
//! [`PresentationController`], so at most one surface (hover tooltip or
//! modal) is ever open.

use crate::cache::{Details, DetailsCache, Lookup, DETAILS_FAILED};
use crate::events::{ActivationSource, Command};
use crate::focus::{FocusTarget, FocusTrap};
use crate::layout::{is_touch_layout, place_tooltip, Rect, Side};
use crate::timers::{Millis, TimerToken, Timers};
use shared_types::validate_external_id;
use std::collections::{HashMap, HashSet};

/// Grace period before an unpinned tooltip closes after the pointer leaves.
pub const HOVER_GRACE_MS: Millis = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceContent {
    /// Fetch in flight; renders a skeleton or placeholder.
    Loading,
    Ready(Details),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverSurface {
    pub id: String,
    pub pinned: bool,
    pub side: Side,
    pub content: SurfaceContent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalSurface {
    pub id: String,
    pub title: String,
    pub poster: Option<String>,
    pub content: SurfaceContent,
    restore_focus: Option<FocusTarget>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PresentationState {
    #[default]
    Closed,
    HoverShowing(HoverSurface),
    ModalShowing(ModalSurface),
}

/// Card data the modal needs before its details arrive.
#[derive(Debug, Clone, Copy)]
pub struct CardRef<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub poster: Option<&'a str>,
}

/// Where a finished detail fetch ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The surface moved on; result dropped.
    Stale,
    Hover,
    Modal,
}

#[derive(Debug)]
pub struct PresentationController {
    state: PresentationState,
    viewport_width: f64,
    card_rects: HashMap<String, Rect>,
    grace: Timers<String>,
    leave_timer: Option<TimerToken>,
    in_flight: HashSet<String>,
}

impl PresentationController {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            state: PresentationState::Closed,
            viewport_width,
            card_rects: HashMap::new(),
            grace: Timers::new(),
            leave_timer: None,
            in_flight: HashSet::new(),
        }
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    pub fn hover(&self) -> Option<&HoverSurface> {
        match &self.state {
            PresentationState::HoverShowing(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn modal(&self) -> Option<&ModalSurface> {
        match &self.state {
            PresentationState::ModalShowing(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn is_touch_layout(&self) -> bool {
        is_touch_layout(self.viewport_width)
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    pub fn card_measured(&mut self, id: &str, rect: Rect) {
        self.card_rects.insert(id.to_string(), rect);
        let viewport_width = self.viewport_width;
        if let PresentationState::HoverShowing(surface) = &mut self.state {
            if surface.id == id {
                surface.side = place_tooltip(rect, viewport_width);
            }
        }
    }

    fn pointer_ignored(&self) -> bool {
        self.is_touch_layout() || self.modal().is_some()
    }

    pub fn pointer_enter_card(
        &mut self,
        id: &str,
        now: Millis,
        cache: &mut DetailsCache,
        out: &mut Vec<Command>,
    ) {
        if self.pointer_ignored() {
            return;
        }
        self.cancel_leave_timer();
        if self.hover().is_some_and(|surface| surface.id == id) {
            return;
        }
        self.open_hover(id, false, now, cache, out);
    }

    pub fn pointer_enter_surface(&mut self, id: &str) {
        if self.hover().is_some_and(|surface| surface.id == id) {
            self.cancel_leave_timer();
        }
    }

    /// Pointer left a card or its tooltip.
    pub fn pointer_leave(&mut self, id: &str, now: Millis) {
        if self.pointer_ignored() {
            return;
        }
        let unpinned = self
            .hover()
            .is_some_and(|surface| surface.id == id && !surface.pinned);
        if unpinned {
            self.cancel_leave_timer();
            self.leave_timer = Some(self.grace.schedule(now, HOVER_GRACE_MS, id.to_string()));
        }
    }

    pub fn activate(
        &mut self,
        card: CardRef<'_>,
        source: ActivationSource,
        focused: Option<&FocusTarget>,
        now: Millis,
        cache: &mut DetailsCache,
        out: &mut Vec<Command>,
    ) {
        if self.modal().is_some() {
            return;
        }
        if self.is_touch_layout() || source == ActivationSource::Touch {
            self.open_modal(card, focused, now, cache, out);
            return;
        }

        self.cancel_leave_timer();
        if self.hover().is_some_and(|surface| surface.id == card.id) {
            tracing::debug!(id = card.id, "tooltip toggled off");
            self.state = PresentationState::Closed;
        } else {
            self.open_hover(card.id, true, now, cache, out);
        }
    }

    fn open_hover(
        &mut self,
        id: &str,
        pinned: bool,
        now: Millis,
        cache: &mut DetailsCache,
        out: &mut Vec<Command>,
    ) {
        let rect = self.card_rects.get(id).copied().unwrap_or_default();
        let side = place_tooltip(rect, self.viewport_width);
        let content = self.lookup(id, now, cache, out);
        self.state = PresentationState::HoverShowing(HoverSurface {
            id: id.to_string(),
            pinned,
            side,
            content,
        });
    }

    fn open_modal(
        &mut self,
        card: CardRef<'_>,
        focused: Option<&FocusTarget>,
        now: Millis,
        cache: &mut DetailsCache,
        out: &mut Vec<Command>,
    ) {
        self.cancel_leave_timer();
        let content = self.lookup(card.id, now, cache, out);
        self.state = PresentationState::ModalShowing(ModalSurface {
            id: card.id.to_string(),
            title: card.title.to_string(),
            poster: card.poster.map(str::to_string),
            content,
            restore_focus: focused.cloned(),
        });
        out.push(Command::SetScrollLock(true));
        out.push(Command::Focus(FocusTarget::ModalClose));
    }

    fn lookup(
        &mut self,
        id: &str,
        now: Millis,
        cache: &mut DetailsCache,
        out: &mut Vec<Command>,
    ) -> SurfaceContent {
        if let Err(error) = validate_external_id(Some(id)) {
            tracing::warn!(id, %error, "refusing details fetch for malformed id");
            return SurfaceContent::Ready(Details::Failed(DETAILS_FAILED.to_string()));
        }
        match cache.get_or_fetch(id, now) {
            Lookup::Ready(details) => SurfaceContent::Ready(details),
            Lookup::Fetch => {
                if self.in_flight.insert(id.to_string()) {
                    out.push(Command::FetchDetails { id: id.to_string() });
                }
                SurfaceContent::Loading
            }
        }
    }

    pub fn close_modal(&mut self, out: &mut Vec<Command>) {
        if self.modal().is_none() {
            return;
        }
        if let PresentationState::ModalShowing(modal) = std::mem::take(&mut self.state) {
            out.push(Command::SetScrollLock(false));
            if let Some(target) = modal.restore_focus {
                out.push(Command::Focus(target));
            }
        }
    }

    pub fn close_hover(&mut self) {
        self.cancel_leave_timer();
        if self.hover().is_some() {
            self.state = PresentationState::Closed;
        }
    }

    /// Escape closes whichever surface is open. Returns false if none was.
    pub fn escape(&mut self, out: &mut Vec<Command>) -> bool {
        match self.state {
            PresentationState::ModalShowing(_) => {
                self.close_modal(out);
                true
            }
            PresentationState::HoverShowing(_) => {
                self.close_hover();
                true
            }
            PresentationState::Closed => false,
        }
    }

    /// Focus trap for the open modal.
    pub fn tab(&self, focused: Option<&FocusTarget>, shift: bool) -> Option<FocusTarget> {
        self.modal()?;
        FocusTrap::new(vec![FocusTarget::ModalClose]).redirect(focused, shift)
    }

    /// Apply a finished fetch to the surface still showing `id`, if any.
    pub fn details_ready(&mut self, id: &str, details: Details) -> Applied {
        self.in_flight.remove(id);
        match &mut self.state {
            PresentationState::HoverShowing(surface) if surface.id == id => {
                surface.content = SurfaceContent::Ready(details);
                Applied::Hover
            }
            PresentationState::ModalShowing(modal) if modal.id == id => {
                if let Some(title) = details.title() {
                    modal.title = title.to_string();
                }
                modal.content = SurfaceContent::Ready(details);
                Applied::Modal
            }
            _ => {
                tracing::debug!(id, "dropping details for a surface that moved on");
                Applied::Stale
            }
        }
    }

    /// Results were replaced; their cards and tooltips are gone.
    pub fn results_replaced(&mut self) {
        self.close_hover();
        self.card_rects.clear();
    }

    pub fn advance(&mut self, now: Millis) -> bool {
        let mut changed = false;
        while let Some((token, id)) = self.grace.pop_due(now) {
            if self.leave_timer == Some(token) {
                self.leave_timer = None;
            }
            let closes = self
                .hover()
                .is_some_and(|surface| surface.id == id && !surface.pinned);
            if closes {
                self.state = PresentationState::Closed;
                changed = true;
            }
        }
        changed
    }

    pub fn next_due(&self) -> Option<Millis> {
        self.grace.next_due()
    }

    fn cancel_leave_timer(&mut self) {
        if let Some(token) = self.leave_timer.take() {
            self.grace.cancel(token);
        }
    }
}
