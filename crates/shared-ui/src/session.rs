//! One search page: debounced input, results, details surfaces, cache and
//! announcements wired together.
//!
//! The session never performs I/O. It consumes [`UiEvent`]s and fetch
//! completions, and hands back [`Command`]s for the runtime to execute.

use crate::announce::Announcer;
use crate::cache::DetailsCache;
use crate::debounce::Debouncer;
use crate::events::{Command, Dispatch, KeyInput, UiEvent};
use crate::focus::FocusTarget;
use crate::presentation::{Applied, CardRef, PresentationController, SurfaceContent};
use crate::render::{self, ResultsArea, NO_RESULTS_TEXT, SEARCH_FAILED_TEXT};
use crate::timers::{Millis, Timers};
use crate::view::{el, Tag, ViewNode};
use shared_types::{
    validate_search_query, AppError, AppErrorKind, DetailRecord, SearchResponse, MIN_QUERY_CHARS,
};
use std::collections::HashSet;

/// Timeout message used when the proxy's envelope is unreadable.
pub const TIMEOUT_TEXT: &str = "Request timeout. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub viewport_width: f64,
    /// Details cache entry lifetime; `None` keeps entries for the session.
    pub cache_ttl: Option<Millis>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1024.0,
            cache_ttl: None,
        }
    }
}

#[derive(Debug)]
enum SessionTimer {
    RunSearch(String),
}

/// User-facing text for a failed search.
pub fn search_failure_message(error: &AppError) -> String {
    match error.kind {
        AppErrorKind::Timeout if error.message.is_empty() => TIMEOUT_TEXT.to_string(),
        AppErrorKind::Timeout | AppErrorKind::RateLimited | AppErrorKind::Validation => {
            error.message.clone()
        }
        _ => SEARCH_FAILED_TEXT.to_string(),
    }
}

fn results_announcement(count: usize) -> String {
    match count {
        1 => "1 movie found".to_string(),
        n => format!("{n} movies found"),
    }
}

#[derive(Debug)]
pub struct Session {
    debouncer: Debouncer,
    timers: Timers<SessionTimer>,
    results: ResultsArea,
    presentation: PresentationController,
    cache: DetailsCache,
    announcer: Announcer,
    focused: Option<FocusTarget>,
    failed_posters: HashSet<String>,
    latest_ticket: u64,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            debouncer: Debouncer::default(),
            timers: Timers::new(),
            results: ResultsArea::default(),
            presentation: PresentationController::new(config.viewport_width),
            cache: DetailsCache::with_ttl(config.cache_ttl),
            announcer: Announcer::new(),
            focused: None,
            failed_posters: HashSet::new(),
            latest_ticket: 0,
        }
    }

    pub fn results(&self) -> &ResultsArea {
        &self.results
    }

    pub fn presentation(&self) -> &PresentationController {
        &self.presentation
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &DetailsCache {
        &self.cache
    }

    pub fn announcement(&self) -> &str {
        self.announcer.text()
    }

    pub fn focused(&self) -> Option<&FocusTarget> {
        self.focused.as_ref()
    }

    pub fn dispatch(&mut self, event: UiEvent, now: Millis) -> Dispatch {
        let mut out = Vec::new();
        let mut prevent_default = false;

        match event {
            UiEvent::QueryInput(raw) => {
                let query = raw.trim().to_string();
                self.debouncer
                    .trigger(&mut self.timers, now, SessionTimer::RunSearch(query));
            }
            UiEvent::CardPointerEnter(id) => {
                self.presentation
                    .pointer_enter_card(&id, now, &mut self.cache, &mut out);
            }
            UiEvent::CardPointerLeave(id) | UiEvent::SurfacePointerLeave(id) => {
                self.presentation.pointer_leave(&id, now);
            }
            UiEvent::SurfacePointerEnter(id) => self.presentation.pointer_enter_surface(&id),
            UiEvent::CardActivated { id, source } => {
                prevent_default = true;
                if let Some(item) = self.results.find(&id) {
                    let poster = if self.failed_posters.contains(&id) {
                        None
                    } else {
                        item.poster.url()
                    };
                    let card = CardRef {
                        id: &item.external_id,
                        title: &item.title,
                        poster,
                    };
                    let modal_was_open = self.presentation.modal().is_some();
                    self.presentation.activate(
                        card,
                        source,
                        self.focused.as_ref(),
                        now,
                        &mut self.cache,
                        &mut out,
                    );
                    // A cache hit fills the modal without a fetch completing.
                    let cached = self
                        .presentation
                        .modal()
                        .is_some_and(|modal| matches!(modal.content, SurfaceContent::Ready(_)));
                    if !modal_was_open && cached {
                        self.announce_modal_details(now);
                    }
                }
            }
            UiEvent::CardMeasured { id, rect } => self.presentation.card_measured(&id, rect),
            UiEvent::PosterFailed(id) => {
                tracing::debug!(id = %id, "poster failed to load");
                self.failed_posters.insert(id);
            }
            UiEvent::ViewportResized(width) => self.presentation.set_viewport_width(width),
            UiEvent::FocusChanged(target) => self.focused = target,
            UiEvent::ModalDismissed => self.presentation.close_modal(&mut out),
            UiEvent::Key(KeyInput::Escape) => {
                prevent_default = self.presentation.escape(&mut out);
            }
            UiEvent::Key(KeyInput::Tab { shift }) => {
                if let Some(target) = self.presentation.tab(self.focused.as_ref(), shift) {
                    prevent_default = true;
                    out.push(Command::Focus(target));
                }
            }
        }

        Dispatch {
            commands: out,
            prevent_default,
        }
    }

    /// Fire every timer due at `now`.
    pub fn advance(&mut self, now: Millis) -> Vec<Command> {
        let mut out = Vec::new();
        while let Some((token, SessionTimer::RunSearch(query))) = self.timers.pop_due(now) {
            if self.debouncer.settle(token) {
                self.run_search(query, now, &mut out);
            }
        }
        self.presentation.advance(now);
        self.announcer.advance(now);
        out
    }

    /// Earliest time [`Session::advance`] has work to do.
    pub fn next_due(&self) -> Option<Millis> {
        [
            self.timers.next_due(),
            self.presentation.next_due(),
            self.announcer.next_due(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn run_search(&mut self, query: String, now: Millis, out: &mut Vec<Command>) {
        self.presentation.results_replaced();
        self.failed_posters.clear();
        // any in-flight search is superseded
        self.latest_ticket += 1;

        if query.chars().count() < MIN_QUERY_CHARS {
            self.results.clear();
            return;
        }

        match validate_search_query(Some(&query)) {
            Ok(query) => {
                self.results.show_loading();
                out.push(Command::FetchSearch {
                    ticket: self.latest_ticket,
                    query,
                });
            }
            Err(error) => {
                tracing::debug!(%error, "search query rejected");
                self.results.display_error(error.message());
                self.announcer.announce(now, error.message());
            }
        }
    }

    pub fn search_completed(
        &mut self,
        ticket: u64,
        outcome: Result<SearchResponse, AppError>,
        now: Millis,
    ) {
        if ticket != self.latest_ticket {
            tracing::debug!(ticket, latest = self.latest_ticket, "dropping superseded search");
            return;
        }

        self.results.hide_loading();
        match outcome {
            Ok(response) if !response.is_empty_result() => {
                let count = response.items.len();
                self.results.display_results(response.items);
                self.announcer.announce(now, results_announcement(count));
            }
            Ok(_) => {
                self.results.display_no_results();
                self.announcer.announce(now, NO_RESULTS_TEXT);
            }
            Err(error) => {
                tracing::error!(%error, "search failed");
                let message = search_failure_message(&error);
                self.results.display_error(message.clone());
                self.announcer.announce(now, message);
            }
        }
    }

    pub fn details_completed(
        &mut self,
        id: &str,
        outcome: Result<DetailRecord, AppError>,
        now: Millis,
    ) {
        let details = self.cache.complete(id, outcome, now);
        if self.presentation.details_ready(id, details) == Applied::Modal {
            self.announce_modal_details(now);
        }
    }

    fn announce_modal_details(&mut self, now: Millis) {
        if let Some(modal) = self.presentation.modal() {
            let message = format!("Details loaded for {}", modal.title);
            self.announcer.announce(now, message);
        }
    }

    pub fn view(&self) -> ViewNode {
        let mut page = el(Tag::Div)
            .class("search-session")
            .child(render::loading_indicator(self.results.is_loading()))
            .child(render::results_area(
                &self.results,
                self.presentation.hover(),
                &self.failed_posters,
            ));
        page = page.children(render::bottom_sheet(self.presentation.modal()));
        page.child(render::live_region(self.announcer.text())).into()
    }
}
