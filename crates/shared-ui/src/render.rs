//! Pure view builders for the results area, details surfaces, modal and
//! live region. Every string from the network is emitted as a text node.

use crate::cache::Details;
use crate::presentation::{HoverSurface, ModalSurface, SurfaceContent};
use crate::view::{el, text, Hook, Tag, ViewNode};
use shared_types::{DetailField, SearchResultItem};
use std::collections::HashSet;

pub const SKELETON_CARD_COUNT: usize = 8;
pub const LOADING_TEXT: &str = "Loading movies...";
pub const NO_RESULTS_TEXT: &str = "No results found. Try a different search term.";
pub const SEARCH_FAILED_TEXT: &str = "Error searching movies. Please try again.";
pub const NO_DETAILS_TEXT: &str = "No details available";
pub const NO_IMAGE_TEXT: &str = "No Image";

/// Fields of the tooltip, in display order. Plot follows separately.
pub const COMPACT_FIELDS: [DetailField; 7] = [
    DetailField::Year,
    DetailField::Rated,
    DetailField::Runtime,
    DetailField::Genre,
    DetailField::Director,
    DetailField::Actors,
    DetailField::ImdbRating,
];

/// Fields of the modal, in display order. Plot follows separately.
pub const EXPANDED_FIELDS: [DetailField; 14] = [
    DetailField::Year,
    DetailField::Rated,
    DetailField::Released,
    DetailField::Runtime,
    DetailField::Genre,
    DetailField::Director,
    DetailField::Writer,
    DetailField::Actors,
    DetailField::Language,
    DetailField::Country,
    DetailField::Awards,
    DetailField::ImdbRating,
    DetailField::ImdbVotes,
    DetailField::BoxOffice,
];

// ---------------------------------------------------------------------------
// Results area
// ---------------------------------------------------------------------------

/// What the results container currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsArea {
    #[default]
    Empty,
    /// Indicator visible, skeleton cards in place of results.
    Loading,
    Results(Vec<SearchResultItem>),
    NoResults,
    Error(String),
}

impl ResultsArea {
    pub fn show_loading(&mut self) {
        *self = ResultsArea::Loading;
    }

    /// Drop the indicator and skeletons. No-op unless loading.
    pub fn hide_loading(&mut self) {
        if self.is_loading() {
            *self = ResultsArea::Empty;
        }
    }

    pub fn display_results(&mut self, items: Vec<SearchResultItem>) {
        *self = ResultsArea::Results(items);
    }

    pub fn display_no_results(&mut self) {
        *self = ResultsArea::NoResults;
    }

    pub fn display_error(&mut self, message: impl Into<String>) {
        *self = ResultsArea::Error(message.into());
    }

    pub fn clear(&mut self) {
        *self = ResultsArea::Empty;
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResultsArea::Loading)
    }

    pub fn items(&self) -> &[SearchResultItem] {
        match self {
            ResultsArea::Results(items) => items,
            _ => &[],
        }
    }

    pub fn find(&self, id: &str) -> Option<&SearchResultItem> {
        self.items().iter().find(|item| item.external_id == id)
    }
}

pub fn loading_indicator(visible: bool) -> ViewNode {
    let class = if visible {
        "loading-indicator"
    } else {
        "loading-indicator hidden"
    };
    el(Tag::Div)
        .id("loadingIndicator")
        .class(class)
        .attr("aria-hidden", (!visible).to_string())
        .text(LOADING_TEXT)
        .into()
}

pub fn skeleton_card() -> ViewNode {
    el(Tag::Div)
        .class("movie-card-wrapper")
        .attr("aria-hidden", "true")
        .child(
            el(Tag::Div)
                .class("movie-card skeleton-card")
                .child(el(Tag::Div).class("poster skeleton skeleton-poster"))
                .child(el(Tag::Div).class("title skeleton skeleton-title"))
                .child(el(Tag::Div).class("type skeleton skeleton-type")),
        )
        .into()
}

pub fn skeleton_cards() -> Vec<ViewNode> {
    (0..SKELETON_CARD_COUNT).map(|_| skeleton_card()).collect()
}

fn message(value: &str) -> ViewNode {
    el(Tag::Div)
        .class("no-results")
        .attr("role", "status")
        .text(value)
        .into()
}

pub fn no_results() -> ViewNode {
    message(NO_RESULTS_TEXT)
}

pub fn search_error(text_value: &str) -> ViewNode {
    message(text_value)
}

fn card_poster(item: &SearchResultItem, failed: bool) -> ViewNode {
    match item.poster.url() {
        Some(url) if !failed => el(Tag::Img)
            .class("poster")
            .attr("src", url)
            .attr("alt", format!("Poster for {}", item.title))
            .attr("aria-hidden", "false")
            .attr("loading", "lazy")
            .hook(Hook::Poster(item.external_id.clone()))
            .into(),
        _ => el(Tag::Div)
            .class("poster poster-placeholder")
            .attr("aria-hidden", "true")
            .text(NO_IMAGE_TEXT)
            .into(),
    }
}

fn surface_dom_id(id: &str) -> String {
    format!("details-{id}")
}

/// Hover tooltip next to a card. Hidden unless `hover` shows this card.
pub fn details_surface(id: &str, hover: Option<&HoverSurface>) -> ViewNode {
    let open = hover.filter(|surface| surface.id == id);
    let mut class = String::from("movie-details");
    if let Some(surface) = open {
        class.push_str(" visible ");
        class.push_str(surface.side.class());
    }

    let content = match open.map(|surface| &surface.content) {
        Some(SurfaceContent::Loading) => details_skeleton(),
        Some(SurfaceContent::Ready(details)) => format_details_compact(details),
        None => Vec::new(),
    };

    el(Tag::Div)
        .id(surface_dom_id(id))
        .class(class)
        .attr("role", "tooltip")
        .attr("aria-live", "polite")
        .attr("aria-atomic", "true")
        .attr("aria-hidden", open.is_none().to_string())
        .attr("data-imdb-id", id)
        .hook(Hook::Surface(id.to_string()))
        .children(content)
        .into()
}

/// Card wrapper: activatable card plus its details surface.
pub fn result_card(
    item: &SearchResultItem,
    hover: Option<&HoverSurface>,
    poster_failed: bool,
) -> ViewNode {
    let id = item.external_id.as_str();
    let expanded = hover.is_some_and(|surface| surface.id == id);

    let card = el(Tag::Button)
        .class("movie-card")
        .attr("type", "button")
        .attr("tabindex", "0")
        .attr(
            "aria-label",
            format!("View details for {}, {}", item.title, item.kind),
        )
        .attr("aria-describedby", surface_dom_id(id))
        .attr("aria-expanded", expanded.to_string())
        .attr("data-imdb-id", id)
        .hook(Hook::Card(id.to_string()))
        .child(card_poster(item, poster_failed))
        .child(el(Tag::Div).class("title").text(item.title.as_str()))
        .child(el(Tag::Div).class("type").text(item.kind.as_str()));

    el(Tag::Div)
        .class("movie-card-wrapper")
        .child(card)
        .child(details_surface(id, hover))
        .into()
}

pub fn results_area(
    area: &ResultsArea,
    hover: Option<&HoverSurface>,
    failed_posters: &HashSet<String>,
) -> ViewNode {
    let children = match area {
        ResultsArea::Empty => Vec::new(),
        ResultsArea::Loading => skeleton_cards(),
        ResultsArea::Results(items) => items
            .iter()
            .map(|item| result_card(item, hover, failed_posters.contains(&item.external_id)))
            .collect(),
        ResultsArea::NoResults => vec![no_results()],
        ResultsArea::Error(text_value) => vec![search_error(text_value)],
    };

    el(Tag::Div)
        .id("resultsContainer")
        .class("results")
        .attr("aria-busy", area.is_loading().to_string())
        .children(children)
        .into()
}

// ---------------------------------------------------------------------------
// Details formatting
// ---------------------------------------------------------------------------

/// Tooltip body: labeled rows, then plot.
pub fn format_details_compact(details: &Details) -> Vec<ViewNode> {
    let record = match details {
        Details::Failed(error) => {
            return vec![el(Tag::Div).class("detail-error").text(error.as_str()).into()]
        }
        Details::Loaded(record) => record,
    };

    let mut nodes: Vec<ViewNode> = COMPACT_FIELDS
        .iter()
        .filter_map(|field| record.get(*field).map(|value| (field.label(), value)))
        .map(|(label, value)| {
            el(Tag::Div)
                .class("detail-row")
                .child(el(Tag::Strong).text(format!("{label}:")))
                .text(format!(" {value}"))
                .into()
        })
        .collect();

    if let Some(plot) = record.get(DetailField::Plot) {
        nodes.push(el(Tag::Div).class("plot").text(plot).into());
    }

    if nodes.is_empty() {
        nodes.push(el(Tag::Div).class("detail-row").text(NO_DETAILS_TEXT).into());
    }
    nodes
}

fn detail_section(label: &str, value: &str) -> ViewNode {
    el(Tag::Div)
        .class("detail-section")
        .child(el(Tag::Span).class("detail-label").text(format!("{label}:")))
        .child(el(Tag::Div).class("detail-value").text(value))
        .into()
}

fn value_only_section(value: &str) -> ViewNode {
    el(Tag::Div)
        .class("detail-section")
        .child(el(Tag::Div).class("detail-value").text(value))
        .into()
}

/// Modal body: poster, labeled blocks, plot last.
pub fn format_details_expanded(details: &Details) -> Vec<ViewNode> {
    let record = match details {
        Details::Failed(error) => return vec![value_only_section(error)],
        Details::Loaded(record) => record,
    };

    let mut nodes = Vec::new();
    if let Some(poster) = record.get(DetailField::Poster) {
        let title = record.get(DetailField::Title).unwrap_or_default();
        nodes.push(
            el(Tag::Img)
                .class("poster-large")
                .attr("src", poster)
                .attr("alt", format!("Poster for {title}"))
                .into(),
        );
    }

    nodes.extend(
        EXPANDED_FIELDS
            .iter()
            .filter_map(|field| record.get(*field).map(|value| detail_section(field.label(), value))),
    );

    if let Some(plot) = record.get(DetailField::Plot) {
        nodes.push(detail_section(DetailField::Plot.label(), plot));
    }

    if nodes.is_empty() {
        nodes.push(value_only_section(NO_DETAILS_TEXT));
    }
    nodes
}

/// Placeholder rows shown while a tooltip fetch is in flight.
pub fn details_skeleton() -> Vec<ViewNode> {
    let mut nodes: Vec<ViewNode> = (0..6)
        .map(|index| {
            let value_class = if index >= 3 {
                "skeleton skeleton-value skeleton-value-long"
            } else {
                "skeleton skeleton-value"
            };
            el(Tag::Div)
                .class("detail-row")
                .child(el(Tag::Strong).class("skeleton skeleton-label"))
                .child(el(Tag::Span).class(value_class))
                .into()
        })
        .collect();

    nodes.push(
        el(Tag::Div)
            .class("plot")
            .attr("style", "margin-top: 15px")
            .child(el(Tag::Div).class("skeleton skeleton-line"))
            .child(el(Tag::Div).class("skeleton skeleton-line"))
            .child(el(Tag::Div).class("skeleton skeleton-line skeleton-line-short"))
            .into(),
    );
    nodes
}

/// Modal body shown before details arrive.
pub fn modal_placeholder(title: &str, poster: Option<&str>) -> Vec<ViewNode> {
    let node = match poster {
        Some(url) => el(Tag::Img)
            .class("poster-large")
            .attr("src", url)
            .attr("alt", format!("Poster for {title}")),
        None => el(Tag::Div)
            .class("poster-large poster-placeholder")
            .attr("role", "img")
            .attr("aria-label", "No poster available")
            .text(NO_IMAGE_TEXT),
    };
    vec![node.into()]
}

// ---------------------------------------------------------------------------
// Modal and live region
// ---------------------------------------------------------------------------

/// Overlay and bottom sheet, open when `modal` is set.
pub fn bottom_sheet(modal: Option<&ModalSurface>) -> Vec<ViewNode> {
    let open = modal.is_some();

    let overlay = el(Tag::Div)
        .id("overlay")
        .class(if open { "overlay visible" } else { "overlay" })
        .attr("aria-hidden", (!open).to_string())
        .hook(Hook::Overlay);

    let (title, content) = match modal {
        Some(surface) => {
            let content = match &surface.content {
                SurfaceContent::Loading => {
                    modal_placeholder(&surface.title, surface.poster.as_deref())
                }
                SurfaceContent::Ready(details) => format_details_expanded(details),
            };
            (surface.title.clone(), content)
        }
        None => (String::new(), Vec::new()),
    };

    let header = el(Tag::Div)
        .class("bottom-sheet-header")
        .child(el(Tag::H2).id("bottomSheetTitle").text(title))
        .child(
            el(Tag::Button)
                .id("closeBottomSheet")
                .class("close-button")
                .attr("type", "button")
                .attr("aria-label", "Close details")
                .hook(Hook::ModalClose)
                .text("\u{00d7}"),
        );

    let sheet = el(Tag::Div)
        .id("bottomSheet")
        .class(if open { "bottom-sheet open" } else { "bottom-sheet" })
        .attr("role", "dialog")
        .attr("aria-modal", "true")
        .attr("aria-labelledby", "bottomSheetTitle")
        .attr("aria-hidden", (!open).to_string())
        .hook(Hook::Modal)
        .child(header)
        .child(
            el(Tag::Div)
                .id("bottomSheetContent")
                .class("bottom-sheet-content")
                .children(content),
        );

    vec![overlay.into(), sheet.into()]
}

pub fn live_region(message_text: &str) -> ViewNode {
    el(Tag::Div)
        .id("screenReaderAnnouncements")
        .class("visually-hidden")
        .attr("role", "status")
        .attr("aria-live", "assertive")
        .attr("aria-atomic", "true")
        .child(text(message_text))
        .into()
}
