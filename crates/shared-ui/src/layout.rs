/// Assumed tooltip width used for placement.
pub const TOOLTIP_WIDTH: f64 = 400.0;
/// Gap between a card and its tooltip.
pub const TOOLTIP_SPACING: f64 = 20.0;
/// Viewports at or below this width use the touch layout.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Client-space rectangle of a card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Horizontal side a tooltip opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Right,
    Left,
}

impl Side {
    pub fn class(self) -> &'static str {
        match self {
            Side::Right => "right-side",
            Side::Left => "left-side",
        }
    }
}

pub fn is_touch_layout(viewport_width: f64) -> bool {
    viewport_width <= MOBILE_BREAKPOINT
}

/// Right if it fits, else left if it fits, else the side facing the larger
/// half of the viewport.
pub fn place_tooltip(card: Rect, viewport_width: f64) -> Side {
    let needed = TOOLTIP_WIDTH + TOOLTIP_SPACING;
    if card.right() + needed <= viewport_width {
        Side::Right
    } else if card.left - needed >= 0.0 {
        Side::Left
    } else if card.right() < viewport_width / 2.0 {
        Side::Right
    } else {
        Side::Left
    }
}
