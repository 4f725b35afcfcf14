//! Popup placement engine.
//!
//! Pure geometric decision logic: given the anchor icon's rectangle, the
//! popup's rectangle, a preferred side, and the viewport, decide where the
//! popup is drawn. Each side has its own offset rule (where the popup sits
//! relative to the anchor) and its own fit test (which viewport edges it can
//! collide with). When the preferred side does not fit, candidates are tried
//! in the fixed [`FALLBACK_ORDER`] and the first fitting one wins.
//!
//! No side effects and no surface access — everything here is testable with
//! plain rectangles.
//!
//! # Example
//!
//! ```
//! use swatchpop::placement::{calculate_coordinates, Position};
//! use swatchpop_core::Rect;
//!
//! let anchor = Rect::new(100.0, 100.0, 20.0, 20.0);
//! let popup = Rect::new(0.0, 0.0, 160.0, 200.0);
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//!
//! // Not enough room above the anchor, so the popup falls back to the right
//! let placement = calculate_coordinates(anchor, popup, Position::Top, viewport);
//! assert_eq!(placement.position, Position::Right);
//! assert!(placement.fits);
//! ```

use swatchpop_core::{Point, Rect, Size};

/// Clearance between the popup and its anchor, reserved for the arrow.
pub const ARROW_CLEARANCE: f32 = 10.0;

/// Sides at which a popup can be shown relative to its anchor.
///
/// The four edge positions center the popup on the shared axis; the two
/// corner positions hang the popup off the anchor's bottom corners and only
/// collide with two viewport edges, which makes them the last resort of the
/// fallback walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Above the anchor, horizontally centered.
    #[default]
    Top,
    /// To the right of the anchor, vertically centered.
    Right,
    /// Below the anchor, horizontally centered.
    Bottom,
    /// To the left of the anchor, vertically centered.
    Left,
    /// Hanging below, flush with the anchor's right edge.
    BottomRight,
    /// Hanging below, flush with the anchor's left edge.
    BottomLeft,
}

/// Fixed order of candidates tried when the preferred position does not fit.
pub const FALLBACK_ORDER: [Position; 6] = [
    Position::Top,
    Position::Right,
    Position::Bottom,
    Position::Left,
    Position::BottomRight,
    Position::BottomLeft,
];

impl Position {
    /// Stable lowercase name, used for position-keyed class names.
    pub fn name(&self) -> &'static str {
        match self {
            Position::Top => "top",
            Position::Right => "right",
            Position::Bottom => "bottom",
            Position::Left => "left",
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
        }
    }

    /// Parse a position name as accepted in configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Position::Top),
            "right" => Some(Position::Right),
            "bottom" => Some(Position::Bottom),
            "left" => Some(Position::Left),
            "bottom-right" => Some(Position::BottomRight),
            "bottom-left" => Some(Position::BottomLeft),
            _ => None,
        }
    }

    /// Candidate top-left corner for the popup at this position.
    fn candidate(&self, anchor: Rect, popup: Size) -> Point {
        let gap = ARROW_CLEARANCE;
        match self {
            Position::Top => Point::new(
                anchor.left() + anchor.width() / 2.0 - popup.width / 2.0,
                anchor.top() - popup.height - gap,
            ),
            Position::Bottom => Point::new(
                anchor.left() + anchor.width() / 2.0 - popup.width / 2.0,
                anchor.bottom() + gap,
            ),
            Position::Left => Point::new(
                anchor.left() - popup.width - gap,
                anchor.top() + anchor.height() / 2.0 - popup.height / 2.0,
            ),
            Position::Right => Point::new(
                anchor.right() + gap,
                anchor.top() + anchor.height() / 2.0 - popup.height / 2.0,
            ),
            Position::BottomRight => Point::new(anchor.right() + gap, anchor.bottom()),
            Position::BottomLeft => {
                Point::new(anchor.left() - popup.width - gap, anchor.bottom())
            }
        }
    }

    /// Test a candidate against the viewport.
    ///
    /// Each position only checks the edges it can actually cross: a popup
    /// above the anchor can never overflow the bottom, a corner placement
    /// never overflows the side it hangs away from.
    fn fits(&self, candidate: Point, popup: Size, viewport: Size) -> bool {
        let gap = ARROW_CLEARANCE;
        let Point { x: left, y: top } = candidate;
        match self {
            Position::Top => {
                top >= 0.0 && left >= 0.0 && left + popup.width <= viewport.width
            }
            Position::Bottom => {
                top + popup.height + gap <= viewport.height
                    && left >= 0.0
                    && left + popup.width <= viewport.width
            }
            Position::Left => {
                left >= 0.0 && top >= 0.0 && top + popup.height + gap <= viewport.height
            }
            Position::Right => {
                left + popup.width <= viewport.width
                    && top >= 0.0
                    && top + popup.height + gap <= viewport.height
            }
            Position::BottomLeft => {
                left >= 0.0 && top + popup.height + gap <= viewport.height
            }
            Position::BottomRight => {
                left + popup.width <= viewport.width
                    && top + popup.height + gap <= viewport.height
            }
        }
    }
}

/// The outcome of a placement computation.
///
/// Ephemeral: recomputed on every open, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Computed left coordinate for the popup.
    pub left: f32,
    /// Computed top coordinate for the popup.
    pub top: f32,
    /// The position actually used.
    pub position: Position,
    /// Whether the popup is fully inside the viewport at this position.
    pub fits: bool,
}

/// Decide where the popup is drawn relative to its anchor.
///
/// The preferred position is tried first. If its candidate does not fit the
/// viewport, every entry of [`FALLBACK_ORDER`] is tried in turn and the first
/// fitting candidate is returned. When nothing fits (a viewport smaller than
/// the popup in every direction), the last candidate of the fallback walk is
/// returned with `fits == false` — callers get a best-effort off-viewport
/// placement rather than a failure.
///
/// Only the popup's size is read from `popup`; only the viewport's size is
/// read from `viewport` (its origin is the zero of the shared coordinate
/// space).
pub fn calculate_coordinates(
    anchor: Rect,
    popup: Rect,
    preferred: Position,
    viewport: Rect,
) -> Placement {
    let popup_size = popup.size;
    let viewport_size = viewport.size;

    let candidate = preferred.candidate(anchor, popup_size);
    if preferred.fits(candidate, popup_size, viewport_size) {
        return Placement {
            left: candidate.x,
            top: candidate.y,
            position: preferred,
            fits: true,
        };
    }

    let mut last = (candidate, preferred);
    for position in FALLBACK_ORDER {
        let candidate = position.candidate(anchor, popup_size);
        if position.fits(candidate, popup_size, viewport_size) {
            return Placement {
                left: candidate.x,
                top: candidate.y,
                position,
                fits: true,
            };
        }
        last = (candidate, position);
    }

    let (candidate, position) = last;
    tracing::debug!(
        target: "swatchpop::placement",
        ?position,
        "no candidate position fits the viewport, using best effort"
    );
    Placement {
        left: candidate.x,
        top: candidate.y,
        position,
        fits: false,
    }
}

/// Offset of the directional arrow within the popup for a given position.
///
/// Edge positions center the arrow on the edge shared with the anchor; the
/// corner positions pin it flush to the popup corner nearest the anchor. The
/// offset is relative to the popup's top-left corner and may be negative
/// (the arrow sits just outside the popup box, in the anchor clearance).
pub fn arrow_offset(position: Position, popup: Size, arrow: Size) -> Point {
    match position {
        Position::Top => Point::new(popup.width / 2.0 - arrow.width / 2.0, popup.height),
        Position::Bottom => Point::new(popup.width / 2.0 - arrow.width / 2.0, -arrow.height),
        Position::Left => Point::new(popup.width, popup.height / 2.0 - arrow.height / 2.0),
        Position::Right => Point::new(-arrow.width, popup.height / 2.0 - arrow.height / 2.0),
        Position::BottomRight => Point::new(-arrow.width, 0.0),
        Position::BottomLeft => Point::new(popup.width, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANCHOR: Rect = Rect::new(300.0, 300.0, 20.0, 20.0);
    const POPUP: Rect = Rect::new(0.0, 0.0, 160.0, 200.0);
    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    #[test]
    fn test_preferred_position_used_when_it_fits() {
        for preferred in FALLBACK_ORDER {
            let placement = calculate_coordinates(ANCHOR, POPUP, preferred, VIEWPORT);
            assert!(placement.fits, "{preferred:?} should fit a roomy viewport");
            assert_eq!(placement.position, preferred);
        }
    }

    #[test]
    fn test_offsets_per_position() {
        // Anchor center is (310, 310); popup is 160x200, gap 10
        let cases = [
            (Position::Top, 230.0, 90.0),
            (Position::Bottom, 230.0, 330.0),
            (Position::Left, 130.0, 210.0),
            (Position::Right, 330.0, 210.0),
            (Position::BottomRight, 330.0, 320.0),
            (Position::BottomLeft, 130.0, 320.0),
        ];
        for (position, left, top) in cases {
            let placement = calculate_coordinates(ANCHOR, POPUP, position, VIEWPORT);
            assert_eq!(placement.left, left, "{position:?} left");
            assert_eq!(placement.top, top, "{position:?} top");
        }
    }

    #[test]
    fn test_top_falls_back_to_right_near_upper_edge() {
        let anchor = Rect::new(100.0, 100.0, 20.0, 20.0);
        let placement = calculate_coordinates(anchor, POPUP, Position::Top, VIEWPORT);

        assert_eq!(placement.left, 130.0);
        assert_eq!(placement.top, 10.0);
        assert_eq!(placement.position, Position::Right);
        assert!(placement.fits);
    }

    #[test]
    fn test_fallback_walk_skips_to_left() {
        // Anchor near the right edge of a short viewport: above, right, and
        // below all overflow, so the walk should settle on the left side.
        let anchor = Rect::new(700.0, 100.0, 20.0, 20.0);
        let viewport = Rect::new(0.0, 0.0, 800.0, 300.0);
        let placement = calculate_coordinates(anchor, POPUP, Position::Top, viewport);

        assert_eq!(placement.position, Position::Left);
        assert!(placement.fits);
        assert_eq!(placement.left, 700.0 - 160.0 - 10.0);
        assert_eq!(placement.top, 100.0 + 10.0 - 100.0);
    }

    #[test]
    fn test_nothing_fits_returns_last_candidate() {
        // Viewport smaller than the popup in both axes: no position can fit
        let anchor = Rect::new(10.0, 10.0, 20.0, 20.0);
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
        let placement = calculate_coordinates(anchor, POPUP, Position::Top, viewport);

        assert!(!placement.fits);
        // Best effort is the final fallback entry's candidate
        assert_eq!(placement.position, Position::BottomLeft);
        assert_eq!(placement.left, 10.0 - 160.0 - 10.0);
        assert_eq!(placement.top, 30.0);
    }

    #[test]
    fn test_corner_positions_ignore_their_open_side() {
        // Flush against the left viewport edge: BottomRight does not test the
        // left edge, so it still fits where BottomLeft cannot.
        let anchor = Rect::new(0.0, 0.0, 20.0, 20.0);
        let viewport = Rect::new(0.0, 0.0, 220.0, 260.0);
        let placement =
            calculate_coordinates(anchor, POPUP, Position::BottomRight, viewport);

        assert_eq!(placement.position, Position::BottomRight);
        assert!(placement.fits);
        assert_eq!(placement.left, 30.0);
        assert_eq!(placement.top, 20.0);
    }

    #[test]
    fn test_arrow_offsets() {
        let popup = Size::new(160.0, 200.0);
        let arrow = Size::new(12.0, 12.0);

        assert_eq!(arrow_offset(Position::Top, popup, arrow), Point::new(74.0, 200.0));
        assert_eq!(arrow_offset(Position::Bottom, popup, arrow), Point::new(74.0, -12.0));
        assert_eq!(arrow_offset(Position::Left, popup, arrow), Point::new(160.0, 94.0));
        assert_eq!(arrow_offset(Position::Right, popup, arrow), Point::new(-12.0, 94.0));
        assert_eq!(arrow_offset(Position::BottomRight, popup, arrow), Point::new(-12.0, 0.0));
        assert_eq!(arrow_offset(Position::BottomLeft, popup, arrow), Point::new(160.0, 0.0));
    }

    #[test]
    fn test_position_names_round_trip() {
        for position in FALLBACK_ORDER {
            assert_eq!(Position::from_name(position.name()), Some(position));
        }
        assert_eq!(Position::from_name("center"), None);
    }
}
