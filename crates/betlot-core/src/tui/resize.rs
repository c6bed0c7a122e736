//! Column resize affordance: drag to resize, double-click to auto-fit.
//!
//! `Idle → Dragging` on pointer-down over a header boundary, back to `Idle`
//! on pointer-up. A release that moved more than the drag threshold arms a
//! short suppression window consumed by the next header click, so a resize
//! never doubles as a sort. A release that did not qualify as a drag counts
//! as an affordance click; two of those within the double-click window (or a
//! native double-click) trigger auto-fit.
//!
//! Timestamps are plain milliseconds so the machine stays clock-free and
//! testable.

use crate::table::MIN_COLUMN_WIDTH;

/// Pointer movement below this many cells is a click, not a drag.
pub const DRAG_THRESHOLD: u16 = 3;
/// Two affordance clicks within this window auto-fit the column.
pub const DOUBLE_CLICK_WINDOW_MS: u64 = 300;
/// How long a finished drag keeps swallowing the next header click.
pub const SORT_SUPPRESS_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    Dragging {
        column: usize,
        start_x: u16,
        start_width: u16,
    },
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeRelease {
    /// Not dragging; nothing happened.
    None,
    /// The drag qualified; the column keeps its live-updated width.
    Resized { column: usize },
    /// The press never moved past the threshold — an affordance click.
    Clicked { column: usize },
}

/// State machine for one table's resize affordances.
#[derive(Debug, Clone)]
pub struct ResizeController {
    state: DragState,
    just_resized_until: Option<u64>,
    pending_click: Option<(usize, u64)>,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            just_resized_until: None,
            pending_click: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Pointer-down on the affordance of `column`.
    pub fn pointer_down(&mut self, column: usize, x: u16, current_width: u16) {
        self.state = DragState::Dragging {
            column,
            start_x: x,
            start_width: current_width,
        };
    }

    /// Pointer moved while dragging; returns the live column width.
    pub fn pointer_move(&mut self, x: u16) -> Option<(usize, u16)> {
        let DragState::Dragging {
            column,
            start_x,
            start_width,
        } = self.state
        else {
            return None;
        };
        let delta = x as i32 - start_x as i32;
        let width = (start_width as i32 + delta).max(MIN_COLUMN_WIDTH as i32) as u16;
        Some((column, width))
    }

    /// Pointer released at `x`.
    pub fn pointer_up(&mut self, x: u16, now_ms: u64) -> ResizeRelease {
        let DragState::Dragging {
            column, start_x, ..
        } = self.state
        else {
            return ResizeRelease::None;
        };
        self.state = DragState::Idle;

        let moved = x.abs_diff(start_x) > DRAG_THRESHOLD;
        if moved {
            self.just_resized_until = Some(now_ms + SORT_SUPPRESS_MS);
            ResizeRelease::Resized { column }
        } else {
            ResizeRelease::Clicked { column }
        }
    }

    /// Affordance click; returns `true` when it completes a double-click.
    pub fn affordance_click(&mut self, column: usize, now_ms: u64) -> bool {
        match self.pending_click.take() {
            Some((pending_col, at))
                if pending_col == column && now_ms.saturating_sub(at) <= DOUBLE_CLICK_WINDOW_MS =>
            {
                true
            }
            _ => {
                self.pending_click = Some((column, now_ms));
                false
            }
        }
    }

    /// Native double-click on the affordance: always auto-fit.
    pub fn native_double_click(&mut self) -> bool {
        self.pending_click = None;
        true
    }

    /// Consumes the post-resize suppression window if it is still open.
    /// Called by the header click handler before sorting.
    pub fn consume_sort_suppression(&mut self, now_ms: u64) -> bool {
        match self.just_resized_until.take() {
            Some(until) if now_ms <= until => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_beyond_threshold_resizes_and_suppresses_one_sort() {
        let mut resize = ResizeController::new();
        resize.pointer_down(2, 40, 12);
        assert_eq!(resize.pointer_move(50), Some((2, 22)));
        let release = resize.pointer_up(50, 1_000);
        assert_eq!(release, ResizeRelease::Resized { column: 2 });

        // The immediately following header click must not sort...
        assert!(resize.consume_sort_suppression(1_050));
        // ...but the flag is consumed: a second click sorts normally.
        assert!(!resize.consume_sort_suppression(1_060));
    }

    #[test]
    fn suppression_expires_after_its_window() {
        let mut resize = ResizeController::new();
        resize.pointer_down(0, 10, 12);
        resize.pointer_up(30, 1_000);
        assert!(!resize.consume_sort_suppression(1_101));
    }

    #[test]
    fn sub_threshold_release_is_a_click_not_a_drag() {
        let mut resize = ResizeController::new();
        resize.pointer_down(1, 40, 12);
        let release = resize.pointer_up(43, 1_000);
        assert_eq!(release, ResizeRelease::Clicked { column: 1 });
        // No suppression armed: a plain click still sorts.
        assert!(!resize.consume_sort_suppression(1_010));
    }

    #[test]
    fn two_quick_affordance_clicks_auto_fit() {
        let mut resize = ResizeController::new();
        assert!(!resize.affordance_click(1, 1_000));
        assert!(resize.affordance_click(1, 1_200));
        // The pair is consumed; a third click starts a fresh window.
        assert!(!resize.affordance_click(1, 1_250));
    }

    #[test]
    fn slow_or_cross_column_clicks_do_not_auto_fit() {
        let mut resize = ResizeController::new();
        assert!(!resize.affordance_click(1, 1_000));
        assert!(!resize.affordance_click(1, 1_400)); // past the window
        assert!(!resize.affordance_click(2, 1_450)); // different column
    }

    #[test]
    fn live_width_floors_at_minimum() {
        let mut resize = ResizeController::new();
        resize.pointer_down(0, 100, 12);
        let (_, width) = resize.pointer_move(10).unwrap();
        assert_eq!(width, MIN_COLUMN_WIDTH);
    }

    #[test]
    fn native_double_click_clears_pending_state() {
        let mut resize = ResizeController::new();
        assert!(!resize.affordance_click(1, 1_000));
        assert!(resize.native_double_click());
        assert!(!resize.affordance_click(1, 1_010));
    }
}
