//! # Responsive Breakpoint
//!
//! Answers one question: is the viewport narrow? The threshold is a column
//! count; a width at or below it counts as narrow, like a `max-width` media
//! query.
//!
//! The detector evaluates the threshold on mount, then follows viewport
//! resizes through a [`Subscription`] it owns. Dropping the detector releases
//! the subscription.

use std::cell::Cell;
use std::rc::Rc;

use crate::core::viewport::{Subscription, Viewport, ViewportEvent};

/// Default narrow threshold in columns (narrow when width <= this).
pub const DEFAULT_NARROW_MAX_WIDTH: u16 = 79;

pub struct BreakpointDetector {
    narrow: Rc<Cell<bool>>,
    /// Latched when `narrow` flips; cleared by `take_change`.
    changed: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl BreakpointDetector {
    pub fn mount(viewport: &Viewport, max_width: u16) -> Self {
        let narrow = Rc::new(Cell::new(viewport.size().width <= max_width));
        // Mounting is itself a change so the owner reacts to the initial value.
        let changed = Rc::new(Cell::new(true));

        let subscription = {
            let narrow = narrow.clone();
            let changed = changed.clone();
            viewport.subscribe(move |event| {
                if let ViewportEvent::Resize(size) = event {
                    let now = size.width <= max_width;
                    if now != narrow.get() {
                        narrow.set(now);
                        changed.set(true);
                    }
                }
            })
        };

        Self {
            narrow,
            changed,
            _subscription: subscription,
        }
    }

    pub fn is_narrow(&self) -> bool {
        self.narrow.get()
    }

    /// Returns the current match state if it changed since the last call.
    pub fn take_change(&self) -> Option<bool> {
        self.changed.replace(false).then(|| self.narrow.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Size;

    #[test]
    fn test_mount_evaluates_threshold() {
        let viewport = Viewport::new(Size::new(79, 24));
        let detector = BreakpointDetector::mount(&viewport, DEFAULT_NARROW_MAX_WIDTH);
        assert!(detector.is_narrow());

        let viewport = Viewport::new(Size::new(80, 24));
        let detector = BreakpointDetector::mount(&viewport, DEFAULT_NARROW_MAX_WIDTH);
        assert!(!detector.is_narrow());
    }

    #[test]
    fn test_mount_reports_initial_state_once() {
        let viewport = Viewport::new(Size::new(120, 24));
        let detector = BreakpointDetector::mount(&viewport, 79);
        assert_eq!(detector.take_change(), Some(false));
        assert_eq!(detector.take_change(), None);
    }

    #[test]
    fn test_follows_resizes() {
        let viewport = Viewport::new(Size::new(120, 24));
        let detector = BreakpointDetector::mount(&viewport, 79);
        detector.take_change();

        viewport.resize(Size::new(60, 24));
        assert!(detector.is_narrow());
        assert_eq!(detector.take_change(), Some(true));

        // Staying narrow is not a transition.
        viewport.resize(Size::new(50, 24));
        assert_eq!(detector.take_change(), None);

        viewport.resize(Size::new(100, 24));
        assert_eq!(detector.take_change(), Some(false));
    }

    #[test]
    fn test_drop_unsubscribes() {
        let viewport = Viewport::new(Size::new(120, 24));
        let detector = BreakpointDetector::mount(&viewport, 79);
        assert_eq!(viewport.listener_count(), 1);
        drop(detector);
        assert_eq!(viewport.listener_count(), 0);
    }
}
