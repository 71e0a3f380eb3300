//! # Tooltip
//!
//! Floating label shown next to a collapsed item's icon while it is hovered.
//!
//! The tooltip is drawn after the whole sidebar, on top of everything
//! (like a portal), so it is never clipped by the panel or a section's
//! scroll region.
//!
//! ## Scoped subscription
//!
//! While visible, the tooltip holds a viewport [`Subscription`]. A resize or
//! scroll only marks the position stale; the owning item calls
//! [`Tooltip::reposition`] with its freshly laid-out icon rect during the
//! next render. Hiding (or dropping) the tooltip releases the subscription.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::viewport::{Subscription, Viewport};
use crate::tui::components::INDIGO_100;

#[derive(Default)]
pub struct Tooltip {
    visible: bool,
    position: Position,
    stale: Rc<Cell<bool>>,
    subscription: Option<Subscription>,
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor point for a trigger: `gap` columns right of it, vertically centered.
    pub fn anchor(trigger: Rect, gap: u16) -> Position {
        Position {
            x: trigger.right().saturating_add(gap),
            y: trigger.y + trigger.height / 2,
        }
    }

    /// Show next to `trigger` and start following viewport changes.
    pub fn show(&mut self, viewport: &Viewport, trigger: Rect, gap: u16) {
        self.position = Self::anchor(trigger, gap);
        self.visible = true;
        self.stale.set(false);
        if self.subscription.is_none() {
            let stale = self.stale.clone();
            self.subscription = Some(viewport.subscribe(move |_| stale.set(true)));
            debug!("Tooltip shown at {:?}", self.position);
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.subscription = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Option<Position> {
        self.visible.then_some(self.position)
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Recompute the position after a resize or scroll. `trigger` is the
    /// trigger's current on-screen rect; `None` means it is no longer on
    /// screen, which hides the tooltip.
    pub fn reposition(&mut self, trigger: Option<Rect>, gap: u16) {
        if !self.visible || !self.stale.replace(false) {
            return;
        }
        match trigger {
            Some(rect) => self.position = Self::anchor(rect, gap),
            None => self.hide(),
        }
    }

    /// Draw `text` at the current position, clamped to `bounds`.
    pub fn render(&self, frame: &mut Frame, bounds: Rect, text: &str) {
        if !self.visible {
            return;
        }
        let width = (text.width() as u16).saturating_add(2);
        let x = self.position.x.min(bounds.right().saturating_sub(width)).max(bounds.x);
        if self.position.y < bounds.y || self.position.y >= bounds.bottom() {
            return;
        }
        let area = Rect::new(x, self.position.y, width, 1).intersection(bounds);
        if area.is_empty() {
            return;
        }

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(Line::from(format!(" {text} ")))
                .style(Style::default().bg(INDIGO_100).fg(Color::Black)),
            area,
        );
    }
}
