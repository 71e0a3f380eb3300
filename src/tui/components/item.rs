//! # Item Component
//!
//! A clickable navigation row: icon plus label, highlighted when active,
//! with an optional alert marker.
//!
//! ## Collapsed mode
//!
//! Only the icon is drawn. Hovering the row shows a [`Tooltip`] with the
//! label next to the icon; it follows scrolls and resizes and goes away on
//! mouse leave, Escape, expansion, or when the item is dropped.
//!
//! ## Headings
//!
//! An item built with [`Item::heading`] has no icon. It renders as a bold
//! label when expanded, a blank row when collapsed, and is not clickable.
//!
//! ## Screen areas
//!
//! Items are drawn into their section's scroll view, so they do not know
//! where they are on screen by themselves. The section reports the visible
//! on-screen row rect after every layout via [`Item::set_screen_area`].

use log::debug;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::core::callback::Callback;
use crate::core::context::Scope;
use crate::tui::components::tooltip::Tooltip;
use crate::tui::components::{INDIGO_50, INDIGO_200, INDIGO_400, hit, truncate_to_width};
use crate::tui::event::TuiEvent;

/// High-level events emitted by an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEvent {
    Clicked,
}

pub struct Item {
    pub id: String,
    /// `None` makes the item a heading.
    pub icon: Option<String>,
    pub label: String,
    pub active: bool,
    /// Shows the unread-style marker.
    pub alert: bool,
    pub on_click: Callback<()>,
    hovered: bool,
    row_area: Option<Rect>,
    icon_area: Option<Rect>,
    tooltip: Tooltip,
}

impl Item {
    pub fn new(id: impl Into<String>, icon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            icon: Some(icon.into()),
            label: label.into(),
            active: false,
            alert: false,
            on_click: Callback::noop(),
            hovered: false,
            row_area: None,
            icon_area: None,
            tooltip: Tooltip::new(),
        }
    }

    pub fn heading(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            icon: None,
            ..Self::new(id, "", label)
        }
    }

    pub fn with_alert(mut self, alert: bool) -> Self {
        self.alert = alert;
        self
    }

    pub fn with_on_click(mut self, on_click: Callback<()>) -> Self {
        self.on_click = on_click;
        self
    }

    pub fn is_heading(&self) -> bool {
        self.icon.is_none()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Column offset of the icon inside a row of `width` columns.
    fn icon_offset(&self, width: u16, expanded: bool) -> u16 {
        let icon_width = self.icon.as_deref().map_or(0, |i| i.width() as u16);
        if expanded {
            1
        } else {
            width.saturating_sub(icon_width) / 2
        }
    }

    /// Record where the row landed on screen (`None` if scrolled out of view)
    /// and follow it with the tooltip.
    pub fn set_screen_area(&mut self, row: Option<Rect>, content_width: u16, scope: &Scope<'_>) {
        self.row_area = row;
        self.icon_area = match (&self.icon, row) {
            (Some(icon), Some(r)) => {
                let offset = self.icon_offset(content_width, scope.expanded());
                let icon_rect = Rect::new(r.x + offset, r.y, icon.width().max(1) as u16, r.height);
                Some(icon_rect.intersection(r)).filter(|i| !i.is_empty())
            }
            _ => None,
        };
        if scope.expanded() {
            self.tooltip.hide();
        } else {
            self.tooltip.reposition(self.icon_area, scope.tooltip_gap);
        }
    }

    /// The row's contents for a row `width` columns wide.
    pub fn line(&self, width: u16, expanded: bool) -> Line<'static> {
        let width = width as usize;
        let Some(icon) = &self.icon else {
            if !expanded {
                return Line::default();
            }
            return Line::from(Span::styled(
                format!(" {}", truncate_to_width(&self.label, width.saturating_sub(1))),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        };

        let style = self.row_style();
        let marker_style = style.fg(INDIGO_400);

        if !expanded {
            let offset = self.icon_offset(width as u16, false) as usize;
            let mut spans = vec![
                Span::styled(" ".repeat(offset), style),
                Span::styled(icon.clone(), style),
            ];
            let used = offset + icon.width();
            if self.alert && width > used {
                spans.push(Span::styled(" ".repeat(width - used - 1), style));
                spans.push(Span::styled("•", marker_style));
            } else {
                spans.push(Span::styled(" ".repeat(width.saturating_sub(used)), style));
            }
            return Line::from(spans);
        }

        // " {icon}  {label}{pad}{●} "
        let fixed = 1 + icon.width() + 2 + 3;
        let label = truncate_to_width(&self.label, width.saturating_sub(fixed));
        let used = 1 + icon.width() + 2 + label.width();
        let mut spans = vec![
            Span::styled(format!(" {icon}  "), style),
            Span::styled(label, style),
        ];
        let tail = width.saturating_sub(used);
        if self.alert && tail >= 2 {
            spans.push(Span::styled(" ".repeat(tail - 2), style));
            spans.push(Span::styled("●", marker_style));
            spans.push(Span::styled(" ", style));
        } else {
            spans.push(Span::styled(" ".repeat(tail), style));
        }
        Line::from(spans)
    }

    fn row_style(&self) -> Style {
        if self.active {
            Style::default().bg(INDIGO_200).fg(Color::Black)
        } else if self.hovered {
            Style::default().bg(INDIGO_50).fg(Color::Black)
        } else {
            Style::default()
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent, scope: &Scope<'_>) -> Option<ItemEvent> {
        match event {
            TuiEvent::MouseMove(col, row) => {
                let inside = hit(self.row_area, *col, *row);
                if inside && !self.hovered {
                    self.hovered = true;
                    if !scope.expanded() {
                        if let Some(icon) = self.icon_area {
                            self.tooltip.show(scope.viewport, icon, scope.tooltip_gap);
                        }
                    }
                } else if !inside && self.hovered {
                    self.hovered = false;
                    self.tooltip.hide();
                }
                None
            }
            TuiEvent::MouseClick(col, row) => {
                if self.is_heading() || !hit(self.row_area, *col, *row) {
                    return None;
                }
                debug!("Item {} clicked", self.id);
                self.on_click.emit(());
                scope.collapse_if_narrow();
                Some(ItemEvent::Clicked)
            }
            TuiEvent::Escape => {
                self.tooltip.hide();
                None
            }
            _ => None,
        }
    }

    /// Draw the tooltip, if visible. Called after the whole sidebar is drawn.
    pub fn render_tooltip(&self, frame: &mut Frame, bounds: Rect) {
        self.tooltip.render(frame, bounds, &self.label);
    }

    /// Forget everything transient (the row is no longer on screen).
    pub fn unmount(&mut self) {
        self.hovered = false;
        self.row_area = None;
        self.icon_area = None;
        self.tooltip.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{recording_callback, recording_context, scope, test_viewport};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn placed(mut item: Item, expanded: bool) -> (Item, crate::core::viewport::Viewport) {
        let viewport = test_viewport();
        let (ctx, _) = recording_context(expanded);
        item.set_screen_area(Some(Rect::new(0, 3, 6, 1)), 6, &scope(&ctx, &viewport, false));
        (item, viewport)
    }

    #[test]
    fn test_expanded_line_shows_icon_and_label() {
        let item = Item::new("docs", "▤", "Documentos");
        let text = line_text(&item.line(20, true));
        assert!(text.starts_with(" ▤  Documentos"));
        assert_eq!(text.width(), 20);
    }

    #[test]
    fn test_collapsed_line_shows_icon_only() {
        let item = Item::new("docs", "▤", "Documentos");
        let text = line_text(&item.line(5, false));
        assert_eq!(text, "  ▤  ");
    }

    #[test]
    fn test_alert_marker() {
        let item = Item::new("docs", "▤", "Documentos").with_alert(true);
        assert!(line_text(&item.line(20, true)).ends_with("● "));
        assert!(line_text(&item.line(5, false)).ends_with('•'));
    }

    #[test]
    fn test_heading_only_when_expanded() {
        let item = Item::heading("h", "Atajos");
        assert!(item.is_heading());
        assert_eq!(line_text(&item.line(20, true)), " Atajos");
        assert_eq!(line_text(&item.line(20, false)), "");
    }

    #[test]
    fn test_click_invokes_handler() {
        let (on_click, clicks) = recording_callback::<()>();
        let (mut item, viewport) = placed(Item::new("panel", "◧", "Panel").with_on_click(on_click), true);
        let (ctx, expand_calls) = recording_context(true);
        let wide = scope(&ctx, &viewport, false);

        assert_eq!(item.handle_event(&TuiEvent::MouseClick(2, 3), &wide), Some(ItemEvent::Clicked));
        assert_eq!(clicks.borrow().len(), 1);
        assert!(expand_calls.borrow().is_empty());

        // Outside the row
        assert_eq!(item.handle_event(&TuiEvent::MouseClick(2, 4), &wide), None);
        assert_eq!(clicks.borrow().len(), 1);
    }

    #[test]
    fn test_click_on_narrow_viewport_collapses_after_handler() {
        let (on_click, clicks) = recording_callback::<()>();
        let (mut item, viewport) = placed(Item::new("panel", "◧", "Panel").with_on_click(on_click), true);
        let (ctx, expand_calls) = recording_context(true);

        item.handle_event(&TuiEvent::MouseClick(0, 3), &scope(&ctx, &viewport, true));

        assert_eq!(clicks.borrow().len(), 1);
        assert_eq!(*expand_calls.borrow(), vec![false]);
    }

    #[test]
    fn test_heading_is_not_clickable() {
        let (on_click, clicks) = recording_callback::<()>();
        let (mut item, viewport) = placed(Item::heading("h", "Atajos").with_on_click(on_click), true);
        let (ctx, _) = recording_context(true);
        assert_eq!(item.handle_event(&TuiEvent::MouseClick(1, 3), &scope(&ctx, &viewport, false)), None);
        assert!(clicks.borrow().is_empty());
    }

    #[test]
    fn test_hover_shows_tooltip_only_when_collapsed() {
        let (mut item, viewport) = placed(Item::new("docs", "▤", "Documentos"), false);
        let (collapsed, _) = recording_context(false);
        let s = scope(&collapsed, &viewport, false);

        item.handle_event(&TuiEvent::MouseMove(1, 3), &s);
        assert!(item.is_hovered());
        assert!(item.tooltip().is_visible());
        assert_eq!(viewport.listener_count(), 1);

        item.handle_event(&TuiEvent::MouseMove(30, 3), &s);
        assert!(!item.is_hovered());
        assert!(!item.tooltip().is_visible());
        assert_eq!(viewport.listener_count(), 0);

        let (mut item, viewport) = placed(Item::new("docs", "▤", "Documentos"), true);
        let (expanded, _) = recording_context(true);
        item.handle_event(&TuiEvent::MouseMove(1, 3), &scope(&expanded, &viewport, false));
        assert!(item.is_hovered());
        assert!(!item.tooltip().is_visible());
    }

    #[test]
    fn test_escape_dismisses_tooltip() {
        let (mut item, viewport) = placed(Item::new("docs", "▤", "Documentos"), false);
        let (collapsed, _) = recording_context(false);
        let s = scope(&collapsed, &viewport, false);

        item.handle_event(&TuiEvent::MouseMove(1, 3), &s);
        item.handle_event(&TuiEvent::Escape, &s);

        assert!(!item.tooltip().is_visible());
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_tooltip_follows_scroll_and_hides_when_scrolled_away() {
        let (mut item, viewport) = placed(Item::new("docs", "▤", "Documentos"), false);
        let (collapsed, _) = recording_context(false);
        let s = scope(&collapsed, &viewport, false);
        item.handle_event(&TuiEvent::MouseMove(1, 3), &s);
        let before = item.tooltip().position().unwrap();

        viewport.notify_scroll();
        item.set_screen_area(Some(Rect::new(0, 2, 6, 1)), 6, &s);
        let after = item.tooltip().position().unwrap();
        assert_eq!(after.y, before.y - 1);

        viewport.notify_scroll();
        item.set_screen_area(None, 6, &s);
        assert!(!item.tooltip().is_visible());
    }

    #[test]
    fn test_dropping_item_releases_tooltip_subscription() {
        let (mut item, viewport) = placed(Item::new("docs", "▤", "Documentos"), false);
        let (collapsed, _) = recording_context(false);
        item.handle_event(&TuiEvent::MouseMove(1, 3), &scope(&collapsed, &viewport, false));
        assert_eq!(viewport.listener_count(), 1);
        drop(item);
        assert_eq!(viewport.listener_count(), 0);
    }
}
