//! # Section Component
//!
//! A titled group of rows with its own vertical scroll region.
//!
//! ## Layout
//!
//! ```text
//!  General                 <- title (expanded only)
//!  ◧  Panel               ┐
//!  ▤  Documentos       ●  │ list: at most `max_height_percent` of the
//!  +  Nuevo               ┘ viewport height, scrolls past that
//! ```
//!
//! Rename rows exist only while the sidebar is expanded: when collapsed they
//! are neither drawn nor routed events, and the sidebar unmounts them.
//!
//! Scrolling the list notifies the [`Viewport`](crate::core::viewport::Viewport)
//! so tooltips anchored to rows in this section follow along.

use std::collections::HashMap;

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::config::DEFAULT_SECTION_MAX_HEIGHT_PERCENT;
use crate::core::context::Scope;
use crate::core::state::RenameEntry;
use crate::tui::components::item::{Item, ItemEvent};
use crate::tui::components::rename_item::{RenameEvent, RenameItem};
use crate::tui::components::{GRAY_500, hit, truncate_to_width, visible_rect};
use crate::tui::event::TuiEvent;

pub enum Row {
    Item(Item),
    Rename(RenameItem),
}

impl Row {
    pub fn id(&self) -> &str {
        match self {
            Row::Item(item) => &item.id,
            Row::Rename(item) => &item.id,
        }
    }

    fn is_mounted(&self, expanded: bool) -> bool {
        expanded || matches!(self, Row::Item(_))
    }

    fn set_active(&mut self, active: bool) {
        match self {
            Row::Item(item) => item.active = active,
            Row::Rename(item) => item.active = active,
        }
    }

    fn unmount(&mut self) {
        match self {
            Row::Item(item) => item.unmount(),
            Row::Rename(item) => item.unmount(),
        }
    }
}

impl From<Item> for Row {
    fn from(item: Item) -> Self {
        Row::Item(item)
    }
}

impl From<RenameItem> for Row {
    fn from(item: RenameItem) -> Self {
        Row::Rename(item)
    }
}

/// Events bubbled up from rows, tagged with the row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent {
    Item(String, ItemEvent),
    Rename(String, RenameEvent),
}

pub struct Section {
    pub title: Option<String>,
    pub max_height_percent: u16,
    rows: Vec<Row>,
    scroll_state: ScrollViewState,
    list_area: Option<Rect>,
    content_height: u16,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::untitled()
        }
    }

    fn untitled() -> Self {
        Self {
            title: None,
            max_height_percent: DEFAULT_SECTION_MAX_HEIGHT_PERCENT,
            rows: Vec::new(),
            scroll_state: ScrollViewState::default(),
            list_area: None,
            content_height: 0,
        }
    }

    pub fn with_row(mut self, row: impl Into<Row>) -> Self {
        self.rows.push(row.into());
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn rename_item(&self, id: &str) -> Option<&RenameItem> {
        self.rows.iter().find_map(|row| match row {
            Row::Rename(item) if item.id == id => Some(item),
            _ => None,
        })
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.rows.iter().find_map(|row| match row {
            Row::Item(item) if item.id == id => Some(item),
            _ => None,
        })
    }

    /// Replace the rows with one rename row per entry, keyed by id. Rows that
    /// already exist keep their state and get the entry's name as new label;
    /// `build` creates the rest.
    pub fn reconcile(&mut self, entries: &[RenameEntry], mut build: impl FnMut(&RenameEntry) -> RenameItem) {
        let mut existing: HashMap<String, RenameItem> = std::mem::take(&mut self.rows)
            .into_iter()
            .filter_map(|row| match row {
                Row::Rename(item) => Some((item.id.clone(), item)),
                Row::Item(_) => None,
            })
            .collect();

        self.rows = entries
            .iter()
            .map(|entry| {
                let item = match existing.remove(&entry.id) {
                    Some(mut item) => {
                        item.set_label(&entry.name);
                        item
                    }
                    None => {
                        debug!("Mounting rename row {}", entry.id);
                        build(entry)
                    }
                };
                Row::Rename(item)
            })
            .collect();
    }

    pub fn set_active(&mut self, active_id: Option<&str>) {
        for row in &mut self.rows {
            let active = active_id == Some(row.id());
            row.set_active(active);
        }
    }

    /// Forget transient row state: hover, tooltips, in-progress edits.
    pub fn unmount(&mut self) {
        self.rows.iter_mut().for_each(Row::unmount);
        self.list_area = None;
    }

    pub fn is_editing(&self) -> bool {
        self.rows
            .iter()
            .any(|row| matches!(row, Row::Rename(item) if item.is_editing()))
    }

    fn title_height(&self, expanded: bool) -> u16 {
        u16::from(expanded && self.title.is_some())
    }

    fn mounted_count(&self, expanded: bool) -> u16 {
        self.rows.iter().filter(|r| r.is_mounted(expanded)).count() as u16
    }

    /// Height of the scroll region for a viewport `viewport_height` rows tall.
    pub fn list_height(&self, expanded: bool, viewport_height: u16) -> u16 {
        let content = self.mounted_count(expanded);
        if content == 0 {
            return 0;
        }
        let cap = (u32::from(viewport_height) * u32::from(self.max_height_percent) / 100) as u16;
        content.min(cap.max(1))
    }

    pub fn height(&self, expanded: bool, viewport_height: u16) -> u16 {
        self.title_height(expanded) + self.list_height(expanded, viewport_height)
    }

    fn clamp_scroll(&mut self) {
        let list_height = self.list_area.map_or(0, |a| a.height);
        let max_y = self.content_height.saturating_sub(list_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_state.offset().y
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, scope: &Scope<'_>) {
        let expanded = scope.expanded();
        let title_height = self.title_height(expanded);
        if let (Some(title), true) = (&self.title, title_height > 0) {
            let text = truncate_to_width(title, area.width.saturating_sub(1) as usize);
            frame.render_widget(
                Paragraph::new(Line::from(format!(" {text}")))
                    .style(Style::default().fg(GRAY_500).add_modifier(Modifier::BOLD)),
                Rect::new(area.x, area.y, area.width, 1.min(area.height)),
            );
        }

        let list_height = self
            .list_height(expanded, scope.viewport.size().height)
            .min(area.height.saturating_sub(title_height));
        let list_area = Rect::new(area.x, area.y + title_height, area.width, list_height);
        self.content_height = self.mounted_count(expanded);
        self.list_area = (!list_area.is_empty()).then_some(list_area);

        if self.list_area.is_none() {
            for row in &mut self.rows {
                match row {
                    Row::Item(item) => item.set_screen_area(None, area.width, scope),
                    Row::Rename(item) => item.set_screen_area(None),
                }
            }
            return;
        }
        self.clamp_scroll();

        let overflow = self.content_height > list_height;
        let content_width = if overflow {
            area.width.saturating_sub(1)
        } else {
            area.width
        };
        let mut scroll_view = ScrollView::new(Size::new(content_width, self.content_height))
            .vertical_scrollbar_visibility(if overflow {
                ScrollbarVisibility::Always
            } else {
                ScrollbarVisibility::Never
            })
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let scroll_y = self.scroll_state.offset().y;
        let mut y = 0;
        let mut cursor = None;
        for row in &mut self.rows {
            if !row.is_mounted(expanded) {
                if let Row::Rename(item) = row {
                    item.set_screen_area(None);
                }
                continue;
            }
            let rect = Rect::new(0, y, content_width, 1);
            let screen = visible_rect(rect, scroll_y, list_area);
            match row {
                Row::Item(item) => {
                    scroll_view.render_widget(Paragraph::new(item.line(content_width, expanded)), rect);
                    item.set_screen_area(screen, content_width, scope);
                }
                Row::Rename(item) => {
                    scroll_view.render_widget(Paragraph::new(item.line(content_width)), rect);
                    item.set_screen_area(screen);
                    cursor = cursor.or(item.cursor_position());
                }
            }
            y += 1;
        }

        frame.render_stateful_widget(scroll_view, list_area, &mut self.scroll_state);
        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
    }

    /// Draw visible item tooltips. Called after the whole sidebar is drawn.
    pub fn render_tooltips(&self, frame: &mut Frame, bounds: Rect) {
        for row in &self.rows {
            if let Row::Item(item) = row {
                item.render_tooltip(frame, bounds);
            }
        }
    }

    /// Commit any in-progress edit whose input does not contain (col, row).
    pub fn commit_edits_outside(&mut self, col: u16, row: u16) -> Vec<RowEvent> {
        let mut events = Vec::new();
        for r in &mut self.rows {
            if let Row::Rename(item) = r {
                if item.is_editing() && !hit(item.input_area(), col, row) {
                    if let Some(event) = item.commit() {
                        events.push(RowEvent::Rename(item.id.clone(), event));
                    }
                }
            }
        }
        events
    }

    pub fn handle_event(&mut self, event: &TuiEvent, scope: &Scope<'_>) -> Vec<RowEvent> {
        if let TuiEvent::ScrollUp(col, row) | TuiEvent::ScrollDown(col, row) = event {
            if !hit(self.list_area, *col, *row) {
                return Vec::new();
            }
            let before = self.scroll_state.offset();
            if matches!(event, TuiEvent::ScrollUp(..)) {
                self.scroll_state.scroll_up();
            } else {
                self.scroll_state.scroll_down();
            }
            self.clamp_scroll();
            if self.scroll_state.offset() != before {
                scope.viewport.notify_scroll();
            }
            return Vec::new();
        }

        let expanded = scope.expanded();
        let mut events = Vec::new();
        for row in &mut self.rows {
            if !row.is_mounted(expanded) {
                continue;
            }
            match row {
                Row::Item(item) => {
                    if let Some(e) = item.handle_event(event, scope) {
                        events.push(RowEvent::Item(item.id.clone(), e));
                    }
                }
                Row::Rename(item) => {
                    if let Some(e) = item.handle_event(event, scope) {
                        events.push(RowEvent::Rename(item.id.clone(), e));
                    }
                }
            }
        }
        events
    }
}
