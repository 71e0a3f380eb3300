//! # Rename Item
//!
//! A navigation row whose label can be edited in place.
//!
//! ```text
//!  Informe mensual      ⋯      viewing (⋯ shown on hover)
//!  Informe anual▏       ⋯      editing
//! ```
//!
//! Clicking the row navigates like a plain [`Item`](super::Item). Clicking
//! the `⋯` button (only when `editable`) switches to an input prefilled with
//! the current name, all of it selected. Enter, a click anywhere outside the
//! input, or the terminal losing focus commits; clicks inside the input stay
//! there.
//!
//! ## Commit rule
//!
//! The input is trimmed. A non-empty value that differs from the `label`
//! prop is reported once through `on_rename(id, name)` and shown right away;
//! anything else silently reverts. Collapsing the sidebar unmounts the row,
//! which discards an in-progress edit without reporting anything.

mod edit_buffer;

pub use edit_buffer::EditBuffer;

use log::{debug, info};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::core::callback::Callback;
use crate::core::context::Scope;
use crate::tui::components::{GRAY_500, INDIGO_50, INDIGO_200, hit, truncate_to_width};
use crate::tui::event::TuiEvent;

const BUTTON: &str = "⋯";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameEvent {
    Clicked,
    EditStarted,
    Renamed { id: String, name: String },
    /// Edit ended without a usable new name.
    Reverted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Viewing,
    Editing(EditBuffer),
}

/// The name to report for an edit of `label`, if any.
pub fn committed_name(label: &str, input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty() && trimmed != label).then(|| trimmed.to_string())
}

pub struct RenameItem {
    pub id: String,
    pub active: bool,
    pub editable: bool,
    pub on_click: Callback<()>,
    pub on_rename: Callback<(String, String)>,
    label: String,
    display: String,
    mode: Mode,
    hovered: bool,
    row_area: Option<Rect>,
    input_area: Option<Rect>,
    button_area: Option<Rect>,
    cursor_offset: u16,
}

impl RenameItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: id.into(),
            active: false,
            editable: true,
            on_click: Callback::noop(),
            on_rename: Callback::noop(),
            display: label.clone(),
            label,
            mode: Mode::Viewing,
            hovered: false,
            row_area: None,
            input_area: None,
            button_area: None,
            cursor_offset: 0,
        }
    }

    pub fn with_on_click(mut self, on_click: Callback<()>) -> Self {
        self.on_click = on_click;
        self
    }

    pub fn with_on_rename(mut self, on_rename: Callback<(String, String)>) -> Self {
        self.on_rename = on_rename;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// What the row currently shows (may be ahead of `label` after a rename).
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, Mode::Editing(_))
    }

    /// The in-progress edit, if any.
    pub fn buffer(&self) -> Option<&EditBuffer> {
        match &self.mode {
            Mode::Editing(buf) => Some(buf),
            Mode::Viewing => None,
        }
    }

    /// New label prop from the host. A changed label resets what is shown.
    pub fn set_label(&mut self, label: &str) {
        if self.label != label {
            self.label = label.to_string();
            self.display = self.label.clone();
        }
    }

    pub fn begin_edit(&mut self) -> bool {
        if !self.editable || self.is_editing() {
            return false;
        }
        debug!("Editing {}", self.id);
        self.mode = Mode::Editing(EditBuffer::selecting(&self.display));
        true
    }

    /// Leave edit mode, reporting the new name if there is one.
    pub fn commit(&mut self) -> Option<RenameEvent> {
        let Mode::Editing(buffer) = std::mem::replace(&mut self.mode, Mode::Viewing) else {
            return None;
        };
        match committed_name(&self.label, buffer.text()) {
            Some(name) => {
                info!("Renamed {} to {:?}", self.id, name);
                self.display = name.clone();
                self.on_rename.emit((self.id.clone(), name.clone()));
                Some(RenameEvent::Renamed {
                    id: self.id.clone(),
                    name,
                })
            }
            None => {
                debug!("Rename of {} reverted", self.id);
                Some(RenameEvent::Reverted)
            }
        }
    }

    /// The row left the screen (sidebar collapsed). Drops any edit unreported.
    pub fn unmount(&mut self) {
        if self.is_editing() {
            debug!("Discarding edit of {}", self.id);
        }
        self.mode = Mode::Viewing;
        self.display = self.label.clone();
        self.hovered = false;
        self.row_area = None;
        self.input_area = None;
        self.button_area = None;
    }

    fn field_width(width: u16) -> u16 {
        width.saturating_sub(4)
    }

    /// Record where the row landed on screen (`None` if scrolled out of view).
    pub fn set_screen_area(&mut self, row: Option<Rect>) {
        self.row_area = row;
        self.input_area = None;
        self.button_area = None;
        if let Some(r) = row {
            let field = Rect::new(r.x + 1, r.y, Self::field_width(r.width), r.height);
            let button = Rect::new(r.right().saturating_sub(3), r.y, 3.min(r.width), r.height);
            self.input_area = Some(field.intersection(r)).filter(|a| !a.is_empty());
            self.button_area = Some(button.intersection(r)).filter(|a| !a.is_empty());
        }
    }

    pub fn input_area(&self) -> Option<Rect> {
        self.input_area
    }

    /// Where the terminal cursor goes while editing.
    pub fn cursor_position(&self) -> Option<Position> {
        let area = self.input_area.filter(|_| self.is_editing())?;
        Some(Position {
            x: (area.x + self.cursor_offset).min(area.right().saturating_sub(1)),
            y: area.y,
        })
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

    /// The row's contents for a row `width` columns wide.
    pub fn line(&mut self, width: u16) -> Line<'static> {
        let style = self.row_style();
        let field_width = Self::field_width(width) as usize;

        let mut spans = vec![Span::styled(" ", style)];
        match &mut self.mode {
            Mode::Viewing => {
                let text = truncate_to_width(&self.display, field_width);
                let pad = field_width.saturating_sub(text.width());
                spans.push(Span::styled(text, style));
                spans.push(Span::styled(" ".repeat(pad), style));
            }
            Mode::Editing(buffer) => {
                let selected = buffer.is_all_selected();
                let (text, cursor) = buffer.visible(field_width);
                self.cursor_offset = cursor;
                let field = Style::default().bg(Color::White).fg(Color::Black);
                let text_style = if selected {
                    field.add_modifier(Modifier::REVERSED)
                } else {
                    field
                };
                let pad = field_width.saturating_sub(text.width());
                spans.push(Span::styled(text, text_style));
                spans.push(Span::styled(" ".repeat(pad), field));
            }
        }

        let button = if !self.hovered && !self.is_editing() {
            Span::styled(" ", style)
        } else if self.editable {
            Span::styled(BUTTON, style.add_modifier(Modifier::BOLD))
        } else {
            Span::styled(BUTTON, style.fg(GRAY_500).add_modifier(Modifier::DIM))
        };
        if width >= 4 {
            spans.push(Span::styled(" ", style));
            spans.push(button);
            spans.push(Span::styled(" ", style));
        }
        Line::from(spans)
    }

    pub fn handle_event(&mut self, event: &TuiEvent, scope: &Scope<'_>) -> Option<RenameEvent> {
        match event {
            TuiEvent::MouseMove(col, row) => {
                self.hovered = hit(self.row_area, *col, *row);
                None
            }
            TuiEvent::MouseClick(col, row) => {
                let (col, row) = (*col, *row);
                let mut committed = None;
                if self.is_editing() {
                    if hit(self.input_area, col, row) {
                        return None;
                    }
                    committed = self.commit();
                }
                if hit(self.button_area, col, row) {
                    // The button never counts as a row click.
                    return if self.begin_edit() {
                        Some(RenameEvent::EditStarted)
                    } else {
                        committed
                    };
                }
                if hit(self.row_area, col, row) {
                    debug!("Item {} clicked", self.id);
                    self.on_click.emit(());
                    scope.collapse_if_narrow();
                    return Some(RenameEvent::Clicked);
                }
                committed
            }
            TuiEvent::Submit | TuiEvent::FocusLost => self.commit(),
            _ => {
                let Mode::Editing(buffer) = &mut self.mode else {
                    return None;
                };
                match event {
                    TuiEvent::InputChar(c) => buffer.insert(*c),
                    TuiEvent::Paste(text) => buffer.insert_str(text),
                    TuiEvent::Backspace => buffer.backspace(),
                    TuiEvent::Delete => buffer.delete(),
                    TuiEvent::CursorLeft => buffer.move_left(),
                    TuiEvent::CursorRight => buffer.move_right(),
                    TuiEvent::CursorHome => buffer.move_home(),
                    TuiEvent::CursorEnd => buffer.move_end(),
                    _ => {}
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::Viewport;
    use crate::test_support::{recording_callback, recording_context, scope, test_viewport};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    type Renames = std::rc::Rc<std::cell::RefCell<Vec<(String, String)>>>;

    /// A placed row at y=4, 24 columns wide: input cols 1..21, button cols 21..24.
    fn placed(id: &str, label: &str) -> (RenameItem, Renames, Viewport) {
        let (on_rename, renames) = recording_callback();
        let mut item = RenameItem::new(id, label).with_on_rename(on_rename);
        item.set_screen_area(Some(Rect::new(0, 4, 24, 1)));
        (item, renames, test_viewport())
    }

    fn type_text(item: &mut RenameItem, s: &Scope<'_>, text: &str) {
        for c in text.chars() {
            item.handle_event(&TuiEvent::InputChar(c), s);
        }
    }

    #[test]
    fn test_committed_name() {
        assert_eq!(committed_name("Informe mensual", "  Informe anual "), Some("Informe anual".to_string()));
        assert_eq!(committed_name("Informe mensual", "   "), None);
        assert_eq!(committed_name("Informe mensual", ""), None);
        assert_eq!(committed_name("Informe mensual", " Informe mensual"), None);
    }

    #[test]
    fn test_rename_reports_once_and_shows_new_name() {
        let (mut item, renames, viewport) = placed("f1", "Informe mensual");
        let (ctx, _) = recording_context(true);
        let s = scope(&ctx, &viewport, false);

        assert_eq!(item.handle_event(&TuiEvent::MouseClick(22, 4), &s), Some(RenameEvent::EditStarted));
        assert!(item.is_editing());
        assert_eq!(item.buffer().unwrap().text(), "Informe mensual");

        type_text(&mut item, &s, "Informe anual");
        let event = item.handle_event(&TuiEvent::Submit, &s);

        assert_eq!(
            event,
            Some(RenameEvent::Renamed { id: "f1".to_string(), name: "Informe anual".to_string() })
        );
        assert_eq!(*renames.borrow(), vec![("f1".to_string(), "Informe anual".to_string())]);
        assert_eq!(item.display(), "Informe anual");
        assert!(!item.is_editing());

        // A second Enter has nothing to commit.
        assert_eq!(item.handle_event(&TuiEvent::Submit, &s), None);
        assert_eq!(renames.borrow().len(), 1);
    }

    #[test]
    fn test_whitespace_only_reverts() {
        let (mut item, renames, viewport) = placed("f1", "Informe mensual");
        let (ctx, _) = recording_context(true);
        let s = scope(&ctx, &viewport, false);

        item.begin_edit();
        type_text(&mut item, &s, "   ");
        assert_eq!(item.handle_event(&TuiEvent::Submit, &s), Some(RenameEvent::Reverted));

        assert!(renames.borrow().is_empty());
        assert_eq!(item.display(), "Informe mensual");
    }

    #[test]
    fn test_unchanged_name_does_not_report() {
        let (mut item, renames, viewport) = placed("f2", "Acta de reunión");
        let (ctx, _) = recording_context(true);
        let s = scope(&ctx, &viewport, false);

        item.begin_edit();
        item.handle_event(&TuiEvent::CursorEnd, &s);
        item.handle_event(&TuiEvent::InputChar(' '), &s);
        assert_eq!(item.handle_event(&TuiEvent::Submit, &s), Some(RenameEvent::Reverted));
        assert!(renames.borrow().is_empty());
    }

    #[test]
    fn test_click_outside_input_commits() {
        let (mut item, renames, viewport) = placed("f1", "Informe mensual");
        let (ctx, _) = recording_context(true);
        let s = scope(&ctx, &viewport, false);

        item.begin_edit();
        type_text(&mut item, &s, "Informe anual");

        // Inside the input: stays in edit mode.
        assert_eq!(item.handle_event(&TuiEvent::MouseClick(5, 4), &s), None);
        assert!(item.is_editing());

        // Elsewhere on screen: commit.
        let event = item.handle_event(&TuiEvent::MouseClick(60, 20), &s);
        assert!(matches!(event, Some(RenameEvent::Renamed { .. })));
        assert_eq!(renames.borrow().len(), 1);
    }

    #[test]
    fn test_focus_lost_commits() {
        let (mut item, renames, viewport) = placed("f3", "Checklist Operativo");
        let (ctx, _) = recording_context(true);
        let s = scope(&ctx, &viewport, false);

        item.begin_edit();
        type_text(&mut item, &s, "Checklist");
        item.handle_event(&TuiEvent::FocusLost, &s);

        assert_eq!(*renames.borrow(), vec![("f3".to_string(), "Checklist".to_string())]);
    }

    #[test]
    fn test_button_click_is_not_a_row_click() {
        let (on_click, clicks) = recording_callback::<()>();
        let (item, _, viewport) = placed("f1", "Informe mensual");
        let mut item = item.with_on_click(on_click);
        let (ctx, expand_calls) = recording_context(true);
        let s = scope(&ctx, &viewport, true);

        item.handle_event(&TuiEvent::MouseClick(22, 4), &s);
        assert!(clicks.borrow().is_empty());
        assert!(expand_calls.borrow().is_empty());

        item.commit();
        assert_eq!(item.handle_event(&TuiEvent::MouseClick(3, 4), &s), Some(RenameEvent::Clicked));
        assert_eq!(clicks.borrow().len(), 1);
        assert_eq!(*expand_calls.borrow(), vec![false]);
    }

    #[test]
    fn test_not_editable_never_enters_edit_mode() {
        let (item, _, viewport) = placed("f1", "Informe mensual");
        let mut item = item.with_editable(false);
        let (ctx, _) = recording_context(true);

        assert_eq!(item.handle_event(&TuiEvent::MouseClick(22, 4), &scope(&ctx, &viewport, false)), None);
        assert!(!item.is_editing());
    }

    #[test]
    fn test_unmount_discards_edit_silently() {
        let (mut item, renames, viewport) = placed("f1", "Informe mensual");
        let (ctx, _) = recording_context(true);
        let s = scope(&ctx, &viewport, false);

        item.begin_edit();
        type_text(&mut item, &s, "Informe anual");
        item.unmount();

        assert!(!item.is_editing());
        assert!(renames.borrow().is_empty());
        assert_eq!(item.display(), "Informe mensual");
    }

    #[test]
    fn test_label_change_resets_display() {
        let (mut item, _, viewport) = placed("f1", "Informe mensual");
        let (ctx, _) = recording_context(true);
        let s = scope(&ctx, &viewport, false);

        item.begin_edit();
        type_text(&mut item, &s, "Informe anual");
        item.commit();

        // Host adopts the name: nothing visible changes.
        item.set_label("Informe anual");
        assert_eq!(item.display(), "Informe anual");

        item.set_label("Informe trimestral");
        assert_eq!(item.display(), "Informe trimestral");
    }

    #[test]
    fn test_line_layout() {
        let (mut item, _, viewport) = placed("f1", "Informe mensual");
        let text = line_text(&item.line(24));
        assert!(text.starts_with(" Informe mensual"));
        assert!(!text.contains(BUTTON));
        assert_eq!(text.width(), 24);

        let (ctx, _) = recording_context(true);
        item.handle_event(&TuiEvent::MouseMove(3, 4), &scope(&ctx, &viewport, false));
        assert!(line_text(&item.line(24)).ends_with("⋯ "));
    }

    #[test]
    fn test_cursor_follows_edit() {
        let (mut item, _, viewport) = placed("f1", "Acta");
        let (ctx, _) = recording_context(true);
        let s = scope(&ctx, &viewport, false);

        assert_eq!(item.cursor_position(), None);
        item.begin_edit();
        item.line(24);
        assert_eq!(item.cursor_position(), Some(Position { x: 5, y: 4 }));

        item.handle_event(&TuiEvent::CursorHome, &s);
        item.line(24);
        assert_eq!(item.cursor_position(), Some(Position { x: 1, y: 4 }));
    }
}
