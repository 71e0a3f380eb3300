//! # Footer Component
//!
//! Identity block at the bottom of the sidebar.
//!
//! ```text
//! expanded                      collapsed
//! ─────────────────────         ───────
//!  ML  María López    ⏻           ML
//!      Coordinadora                ⏻
//! ```
//!
//! The avatar tile shows the initials in the avatar colors once the image
//! request succeeded, a dimmed `?` while it is pending or after it failed,
//! and plain initials when avatars are disabled.
//!
//! All fields are props; the only thing the footer remembers between frames
//! is where its logout button landed.

use log::info;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::avatar::AvatarStatus;
use crate::core::callback::Callback;
use crate::core::identity::{AvatarStyle, display_name, initials, parse_hex_rgb};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{GRAY_500, INDIGO_100, hit, truncate_to_width};
use crate::tui::event::TuiEvent;

const LOGOUT: &str = "⏻";
const TILE_WIDTH: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterEvent {
    LogoutRequested,
}

pub struct Footer {
    pub user_name: String,
    pub user_role: String,
    pub avatar: AvatarStatus,
    pub avatar_style: AvatarStyle,
    pub expanded: bool,
    pub on_logout: Callback<()>,
    logout_area: Option<Rect>,
}

impl Footer {
    pub fn new(user_name: impl Into<String>, user_role: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            user_role: user_role.into(),
            avatar: AvatarStatus::Disabled,
            avatar_style: AvatarStyle::default(),
            expanded: true,
            on_logout: Callback::noop(),
            logout_area: None,
        }
    }

    /// Border plus two content rows.
    pub fn height() -> u16 {
        3
    }

    pub fn logout_area(&self) -> Option<Rect> {
        self.logout_area
    }

    fn tile(&self) -> Span<'static> {
        let initials = initials(&display_name(&self.user_name));
        let rgb = |hex: &str| parse_hex_rgb(hex).map(|(r, g, b)| Color::Rgb(r, g, b));
        match &self.avatar {
            AvatarStatus::Loaded { .. } => {
                let mut style = Style::default().add_modifier(Modifier::BOLD);
                if let Some(bg) = rgb(&self.avatar_style.background) {
                    style = style.bg(bg);
                }
                if let Some(fg) = rgb(&self.avatar_style.color) {
                    style = style.fg(fg);
                }
                Span::styled(format!(" {initials:<2} "), style)
            }
            AvatarStatus::Disabled => Span::styled(
                format!(" {initials:<2} "),
                Style::default().bg(INDIGO_100).fg(Color::Black),
            ),
            AvatarStatus::Pending | AvatarStatus::Failed(_) => Span::styled(
                " ?  ",
                Style::default().fg(GRAY_500).add_modifier(Modifier::DIM),
            ),
        }
    }
}

impl Component for Footer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(GRAY_500));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.logout_area = None;
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let tile = self.tile();
        let logout_style = Style::default().fg(GRAY_500).add_modifier(Modifier::BOLD);

        if !self.expanded {
            let x = inner.x + inner.width.saturating_sub(TILE_WIDTH) / 2;
            let tile_area = Rect::new(x, inner.y, TILE_WIDTH, 1).intersection(inner);
            frame.render_widget(Paragraph::new(Line::from(tile)), tile_area);
            if inner.height >= 2 {
                let logout = Rect::new(inner.x, inner.y + 1, inner.width, 1);
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(LOGOUT, logout_style))).centered(),
                    logout,
                );
                self.logout_area = Some(logout);
            }
            return;
        }

        // " {tile} {name}{pad} ⏻ "
        let name = display_name(&self.user_name);
        let text_width = inner.width.saturating_sub(1 + TILE_WIDTH + 1 + 3) as usize;
        let name = truncate_to_width(&name, text_width);
        let pad = text_width.saturating_sub(name.width());
        let first = Line::from(vec![
            Span::raw(" "),
            tile,
            Span::raw(" "),
            Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(pad)),
            Span::raw(" "),
            Span::styled(LOGOUT, logout_style),
            Span::raw(" "),
        ]);
        frame.render_widget(Paragraph::new(first), Rect::new(inner.x, inner.y, inner.width, 1));
        let button_x = inner.right().saturating_sub(3);
        self.logout_area = Some(Rect::new(button_x, inner.y, 3, 1).intersection(inner));

        if inner.height >= 2 {
            let indent = " ".repeat(1 + TILE_WIDTH as usize + 1);
            let role = truncate_to_width(&self.user_role, text_width);
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::raw(indent),
                    Span::styled(role, Style::default().fg(GRAY_500)),
                ])),
                Rect::new(inner.x, inner.y + 1, inner.width, 1),
            );
        }
    }
}

impl EventHandler for Footer {
    type Event = FooterEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::MouseClick(col, row) if hit(self.logout_area, *col, *row) => {
                info!("Logout requested");
                self.on_logout.emit(());
                Some(FooterEvent::LogoutRequested)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, recording_callback};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(footer: &mut Footer, width: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, 3)).unwrap();
        terminal.draw(|f| footer.render(f, f.area())).unwrap();
        terminal
    }

    #[test]
    fn test_expanded_shows_display_name_and_role() {
        let mut footer = Footer::new("María José López Pérez", "Coordinadora");
        let text = buffer_text(&draw(&mut footer, 30));
        assert!(text.contains("María José"));
        assert!(!text.contains("López"));
        assert!(text.contains("Coordinadora"));
        assert!(text.contains("MJ"));
        assert!(text.contains(LOGOUT));
    }

    #[test]
    fn test_collapsed_shows_tile_and_logout_only() {
        let mut footer = Footer::new("María López", "Coordinadora");
        footer.expanded = false;
        let text = buffer_text(&draw(&mut footer, 7));
        assert!(text.contains("ML"));
        assert!(!text.contains("Coordinadora"));
        assert!(text.contains(LOGOUT));
    }

    #[test]
    fn test_pending_avatar_shows_placeholder() {
        let mut footer = Footer::new("María López", "Coordinadora");
        footer.avatar = AvatarStatus::Pending;
        let text = buffer_text(&draw(&mut footer, 30));
        assert!(text.contains('?'));
        assert!(!text.contains("ML "));
    }

    #[test]
    fn test_loaded_avatar_uses_avatar_colors() {
        let mut footer = Footer::new("María López", "Coordinadora");
        footer.avatar = AvatarStatus::Loaded { content_type: None, bytes: 10 };
        let terminal = draw(&mut footer, 30);
        // Tile starts at column 1 of the first content row.
        let cell = &terminal.backend().buffer()[(2, 1)];
        assert_eq!(cell.symbol(), "M");
        assert_eq!(cell.bg, Color::Rgb(0xc7, 0xd2, 0xfe));
        assert_eq!(cell.fg, Color::Rgb(0x37, 0x30, 0xa3));
    }

    #[test]
    fn test_logout_click() {
        let (on_logout, calls) = recording_callback::<()>();
        let mut footer = Footer::new("María López", "Coordinadora");
        footer.on_logout = on_logout;
        draw(&mut footer, 30);

        let area = footer.logout_area().unwrap();
        assert_eq!(footer.handle_event(&TuiEvent::MouseClick(area.x + 1, area.y)), Some(FooterEvent::LogoutRequested));
        assert_eq!(calls.borrow().len(), 1);

        assert_eq!(footer.handle_event(&TuiEvent::MouseClick(0, 0)), None);
        assert_eq!(calls.borrow().len(), 1);
    }
}
