//! # ContentPane Component
//!
//! The demo host's main area, next to (or under) the sidebar.
//!
//! Purely presentational: every field is a prop the event loop refreshes from
//! `App` before drawing.
//!
//! ```text
//! Contenido principal
//! Área de contenido. Usa la barra lateral para navegar.
//!
//! Estado activo: docs
//! Renamed to "Informe anual"
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::components::GRAY_500;

pub struct ContentPane {
    pub active_id: Option<String>,
    pub status_message: String,
}

impl ContentPane {
    pub fn new(active_id: Option<String>, status_message: String) -> Self {
        Self {
            active_id,
            status_message,
        }
    }
}

impl Component for ContentPane {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let active = self.active_id.as_deref().unwrap_or("ninguno");
        let lines = vec![
            Line::styled("Contenido principal", Style::default().add_modifier(Modifier::BOLD)),
            Line::styled(
                "Área de contenido. Usa la barra lateral para navegar.",
                Style::default().fg(GRAY_500),
            ),
            Line::default(),
            Line::from(vec![Span::raw("Estado activo: "), Span::styled(active.to_string(), Style::default().add_modifier(Modifier::BOLD))]),
            Line::styled(self.status_message.clone(), Style::default().fg(GRAY_500)),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().padding(Padding::new(2, 2, 1, 0)))
                .wrap(Wrap { trim: true }),
            area,
        );
    }
}
