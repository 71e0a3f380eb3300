//! Compiled-in ASCII logo (generated by `build.rs` from `assets/logo.txt`).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

include!(concat!(env!("OUT_DIR"), "/logo.rs"));

pub struct Logo;

impl Logo {
    pub fn required_height() -> u16 {
        LOGO_LINES.len() as u16
    }

    pub fn width() -> u16 {
        LOGO_WIDTH
    }

    pub fn render(frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = LOGO_LINES.iter().map(|l| Line::from(*l)).collect();
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().fg(Color::Indexed(62))),
            area,
        );
    }
}
