use ratatui::Frame;

use crate::tui::TuiState;
use crate::tui::component::Component;

/// Content pane first, then the sidebar on top (its overlay and tooltips
/// must cover the content).
pub fn draw_ui(frame: &mut Frame, tui: &mut TuiState) {
    let area = frame.area();
    let content_area = tui.sidebar.content_area(area);
    tui.content.render(frame, content_area);
    tui.sidebar.render(frame, area);
}
