//! # Sidebar Component
//!
//! The shell: header, sections, footer, and the narrow-viewport chrome.
//!
//! ## Layout
//!
//! ```text
//! wide, expanded           wide, collapsed      narrow, expanded          narrow, collapsed
//! ┌──────────────┐│        ┌─────┐│            ┌──────────────┐│░░░░░░░    ☰
//! │ logo       « ││        │  »  ││            │ logo       « ││░overlay░
//! │ General      ││        │  ◧  ││            │ ...          ││░░░░░░░
//! │ ◧  Panel     ││        │  ▤ •││            │              ││░░░░░░░
//! │ ...          ││        │ ... ││            │              ││░░░░░░░
//! │ ML  María    ││        │ ML  ││            │ ML  María    ││░░░░░░░
//! ```
//!
//! On a wide viewport the panel is docked left and the host's content gets
//! the rest ([`Sidebar::content_area`]). On a narrow one the panel floats
//! over the content with a dimmed overlay behind it, and disappears entirely
//! when collapsed, leaving a floating open button.
//!
//! ## Expansion
//!
//! The sidebar never changes its own expansion. It asks the host through the
//! [`ExpansionContext`] setter (toggle, Escape, overlay, narrow transition,
//! navigation on a narrow viewport) and the host feeds the value back with
//! [`Sidebar::update_expanded`] before the next event or frame.
//!
//! [`Sidebar::sync`] is the effect hook: it forces a collapse when the
//! breakpoint turns narrow (including the very first sync), and unmounts row
//! state whenever the expansion changed.

use log::{debug, info};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::core::breakpoint::BreakpointDetector;
use crate::core::config::SidebarConfig;
use crate::core::context::{ExpansionContext, Scope};
use crate::core::identity::DEFAULT_USER_NAME;
use crate::core::viewport::Viewport;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::footer::{Footer, FooterEvent};
use crate::tui::components::item::ItemEvent;
use crate::tui::components::logo::Logo;
use crate::tui::components::rename_item::RenameEvent;
use crate::tui::components::section::{RowEvent, Section};
use crate::tui::components::{GRAY_500, INDIGO_200, INDIGO_400, hit};
use crate::tui::event::TuiEvent;

/// What the sidebar did with an event, for the host's logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEvent {
    ExpansionRequested(bool),
    ItemClicked(String),
    EditStarted(String),
    Renamed { id: String, name: String },
    RenameReverted(String),
    LogoutRequested,
}

impl SidebarEvent {
    fn from_row(event: RowEvent) -> Self {
        match event {
            RowEvent::Item(id, ItemEvent::Clicked) | RowEvent::Rename(id, RenameEvent::Clicked) => {
                SidebarEvent::ItemClicked(id)
            }
            RowEvent::Rename(id, RenameEvent::EditStarted) => SidebarEvent::EditStarted(id),
            RowEvent::Rename(_, RenameEvent::Renamed { id, name }) => SidebarEvent::Renamed { id, name },
            RowEvent::Rename(id, RenameEvent::Reverted) => SidebarEvent::RenameReverted(id),
        }
    }
}

pub struct Sidebar {
    pub config: SidebarConfig,
    pub footer: Footer,
    context: ExpansionContext,
    viewport: Viewport,
    breakpoint: BreakpointDetector,
    sections: Vec<Section>,
    /// Expansion the rows were last laid out for.
    rows_expanded: bool,
    panel_area: Option<Rect>,
    toggle_area: Option<Rect>,
    open_button_area: Option<Rect>,
    overlay_area: Option<Rect>,
}

impl Sidebar {
    pub fn new(viewport: &Viewport, config: SidebarConfig, context: ExpansionContext) -> Self {
        let breakpoint = BreakpointDetector::mount(viewport, config.narrow_max_width);
        info!(
            "Sidebar mounted ({}x{}, narrow: {})",
            viewport.size().width,
            viewport.size().height,
            breakpoint.is_narrow()
        );
        Self {
            rows_expanded: context.expanded(),
            config,
            footer: Footer::new(DEFAULT_USER_NAME, ""),
            context,
            viewport: viewport.clone(),
            breakpoint,
            sections: Vec::new(),
            panel_area: None,
            toggle_area: None,
            open_button_area: None,
            overlay_area: None,
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.add_section(section);
        self
    }

    pub fn add_section(&mut self, mut section: Section) {
        section.max_height_percent = self.config.section_max_height_percent;
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_mut(&mut self, title: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|s| s.title.as_deref() == Some(title))
    }

    pub fn expanded(&self) -> bool {
        self.context.expanded()
    }

    pub fn is_narrow(&self) -> bool {
        self.breakpoint.is_narrow()
    }

    /// New expansion value from the host.
    pub fn update_expanded(&mut self, expanded: bool) {
        self.context.update(expanded);
        self.sync();
    }

    pub fn set_active(&mut self, active_id: Option<&str>) {
        for section in &mut self.sections {
            section.set_active(active_id);
        }
    }

    /// React to breakpoint and expansion changes.
    pub fn sync(&mut self) {
        if let Some(narrow) = self.breakpoint.take_change() {
            debug!("Breakpoint changed (narrow: {narrow})");
            if narrow {
                self.context.set_expanded(false);
            }
        }

        let expanded = self.context.expanded();
        if expanded != self.rows_expanded {
            debug!("Expansion changed to {expanded}, unmounting rows");
            self.sections.iter_mut().for_each(Section::unmount);
            self.rows_expanded = expanded;
        }
        self.footer.expanded = expanded;
    }

    pub fn panel_width(&self) -> u16 {
        if self.context.expanded() {
            self.config.expanded_width
        } else {
            self.config.collapsed_width
        }
    }

    /// Where the host should draw its content.
    pub fn content_area(&self, frame_area: Rect) -> Rect {
        if self.breakpoint.is_narrow() {
            return frame_area;
        }
        let width = self.panel_width().min(frame_area.width);
        Rect::new(
            frame_area.x + width,
            frame_area.y,
            frame_area.width - width,
            frame_area.height,
        )
    }

    pub fn panel_area(&self) -> Option<Rect> {
        self.panel_area
    }

    pub fn toggle_area(&self) -> Option<Rect> {
        self.toggle_area
    }

    pub fn open_button_area(&self) -> Option<Rect> {
        self.open_button_area
    }

    fn request_expanded(&self, expanded: bool) -> SidebarEvent {
        self.context.set_expanded(expanded);
        SidebarEvent::ExpansionRequested(expanded)
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect, expanded: bool) {
        if area.is_empty() {
            return;
        }
        let toggle_style = Style::default().fg(INDIGO_400).add_modifier(Modifier::BOLD);
        if expanded {
            let logo = Rect::new(area.x + 1, area.y, Logo::width(), Logo::required_height()).intersection(area);
            Logo::render(frame, logo);
            let toggle = Rect::new(area.right().saturating_sub(3), area.y, 3.min(area.width), 1);
            frame.render_widget(Paragraph::new(Line::styled(" « ", toggle_style)), toggle);
            self.toggle_area = Some(toggle);
        } else {
            let toggle = Rect::new(area.x, area.y, area.width, 1);
            frame.render_widget(Paragraph::new(Line::styled("»", toggle_style)).centered(), toggle);
            self.toggle_area = Some(toggle);
        }
    }

    fn route_to_rows(&mut self, event: &TuiEvent) -> Vec<SidebarEvent> {
        let scope = Scope {
            expansion: &self.context,
            viewport: &self.viewport,
            narrow: self.breakpoint.is_narrow(),
            tooltip_gap: self.config.tooltip_gap,
        };
        self.sections
            .iter_mut()
            .flat_map(|section| section.handle_event(event, &scope))
            .map(SidebarEvent::from_row)
            .collect()
    }

    fn handle_click(&mut self, event: &TuiEvent, col: u16, row: u16) -> Option<SidebarEvent> {
        // A click outside an active edit field blurs it first.
        let mut events: Vec<SidebarEvent> = self
            .sections
            .iter_mut()
            .flat_map(|section| section.commit_edits_outside(col, row))
            .map(SidebarEvent::from_row)
            .collect();

        if hit(self.open_button_area, col, row) {
            events.push(self.request_expanded(true));
        } else if hit(self.toggle_area, col, row) {
            // On a narrow viewport the toggle is only visible while expanded,
            // so flipping always means closing there.
            events.push(self.request_expanded(!self.context.expanded()));
        } else if hit(self.panel_area, col, row) {
            match self.footer.handle_event(event) {
                Some(FooterEvent::LogoutRequested) => events.push(SidebarEvent::LogoutRequested),
                None => events.extend(self.route_to_rows(event)),
            }
        } else if hit(self.overlay_area, col, row) {
            debug!("Overlay clicked");
            events.push(self.request_expanded(false));
        }
        events.pop()
    }
}

impl Component for Sidebar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.panel_area = None;
        self.toggle_area = None;
        self.open_button_area = None;
        self.overlay_area = None;

        let expanded = self.context.expanded();
        let narrow = self.breakpoint.is_narrow();

        if narrow && !expanded {
            // No panel: rows lose their screen areas and tooltips.
            self.sections.iter_mut().for_each(Section::unmount);
            if self.config.show_mobile_toggle {
                let button = Rect::new(area.x + 1, area.y, 3, 1).intersection(area);
                frame.render_widget(Clear, button);
                frame.render_widget(
                    Paragraph::new(" ☰ ").style(Style::default().bg(INDIGO_400).fg(Color::White)),
                    button,
                );
                self.open_button_area = Some(button);
            }
            return;
        }

        if narrow {
            frame
                .buffer_mut()
                .set_style(area, Style::default().fg(GRAY_500).add_modifier(Modifier::DIM));
            self.overlay_area = Some(area);
        }

        let panel = Rect::new(area.x, area.y, self.panel_width().min(area.width), area.height);
        frame.render_widget(Clear, panel);
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(INDIGO_200));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        self.panel_area = Some(panel);

        let header_height = if expanded {
            Logo::required_height().max(1)
        } else {
            1
        };
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(Footer::height()),
        ])
        .areas(inner);
        self.render_header(frame, header, expanded);

        let scope = Scope {
            expansion: &self.context,
            viewport: &self.viewport,
            narrow,
            tooltip_gap: self.config.tooltip_gap,
        };
        let viewport_height = self.viewport.size().height;
        // One blank row below the header and between sections.
        let mut y = (body.y + 1).min(body.bottom());
        for section in &mut self.sections {
            let height = section
                .height(expanded, viewport_height)
                .min(body.bottom() - y);
            section.render(frame, Rect::new(body.x, y, body.width, height), &scope);
            if height > 0 {
                y = (y + height + 1).min(body.bottom());
            }
        }

        self.footer.expanded = expanded;
        self.footer.render(frame, footer);

        for section in &self.sections {
            section.render_tooltips(frame, area);
        }
    }
}

impl EventHandler for Sidebar {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => {
                // Rows drop their tooltips; the collapse is requested even if
                // already collapsed.
                self.route_to_rows(event);
                Some(self.request_expanded(false))
            }
            TuiEvent::ToggleSidebar => Some(self.request_expanded(!self.context.expanded())),
            TuiEvent::MouseClick(col, row) => self.handle_click(event, *col, *row),
            _ => self.route_to_rows(event).pop(),
        }
    }
}
