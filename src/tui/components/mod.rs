//! # TUI Components
//!
//! The sidebar widget and the demo host's content pane.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `ContentPane`: the host's main area (active id, status line)
//! - `Footer`: identity block; only records where its logout button landed
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `Sidebar`: the shell; owns the breakpoint detector and routes events
//! - `Section`: titled, scrollable list of rows
//! - `Item`: icon + label row with a collapsed-mode `Tooltip`
//! - `RenameItem`: row with an inline edit mode
//!
//! ## Props-Based Data Flow
//!
//! The host keeps the props in sync before every event and frame
//! (`Sidebar::update_expanded`, `Sidebar::set_active`, `Section::reconcile`).
//! Rows never read host state directly; they get a [`Scope`] with the
//! expansion context, the viewport and the breakpoint state.
//!
//! [`Scope`]: crate::core::context::Scope
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file: palette + shared helpers)
//! ├── sidebar.rs       (shell: header, overlay, open button, sections, footer)
//! ├── section.rs       (titled scroll region)
//! ├── item.rs          (generic item / heading)
//! ├── rename_item/     (rename-capable row + edit buffer)
//! ├── tooltip.rs       (floating label for collapsed icons)
//! ├── footer.rs        (avatar, name, role, logout)
//! ├── logo.rs          (compiled-in ASCII logo)
//! └── content.rs       (demo host content pane)
//! ```

use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use unicode_width::UnicodeWidthChar;

pub mod content;
pub mod footer;
pub mod item;
pub mod logo;
pub mod rename_item;
pub mod section;
pub mod sidebar;
pub mod tooltip;

pub use content::ContentPane;
pub use footer::Footer;
pub use item::{Item, ItemEvent};
pub use rename_item::{RenameEvent, RenameItem};
pub use section::{Row, RowEvent, Section};
pub use sidebar::{Sidebar, SidebarEvent};
pub use tooltip::Tooltip;

// Palette (indigo accents on the terminal's own background)
pub const INDIGO_50: Color = Color::Rgb(238, 242, 255);
pub const INDIGO_100: Color = Color::Rgb(224, 231, 255);
pub const INDIGO_200: Color = Color::Rgb(199, 210, 254);
pub const INDIGO_400: Color = Color::Rgb(129, 140, 248);
pub const GRAY_500: Color = Color::Rgb(107, 114, 128);

/// Truncate `s` to at most `max_width` display columns, adding "…" when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthStr;
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Screen rect of a content-space rect inside a vertically scrolled region.
/// `None` when nothing of it is visible.
pub fn visible_rect(content: Rect, scroll_y: u16, viewport: Rect) -> Option<Rect> {
    let top = i32::from(viewport.y) + i32::from(content.y) - i32::from(scroll_y);
    let bottom = top + i32::from(content.height);
    let clip_top = top.max(i32::from(viewport.y));
    let clip_bottom = bottom.min(i32::from(viewport.bottom()));
    if clip_bottom <= clip_top {
        return None;
    }
    let rect = Rect::new(
        viewport.x + content.x,
        clip_top as u16,
        content.width,
        (clip_bottom - clip_top) as u16,
    )
    .intersection(viewport);
    (!rect.is_empty()).then_some(rect)
}

/// `rect.contains(pos)` for an optional rect.
pub fn hit(rect: Option<Rect>, col: u16, row: u16) -> bool {
    rect.is_some_and(|r| r.contains(Position { x: col, y: row }))
}
