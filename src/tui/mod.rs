//! # TUI Adapter
//!
//! The ratatui-specific layer: terminal setup, the event loop, and the demo
//! host that mounts the sidebar next to a content pane.
//!
//! ## Data flow
//!
//! ```text
//! crossterm event ─► TuiEvent ─► Sidebar::handle_event ─► callbacks
//!                                                            │
//!        ┌─────────── mpsc::Sender<Action> ◄─────────────────┘
//!        ▼                     ▲
//!   update(&mut App)           └── avatar fetch (tokio task)
//!        │
//!        ▼
//!   TuiState::sync ─► sidebar props (expanded, active, entries, footer)
//! ```
//!
//! The channel is drained after every event, and props are re-synced until
//! no more actions arrive, so the next event always sees the host's latest
//! state. The sidebar's own requests (a forced collapse on a narrow
//! viewport, for instance) travel the same path.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 250ms waiting for input and
//! only redraws after an event or an applied action.

pub mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Size;

use crate::avatar::{AvatarFetcher, HttpAvatarFetcher};
use crate::core::action::{Action, Effect, update};
use crate::core::callback::Callback;
use crate::core::config::ResolvedConfig;
use crate::core::context::ExpansionContext;
use crate::core::identity::display_name;
use crate::core::state::{App, RenameEntry};
use crate::core::viewport::Viewport;
use crate::tui::component::EventHandler;
use crate::tui::components::{ContentPane, Item, RenameItem, Section, Sidebar};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const GENERAL: &str = "General";
const FORMATOS: &str = "Formatos";
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A callback that turns each value into an `Action` for the event loop.
fn dispatch<T: 'static>(
    tx: &mpsc::Sender<Action>,
    to_action: impl Fn(T) -> Action + 'static,
) -> Callback<T> {
    let tx = tx.clone();
    Callback::new(move |value| {
        if tx.send(to_action(value)).is_err() {
            warn!("Failed to send action: receiver dropped");
        }
    })
}

fn rename_row(entry: &RenameEntry, tx: &mpsc::Sender<Action>) -> RenameItem {
    let id = entry.id.clone();
    RenameItem::new(&entry.id, &entry.name)
        .with_on_click(dispatch(tx, move |()| Action::Navigate(id.clone())))
        .with_on_rename(dispatch(tx, |(id, name): (String, String)| Action::Rename { id, name }))
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub sidebar: Sidebar,
    pub content: ContentPane,
    actions: mpsc::Sender<Action>,
}

impl TuiState {
    pub fn new(
        app: &App,
        config: &ResolvedConfig,
        viewport: &Viewport,
        actions: mpsc::Sender<Action>,
    ) -> Self {
        let tx = &actions;
        let context = ExpansionContext::new(app.expanded, dispatch(tx, Action::SetExpanded));

        let general = Section::new(GENERAL)
            .with_row(
                Item::new("panel", "◧", "Panel")
                    .with_on_click(dispatch(tx, |()| Action::Navigate("panel".to_string()))),
            )
            .with_row(
                Item::new("docs", "▤", "Documentos")
                    .with_alert(true)
                    .with_on_click(dispatch(tx, |()| Action::Navigate("docs".to_string()))),
            )
            .with_row(Item::new("new", "+", "Nuevo").with_on_click(dispatch(tx, |()| Action::CreateEntry)));
        let mut formatos = Section::new(FORMATOS);
        formatos.reconcile(&app.entries, |entry| rename_row(entry, tx));

        let mut sidebar = Sidebar::new(viewport, config.sidebar.clone(), context)
            .with_section(general)
            .with_section(formatos);
        sidebar.footer.avatar_style = config.avatar.clone();
        sidebar.footer.on_logout = dispatch(tx, |()| Action::Logout);

        let mut tui = Self {
            sidebar,
            content: ContentPane::new(app.active_id.clone(), app.status_message.clone()),
            actions,
        };
        tui.sync(app);
        tui
    }

    /// Push the host's state into the components' props.
    pub fn sync(&mut self, app: &App) {
        let tx = &self.actions;
        if let Some(formatos) = self.sidebar.section_mut(FORMATOS) {
            formatos.reconcile(&app.entries, |entry| rename_row(entry, tx));
        }
        self.sidebar.set_active(app.active_id.as_deref());
        self.sidebar.footer.user_name = app.user_name.clone();
        self.sidebar.footer.user_role = app.user_role.clone();
        self.sidebar.footer.avatar = app.avatar.clone();
        self.sidebar.update_expanded(app.expanded);

        self.content.active_id = app.active_id.clone();
        self.content.status_message = app.status_message.clone();
    }
}

/// Apply queued actions, re-syncing props until nothing new arrives.
/// Returns `(applied_any, quit)`.
pub fn apply_pending(app: &mut App, tui: &mut TuiState, rx: &mpsc::Receiver<Action>) -> (bool, bool) {
    let mut applied = false;
    let mut quit = false;
    loop {
        let mut drained = false;
        while let Ok(action) = rx.try_recv() {
            drained = true;
            if update(app, action) == Effect::Quit {
                quit = true;
            }
        }
        tui.sync(app);
        if !drained {
            break;
        }
        applied = true;
    }
    (applied, quit)
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            EnableFocusChange,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, focus change, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            DisableFocusChange,
            Hide
        );
    }
}

fn spawn_avatar_fetch(fetcher: Arc<dyn AvatarFetcher>, user_name: &str, tx: mpsc::Sender<Action>) {
    let name = display_name(user_name);
    info!("Fetching avatar for {:?}", name);
    tokio::spawn(async move {
        let result = fetcher.fetch(&name).await;
        match &result {
            Ok(image) => debug!("Avatar fetched ({} bytes)", image.bytes.len()),
            Err(e) => warn!("Avatar fetch failed: {}", e),
        }
        if tx.send(Action::AvatarFetched(result)).is_err() {
            warn!("Failed to send avatar result: receiver dropped");
        }
    });
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let (tx, rx) = mpsc::channel();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let size = terminal.size()?;
    let viewport = Viewport::new(Size::new(size.width, size.height));
    let mut tui = TuiState::new(&app, &config, &viewport, tx.clone());

    if config.avatar_enabled {
        let fetcher = Arc::new(HttpAvatarFetcher::new(config.avatar.clone()));
        spawn_avatar_fetch(fetcher, &app.user_name, tx.clone());
    }

    let (_, mut should_quit) = apply_pending(&mut app, &mut tui, &rx);
    let mut needs_redraw = true;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &mut tui))?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let mut next = poll_event_timeout(IDLE_POLL)?;
        while let Some(event) = next.take() {
            needs_redraw = true;
            match event {
                TuiEvent::ForceQuit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }
                TuiEvent::Resize(width, height) => viewport.resize(Size::new(width, height)),
                other => {
                    if let Some(sidebar_event) = tui.sidebar.handle_event(&other) {
                        debug!("Sidebar: {:?}", sidebar_event);
                    }
                }
            }

            let (_, quit) = apply_pending(&mut app, &mut tui, &rx);
            should_quit |= quit;
            if should_quit {
                break;
            }
            next = poll_event_immediate()?;
        }

        // Background results (avatar)
        let (applied, quit) = apply_pending(&mut app, &mut tui, &rx);
        needs_redraw |= applied;
        should_quit |= quit;
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}
