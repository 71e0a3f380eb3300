//! # Actions
//!
//! Everything the sidebar asks of its host becomes an `Action`.
//! Collapse button clicked? That's `Action::SetExpanded(false)`.
//! Row renamed? That's `Action::Rename { id, name }`.
//!
//! The `update()` function takes the current state and an action and mutates
//! it in place. No I/O happens here; the returned `Effect` tells the event
//! loop if anything outside the state must happen.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```

use log::{debug, info};

use crate::avatar::{AvatarError, AvatarImage, AvatarStatus};
use crate::core::state::{App, RenameEntry};

#[derive(Debug)]
pub enum Action {
    SetExpanded(bool),
    Navigate(String),
    Rename { id: String, name: String },
    CreateEntry,
    Logout,
    AvatarFetched(Result<AvatarImage, AvatarError>),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Action: {:?}", action);
    match action {
        Action::SetExpanded(expanded) => {
            app.expanded = expanded;
            Effect::None
        }
        Action::Navigate(id) => {
            app.status_message = format!("Opened {id}");
            app.active_id = Some(id);
            Effect::None
        }
        Action::Rename { id, name } => {
            match app.entries.iter_mut().find(|e| e.id == id) {
                Some(entry) => {
                    info!("Renamed {} from {:?} to {:?}", id, entry.name, name);
                    app.status_message = format!("Renamed to \"{name}\"");
                    entry.name = name;
                }
                None => {
                    app.status_message = format!("Unknown entry {id}");
                }
            }
            Effect::None
        }
        Action::CreateEntry => {
            let id = uuid::Uuid::new_v4().to_string();
            let name = format!("Nuevo formato {}", app.entries.len() + 1);
            app.status_message = format!("Created \"{name}\"");
            app.entries.push(RenameEntry::new(id, name));
            Effect::None
        }
        Action::Logout => {
            info!("Logout requested for {}", app.user_name);
            app.status_message = String::from("Logged out");
            Effect::None
        }
        Action::AvatarFetched(result) => {
            app.avatar = AvatarStatus::from_result(&result);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_set_expanded() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::SetExpanded(false)), Effect::None);
        assert!(!app.expanded);
        update(&mut app, Action::SetExpanded(false));
        assert!(!app.expanded);
    }

    #[test]
    fn test_navigate_sets_active() {
        let mut app = test_app();
        update(&mut app, Action::Navigate("panel".to_string()));
        assert_eq!(app.active_id.as_deref(), Some("panel"));
    }

    #[test]
    fn test_rename_updates_matching_entry_only() {
        let mut app = test_app();
        update(
            &mut app,
            Action::Rename {
                id: "f1".to_string(),
                name: "Informe anual".to_string(),
            },
        );
        assert_eq!(app.entry("f1").unwrap().name, "Informe anual");
        assert_eq!(app.entry("f2").unwrap().name, "Acta de reunión");
    }

    #[test]
    fn test_rename_unknown_id_is_ignored() {
        let mut app = test_app();
        let before = app.entries.clone();
        update(
            &mut app,
            Action::Rename {
                id: "nope".to_string(),
                name: "X".to_string(),
            },
        );
        assert_eq!(app.entries, before);
    }

    #[test]
    fn test_create_entry_appends_with_fresh_id() {
        let mut app = test_app();
        update(&mut app, Action::CreateEntry);
        update(&mut app, Action::CreateEntry);
        assert_eq!(app.entries.len(), 5);
        assert_ne!(app.entries[3].id, app.entries[4].id);
        assert_eq!(app.entries[4].name, "Nuevo formato 5");
    }

    #[test]
    fn test_avatar_fetched_records_status() {
        let mut app = test_app();
        update(
            &mut app,
            Action::AvatarFetched(Err(AvatarError::Network("refused".to_string()))),
        );
        assert!(matches!(app.avatar, AvatarStatus::Failed(_)));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
