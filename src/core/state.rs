//! # Host State
//!
//! The state a host application keeps for the sidebar. The widget never
//! touches it directly; callbacks turn into `Action`s and `update()` applies
//! them here.
//!
//! ```text
//! App
//! ├── expanded: bool               // sidebar width, shared via context
//! ├── active_id: Option<String>    // selected navigation target
//! ├── entries: Vec<RenameEntry>    // rename-capable rows
//! ├── user_name / user_role        // footer identity
//! ├── avatar: AvatarStatus         // avatar request outcome
//! └── status_message: String       // content pane status line
//! ```

use crate::avatar::AvatarStatus;
use crate::core::config::ResolvedConfig;

/// A rename-capable entry: stable identifier plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    pub id: String,
    pub name: String,
}

impl RenameEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

pub struct App {
    pub expanded: bool,
    pub active_id: Option<String>,
    pub entries: Vec<RenameEntry>,
    pub user_name: String,
    pub user_role: String,
    pub avatar: AvatarStatus,
    pub status_message: String,
}

impl App {
    pub fn new(user_name: String, user_role: String) -> Self {
        Self {
            expanded: true,
            active_id: Some("docs".to_string()),
            entries: default_entries(),
            user_name,
            user_role,
            avatar: AvatarStatus::Disabled,
            status_message: String::from("Welcome!"),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(config.user_name.clone(), config.user_role.clone());
        app.expanded = config.start_expanded;
        if config.avatar_enabled {
            app.avatar = AvatarStatus::Pending;
        }
        app
    }

    pub fn entry(&self, id: &str) -> Option<&RenameEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

fn default_entries() -> Vec<RenameEntry> {
    vec![
        RenameEntry::new("f1", "Informe mensual"),
        RenameEntry::new("f2", "Acta de reunión"),
        RenameEntry::new("f3", "Checklist Operativo"),
    ]
}
