//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.sidenav/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::breakpoint::DEFAULT_NARROW_MAX_WIDTH;
use crate::core::identity::{
    AvatarStyle, DEFAULT_AVATAR_BACKGROUND, DEFAULT_AVATAR_BASE_URL, DEFAULT_AVATAR_COLOR,
    DEFAULT_USER_NAME,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct SidenavConfig {
    #[serde(default)]
    pub sidebar: SidebarSettings,
    #[serde(default)]
    pub user: UserSettings,
    #[serde(default)]
    pub avatar: AvatarSettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct SidebarSettings {
    pub start_collapsed: Option<bool>,
    pub narrow_max_width: Option<u16>,
    pub expanded_width: Option<u16>,
    pub collapsed_width: Option<u16>,
    pub section_max_height_percent: Option<u16>,
    pub tooltip_gap: Option<u16>,
    pub show_mobile_toggle: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserSettings {
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AvatarSettings {
    pub enabled: Option<bool>,
    pub base_url: Option<String>,
    pub background: Option<String>,
    pub color: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_EXPANDED_WIDTH: u16 = 30;
pub const DEFAULT_COLLAPSED_WIDTH: u16 = 7;
pub const DEFAULT_SECTION_MAX_HEIGHT_PERCENT: u16 = 28;
pub const DEFAULT_TOOLTIP_GAP: u16 = 1;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Geometry and behavior knobs for the sidebar widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarConfig {
    pub narrow_max_width: u16,
    pub expanded_width: u16,
    pub collapsed_width: u16,
    pub section_max_height_percent: u16,
    pub tooltip_gap: u16,
    pub show_mobile_toggle: bool,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            narrow_max_width: DEFAULT_NARROW_MAX_WIDTH,
            expanded_width: DEFAULT_EXPANDED_WIDTH,
            collapsed_width: DEFAULT_COLLAPSED_WIDTH,
            section_max_height_percent: DEFAULT_SECTION_MAX_HEIGHT_PERCENT,
            tooltip_gap: DEFAULT_TOOLTIP_GAP,
            show_mobile_toggle: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub sidebar: SidebarConfig,
    pub start_expanded: bool,
    pub user_name: String,
    pub user_role: String,
    pub avatar_enabled: bool,
    pub avatar: AvatarStyle,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub name: Option<String>,
    pub role: Option<String>,
    pub collapsed: bool,
    pub no_avatar: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.sidenav/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sidenav").join("config.toml"))
}

/// Load config from `~/.sidenav/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SidenavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SidenavConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SidenavConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<SidenavConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(SidenavConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SidenavConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Sidenav Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [sidebar]
# start_collapsed = false
# narrow_max_width = 79              # Columns; at or below this the sidebar floats
# expanded_width = 30
# collapsed_width = 7
# section_max_height_percent = 28    # Of the terminal height
# tooltip_gap = 1
# show_mobile_toggle = true

# [user]
# name = "María López"               # Or set SIDENAV_USER_NAME
# role = "Coordinadora"              # Or set SIDENAV_USER_ROLE

# [avatar]
# enabled = true
# base_url = "https://ui-avatars.com/api/"   # Or set SIDENAV_AVATAR_URL
# background = "c7d2fe"
# color = "3730a3"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SidenavConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with an injectable environment lookup.
pub fn resolve_with_env(
    config: &SidenavConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let s = &config.sidebar;
    let defaults = SidebarConfig::default();

    let sidebar = SidebarConfig {
        narrow_max_width: s.narrow_max_width.unwrap_or(defaults.narrow_max_width),
        expanded_width: s.expanded_width.unwrap_or(defaults.expanded_width),
        collapsed_width: s.collapsed_width.unwrap_or(defaults.collapsed_width),
        section_max_height_percent: s
            .section_max_height_percent
            .unwrap_or(defaults.section_max_height_percent)
            .clamp(1, 100),
        tooltip_gap: s.tooltip_gap.unwrap_or(defaults.tooltip_gap),
        show_mobile_toggle: s.show_mobile_toggle.unwrap_or(defaults.show_mobile_toggle),
    };

    // User name: CLI → env → config → default
    let user_name = cli
        .name
        .clone()
        .or_else(|| env("SIDENAV_USER_NAME"))
        .or_else(|| config.user.name.clone())
        .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());

    let user_role = cli
        .role
        .clone()
        .or_else(|| env("SIDENAV_USER_ROLE"))
        .or_else(|| config.user.role.clone())
        .unwrap_or_default();

    // Avatar base URL: env → config → default
    let avatar = AvatarStyle {
        base_url: env("SIDENAV_AVATAR_URL")
            .or_else(|| config.avatar.base_url.clone())
            .unwrap_or_else(|| DEFAULT_AVATAR_BASE_URL.to_string()),
        background: config
            .avatar
            .background
            .clone()
            .unwrap_or_else(|| DEFAULT_AVATAR_BACKGROUND.to_string()),
        color: config
            .avatar
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_AVATAR_COLOR.to_string()),
    };

    ResolvedConfig {
        sidebar,
        start_expanded: !(cli.collapsed || s.start_collapsed.unwrap_or(false)),
        user_name,
        user_role,
        avatar_enabled: !cli.no_avatar && config.avatar.enabled.unwrap_or(true),
        avatar,
    }
}
