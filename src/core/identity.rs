//! # Identity
//!
//! The footer's notion of who is signed in: a display name derived from the
//! full name, initials for the avatar tile, and the avatar image URL.

use reqwest::Url;

/// Default avatar-generation endpoint.
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/";
pub const DEFAULT_AVATAR_BACKGROUND: &str = "c7d2fe";
pub const DEFAULT_AVATAR_COLOR: &str = "3730a3";

/// Name used when the host supplies none.
pub const DEFAULT_USER_NAME: &str = "Usuario";

/// First two whitespace-separated tokens of `name`, joined by one space.
/// Empty when `name` has no tokens.
pub fn display_name(name: &str) -> String {
    name.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

/// Uppercased first letter of each display-name token ("María López" → "ML").
pub fn initials(display_name: &str) -> String {
    display_name
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Colors and endpoint for the generated avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarStyle {
    pub base_url: String,
    /// Background as 6 hex digits, no `#`.
    pub background: String,
    /// Foreground as 6 hex digits, no `#`.
    pub color: String,
}

impl Default for AvatarStyle {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AVATAR_BASE_URL.to_string(),
            background: DEFAULT_AVATAR_BACKGROUND.to_string(),
            color: DEFAULT_AVATAR_COLOR.to_string(),
        }
    }
}

/// Build the avatar request URL keyed by the display name. The name is
/// percent-encoded by `Url`. The error carries the parser's message.
pub fn avatar_url(style: &AvatarStyle, display_name: &str) -> Result<Url, String> {
    Url::parse_with_params(
        &style.base_url,
        &[
            ("background", style.background.as_str()),
            ("color", style.color.as_str()),
            ("bold", "true"),
            ("name", display_name),
        ],
    )
    .map_err(|e| format!("{}: {e}", style.base_url))
}

/// Parse a 6-digit hex color ("3730a3") into RGB.
pub fn parse_hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
