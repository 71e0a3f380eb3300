//! # Avatar
//!
//! The footer's one outbound request: the generated avatar image for the
//! signed-in user. The request is issued off the UI thread (a tokio task)
//! and its outcome comes back to the event loop as an `Action`.
//!
//! The terminal cannot show the image itself; the footer draws an initials
//! tile in the image's colors once the request succeeds, and a dimmed
//! placeholder while it is pending or after it failed.

mod fetcher;

pub use fetcher::{AvatarError, AvatarFetcher, AvatarImage, HttpAvatarFetcher};

/// Where the avatar request stands, as rendered by the footer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AvatarStatus {
    /// No request issued (avatars disabled).
    #[default]
    Disabled,
    Pending,
    Loaded {
        content_type: Option<String>,
        bytes: usize,
    },
    Failed(String),
}

impl AvatarStatus {
    pub fn from_result(result: &Result<AvatarImage, AvatarError>) -> Self {
        match result {
            Ok(image) => AvatarStatus::Loaded {
                content_type: image.content_type.clone(),
                bytes: image.bytes.len(),
            },
            Err(e) => AvatarStatus::Failed(e.to_string()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, AvatarStatus::Loaded { .. })
    }
}
