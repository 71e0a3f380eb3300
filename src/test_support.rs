//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Size;

use crate::avatar::{AvatarError, AvatarFetcher, AvatarImage};
use crate::core::callback::Callback;
use crate::core::context::{ExpansionContext, Scope};
use crate::core::state::App;
use crate::core::viewport::Viewport;

/// A fetcher that never touches the network.
pub struct StubFetcher {
    pub fail: bool,
}

#[async_trait]
impl AvatarFetcher for StubFetcher {
    async fn fetch(&self, display_name: &str) -> Result<AvatarImage, AvatarError> {
        if self.fail {
            Err(AvatarError::Api { status: 500 })
        } else {
            Ok(AvatarImage {
                content_type: Some("image/png".to_string()),
                bytes: display_name.as_bytes().to_vec(),
            })
        }
    }
}

/// A callback that records every emitted value.
pub fn recording_callback<T: 'static>() -> (Callback<T>, Rc<RefCell<Vec<T>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    (Callback::new(move |v| sink.borrow_mut().push(v)), calls)
}

/// Expansion context whose setter records requested values.
pub fn recording_context(expanded: bool) -> (ExpansionContext, Rc<RefCell<Vec<bool>>>) {
    let (setter, calls) = recording_callback();
    (ExpansionContext::new(expanded, setter), calls)
}

pub fn test_viewport() -> Viewport {
    Viewport::new(Size::new(120, 40))
}

pub fn scope<'a>(expansion: &'a ExpansionContext, viewport: &'a Viewport, narrow: bool) -> Scope<'a> {
    Scope {
        expansion,
        viewport,
        narrow,
        tooltip_gap: 1,
    }
}

/// Concatenated cell symbols of a test terminal's buffer.
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}

/// Creates a test App with the demo user.
pub fn test_app() -> App {
    App::new("María López".to_string(), "Coordinadora".to_string())
}

#[test]
fn test_stub_fetcher_answers_without_network() {
    let ok = tokio_test::block_on(StubFetcher { fail: false }.fetch("Ana"));
    assert_eq!(ok.unwrap().bytes, b"Ana".to_vec());

    let err = tokio_test::block_on(StubFetcher { fail: true }.fetch("Ana"));
    assert!(matches!(err, Err(AvatarError::Api { status: 500 })));
}
