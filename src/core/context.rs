//! # Expansion Context
//!
//! Whether the sidebar is expanded, plus the host's setter for it. The host
//! owns the flag; the sidebar reads it and asks for changes through the
//! setter. Whatever the setter does (apply immediately, queue an action,
//! persist) is up to the host.
//!
//! Descendants receive the context explicitly inside a [`Scope`] together
//! with the other things rows need at render and event time.

use std::fmt;

use crate::core::callback::Callback;
use crate::core::viewport::Viewport;

#[derive(Clone)]
pub struct ExpansionContext {
    expanded: bool,
    setter: Callback<bool>,
}

impl ExpansionContext {
    pub fn new(expanded: bool, setter: Callback<bool>) -> Self {
        Self { expanded, setter }
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// Ask the host to change the flag. The value read through `expanded()`
    /// only changes once the host calls `update`.
    pub fn set_expanded(&self, expanded: bool) {
        self.setter.emit(expanded);
    }

    /// Refresh the value from the host's state.
    pub fn update(&mut self, expanded: bool) {
        self.expanded = expanded;
    }
}

impl fmt::Debug for ExpansionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionContext")
            .field("expanded", &self.expanded)
            .finish()
    }
}

/// Everything a row needs from its ancestors.
pub struct Scope<'a> {
    pub expansion: &'a ExpansionContext,
    pub viewport: &'a Viewport,
    /// Current breakpoint state.
    pub narrow: bool,
    /// Columns between a collapsed icon and its tooltip.
    pub tooltip_gap: u16,
}

impl Scope<'_> {
    pub fn expanded(&self) -> bool {
        self.expansion.expanded()
    }

    /// Collapse after a navigation click, but only on narrow viewports.
    pub fn collapse_if_narrow(&self) {
        if self.narrow {
            self.expansion.set_expanded(false);
        }
    }
}
