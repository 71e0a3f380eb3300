//! # Core Sidebar Logic
//!
//! Everything here is independent of the terminal: the shared expansion
//! context, viewport subscriptions, breakpoint detection, identity helpers,
//! configuration, and the demo host's state and reducer.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • context / callback   │
//!                    │  • viewport / breakpoint│
//!                    │  • App + update()       │
//!                    │                         │
//!                    │  No terminal I/O.       │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │ components │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`context`]: `ExpansionContext` and the `Scope` rows receive
//! - [`viewport`]: terminal size plus scoped listener `Subscription`s
//! - [`breakpoint`]: narrow-viewport detection on top of the viewport
//! - [`state`] / [`action`]: the host's `App` and its reducer

pub mod action;
pub mod breakpoint;
pub mod callback;
pub mod config;
pub mod context;
pub mod identity;
pub mod state;
pub mod viewport;
