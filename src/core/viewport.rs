//! # Viewport
//!
//! The terminal screen as the sidebar sees it: a size plus a registry of
//! listeners interested in resizes and scrolls.
//!
//! Listeners are registered with [`Viewport::subscribe`], which hands back a
//! [`Subscription`]. Dropping the subscription unregisters the listener, so a
//! component that stores its subscription in a field is automatically cleaned
//! up when it goes away.
//!
//! ```text
//! host loop ── resize(size) ──┐
//! section   ── notify_scroll ─┤
//!                             ▼
//!                  ┌────────────────────┐
//!                  │ Viewport registry  │──► breakpoint detector
//!                  │  (Rc<RefCell<..>>) │──► visible tooltips
//!                  └────────────────────┘
//! ```
//!
//! Single-threaded by construction (`Rc`): every notification happens inside
//! the event loop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ratatui::layout::Size;

/// Something about the viewport geometry changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    /// The terminal was resized to the given size.
    Resize(Size),
    /// Some scrollable region moved its content.
    Scroll,
}

type Listener = Rc<dyn Fn(ViewportEvent)>;

struct Registry {
    size: Size,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Shared handle to the viewport. Clones refer to the same registry.
#[derive(Clone)]
pub struct Viewport {
    inner: Rc<RefCell<Registry>>,
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                size,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn size(&self) -> Size {
        self.inner.borrow().size
    }

    /// Register a listener. It stays registered until the returned
    /// `Subscription` is dropped.
    pub fn subscribe(&self, listener: impl Fn(ViewportEvent) + 'static) -> Subscription {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Record a new terminal size. Listeners are only notified when the size
    /// actually changed.
    pub fn resize(&self, size: Size) {
        {
            let mut registry = self.inner.borrow_mut();
            if registry.size == size {
                return;
            }
            registry.size = size;
        }
        self.notify(ViewportEvent::Resize(size));
    }

    pub fn notify_scroll(&self) {
        self.notify(ViewportEvent::Scroll);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn notify(&self, event: ViewportEvent) {
        // Snapshot first: listeners may subscribe or drop subscriptions while
        // being called.
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

/// Scoped registration of a viewport listener. Unregisters on drop.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}
