use ratatui::Frame;
use ratatui::layout::Rect;

/// Something that draws itself into a rect of the frame.
///
/// Props live in struct fields that the host refreshes before each frame
/// (`Footer::avatar`, `ContentPane::status_message`, ...). Anything a
/// component must remember between frames (hover, edit buffers, scroll
/// offsets) is internal state.
///
/// `render` takes `&mut self` because drawing is also when a component
/// learns where its clickable parts ended up on screen; mouse events are
/// hit-tested against those rects until the next frame.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that reacts to terminal events.
pub trait EventHandler {
    /// What the component reports back to its owner.
    type Event;

    /// Handle a `TuiEvent`, returning what happened (if anything worth
    /// reporting). Host-facing effects go through the component's callbacks.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
