// ABOUTME: Event definitions delivered by the host to the fisheye view sync
// ABOUTME: Layout, caret and lifecycle notifications plus the handler trait that consumes them

pub mod handler;
pub mod view;

pub use handler::{EventHandler, HandlerError};
pub use view::Event;
