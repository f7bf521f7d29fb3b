pub mod handler;

pub use handler::{map_key, should_quit, DragHandler, UiCommand};
