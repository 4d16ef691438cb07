mod resize_handle;

pub use resize_handle::{cursor_icon, ResizeHandle};
