pub mod draw_list;
pub mod traits;

// Re-export key types for convenient access
pub use draw_list::{DrawCommand, DrawList};
pub use traits::{to_screen, Color, Renderer};
