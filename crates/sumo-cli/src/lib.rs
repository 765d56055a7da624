pub mod runner;
pub mod terminal;
pub mod text;

pub use runner::{FrameOutcome, GameRunner};
pub use terminal::{parse_line, Command, ParseError};
pub use text::TextRenderer;
