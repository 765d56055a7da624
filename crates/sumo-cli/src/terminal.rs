//! Line-oriented keyboard for terminals without raw key events.
//!
//! One command per line:
//!
//! ```text
//! +w        press W
//! -up       release the up arrow
//! 25        run 25 frames
//! esc       quit (also "quit")
//! # note    ignored, as are blank lines
//! ```

use sumo_engine::{InputEvent, Key};
use thiserror::Error;

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Input(InputEvent),
    /// Run this many frames.
    Advance(u32),
    Quit,
    /// Blank line or comment.
    Nothing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown key {0:?}")]
    UnknownKey(String),
    #[error("unrecognized command {0:?} (expected +KEY, -KEY, a frame count, or quit)")]
    Unrecognized(String),
}

pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Command::Nothing);
    }
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("esc") {
        return Ok(Command::Quit);
    }
    if let Ok(frames) = line.parse::<u32>() {
        return Ok(Command::Advance(frames));
    }

    let (press, name) = if let Some(name) = line.strip_prefix('+') {
        (true, name.trim())
    } else if let Some(name) = line.strip_prefix('-') {
        (false, name.trim())
    } else {
        return Err(ParseError::Unrecognized(line.to_string()));
    };
    let key = Key::from_name(name).ok_or_else(|| ParseError::UnknownKey(name.to_string()))?;
    Ok(Command::Input(if press {
        InputEvent::KeyDown(key)
    } else {
        InputEvent::KeyUp(key)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_and_releases() {
        assert_eq!(parse_line("+w"), Ok(Command::Input(InputEvent::KeyDown(Key::W))));
        assert_eq!(parse_line(" -Up "), Ok(Command::Input(InputEvent::KeyUp(Key::Up))));
        assert_eq!(parse_line("+esc"), Ok(Command::Input(InputEvent::KeyDown(Key::Escape))));
    }

    #[test]
    fn frame_counts_and_quit() {
        assert_eq!(parse_line("50"), Ok(Command::Advance(50)));
        assert_eq!(parse_line("QUIT"), Ok(Command::Quit));
        assert_eq!(parse_line("esc"), Ok(Command::Quit));
        assert_eq!(parse_line(""), Ok(Command::Nothing));
        assert_eq!(parse_line("# warm up"), Ok(Command::Nothing));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_line("+q"), Err(ParseError::UnknownKey("q".into())));
        assert!(matches!(parse_line("jump"), Err(ParseError::Unrecognized(_))));
        // Negative counts are not frame counts.
        assert!(matches!(parse_line("-5"), Err(ParseError::UnknownKey(_))));
    }
}
