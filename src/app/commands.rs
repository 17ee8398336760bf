//! Inbound commands to the application service.
//!
//! These represent actions requested by the player through whatever front
//! end drives the [`PetService`](super::service::PetService).

use std::fmt;
use std::str::FromStr;

/// Commands a front end can send into the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetCommand {
    /// Give the pet food.
    Feed,

    /// Play with the pet.
    Play,

    /// Put the pet to bed, or wake it.
    ToggleSleep,

    /// Replace the current pet with a freshly hatched one.
    NewPet(String),
}

impl PetCommand {
    /// Short verb used in events and logs.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::ToggleSleep => "sleep",
            Self::NewPet(_) => "new",
        }
    }
}

impl fmt::Display for PetCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewPet(name) => write!(f, "new {name}"),
            other => f.write_str(other.verb()),
        }
    }
}

/// Parse error for a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command {0:?}")]
pub struct UnknownCommand(pub String);

/// Split a command line into its verb and the trimmed remainder. Any
/// whitespace separates them.
pub fn split_verb(line: &str) -> (&str, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    }
}

impl FromStr for PetCommand {
    type Err = UnknownCommand;

    /// Accepts `feed`, `play`, `sleep` (or `wake`), and `new <name>`,
    /// case-insensitively.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (head, rest) = split_verb(line);
        match (head.to_ascii_lowercase().as_str(), rest) {
            ("feed", "") => Ok(Self::Feed),
            ("play", "") => Ok(Self::Play),
            ("sleep" | "wake", "") => Ok(Self::ToggleSleep),
            ("new", name) if !name.is_empty() => Ok(Self::NewPet(name.to_owned())),
            _ => Err(UnknownCommand(line.trim().to_owned())),
        }
    }
}
