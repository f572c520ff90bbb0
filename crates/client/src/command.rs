//! Parsing of typed terminal commands.

/// One line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Attack,
    Special,
    Flee,
    Drink,
    Say(String),
    Skip,
    Status,
    /// Leave the title, result or ending screen forward.
    Continue,
    Retry,
    Title,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    /// Returns `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let input = match word.to_ascii_lowercase().as_str() {
            "attack" | "a" => Self::Attack,
            "special" | "sp" => Self::Special,
            "flee" | "run" => Self::Flee,
            "drink" | "item" => Self::Drink,
            "say" | "c" => Self::Say(rest.to_owned()),
            "skip" => Self::Skip,
            "status" => Self::Status,
            "continue" | "start" | "next" => Self::Continue,
            "retry" => Self::Retry,
            "title" => Self::Title,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_owned()),
        };
        Some(input)
    }
}

pub const HELP: &str = "\
battle:  attack | special | flee | drink | say <comment> | skip | status
screens: continue | retry | title
always:  help | quit";
