//! Driver commands.
//!
//! One command per input line. Lines starting with `:` are control commands; anything else
//! is search text.

/// A line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search for the given text (passed through unnormalized).
    Search(String),
    /// Load the next page for the current query.
    LoadMore,
    /// Re-run the current query.
    Refresh,
    /// Leave the driver loop.
    Quit,
    /// Unrecognized `:` command.
    Unknown(String),
}

impl Command {
    /// Classify one input line. Control commands may be padded with whitespace.
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":more" | ":m" => Command::LoadMore,
            ":refresh" | ":r" => Command::Refresh,
            ":quit" | ":q" => Command::Quit,
            other if other.starts_with(':') => Command::Unknown(other.to_string()),
            _ => Command::Search(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_commands_and_aliases() {
        assert_eq!(Command::parse(":more"), Command::LoadMore);
        assert_eq!(Command::parse(":m"), Command::LoadMore);
        assert_eq!(Command::parse(" :refresh "), Command::Refresh);
        assert_eq!(Command::parse(":r"), Command::Refresh);
        assert_eq!(Command::parse(":quit"), Command::Quit);
        assert_eq!(Command::parse(":q"), Command::Quit);
    }

    #[test]
    fn search_text_is_passed_through_verbatim() {
        assert_eq!(
            Command::parse("  Vaccine "),
            Command::Search("  Vaccine ".to_string())
        );
    }

    #[test]
    fn empty_line_is_a_blank_search() {
        assert_eq!(Command::parse(""), Command::Search(String::new()));
    }

    #[test]
    fn unknown_control_command() {
        assert_eq!(
            Command::parse(":help"),
            Command::Unknown(":help".to_string())
        );
    }
}
