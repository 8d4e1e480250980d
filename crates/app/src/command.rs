//! Line commands typed at the terminal.
//!
//! One command per line. The keyword is case-insensitive; arguments keep
//! their case. Parsing does not look at the active screen: a command that is
//! not available on the current screen is rejected by the session instead.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use u_cook_core::{Cuisine, Screen, SwipeDirection};

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("input is not valid UTF-8")]
    InvalidEncoding,
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid argument for '{command}': {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },
}

/// A parsed terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Snapshot,
    Quit,

    // Onboarding
    Name(String),
    Phone(String),
    Cuisine(Cuisine),
    Frequency(i64),
    BudgetMin(i64),
    BudgetMax(i64),
    Next,

    // Main
    Swipe(SwipeDirection),
    Open(Screen),
    Filter(String),

    /// `chef` opens the current dish's chef; `chef <n>` the chef of menu dish `n`.
    Chef(Option<usize>),
    Add(usize),
    Remove(usize),
    Back,
}

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] for blank, unknown or malformed lines.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(keyword, rest)| (keyword, rest.trim()));
        let arg = (!rest.is_empty()).then_some(rest);

        match keyword.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "help" | "?" => Ok(Self::Help),
            "snapshot" => Ok(Self::Snapshot),
            "quit" | "exit" => Ok(Self::Quit),

            "name" => Ok(Self::Name(rest.to_owned())),
            "phone" => Ok(Self::Phone(required("phone", arg)?.to_owned())),
            "cuisine" => {
                let value = required("cuisine", arg)?;
                Cuisine::from_str(value)
                    .map(Self::Cuisine)
                    .map_err(|err| invalid("cuisine", err))
            }
            "frequency" => number("frequency", arg).map(Self::Frequency),
            "min" => number("min", arg).map(Self::BudgetMin),
            "max" => number("max", arg).map(Self::BudgetMax),
            "next" => Ok(Self::Next),

            "left" | "l" | "skip" => Ok(Self::Swipe(SwipeDirection::Left)),
            "right" | "r" | "like" => Ok(Self::Swipe(SwipeDirection::Right)),
            "menu" => Ok(Self::Open(Screen::Menu)),
            "cart" => Ok(Self::Open(Screen::Cart)),
            "filter" => Ok(Self::Filter(required("filter", arg)?.to_owned())),

            "chef" => arg
                .map(|value| position("chef", value))
                .transpose()
                .map(Self::Chef),
            "add" => position("add", required("add", arg)?).map(Self::Add),
            "remove" => position("remove", required("remove", arg)?).map(Self::Remove),
            "back" => Ok(Self::Back),

            _ => Err(CommandError::Unknown(keyword.to_owned())),
        }
    }

    /// Help text for commands available on a screen.
    #[must_use]
    pub const fn help(screen: Screen) -> &'static str {
        match screen {
            Screen::Onboarding => {
                "name <text> | phone <digits> | cuisine <id> | frequency <0-100> | min <n> | max <n> | next"
            }
            Screen::Main => "left (l, skip) | right (r, like) | menu | cart | chef | filter <id>",
            Screen::Menu => "chef <n> | back",
            Screen::Chef => "add <n> | back",
            Screen::Cart => "remove <n> | back",
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => f.write_str("help"),
            Self::Snapshot => f.write_str("snapshot"),
            Self::Quit => f.write_str("quit"),
            // Name and phone are personal data; keep them out of logs.
            Self::Name(_) => f.write_str("name"),
            Self::Phone(_) => f.write_str("phone"),
            Self::Cuisine(cuisine) => write!(f, "cuisine {}", cuisine.as_str()),
            Self::Frequency(value) => write!(f, "frequency {value}"),
            Self::BudgetMin(value) => write!(f, "min {value}"),
            Self::BudgetMax(value) => write!(f, "max {value}"),
            Self::Next => f.write_str("next"),
            Self::Swipe(direction) => write!(f, "{direction}"),
            Self::Open(screen) => write!(f, "{screen}"),
            Self::Filter(id) => write!(f, "filter {id}"),
            Self::Chef(None) => f.write_str("chef"),
            Self::Chef(Some(n)) => write!(f, "chef {n}"),
            Self::Add(n) => write!(f, "add {n}"),
            Self::Remove(n) => write!(f, "remove {n}"),
            Self::Back => f.write_str("back"),
        }
    }
}

fn required<'a>(command: &'static str, arg: Option<&'a str>) -> Result<&'a str, CommandError> {
    arg.ok_or(CommandError::MissingArgument(command))
}

fn invalid(command: &'static str, reason: impl ToString) -> CommandError {
    CommandError::InvalidArgument {
        command,
        reason: reason.to_string(),
    }
}

fn number(command: &'static str, arg: Option<&str>) -> Result<i64, CommandError> {
    required(command, arg)?
        .parse()
        .map_err(|err| invalid(command, err))
}

/// A 1-based list position.
fn position(command: &'static str, value: &str) -> Result<usize, CommandError> {
    match value.parse::<usize>() {
        Ok(0) => Err(invalid(command, "numbering starts at 1")),
        Ok(n) => Ok(n),
        Err(err) => Err(invalid(command, err)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_global_commands() {
        assert_eq!(Command::parse("help").unwrap(), Command::Help);
        assert_eq!(Command::parse("  SNAPSHOT ").unwrap(), Command::Snapshot);
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
    }

    #[test]
    fn test_onboarding_commands() {
        assert_eq!(
            Command::parse("Name  Anna Maria ").unwrap(),
            Command::Name("Anna Maria".to_string())
        );
        assert_eq!(Command::parse("name").unwrap(), Command::Name(String::new()));
        assert_eq!(
            Command::parse("phone 8 (999) 123-45-67").unwrap(),
            Command::Phone("8 (999) 123-45-67".to_string())
        );
        assert_eq!(
            Command::parse("cuisine Japanese").unwrap(),
            Command::Cuisine(Cuisine::Japanese)
        );
        assert_eq!(Command::parse("frequency 250").unwrap(), Command::Frequency(250));
        assert_eq!(Command::parse("min 3000").unwrap(), Command::BudgetMin(3000));
        assert_eq!(Command::parse("max -5").unwrap(), Command::BudgetMax(-5));
        assert_eq!(Command::parse("next").unwrap(), Command::Next);
    }

    #[test]
    fn test_swipe_aliases() {
        for line in ["left", "l", "skip", "LEFT"] {
            assert_eq!(
                Command::parse(line).unwrap(),
                Command::Swipe(SwipeDirection::Left)
            );
        }
        for line in ["right", "r", "like"] {
            assert_eq!(
                Command::parse(line).unwrap(),
                Command::Swipe(SwipeDirection::Right)
            );
        }
    }

    #[test]
    fn test_numbered_commands() {
        assert_eq!(Command::parse("chef").unwrap(), Command::Chef(None));
        assert_eq!(Command::parse("chef 2").unwrap(), Command::Chef(Some(2)));
        assert_eq!(Command::parse("add 1").unwrap(), Command::Add(1));
        assert_eq!(Command::parse("remove 3").unwrap(), Command::Remove(3));
        assert!(matches!(
            Command::parse("remove 0"),
            Err(CommandError::InvalidArgument { command: "remove", .. })
        ));
        assert!(matches!(
            Command::parse("add two"),
            Err(CommandError::InvalidArgument { command: "add", .. })
        ));
    }

    #[test]
    fn test_malformed_commands() {
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert_eq!(Command::parse("phone"), Err(CommandError::MissingArgument("phone")));
        assert_eq!(Command::parse("filter"), Err(CommandError::MissingArgument("filter")));
        assert!(matches!(
            Command::parse("cuisine klingon"),
            Err(CommandError::InvalidArgument { command: "cuisine", .. })
        ));
        assert!(matches!(
            Command::parse("frequency lots"),
            Err(CommandError::InvalidArgument { command: "frequency", .. })
        ));
    }

    #[test]
    fn test_display_hides_personal_data() {
        let command = Command::parse("phone 9991234567").unwrap();
        assert_eq!(command.to_string(), "phone");
        let command = Command::parse("name Anna Maria").unwrap();
        assert_eq!(command.to_string(), "name");
        assert_eq!(Command::parse("chef 2").unwrap().to_string(), "chef 2");
    }
}
