use std::fmt::{self, Display, Formatter};

/// A command line split into its name and positional arguments.
///
/// Borrows from the line it was parsed from. `name` is `None` when the
/// line holds no tokens at all; it is never `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub full: &'a str,         // Input line, verbatim
    pub name: Option<&'a str>, // First token
    pub args: Vec<&'a str>,    // Remaining tokens, in order
}

impl ParsedCommand<'_> {
    /// True when the line contained no command name.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    /// Tokens rejoined with single spaces.
    pub fn normalized(&self) -> String {
        self.name
            .into_iter()
            .chain(self.args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Display for ParsedCommand<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.normalized())
    }
}

/// Split `line` on runs of Unicode whitespace.
pub fn parse(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();
    let name = parts.next();
    let args = parts.collect();
    ParsedCommand {
        full: line,
        name,
        args,
    }
}
