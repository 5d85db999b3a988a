use std::{
    fmt::{self, Display, Formatter},
    io,
    str::FromStr,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CmdError {
    #[error("command not found: {0}")]
    NotFound(String),
    #[error("{cmd}: invalid argument: {arg}")]
    InvalidArgument { cmd: Builtin, arg: String },
    #[error("{0}: too many arguments")]
    TooManyArguments(Builtin),
    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

impl CmdError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CmdError::NotFound(_) => 127,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Help,
    Echo,
    History,
    Clear,
    Exit,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::Help,
        Builtin::Echo,
        Builtin::History,
        Builtin::Clear,
        Builtin::Exit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Help => "help",
            Builtin::Echo => "echo",
            Builtin::History => "history",
            Builtin::Clear => "clear",
            Builtin::Exit => "exit",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Builtin::Help => "Show available commands",
            Builtin::Echo => "Print arguments",
            Builtin::History => "Show previously entered lines",
            Builtin::Clear => "Clear the screen",
            Builtin::Exit => "Leave the shell",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Builtin::Help => "help [command]",
            Builtin::Echo => "echo [arg...]",
            Builtin::History => "history [count]",
            Builtin::Clear => "clear",
            Builtin::Exit => "exit [code]",
        }
    }
}

impl Display for Builtin {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Builtin {
    type Err = CmdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Builtin::ALL
            .into_iter()
            .find(|b| b.name() == s)
            .ok_or_else(|| CmdError::NotFound(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for b in Builtin::ALL {
            assert_eq!(b.name().parse::<Builtin>().unwrap(), b);
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(matches!("HELP".parse::<Builtin>(), Err(CmdError::NotFound(n)) if n == "HELP"));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(CmdError::NotFound("x".into()).exit_code(), 127);
        assert_eq!(CmdError::TooManyArguments(Builtin::Exit).exit_code(), 1);
        let err = CmdError::InvalidArgument {
            cmd: Builtin::History,
            arg: "abc".into(),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "history: invalid argument: abc");
    }
}
