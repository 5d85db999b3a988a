mod shell;

pub use shell::{parse, Builtin, CmdError, ParsedCommand, Shell};
