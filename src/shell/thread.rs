mod worker;

pub use worker::{Worker, WorkerMsg};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMsg {
    Continue(i32), // Continue shell interaction. (i32) is the exit code
    Quit(i32),     // Quit shell. (i32) is the exit code
}
