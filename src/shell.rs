use anyhow::Result;
use std::{
    io::{self, Write},
    sync::mpsc,
};
use thread::{ShellMsg, Worker, WorkerMsg};
use tracing::{debug, info, warn};

mod builtin;
mod parser;
mod thread;

pub use builtin::{Builtin, CmdError};
pub use parser::{parse, ParsedCommand};

/// Line sent to the worker when input reaches end of file.
const EOF_LINE: &str = "exit";

/// Send one line to the worker and wait for its reply.
fn hand_off(
    worker_tx: &mpsc::SyncSender<WorkerMsg>,
    shell_rx: &mpsc::Receiver<ShellMsg>,
    line: String,
) -> Result<ShellMsg> {
    worker_tx.send(WorkerMsg::Cmd(line))?;
    Ok(shell_rx.recv()?)
}

#[derive(Debug)]
pub struct Shell {
    logfile: String, // History file
    prompt: String,  // Prompt prefix
}

impl Shell {
    pub fn new(logfile: &str, prompt: &str) -> Self {
        Self {
            logfile: logfile.to_string(),
            prompt: prompt.to_string(),
        }
    }

    /// Run a single line without the line editor. Returns its exit code.
    pub fn run_once(&self, line: &str) -> i32 {
        self.run_once_with(line, &mut io::stdout(), &mut io::stderr())
    }

    pub fn run_once_with<O: Write, E: Write>(
        &self,
        line: &str,
        out: &mut O,
        err: &mut E,
    ) -> i32 {
        match Worker::new().execute(line, out, err) {
            ShellMsg::Continue(n) | ShellMsg::Quit(n) => n,
        }
    }

    fn prompt(&self, prev: i32) -> String {
        let symbol = if prev == 0 { '$' } else { '!' };
        format!("{} {} ", self.prompt, symbol)
    }

    /// Interactive loop. Returns the exit code the shell quit with.
    pub fn run(&self) -> Result<i32> {
        let mut rl = rustyline::Editor::<()>::new()?;
        if let Err(e) = rl.load_history(&self.logfile) {
            warn!(logfile = %self.logfile, "unable to load history: {}", e);
        }

        let (worker_tx, worker_rx) = mpsc::sync_channel(64);
        let (shell_tx, shell_rx) = mpsc::sync_channel(0);
        Worker::new().spawn(worker_rx, shell_tx)?;
        info!(logfile = %self.logfile, "shell started");

        let exit_val;
        let mut prev = 0;
        loop {
            match rl.readline(&self.prompt(prev)) {
                Ok(line) => {
                    let line_trimmed = line.trim();
                    if line_trimmed.is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line_trimmed);

                    match hand_off(&worker_tx, &shell_rx, line)? {
                        ShellMsg::Continue(n) => prev = n,
                        ShellMsg::Quit(n) => {
                            exit_val = n;
                            break;
                        }
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    eprintln!("termsh: Interrupted")
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    exit_val = match hand_off(&worker_tx, &shell_rx, EOF_LINE.to_string())? {
                        ShellMsg::Continue(n) | ShellMsg::Quit(n) => n,
                    };
                    break;
                }
                Err(e) => {
                    eprintln!("termsh: Error: {}", e);
                    exit_val = 1;
                    break;
                }
            }
        }
        if let Err(e) = rl.save_history(&self.logfile) {
            warn!(logfile = %self.logfile, "unable to save history: {}", e);
        }
        debug!(exit_val, "shell finished");
        Ok(exit_val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_worker() -> (mpsc::SyncSender<WorkerMsg>, mpsc::Receiver<ShellMsg>) {
        let (worker_tx, worker_rx) = mpsc::sync_channel(64);
        let (shell_tx, shell_rx) = mpsc::sync_channel(0);
        Worker::new().spawn(worker_rx, shell_tx).unwrap();
        (worker_tx, shell_rx)
    }

    #[test]
    fn prompt_reflects_last_exit_code() {
        let shell = Shell::new("unused", "web");
        assert_eq!(shell.prompt(0), "web $ ");
        assert_eq!(shell.prompt(127), "web ! ");
    }

    #[test]
    fn eof_quits_with_last_exit_code() {
        let (worker_tx, shell_rx) = spawn_worker();
        let reply = hand_off(&worker_tx, &shell_rx, "exit 2 3".to_string()).unwrap();
        assert_eq!(reply, ShellMsg::Continue(1));
        let reply = hand_off(&worker_tx, &shell_rx, EOF_LINE.to_string()).unwrap();
        assert_eq!(reply, ShellMsg::Quit(1));
    }

    #[test]
    fn blank_line_keeps_previous_code() {
        let (worker_tx, shell_rx) = spawn_worker();
        hand_off(&worker_tx, &shell_rx, "nope".to_string()).unwrap();
        let reply = hand_off(&worker_tx, &shell_rx, "  ".to_string()).unwrap();
        assert_eq!(reply, ShellMsg::Continue(127));
    }
}
