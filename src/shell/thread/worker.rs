use std::{
    collections::VecDeque,
    io::{self, Write},
    sync::mpsc,
};

use anyhow::Result;
use tracing::debug;

use crate::shell::{
    builtin::{Builtin, CmdError},
    parser::parse,
    ShellMsg,
};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const HISTORY_LIMIT: usize = 500;

pub enum WorkerMsg {
    Cmd(String), // Command input
}

#[derive(Debug)]
pub struct Worker {
    exit_code: i32,            // Exit code of the last command
    history: VecDeque<String>, // Submitted lines, verbatim, oldest first
    history_limit: usize,      // Max lines kept in `history`
    history_dropped: usize,    // Lines evicted from the front so far
}

impl Default for Worker {
    fn default() -> Self {
        Self::with_history_limit(HISTORY_LIMIT)
    }
}

impl Worker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history_limit(limit: usize) -> Self {
        Worker {
            exit_code: 0,
            history: VecDeque::new(),
            history_limit: limit,
            history_dropped: 0,
        }
    }

    pub fn spawn(
        mut self,
        worker_rx: mpsc::Receiver<WorkerMsg>,
        shell_tx: mpsc::SyncSender<ShellMsg>,
    ) -> Result<()> {
        std::thread::Builder::new()
            .name("termsh-worker".to_string())
            .spawn(move || {
                for msg in worker_rx.iter() {
                    match msg {
                        WorkerMsg::Cmd(line) => {
                            let reply =
                                self.execute(&line, &mut io::stdout(), &mut io::stderr());
                            if shell_tx.send(reply).is_err() {
                                debug!("shell hung up, stopping worker");
                                break;
                            }
                        }
                    }
                }
            })?;
        Ok(())
    }

    /// Parse and run one line. Lines without a command name are skipped.
    pub fn execute<O: Write, E: Write>(
        &mut self,
        line: &str,
        out: &mut O,
        err: &mut E,
    ) -> ShellMsg {
        let cmd = parse(line);
        let Some(name) = cmd.name else {
            return ShellMsg::Continue(self.exit_code);
        };
        self.push_history(cmd.full);
        debug!(command = name, args = ?cmd.args, "dispatching");

        let result = name
            .parse::<Builtin>()
            .and_then(|builtin| self.built_in_cmd(builtin, &cmd.args, out));
        let msg = match result {
            Ok(msg) => msg,
            Err(e) => {
                debug!(command = name, error = %e, "command failed");
                if let Err(io_err) = writeln!(err, "termsh: {}", e) {
                    debug!(error = %io_err, "unable to report command failure");
                }
                ShellMsg::Continue(e.exit_code())
            }
        };
        self.exit_code = match msg {
            ShellMsg::Continue(n) | ShellMsg::Quit(n) => n,
        };
        msg
    }

    fn push_history(&mut self, line: &str) {
        if self.history_limit == 0 {
            self.history_dropped += 1;
            return;
        }
        if self.history.len() == self.history_limit {
            self.history.pop_front();
            self.history_dropped += 1;
        }
        self.history.push_back(line.to_string());
    }

    fn built_in_cmd<O: Write>(
        &self,
        builtin: Builtin,
        args: &[&str],
        out: &mut O,
    ) -> Result<ShellMsg, CmdError> {
        match builtin {
            Builtin::Help => self.run_help(args, out),
            Builtin::Echo => self.run_echo(args, out),
            Builtin::History => self.run_history(args, out),
            Builtin::Clear => self.run_clear(out),
            Builtin::Exit => self.run_exit(args),
        }
    }

    fn run_help<O: Write>(&self, args: &[&str], out: &mut O) -> Result<ShellMsg, CmdError> {
        match args {
            [] => {
                for b in Builtin::ALL {
                    writeln!(out, "{:<8} {}", b.name(), b.summary())?;
                }
            }
            [topic] => {
                let b = topic.parse::<Builtin>().map_err(|_| CmdError::InvalidArgument {
                    cmd: Builtin::Help,
                    arg: topic.to_string(),
                })?;
                writeln!(out, "usage: {}", b.usage())?;
                writeln!(out, "{}", b.summary())?;
            }
            _ => return Err(CmdError::TooManyArguments(Builtin::Help)),
        }
        Ok(ShellMsg::Continue(0))
    }

    fn run_echo<O: Write>(&self, args: &[&str], out: &mut O) -> Result<ShellMsg, CmdError> {
        writeln!(out, "{}", args.join(" "))?;
        Ok(ShellMsg::Continue(0))
    }

    fn run_history<O: Write>(&self, args: &[&str], out: &mut O) -> Result<ShellMsg, CmdError> {
        let count = match args {
            [] => self.history.len(),
            [n] => n.parse::<usize>().map_err(|_| CmdError::InvalidArgument {
                cmd: Builtin::History,
                arg: n.to_string(),
            })?,
            _ => return Err(CmdError::TooManyArguments(Builtin::History)),
        };
        let skip = self.history.len().saturating_sub(count);
        for (i, line) in self.history.iter().enumerate().skip(skip) {
            writeln!(out, "{:>5}  {}", self.history_dropped + i + 1, line)?;
        }
        Ok(ShellMsg::Continue(0))
    }

    fn run_clear<O: Write>(&self, out: &mut O) -> Result<ShellMsg, CmdError> {
        write!(out, "{}", CLEAR_SCREEN)?;
        out.flush()?;
        Ok(ShellMsg::Continue(0))
    }

    fn run_exit(&self, args: &[&str]) -> Result<ShellMsg, CmdError> {
        let code = match args {
            [] => self.exit_code,
            [s] => s.parse::<i32>().map_err(|_| CmdError::InvalidArgument {
                cmd: Builtin::Exit,
                arg: s.to_string(),
            })?,
            _ => return Err(CmdError::TooManyArguments(Builtin::Exit)),
        };
        Ok(ShellMsg::Quit(code))
    }
}
