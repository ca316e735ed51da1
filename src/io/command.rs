//! Solvability checks delegated to an external program
//!
//! The candidate is written to the program's stdin as a portable encoding.
//! Exit status 0 means solvable, 1 means unsolvable, anything else is a
//! failure. A program still running when the budget runs out is killed and
//! the candidate counts as rejected.

use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::algorithm::oracle::SolvabilityOracle;
use crate::io::configuration::ORACLE_POLL_INTERVAL;
use crate::io::encoding::PuzzleEncoding;
use crate::io::error::{GenerationError, Result};
use crate::spatial::Puzzle;

/// Oracle backed by an external solver process
#[derive(Debug, Clone)]
pub struct CommandOracle {
    program: PathBuf,
    args: Vec<OsString>,
}

impl CommandOracle {
    /// Oracle running `program` with no arguments
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program being run
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn io_error(&self, operation: &'static str) -> impl FnOnce(std::io::Error) -> GenerationError {
        let path = self.program.clone();
        move |source| GenerationError::FileSystem {
            path,
            operation,
            source,
        }
    }

    /// Poll the child until it exits or `budget` elapses; `None` means it was killed
    fn wait_within(&self, child: &mut Child, budget: Duration) -> Result<Option<ExitStatus>> {
        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait().map_err(self.io_error("wait for oracle"))? {
                return Ok(Some(status));
            }
            let elapsed = started.elapsed();
            if elapsed >= budget {
                child.kill().map_err(self.io_error("kill oracle"))?;
                child.wait().map_err(self.io_error("reap oracle"))?;
                return Ok(None);
            }
            thread::sleep(ORACLE_POLL_INTERVAL.min(budget - elapsed));
        }
    }
}

impl SolvabilityOracle for CommandOracle {
    fn is_solvable(&mut self, puzzle: &Puzzle, budget: Duration) -> Result<bool> {
        let payload = PuzzleEncoding::from_puzzle(puzzle).to_json()?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(self.io_error("spawn oracle"))?;

        // Fed from a thread so a solver that never reads stdin cannot block the poll loop
        let writer = child.stdin.take().map(|mut stdin| {
            thread::spawn(move || match stdin.write_all(payload.as_bytes()) {
                Err(error) if error.kind() == ErrorKind::BrokenPipe => Ok(()),
                other => other,
            })
        });

        let status = self.wait_within(&mut child, budget)?;

        if let Some(handle) = writer {
            match handle.join() {
                Ok(written) => written.map_err(self.io_error("write puzzle to oracle"))?,
                Err(_) => {
                    return Err(GenerationError::Oracle {
                        reason: "stdin writer panicked".to_string(),
                    });
                }
            }
        }

        let Some(status) = status else {
            warn!(
                "Oracle '{}' gave no verdict within {budget:.1?}; rejecting candidate",
                self.program.display()
            );
            return Ok(false);
        };

        debug!("Oracle '{}' exited with {status}", self.program.display());
        match status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(GenerationError::Oracle {
                reason: format!("'{}' exited with {status}", self.program.display()),
            }),
        }
    }
}
