//! Generation sessions: validate, build, check, and rebuild until accepted
//!
//! A session is an explicit state machine advanced one step at a time, so a
//! caller can report progress or cancel between steps. A rejected puzzle is
//! discarded whole and the next attempt starts from a fresh build. The session
//! ends when the oracle accepts a puzzle, when its wall-clock budget runs out,
//! or when a build stage stalls; the last two yield a trivial fallback puzzle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::Rng;

use crate::algorithm::bounds::validate;
use crate::algorithm::builder::PuzzleBuilder;
use crate::algorithm::oracle::SolvabilityOracle;
use crate::algorithm::request::GenerationRequest;
use crate::io::configuration::{
    DEFAULT_GENERATION_TIMEOUT, DEFAULT_ORACLE_TIMEOUT, FALLBACK_WARNING,
};
use crate::io::error::{GenerationError, Result, WithAttempt};
use crate::spatial::Puzzle;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Checking the request before any attempt
    Validating,
    /// Building a fresh candidate
    Building,
    /// Waiting on the oracle's verdict for the candidate
    CheckingSolvability,
    /// The oracle accepted the candidate
    Accepted,
    /// The budget ran out without an accepted candidate
    TimedOut,
    /// A build stage exhausted its draws
    Stalled,
}

impl Phase {
    /// Whether the session has finished
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::TimedOut | Self::Stalled)
    }
}

/// Monotonic time source for session budgets
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Clock whose origin is the moment of creation
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Shared flag for cancelling a session from another thread
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Request cancellation; takes effect at the next step
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Budgets for a generation session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Wall-clock budget for the whole session
    pub timeout: Duration,
    /// Upper bound handed to a single oracle call
    pub oracle_timeout: Duration,
    /// Optional cap on build attempts; reaching it ends the session like a timeout
    pub max_attempts: Option<usize>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_GENERATION_TIMEOUT,
            oracle_timeout: DEFAULT_ORACLE_TIMEOUT,
            max_attempts: None,
        }
    }
}

/// Snapshot of a running session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Current phase
    pub phase: Phase,
    /// Build attempts started so far
    pub attempts: usize,
    /// Time since the session began
    pub elapsed: Duration,
}

/// Result of a finished session
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Accepted puzzle, or the trivial fallback
    pub puzzle: Puzzle,
    /// Whether the oracle accepted `puzzle`
    pub accepted: bool,
    /// Terminal phase the session ended in
    pub phase: Phase,
    /// Build attempts started
    pub attempts: usize,
    /// Session duration
    pub elapsed: Duration,
    /// User-facing explanation when no puzzle was accepted
    pub warning: Option<String>,
}

/// Owns the retry policy: oracle, clock, budgets and cancellation
pub struct GenerationController<O, C = MonotonicClock> {
    oracle: O,
    clock: C,
    config: ControllerConfig,
    cancel: CancelToken,
}

impl<O: SolvabilityOracle> GenerationController<O> {
    /// Controller using the wall clock and default budgets
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            clock: MonotonicClock::new(),
            config: ControllerConfig::default(),
            cancel: CancelToken::default(),
        }
    }
}

impl<O: SolvabilityOracle, C: Clock> GenerationController<O, C> {
    /// Replace the time source
    pub fn with_clock<T: Clock>(self, clock: T) -> GenerationController<O, T> {
        GenerationController {
            oracle: self.oracle,
            clock,
            config: self.config,
            cancel: self.cancel,
        }
    }

    /// Replace the budgets
    #[must_use]
    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Current budgets
    pub const fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Token that cancels every session started by this controller
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Oracle used for solvability checks
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Start a session for `request`; nothing runs until it is stepped
    pub fn session<R: Rng>(
        &mut self,
        request: GenerationRequest,
        rng: R,
    ) -> GenerationSession<'_, O, C, R> {
        let started = self.clock.now();
        GenerationSession {
            oracle: &mut self.oracle,
            clock: &self.clock,
            config: self.config,
            cancel: self.cancel.clone(),
            request,
            builder: PuzzleBuilder::new(rng),
            phase: Phase::Validating,
            candidate: None,
            attempts: 0,
            started,
            stall: None,
        }
    }

    /// Run a session for `request` to completion
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails validation, the session is
    /// cancelled, or the oracle fails
    pub fn generate<R: Rng>(
        &mut self,
        request: GenerationRequest,
        rng: R,
    ) -> Result<GenerationOutcome> {
        self.session(request, rng).run(|_| {})
    }
}

/// A single generation session with exactly one candidate in flight
pub struct GenerationSession<'a, O, C, R> {
    oracle: &'a mut O,
    clock: &'a C,
    config: ControllerConfig,
    cancel: CancelToken,
    request: GenerationRequest,
    builder: PuzzleBuilder<R>,
    phase: Phase,
    candidate: Option<Puzzle>,
    attempts: usize,
    started: Duration,
    stall: Option<GenerationError>,
}

impl<O: SolvabilityOracle, C: Clock, R: Rng> GenerationSession<'_, O, C, R> {
    /// Replace the builder's attempt budget for this session
    #[must_use]
    pub fn with_attempt_budget(mut self, attempts_per_slot: usize, min_stage_attempts: usize) -> Self {
        self.builder = self
            .builder
            .with_attempt_budget(attempts_per_slot, min_stage_attempts);
        self
    }

    /// Current phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Build attempts started so far
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Candidate currently awaiting or holding a verdict
    pub const fn candidate(&self) -> Option<&Puzzle> {
        self.candidate.as_ref()
    }

    /// Time since the session began
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.started)
    }

    /// Snapshot for progress reporting
    pub fn progress(&self) -> Progress {
        Progress {
            phase: self.phase,
            attempts: self.attempts,
            elapsed: self.elapsed(),
        }
    }

    fn budget_exhausted(&self) -> bool {
        self.elapsed() >= self.config.timeout
            || self
                .config
                .max_attempts
                .is_some_and(|cap| self.attempts >= cap)
    }

    /// Advance the session by one transition and return the new phase
    ///
    /// Terminal phases are sticky: stepping them again changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Validation`] or
    /// [`GenerationError::InvalidParameter`] from the validating step,
    /// [`GenerationError::Cancelled`] once the cancel token is set, and any
    /// error the oracle reports
    pub fn step(&mut self) -> Result<Phase> {
        match self.phase {
            Phase::Validating => {
                self.request.check_parameters()?;
                let result = validate(&self.request);
                if !result.is_ok() {
                    return Err(GenerationError::Validation {
                        violations: result.violations,
                    });
                }
                self.phase = Phase::Building;
            }
            Phase::Building => {
                self.check_cancelled()?;
                if self.budget_exhausted() {
                    warn!(
                        "No puzzle accepted after {} attempt(s) in {:.1?}",
                        self.attempts,
                        self.elapsed()
                    );
                    self.phase = Phase::TimedOut;
                } else {
                    self.attempts += 1;
                    match self.builder.build(&self.request).with_attempt(self.attempts) {
                        Ok(puzzle) => {
                            self.candidate = Some(puzzle);
                            self.phase = Phase::CheckingSolvability;
                        }
                        Err(stall @ GenerationError::Stall { .. }) => {
                            warn!("{stall}");
                            self.stall = Some(stall);
                            self.phase = Phase::Stalled;
                        }
                        Err(other) => return Err(other),
                    }
                }
            }
            Phase::CheckingSolvability => {
                self.check_cancelled()?;
                let remaining = self.config.timeout.saturating_sub(self.elapsed());
                let budget = remaining.min(self.config.oracle_timeout);
                let verdict = match self.candidate.as_ref() {
                    Some(puzzle) if !budget.is_zero() => {
                        Some(self.oracle.is_solvable(puzzle, budget)?)
                    }
                    _ => None,
                };
                if verdict == Some(true) {
                    info!("Puzzle accepted on attempt {}", self.attempts);
                    self.phase = Phase::Accepted;
                } else {
                    debug!("Attempt {} rejected", self.attempts);
                    self.candidate = None;
                    self.phase = Phase::Building;
                }
            }
            Phase::Accepted | Phase::TimedOut | Phase::Stalled => {}
        }
        Ok(self.phase)
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            Err(GenerationError::Cancelled {
                attempts: self.attempts,
            })
        } else {
            Ok(())
        }
    }

    /// Step until a terminal phase, reporting progress after every step
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::step`]
    pub fn run(mut self, mut observer: impl FnMut(&Progress)) -> Result<GenerationOutcome> {
        loop {
            let phase = self.step()?;
            observer(&self.progress());
            if phase.is_terminal() {
                break;
            }
        }
        self.into_outcome()
    }

    /// Finish the session
    ///
    /// An accepted candidate is returned as is. Any other state yields a fresh
    /// puzzle with only START and EXIT, marked not accepted, with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the request's grid dimensions are out of range
    pub fn into_outcome(self) -> Result<GenerationOutcome> {
        let elapsed = self.elapsed();
        if let (Phase::Accepted, Some(puzzle)) = (self.phase, self.candidate) {
            return Ok(GenerationOutcome {
                puzzle,
                accepted: true,
                phase: Phase::Accepted,
                attempts: self.attempts,
                elapsed,
                warning: None,
            });
        }

        let warning = match &self.stall {
            Some(stall) => format!("{FALLBACK_WARNING} ({stall})"),
            None => FALLBACK_WARNING.to_string(),
        };
        Ok(GenerationOutcome {
            puzzle: Puzzle::new(self.request.grid()?),
            accepted: false,
            phase: self.phase,
            attempts: self.attempts,
            elapsed,
            warning: Some(warning),
        })
    }
}
