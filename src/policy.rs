//! Runaway-loop policies.
//!
//! The interpreter counts, per `[` position, how often a loop is skipped
//! because its cell is already zero. When a count passes the current
//! threshold the interpreter suspends and asks a [`RunawayPolicy`] whether
//! to double the threshold and keep going.

use std::io::{self, BufRead, Write};

/// Snapshot handed to a policy when a loop crosses the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunawayLoop {
    /// Position of the `[` in the optimized instruction sequence.
    pub ip: usize,
    /// Skips recorded for that position so far in this run.
    pub count: u64,
    /// Threshold that was just exceeded.
    pub threshold: u64,
}

/// Decides whether execution continues past a runaway-loop checkpoint.
pub trait RunawayPolicy {
    /// Return `true` to double the threshold and continue, `false` to abort.
    fn should_continue(&mut self, event: &RunawayLoop) -> bool;
}

impl<F> RunawayPolicy for F
where
    F: FnMut(&RunawayLoop) -> bool,
{
    fn should_continue(&mut self, event: &RunawayLoop) -> bool {
        self(event)
    }
}

/// Always raise the threshold.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysContinue;

impl RunawayPolicy for AlwaysContinue {
    fn should_continue(&mut self, _event: &RunawayLoop) -> bool {
        true
    }
}

/// Abort at the first checkpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysAbort;

impl RunawayPolicy for AlwaysAbort {
    fn should_continue(&mut self, _event: &RunawayLoop) -> bool {
        false
    }
}

/// Ask on `prompt` and read a yes/no line from `answers`.
///
/// Anything other than `y`/`yes` (case-insensitive), including EOF or a
/// read error, counts as "no".
pub struct ConsolePrompt<R, W> {
    answers: R,
    prompt: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(answers: R, prompt: W) -> Self {
        Self { answers, prompt }
    }
}

impl<R: BufRead, W: Write> RunawayPolicy for ConsolePrompt<R, W> {
    fn should_continue(&mut self, event: &RunawayLoop) -> bool {
        write_prompt(&mut self.prompt, event);
        let mut line = String::new();
        match self.answers.read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_affirmative(&line),
        }
    }
}

/// [`ConsolePrompt`] over the process console: asks on stderr, answers on stdin.
///
/// Stdin is only locked while an answer is being read, so `,` instructions
/// can keep reading program input from the same stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioPrompt;

impl RunawayPolicy for StdioPrompt {
    fn should_continue(&mut self, event: &RunawayLoop) -> bool {
        write_prompt(&mut io::stderr(), event);
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_affirmative(&line),
        }
    }
}

fn write_prompt<W: Write>(prompt: &mut W, event: &RunawayLoop) {
    let _ = write!(
        prompt,
        "Possible infinite loop: loop at instruction {} skipped {} times (threshold {}).\n\
         Double the threshold to {} and continue? [y/N] ",
        event.ip,
        event.count,
        event.threshold,
        event.threshold.saturating_mul(2),
    );
    let _ = prompt.flush();
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
