//! The tape interpreter.
//!
//! Executes a compiled [`Program`] against a 30,000-cell circular byte tape
//! with a single data pointer.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0; cells wrap modulo 256.
//! - The pointer wraps: `<` from cell 0 lands on the last cell, `>` from the
//!   last cell lands on cell 0.
//! - Input `,` reads a single byte; on EOF the current cell is set to 0.
//! - Output `.` writes the byte at the current cell unchanged.
//! - Every time a `[` is skipped because its cell is zero, a per-position
//!   counter is bumped. A counter passing the loop threshold (1000 by
//!   default) suspends execution and consults a [`RunawayPolicy`]; the
//!   threshold doubles each time the policy says to continue.
//!
//! Quick start:
//!
//! ```no_run
//! use bf_engine::{AlwaysContinue, Interpreter, Program};
//!
//! let program = Program::compile("++>+++++[<+>-]<.").expect("balanced");
//! let mut bf = Interpreter::new(program);
//! bf.run(&mut AlwaysContinue).expect("program should run");
//! assert_eq!(bf.cell(0), 7);
//! ```

use std::collections::HashMap;
use std::io::{self, Read, Write};

use crate::error::{BrainfuckError, UnmatchedBracketKind};
use crate::instruction::Instruction;
use crate::policy::{RunawayLoop, RunawayPolicy};
use crate::program::Program;

/// Number of cells on the tape.
pub const TAPE_LEN: usize = 30_000;

/// Skips tolerated per `[` position before the policy is consulted.
pub const DEFAULT_LOOP_THRESHOLD: u64 = 1000;

type OutputSink = Box<dyn Fn(&[u8]) + Send + Sync>;
type InputProvider = Box<dyn Fn() -> Option<u8> + Send + Sync>;

/// A Brainfuck interpreter owning its tape, pointer and loop counters.
pub struct Interpreter {
    program: Program,
    memory: Vec<u8>,
    pointer: usize,
    // Skip counts keyed by `[` position; accumulate across the whole run.
    skip_counts: HashMap<usize, u64>,
    initial_threshold: u64,
    loop_threshold: u64,
    // Optional hooks:
    output_sink: Option<OutputSink>,
    input_provider: Option<InputProvider>,
}

impl Interpreter {
    /// Create an interpreter for `program` with a zeroed tape.
    pub fn new(program: Program) -> Self {
        Self {
            program,
            memory: vec![0; TAPE_LEN],
            pointer: 0,
            skip_counts: HashMap::new(),
            initial_threshold: DEFAULT_LOOP_THRESHOLD,
            loop_threshold: DEFAULT_LOOP_THRESHOLD,
            output_sink: None,
            input_provider: None,
        }
    }

    /// Start each run with `threshold` instead of [`DEFAULT_LOOP_THRESHOLD`].
    /// A zero threshold is raised to 1.
    pub fn with_loop_threshold(mut self, threshold: u64) -> Self {
        self.initial_threshold = threshold.max(1);
        self.loop_threshold = self.initial_threshold;
        self
    }

    /// Provide an output sink. When set, '.' sends bytes to this sink instead of stdout.
    /// The sink receives a single-byte slice per '.'.
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.output_sink = Some(Box::new(sink));
    }

    /// Provide an input provider. When set, ',' reads from this provider instead of stdin.
    /// Returning None indicates EOF (cell is set to 0).
    pub fn set_input_provider<F>(&mut self, provider: F)
    where
        F: Fn() -> Option<u8> + Send + Sync + 'static,
    {
        self.input_provider = Some(Box::new(provider));
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Current data pointer.
    pub fn cursor(&self) -> usize {
        self.pointer
    }

    pub fn cell(&self, index: usize) -> u8 {
        self.memory[index % TAPE_LEN]
    }

    pub fn tape(&self) -> &[u8] {
        &self.memory
    }

    /// Threshold currently in force (doubles on every accepted checkpoint).
    pub fn loop_threshold(&self) -> u64 {
        self.loop_threshold
    }

    /// Skips recorded so far for the `[` at `ip`.
    pub fn skip_count(&self, ip: usize) -> u64 {
        self.skip_counts.get(&ip).copied().unwrap_or(0)
    }

    /// Execute the program until the instruction pointer runs off the end.
    ///
    /// Skip counters and the loop threshold start fresh on every call; the
    /// tape and pointer carry over.
    pub fn run<P: RunawayPolicy>(&mut self, policy: &mut P) -> Result<(), BrainfuckError> {
        self.execute(false, policy)
    }

    /// Debug-run the program, printing a step-by-step table of operations
    /// instead of producing I/O side effects. The interpreter state (pointer, memory)
    /// advances exactly as it would during a real run, but:
    /// - '.' does not write the byte; we log the action instead
    /// - ',' does not read input; we simulate EOF and set the cell to 0 and log
    pub fn run_debug<P: RunawayPolicy>(&mut self, policy: &mut P) -> Result<(), BrainfuckError> {
        self.execute(true, policy)
    }

    /// Internal executor shared by run and run_debug.
    fn execute(&mut self, debug: bool, policy: &mut dyn RunawayPolicy) -> Result<(), BrainfuckError> {
        self.skip_counts.clear();
        self.loop_threshold = self.initial_threshold;

        let code_len = self.program.len();
        let mut code_ptr = 0;
        let mut step: usize = 0;

        if debug {
            println!("STEP | IP  | PTR | CELL | INSTR | ACTION");
            println!("-----+-----+-----+------+-------+------------------------------------------------");
        }

        while code_ptr < code_len {
            let instr = self.program.instructions()[code_ptr];
            let (ptr_before, cell_before) = (self.pointer, self.memory[self.pointer]);
            let mut action: Option<String> = if debug { Some(String::new()) } else { None };
            let mut next = code_ptr + 1;

            match instr {
                Instruction::MoveRight => {
                    self.pointer = (self.pointer + 1) % TAPE_LEN;
                    if let Some(a) = action.as_mut() { *a = format!("Moved pointer head to index {}", self.pointer); }
                }
                Instruction::MoveLeft => {
                    self.pointer = (self.pointer + TAPE_LEN - 1) % TAPE_LEN;
                    if let Some(a) = action.as_mut() { *a = format!("Moved pointer head to index {}", self.pointer); }
                }
                Instruction::Increment => {
                    let after = cell_before.wrapping_add(1);
                    self.memory[self.pointer] = after;
                    if let Some(a) = action.as_mut() { *a = format!("Increment cell[{}] from {} to {}", ptr_before, cell_before, after); }
                }
                Instruction::Decrement => {
                    let after = cell_before.wrapping_sub(1);
                    self.memory[self.pointer] = after;
                    if let Some(a) = action.as_mut() { *a = format!("Decrement cell[{}] from {} to {}", ptr_before, cell_before, after); }
                }
                Instruction::Output => {
                    if let Some(a) = action.as_mut() {
                        *a = format!("Output byte {} (suppressed in debug)", cell_before);
                    } else {
                        self.write_byte(code_ptr, cell_before)?;
                    }
                }
                Instruction::Input => {
                    if let Some(a) = action.as_mut() {
                        self.memory[self.pointer] = 0; // simulate EOF
                        *a = "Read byte -> simulated EOF (set cell to 0)".to_string();
                    } else {
                        self.memory[self.pointer] = self.read_byte(code_ptr)?.unwrap_or(0);
                    }
                }
                Instruction::LoopOpen => {
                    if cell_before == 0 {
                        self.record_skip(code_ptr, policy)?;
                        let j = self.matching(code_ptr, UnmatchedBracketKind::Open)?;
                        if let Some(a) = action.as_mut() {
                            *a = format!(
                                "Cell is 0; skip #{} jumps past matching ']' at IP {}",
                                self.skip_count(code_ptr),
                                j
                            );
                        }
                        next = j + 1;
                    } else if let Some(a) = action.as_mut() {
                        *a = "Enter loop (cell != 0)".to_string();
                    }
                }
                Instruction::LoopClose => {
                    if cell_before != 0 {
                        // Land on the '[' itself so it is evaluated again.
                        let j = self.matching(code_ptr, UnmatchedBracketKind::Close)?;
                        if let Some(a) = action.as_mut() { *a = format!("Cell != 0; jump back to matching '[' at IP {}", j); }
                        next = j;
                    } else if let Some(a) = action.as_mut() {
                        *a = "Exit loop (cell is 0)".to_string();
                    }
                }
            }

            if let Some(action) = action {
                println!(
                    "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
                    step, code_ptr, ptr_before, cell_before, instr, action
                );
            }

            step += 1;
            code_ptr = next;
        }

        if self.output_sink.is_none() && !debug {
            io::stdout().flush().map_err(|source| BrainfuckError::Io { ip: code_len, source })?;
        }

        Ok(())
    }

    /// Count a skip of the loop at `ip` and consult `policy` once the
    /// count passes the threshold.
    fn record_skip(&mut self, ip: usize, policy: &mut dyn RunawayPolicy) -> Result<(), BrainfuckError> {
        let count = self.skip_counts.entry(ip).or_insert(0);
        *count += 1;
        let count = *count;

        if count <= self.loop_threshold {
            return Ok(());
        }

        let event = RunawayLoop { ip, count, threshold: self.loop_threshold };
        tracing::info!(ip, count, threshold = self.loop_threshold, "runaway loop threshold exceeded");

        if !policy.should_continue(&event) {
            return Err(BrainfuckError::RunawayLoopAborted {
                ip,
                count,
                threshold: self.loop_threshold,
            });
        }

        self.loop_threshold = self.loop_threshold.saturating_mul(2);
        tracing::debug!(ip, threshold = self.loop_threshold, "loop threshold doubled");
        Ok(())
    }

    fn matching(&self, ip: usize, kind: UnmatchedBracketKind) -> Result<usize, BrainfuckError> {
        self.program
            .brackets()
            .get(ip)
            .ok_or(BrainfuckError::UnmatchedBrackets { ip, kind })
    }

    fn write_byte(&self, ip: usize, byte: u8) -> Result<(), BrainfuckError> {
        // Use output sink when provided; fallback to stdout.
        if let Some(sink) = self.output_sink.as_ref() {
            (sink)(&[byte]);
            return Ok(());
        }
        io::stdout()
            .write_all(&[byte])
            .map_err(|source| BrainfuckError::Io { ip, source })
    }

    fn read_byte(&self, ip: usize) -> Result<Option<u8>, BrainfuckError> {
        // Prefer input provider when set; fall back to stdin.
        if let Some(provider) = self.input_provider.as_ref() {
            return Ok((provider)());
        }
        let mut buf = [0u8; 1];
        match io::stdin().read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(source) => Err(BrainfuckError::Io { ip, source }),
        }
    }
}
