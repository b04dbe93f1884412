//! A small Brainfuck execution engine.
//!
//! Source text goes through a fixed pipeline before anything runs:
//!
//! 1. [`lexer::filter`] drops every character outside `><+-.,[]`.
//! 2. [`validate::validate`] rejects unbalanced brackets up front, so no
//!    instruction of a malformed program ever executes.
//! 3. [`optimize::optimize`] removes empty loops and undone moves, then
//!    collapses `+`/`-` runs to their net effect.
//! 4. [`BracketTable::resolve`] pairs every `[` with its `]`.
//! 5. [`Interpreter`] runs the result on a 30,000-cell circular tape,
//!    consulting a [`RunawayPolicy`] when a loop keeps getting skipped.
//!
//! Quick start:
//!
//! ```no_run
//! use bf_engine::{Interpreter, Program, StdioPrompt};
//!
//! // Classic "Hello World!" in Brainfuck
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let program = Program::compile(code).expect("brackets are balanced");
//! let mut bf = Interpreter::new(program);
//! bf.run(&mut StdioPrompt).expect("program should run");
//! println!(); // ensure a trailing newline for readability
//! ```

pub mod brackets;
pub mod cli_util;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod instruction;
pub mod interpreter;
pub mod lexer;
pub mod logging;
pub mod optimize;
pub mod policy;
pub mod program;
pub mod repl;
pub mod theme;
pub mod validate;

pub use brackets::BracketTable;
pub use error::{BrainfuckError, UnmatchedBracketKind};
pub use instruction::Instruction;
pub use interpreter::{Interpreter, DEFAULT_LOOP_THRESHOLD, TAPE_LEN};
pub use policy::{AlwaysAbort, AlwaysContinue, ConsolePrompt, RunawayLoop, RunawayPolicy, StdioPrompt};
pub use program::{CompileOptions, Program};
