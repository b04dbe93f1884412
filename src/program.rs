use crate::brackets::BracketTable;
use crate::error::BrainfuckError;
use crate::instruction::{Instruction, to_source};
use crate::lexer::filter;
use crate::optimize::optimize;
use crate::validate::validate;

/// Knobs for [`Program::compile_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Run the peephole optimizer before resolving brackets.
    pub optimize: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self { optimize: true }
    }
}

/// A filtered, validated, optionally optimized program with its brackets resolved.
#[derive(Debug, Clone)]
pub struct Program {
    instructions: Vec<Instruction>,
    brackets: BracketTable,
}

impl Program {
    /// Compile `source` with the default options (optimizer on).
    pub fn compile(source: &str) -> Result<Self, BrainfuckError> {
        Self::compile_with(source, CompileOptions::default())
    }

    /// Filter, validate, optimize and resolve `source`.
    ///
    /// Validation runs on the filtered sequence before any rewrite, so
    /// error positions index into `filter(source)`.
    pub fn compile_with(source: &str, options: CompileOptions) -> Result<Self, BrainfuckError> {
        let filtered = filter(source);
        tracing::debug!(source_chars = source.chars().count(), filtered = filtered.len(), "filtered source");

        validate(&filtered)?;

        let instructions = if options.optimize { optimize(&filtered) } else { filtered };
        let brackets = BracketTable::resolve(&instructions)?;
        tracing::debug!(
            instructions = instructions.len(),
            pairs = brackets.pair_count(),
            "resolved brackets"
        );

        Ok(Self { instructions, brackets })
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn brackets(&self) -> &BracketTable {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The final instruction sequence as Brainfuck source.
    pub fn to_source(&self) -> String {
        to_source(&self.instructions)
    }
}
