use std::fmt;

/// Errors that can occur while compiling or interpreting Brainfuck code.
#[derive(Debug, thiserror::Error)]
pub enum BrainfuckError {
    /// Loops were not balanced; a matching `[` or `]` was not found.
    #[error("Unmatched bracket {kind} at instruction {ip}")]
    UnmatchedBrackets { ip: usize, kind: UnmatchedBracketKind },

    /// The runaway-loop policy declined to raise the threshold.
    #[error("Execution aborted: loop at instruction {ip} skipped {count} times (threshold {threshold})")]
    RunawayLoopAborted { ip: usize, count: u64, threshold: u64 },

    /// An underlying I/O error occurred when reading input or writing output.
    #[error("I/O error at instruction {ip}: {source}")]
    Io { ip: usize, #[source] source: std::io::Error },
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracketKind::Open => write!(f, "'['"),
            UnmatchedBracketKind::Close => write!(f, "']'"),
        }
    }
}

impl BrainfuckError {
    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BrainfuckError::UnmatchedBrackets { .. } | BrainfuckError::Io { .. } => {
                crate::exit_codes::FAILURE
            }
            BrainfuckError::RunawayLoopAborted { .. } => crate::exit_codes::RUNAWAY_ABORTED,
        }
    }
}
