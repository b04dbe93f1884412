use std::io::{self, IsTerminal, Write};
use crate::BrainfuckError;
use crate::theme::error_style;

/// Pretty-print a structured [`BrainfuckError`] with caret positioning.
///
/// `code` must be the instruction text the error's `ip` indexes into: the
/// filtered source for bracket errors, the compiled program for runtime ones.
/// If `program` is `Some("bf")`, messages are prefixed with "bf: ...".
pub fn print_error(program: Option<&str>, code: &str, err: &BrainfuckError) {
    let prefix_program = |msg: &str| {
        if let Some(p) = program {
            format!("{p}: {msg}")
        } else {
            msg.to_string()
        }
    };

    match err {
        BrainfuckError::UnmatchedBrackets { ip, kind } => {
            let msg = prefix_program(&format!("Parse error: unmatched bracket {kind}"));
            print_error_with_context(&msg, code, *ip);
        }
        BrainfuckError::RunawayLoopAborted { ip, count, threshold } => {
            let msg = prefix_program(&format!(
                "Execution aborted: loop skipped {count} times (threshold {threshold})"
            ));
            print_error_with_context(&msg, code, *ip);
        }
        BrainfuckError::Io { ip, source } => {
            let msg = prefix_program(&format!("I/O error: {source}"));
            print_error_with_context(&msg, code, *ip);
        }
    }
}

/// Print a concise error with instruction index and a caret context window.
///
/// `code` is instruction text, so every char is a single byte.
pub fn print_error_with_context(prefix: &str, code: &str, pos: usize) {
    let header = format!("{prefix} at instruction {pos}");
    // Styled error header for TTY stderr; keep pipelines clean otherwise
    if io::stderr().is_terminal() {
        eprintln!("{}", error_style().paint(header));
    } else {
        eprintln!("{header}");
    }

    for line in context_window(code, pos) {
        eprintln!("  {line}");
    }
    let _ = io::stderr().flush();
}

/// Up to 32 instructions either side of `pos`, plus a caret line under it.
fn context_window(code: &str, pos: usize) -> [String; 2] {
    const WINDOW: usize = 32;

    let start = pos.saturating_sub(WINDOW).min(code.len());
    let end = (pos + WINDOW + 1).min(code.len());
    let slice = code.get(start..end).unwrap_or_default();

    let caret = format!("{}^", " ".repeat(pos.saturating_sub(start)));
    [slice.to_string(), caret]
}
