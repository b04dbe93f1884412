use crate::error::{BrainfuckError, UnmatchedBracketKind};
use crate::instruction::Instruction;

/// Check that every `[` has a matching `]` and vice versa, properly nested.
///
/// On failure the error names the first stray `]`, or, when every `]` is
/// matched, the innermost `[` still open at end of input.
pub fn validate(instructions: &[Instruction]) -> Result<(), BrainfuckError> {
    let mut stack: Vec<usize> = Vec::new();
    for (i, instr) in instructions.iter().enumerate() {
        match instr {
            Instruction::LoopOpen => stack.push(i),
            Instruction::LoopClose => {
                if stack.pop().is_none() {
                    return Err(BrainfuckError::UnmatchedBrackets {
                        ip: i,
                        kind: UnmatchedBracketKind::Close,
                    });
                }
            }
            _ => {}
        }
    }

    if let Some(unmatched_open) = stack.last().copied() {
        return Err(BrainfuckError::UnmatchedBrackets {
            ip: unmatched_open,
            kind: UnmatchedBracketKind::Open,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::filter;

    fn check(src: &str) -> Result<(), BrainfuckError> {
        validate(&filter(src))
    }

    #[test]
    fn balanced_nesting_is_accepted() {
        assert!(check("[+[-]]").is_ok());
        assert!(check("").is_ok());
        assert!(check("+-<>.,").is_ok());
        assert!(check("[][[]][[[]]]").is_ok());
    }

    #[test]
    fn unclosed_open_is_rejected() {
        let err = check("[+[-]").unwrap_err();
        assert!(matches!(
            err,
            BrainfuckError::UnmatchedBrackets { ip: 0, kind: UnmatchedBracketKind::Open }
        ));
    }

    #[test]
    fn close_before_open_is_rejected() {
        let err = check("][").unwrap_err();
        assert!(matches!(
            err,
            BrainfuckError::UnmatchedBrackets { ip: 0, kind: UnmatchedBracketKind::Close }
        ));
    }

    #[test]
    fn stray_close_reports_its_position() {
        let err = check("+[-]]").unwrap_err();
        assert!(matches!(
            err,
            BrainfuckError::UnmatchedBrackets { ip: 4, kind: UnmatchedBracketKind::Close }
        ));
    }
}
