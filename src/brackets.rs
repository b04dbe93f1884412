use crate::error::{BrainfuckError, UnmatchedBracketKind};
use crate::instruction::Instruction;

/// Bidirectional map from each `[`/`]` position to its structural match.
///
/// Non-bracket positions map to `None`. For every bracket position `i`,
/// `get(get(i)) == i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTable {
    jumps: Vec<Option<usize>>,
}

impl BracketTable {
    /// Pair every bracket in `instructions`.
    ///
    /// The walk re-checks balance as it goes, so an unbalanced sequence
    /// yields the same error [`crate::validate::validate`] would report.
    pub fn resolve(instructions: &[Instruction]) -> Result<Self, BrainfuckError> {
        let mut jumps: Vec<Option<usize>> = vec![None; instructions.len()];
        let mut stack: Vec<usize> = Vec::new();

        for (i, instr) in instructions.iter().enumerate() {
            match instr {
                Instruction::LoopOpen => stack.push(i),
                Instruction::LoopClose => {
                    let Some(open_index) = stack.pop() else {
                        return Err(BrainfuckError::UnmatchedBrackets {
                            ip: i,
                            kind: UnmatchedBracketKind::Close,
                        });
                    };
                    jumps[open_index] = Some(i);
                    jumps[i] = Some(open_index);
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

        Ok(Self { jumps })
    }

    /// Matching position for the bracket at `ip`, if `ip` is a bracket.
    pub fn get(&self, ip: usize) -> Option<usize> {
        self.jumps.get(ip).copied().flatten()
    }

    /// Number of instruction positions covered (bracket or not).
    pub fn len(&self) -> usize {
        self.jumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jumps.is_empty()
    }

    /// Number of matched `[`/`]` pairs.
    pub fn pair_count(&self) -> usize {
        self.jumps.iter().filter(|j| j.is_some()).count() / 2
    }
}
