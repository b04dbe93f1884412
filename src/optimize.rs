//! Peephole rewrites over a filtered instruction sequence.
//!
//! Two passes, applied in this order by [`optimize`]:
//! - [`elide_empty`] drops empty loops `[]` and moves that are immediately
//!   undone (`<>`, `><`), repeating until nothing more can be removed.
//! - [`collapse_runs`] replaces each maximal run of `+`/`-` with the
//!   shortest run giving the same net delta.
//!
//! Neither pass changes bracket well-formedness: `[]` is only ever removed
//! as a matched pair, and run collapsing never touches brackets.
//!
//! Elision does not run again after collapsing, so a run that cancels out
//! can leave a new empty pair behind: `[+-]<+->` becomes `[]<>`.

use crate::instruction::Instruction;

/// Apply empty-construct elision, then run collapsing.
pub fn optimize(instructions: &[Instruction]) -> Vec<Instruction> {
    let elided = elide_empty(instructions);
    let collapsed = collapse_runs(&elided);
    tracing::debug!(
        before = instructions.len(),
        after = collapsed.len(),
        "peephole optimization"
    );
    collapsed
}

/// Remove `[]`, `<>` and `><` pairs until a fixed point is reached.
pub fn elide_empty(instructions: &[Instruction]) -> Vec<Instruction> {
    let mut current = instructions.to_vec();
    loop {
        let next = elide_pass(&current);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

/// One left-to-right scan removing every non-overlapping empty pair.
fn elide_pass(instructions: &[Instruction]) -> Vec<Instruction> {
    let mut out = Vec::with_capacity(instructions.len());
    let mut i = 0;
    while i < instructions.len() {
        if let Some(&next) = instructions.get(i + 1) {
            if is_empty_pair(instructions[i], next) {
                i += 2;
                continue;
            }
        }
        out.push(instructions[i]);
        i += 1;
    }
    out
}

fn is_empty_pair(first: Instruction, second: Instruction) -> bool {
    use Instruction::*;
    matches!(
        (first, second),
        (LoopOpen, LoopClose) | (MoveLeft, MoveRight) | (MoveRight, MoveLeft)
    )
}

/// Collapse each run of `+`/`-` into `|net|` copies of the winning symbol.
///
/// The net delta is not reduced modulo 256; cell arithmetic wraps anyway.
pub fn collapse_runs(instructions: &[Instruction]) -> Vec<Instruction> {
    let mut out = Vec::with_capacity(instructions.len());
    let mut counter: i64 = 0;

    for &instr in instructions {
        match instr {
            Instruction::Increment => counter += 1,
            Instruction::Decrement => counter -= 1,
            other => {
                flush_run(&mut out, counter);
                counter = 0;
                out.push(other);
            }
        }
    }
    flush_run(&mut out, counter);

    out
}

fn flush_run(out: &mut Vec<Instruction>, counter: i64) {
    let symbol = if counter > 0 {
        Instruction::Increment
    } else {
        Instruction::Decrement
    };
    out.extend(std::iter::repeat_n(symbol, counter.unsigned_abs() as usize));
}
