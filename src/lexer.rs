use crate::instruction::Instruction;

/// Keep only Brainfuck instruction characters, in source order.
///
/// Everything else is treated as commentary and dropped silently.
pub fn filter(source: &str) -> Vec<Instruction> {
    source.chars().filter_map(Instruction::from_char).collect()
}
