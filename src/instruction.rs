use std::fmt;

/// One symbol of the Brainfuck instruction alphabet `[]<>+-.,`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    LoopOpen,   // [
    LoopClose,  // ]
    MoveLeft,   // <
    MoveRight,  // >
    Increment,  // +
    Decrement,  // -
    Output,     // .
    Input,      // ,
}

impl Instruction {
    /// Map a source character to its instruction, or `None` for anything
    /// outside the alphabet.
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '[' => Instruction::LoopOpen,
            ']' => Instruction::LoopClose,
            '<' => Instruction::MoveLeft,
            '>' => Instruction::MoveRight,
            '+' => Instruction::Increment,
            '-' => Instruction::Decrement,
            '.' => Instruction::Output,
            ',' => Instruction::Input,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Instruction::LoopOpen => '[',
            Instruction::LoopClose => ']',
            Instruction::MoveLeft => '<',
            Instruction::MoveRight => '>',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Output => '.',
            Instruction::Input => ',',
        }
    }

    pub fn is_bracket(self) -> bool {
        matches!(self, Instruction::LoopOpen | Instruction::LoopClose)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Render an instruction sequence back to Brainfuck source text.
pub fn to_source(instructions: &[Instruction]) -> String {
    instructions.iter().map(|i| i.as_char()).collect()
}
