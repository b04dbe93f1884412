//! Catppuccin Mocha styling for instructions and diagnostics.

use nu_ansi_term::{Color, Style};
use crate::instruction::Instruction;

const SURFACE2: Color = Color::Rgb(108, 112, 134);
const RED: Color = Color::Rgb(243, 139, 168);
const GREEN: Color = Color::Rgb(166, 227, 161);
const YELLOW: Color = Color::Rgb(249, 226, 175);
const MAUVE: Color = Color::Rgb(203, 166, 247);
const PEACH: Color = Color::Rgb(250, 179, 135);
const TEAL: Color = Color::Rgb(148, 226, 213);
const SKY: Color = Color::Rgb(137, 220, 235);

/// Style for one source character; `None` means commentary.
///
/// > <   => SKY/TEAL (movement)
/// + -   => GREEN/RED (data modification)
/// . ,   => YELLOW/PEACH (I/O)
/// [ ]   => MAUVE (flow control)
pub fn instruction_style(instr: Option<Instruction>) -> Style {
    let color = match instr {
        Some(Instruction::MoveRight) => SKY,
        Some(Instruction::MoveLeft) => TEAL,
        Some(Instruction::Increment) => GREEN,
        Some(Instruction::Decrement) => RED,
        Some(Instruction::Output) => YELLOW,
        Some(Instruction::Input) => PEACH,
        Some(Instruction::LoopOpen | Instruction::LoopClose) => MAUVE,
        None => return Style::new().fg(SURFACE2),
    };
    Style::new().fg(color).bold()
}

/// Header style for diagnostics on a terminal.
pub fn error_style() -> Style {
    Style::new().fg(RED).bold()
}
