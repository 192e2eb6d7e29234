use std::collections::HashMap;

use thiserror::Error;

use crate::color::Color;
use crate::direction::Turn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub turn: Turn,
    pub color: Color,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgramError {
    #[error("enter at least one L or R")]
    Empty,
}

/// An ordered, cyclic list of instructions.
///
/// Instruction `i` is bound to a unique color. A cell holding that color makes an agent turn by
/// `instructions[i].turn`, and is repainted with the color of instruction `i + 1` (wrapping back
/// to `0`) when the agent leaves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,

    /// Reverse of `instructions`, color to index
    index: HashMap<Color, usize>,
}

impl Program {
    /// Build a program from raw user text.
    ///
    /// Only `L` and `R` (in either case) are read; every other character is dropped. Fails if
    /// nothing is left.
    pub fn build(raw: &str) -> Result<Self, ProgramError> {
        let turns: Vec<Turn> = raw.chars().filter_map(Turn::from_symbol).collect();

        Self::from_turns(&turns)
    }

    pub fn from_turns(turns: &[Turn]) -> Result<Self, ProgramError> {
        if turns.is_empty() {
            return Err(ProgramError::Empty);
        }

        let steps = turns.len() - 1;

        let instructions: Vec<Instruction> = turns
            .iter()
            .enumerate()
            .map(|(i, &turn)| {
                let color = if i == 0 {
                    Color::White
                } else {
                    Color::Hsl { step: i, steps }
                };

                Instruction { turn, color }
            })
            .collect();

        let index = instructions
            .iter()
            .enumerate()
            .map(|(i, inst)| (inst.color, i))
            .collect();

        Ok(Self {
            instructions,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Always `false`, a program can't be built empty
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instruction every cell starts on
    pub fn first(&self) -> &Instruction {
        &self.instructions[0]
    }

    /// Index of the instruction bound to `color`
    pub fn index_of(&self, color: Color) -> Option<usize> {
        self.index.get(&color).copied()
    }

    /// Index of the instruction after `i`, wrapping at the end of the program
    pub fn next_index(&self, i: usize) -> usize {
        if i + 1 >= self.len() { 0 } else { i + 1 }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }
}

impl std::ops::Index<usize> for Program {
    type Output = Instruction;

    fn index(&self, i: usize) -> &Self::Output {
        &self.instructions[i]
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for inst in &self.instructions {
            write!(f, "{}", inst.turn.symbol())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::Program;
    use super::ProgramError;
    use crate::color::Color;
    use crate::direction::Turn;

    #[test]
    fn lrlr() {
        let program = Program::build("LRLR").unwrap();

        assert_eq!(program.len(), 4);
        assert_eq!(program.first().color, Color::White);

        let turns: Vec<Turn> = program.iter().map(|i| i.turn).collect();
        assert_eq!(turns, [Turn::Left, Turn::Right, Turn::Left, Turn::Right]);

        let colors: HashSet<Color> = program.iter().map(|i| i.color).collect();
        assert_eq!(colors.len(), 4);
    }

    #[test]
    fn filters_and_ignores_case() {
        let program = Program::build(" l-r x\nRL?").unwrap();

        assert_eq!(program.to_string(), "LRRL");
    }

    #[test]
    fn single_instruction_keeps_base_color() {
        let program = Program::build("r").unwrap();

        assert_eq!(program.len(), 1);
        assert_eq!(program[0].color, Color::White);
        assert_eq!(program.next_index(0), 0);
    }

    #[test]
    fn hue_steps() {
        let program = Program::build("LLLLL").unwrap();

        let hues: Vec<Option<f64>> = program.iter().map(|i| i.color.hue()).collect();
        assert_eq!(hues, [None, Some(90.0), Some(180.0), Some(270.0), Some(360.0)]);
    }

    #[test]
    fn empty() {
        assert_eq!(Program::build(""), Err(ProgramError::Empty));
        assert_eq!(Program::build("hi you!"), Err(ProgramError::Empty));
        assert_eq!(
            ProgramError::Empty.to_string(),
            "enter at least one L or R"
        );
    }

    #[test]
    fn cyclic_successor() {
        let program = Program::build("LRR").unwrap();

        assert_eq!(program.next_index(0), 1);
        assert_eq!(program.next_index(1), 2);
        assert_eq!(program.next_index(2), 0);
    }

    proptest! {
        #[test]
        fn colors_are_distinct_and_indexed(raw in "[LRlrx ]{0,64}") {
            match Program::build(&raw) {
                Ok(program) => {
                    prop_assert_eq!(program.first().color, Color::White);

                    let colors: HashSet<Color> = program.iter().map(|i| i.color).collect();
                    prop_assert_eq!(colors.len(), program.len());

                    for (i, inst) in program.iter().enumerate() {
                        prop_assert_eq!(program.index_of(inst.color), Some(i));
                    }
                }
                Err(e) => {
                    prop_assert_eq!(e, ProgramError::Empty);
                    prop_assert!(!raw.chars().any(|c| Turn::from_symbol(c).is_some()));
                }
            }
        }
    }
}
