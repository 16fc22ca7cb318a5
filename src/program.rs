use std::str::FromStr;

/// A single tape operation.
///
/// Loop brackets carry the instruction index of their partner, resolved once
/// at parse time so the engine never rescans the program for a match while
/// running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `>`: move the data pointer one cell to the right.
    MoveRight,
    /// `<`: move the data pointer one cell to the left.
    MoveLeft,
    /// `+`: add 1 (mod 256) to the byte at the data pointer.
    Increment,
    /// `-`: subtract 1 (mod 256) from the byte at the data pointer.
    Decrement,
    /// `.`: emit the byte at the data pointer to the output sink.
    Output,
    /// `,`: read one byte of input into the current cell, or 0 at end of
    /// input.
    Input,
    /// `[`: enter the loop body, or jump past the matching `]` when the
    /// current cell is 0.
    LoopStart(usize),
    /// `]`: jump back to just past the matching `[` while the current cell
    /// is non-zero.
    LoopEnd(usize),
}

/// Errors reported while turning source text into a [`Program`].
///
/// Both variants carry an instruction index: the position the offending
/// bracket holds (or would have held) in the parsed instruction sequence,
/// with comment characters already stripped out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A `[` was never closed.
    #[error("unmatched '[' at instruction {0}")]
    UnmatchedLoopStart(usize),
    /// A `]` had no open `[` left to close.
    #[error("unmatched ']' at instruction {0}")]
    UnmatchedLoopEnd(usize),
}

/// An immutable, validated instruction sequence.
///
/// A `Program` only exists after [`Program::parse`] succeeds, so holding one
/// guarantees every bracket has a partner. It is never mutated afterwards
/// and can be shared by reference across any number of engines and runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Parse `source` into a program.
    ///
    /// The eight operator characters `> < + - . , [ ]` each contribute one
    /// instruction; every other character is a comment and contributes
    /// nothing. Bracket pairs are matched here, in a single pass, and each
    /// side is stored with its partner's index.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut instructions: Vec<Instruction> = Vec::new();
        // Indices of `[` instructions still waiting for their `]`.
        let mut open_loops: Vec<usize> = Vec::new();

        for ch in source.chars() {
            let instruction = match ch {
                '>' => Instruction::MoveRight,
                '<' => Instruction::MoveLeft,
                '+' => Instruction::Increment,
                '-' => Instruction::Decrement,
                '.' => Instruction::Output,
                ',' => Instruction::Input,
                '[' => {
                    open_loops.push(instructions.len());
                    // Placeholder target, patched when the `]` arrives.
                    Instruction::LoopStart(usize::MAX)
                }
                ']' => {
                    let close = instructions.len();
                    let Some(open) = open_loops.pop() else {
                        return Err(ParseError::UnmatchedLoopEnd(close));
                    };
                    instructions[open] = Instruction::LoopStart(close);
                    Instruction::LoopEnd(open)
                }
                _ => continue,
            };
            instructions.push(instruction);
        }

        // The bottom of the stack is the earliest `[` left unclosed.
        if let Some(&open) = open_loops.first() {
            return Err(ParseError::UnmatchedLoopStart(open));
        }

        Ok(Self { instructions })
    }

    /// The instructions in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True when the source contained no operator characters at all.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_eight_operators() {
        let program = Program::parse("><+-.,[]").unwrap();
        assert_eq!(
            program.instructions(),
            &[
                Instruction::MoveRight,
                Instruction::MoveLeft,
                Instruction::Increment,
                Instruction::Decrement,
                Instruction::Output,
                Instruction::Input,
                Instruction::LoopStart(7),
                Instruction::LoopEnd(6),
            ]
        );
    }

    #[test]
    fn comment_characters_contribute_nothing() {
        let program = Program::parse("hello world").unwrap();
        assert!(program.is_empty());

        let program = Program::parse("inc (x): ++").unwrap();
        assert_eq!(
            program.instructions(),
            &[Instruction::Increment, Instruction::Increment]
        );
    }

    #[test]
    fn brackets_cross_reference_each_other() {
        for src in ["[]", "[[]]", "[][]", "+[>-<]", "[.,[+-][><]]"] {
            let program = Program::parse(src).unwrap();
            for (i, instruction) in program.instructions().iter().enumerate() {
                match *instruction {
                    Instruction::LoopStart(j) => {
                        assert_eq!(
                            program.instructions()[j],
                            Instruction::LoopEnd(i),
                            "program {src:?}"
                        );
                    }
                    Instruction::LoopEnd(j) => {
                        assert_eq!(
                            program.instructions()[j],
                            Instruction::LoopStart(i),
                            "program {src:?}"
                        );
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn lone_close_bracket_is_reported_at_instruction_zero() {
        assert_eq!(Program::parse("]"), Err(ParseError::UnmatchedLoopEnd(0)));
    }

    #[test]
    fn lone_open_bracket_is_reported_at_instruction_zero() {
        assert_eq!(Program::parse("["), Err(ParseError::UnmatchedLoopStart(0)));
    }

    #[test]
    fn earliest_unclosed_open_bracket_wins() {
        assert_eq!(
            Program::parse("+[+["),
            Err(ParseError::UnmatchedLoopStart(1))
        );
    }

    #[test]
    fn error_indices_skip_comment_characters() {
        // The `]` is the third source character but instruction 0.
        assert_eq!(Program::parse("ab]"), Err(ParseError::UnmatchedLoopEnd(0)));
    }

    #[test]
    fn close_before_reopen_is_still_unmatched() {
        assert_eq!(
            Program::parse("[]]["),
            Err(ParseError::UnmatchedLoopEnd(2))
        );
    }

    #[test]
    fn from_str_goes_through_parse() {
        let program: Program = "+[-]".parse().unwrap();
        assert_eq!(program.len(), 4);
        assert!("][".parse::<Program>().is_err());
    }
}
