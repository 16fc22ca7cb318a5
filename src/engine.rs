use crate::io::{ByteSink, ByteSource};
use crate::program::{Instruction, Program};

/// Default cap on tape growth, in cells.
///
/// The tape is conceptually unbounded to the right; the cap turns runaway
/// pointer movement into a reportable [`RuntimeError::TapeOverflow`] instead
/// of unbounded allocation. 1 << 26 cells is 64 MiB, far past the classic
/// 30 000-cell array.
pub const DEFAULT_TAPE_LIMIT: usize = 1 << 26;

/// Errors that abort a run.
///
/// Every variant is fatal to the current run: the engine stops where the
/// fault happened and moves to [`State::Faulted`].
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// `<` was executed with the data pointer already at cell 0. Cell
    /// addresses never go negative and never wrap.
    #[error("tape underflow: moved left of cell 0")]
    TapeUnderflow,
    /// `>` would have moved the data pointer past the engine's tape limit.
    #[error("tape overflow: moved past the {limit}-cell tape limit")]
    TapeOverflow { limit: usize },
    /// The input source or output sink failed.
    #[error("I/O failure: {0}")]
    IoFailure(#[from] std::io::Error),
}

/// Engine lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed, not yet run.
    Ready,
    /// Inside [`Engine::run`].
    Running,
    /// The instruction pointer ran off the end of the program.
    Halted,
    /// A run aborted with a [`RuntimeError`]. The tape and pointers are
    /// left where the fault happened for inspection; the engine must not
    /// be run again.
    Faulted,
}

/// The virtual machine: a growable byte tape, a data pointer, and an
/// instruction pointer, driven over a borrowed [`Program`].
pub struct Engine<'p> {
    program: &'p Program,
    tape: Vec<u8>,
    data_ptr: usize,
    instr_ptr: usize,
    tape_limit: usize,
    state: State,
}

impl<'p> Engine<'p> {
    /// Engine over `program` with the default tape limit.
    ///
    /// The tape starts empty; cells materialize zero-filled when first
    /// written.
    pub fn new(program: &'p Program) -> Self {
        Self::with_tape_limit(program, DEFAULT_TAPE_LIMIT)
    }

    /// Engine with a custom tape limit, clamped to at least one cell.
    pub fn with_tape_limit(program: &'p Program, limit: usize) -> Self {
        Self {
            program,
            tape: Vec::new(),
            data_ptr: 0,
            instr_ptr: 0,
            tape_limit: limit.max(1),
            state: State::Ready,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// The cells written so far. Cells beyond the end of the slice exist
    /// logically and hold 0.
    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    /// Index of the current cell.
    pub fn data_pointer(&self) -> usize {
        self.data_ptr
    }

    /// Index of the next instruction to execute.
    pub fn instruction_pointer(&self) -> usize {
        self.instr_ptr
    }

    /// Run the program to completion.
    ///
    /// One instruction is fetched, decoded, and executed per iteration until
    /// the instruction pointer runs past the end of the program (success) or
    /// an instruction faults (the error is returned and the engine is left
    /// in [`State::Faulted`]). A faulted engine must not be run again; build
    /// a fresh engine over the same program instead. Running a [`Halted`]
    /// engine is a no-op.
    ///
    /// [`Halted`]: State::Halted
    pub fn run<I: ByteSource, O: ByteSink>(
        &mut self,
        input: &mut I,
        output: &mut O,
    ) -> Result<(), RuntimeError> {
        self.state = State::Running;
        match self.step_loop(input, output) {
            Ok(()) => {
                self.state = State::Halted;
                Ok(())
            }
            Err(err) => {
                self.state = State::Faulted;
                Err(err)
            }
        }
    }

    fn step_loop<I: ByteSource, O: ByteSink>(
        &mut self,
        input: &mut I,
        output: &mut O,
    ) -> Result<(), RuntimeError> {
        let instructions = self.program.instructions();

        while let Some(&instruction) = instructions.get(self.instr_ptr) {
            match instruction {
                Instruction::MoveRight => {
                    if self.data_ptr + 1 >= self.tape_limit {
                        return Err(RuntimeError::TapeOverflow {
                            limit: self.tape_limit,
                        });
                    }
                    self.data_ptr += 1;
                }
                Instruction::MoveLeft => {
                    if self.data_ptr == 0 {
                        return Err(RuntimeError::TapeUnderflow);
                    }
                    self.data_ptr -= 1;
                }
                Instruction::Increment => {
                    let cell = self.cell_mut();
                    *cell = cell.wrapping_add(1);
                }
                Instruction::Decrement => {
                    let cell = self.cell_mut();
                    *cell = cell.wrapping_sub(1);
                }
                Instruction::Output => {
                    output.write_byte(self.cell())?;
                }
                Instruction::Input => {
                    // End of input writes 0, so a program fed a short
                    // stream behaves identically on every run.
                    *self.cell_mut() = input.read_byte()?.unwrap_or(0);
                }
                Instruction::LoopStart(end) => {
                    if self.cell() == 0 {
                        self.instr_ptr = end + 1;
                        continue;
                    }
                }
                Instruction::LoopEnd(start) => {
                    if self.cell() != 0 {
                        self.instr_ptr = start + 1;
                        continue;
                    }
                }
            }
            self.instr_ptr += 1;
        }

        Ok(())
    }

    /// Value of the current cell. Reads never grow the tape; an untouched
    /// cell is 0.
    fn cell(&self) -> u8 {
        self.tape.get(self.data_ptr).copied().unwrap_or(0)
    }

    /// Current cell by reference, materializing it (and any gap before it)
    /// as zeroes first. `data_ptr` is checked against `tape_limit` on every
    /// move, so the resize never passes the limit.
    fn cell_mut(&mut self) -> &mut u8 {
        if self.data_ptr >= self.tape.len() {
            self.tape.resize(self.data_ptr + 1, 0);
        }
        &mut self.tape[self.data_ptr]
    }
}
