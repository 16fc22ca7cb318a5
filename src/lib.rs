//! A virtual machine for the classic eight-operator tape language.
//!
//! Source text is parsed once into an immutable [`Program`] (bracket pairs
//! are matched at parse time and stored as jump targets) and executed by an
//! [`Engine`] that owns a lazily grown byte tape.
//!
//! Behaviors:
//! - Tape cells are bytes with wrapping arithmetic; 255 + 1 is 0.
//! - The tape grows to the right on demand, up to a per-engine limit.
//!   Moving left of cell 0 is a hard error, not a wrap.
//! - Input `,` reads a single byte through a [`ByteSource`]; at end of
//!   input the current cell is set to 0.
//! - Output `.` writes the raw byte through a [`ByteSink`], with no
//!   character decoding.
//! - Characters outside of `><+-.,[]` are comments and are ignored.
//!
//! Quick start:
//!
//! ```
//! use bfvm::{Engine, Program};
//!
//! // Compute 2 + 5 and emit the sum as a single raw byte.
//! let program = Program::parse("++>+++++[<+>-]<.").unwrap();
//! let mut output = Vec::new();
//! Engine::new(&program)
//!     .run(&mut std::io::empty(), &mut output)
//!     .unwrap();
//! assert_eq!(output, [7]);
//! ```

pub mod cli_util;
pub mod commands;
mod config;
mod engine;
mod io;
mod program;
pub mod repl;
mod theme;

pub use engine::{DEFAULT_TAPE_LIMIT, Engine, RuntimeError, State};
pub use io::{ByteSink, ByteSource};
pub use program::{Instruction, ParseError, Program};
