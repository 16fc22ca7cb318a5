//! Run a program against in-memory buffers instead of process stdio.
//!
//! Any `std::io::Read` works as the input source and any `std::io::Write`
//! as the output sink, so tests and embedders can capture output without
//! touching the terminal.

use bfvm::{Engine, Program};

fn main() {
    // `cat`: copy input to output until end of input.
    let program = Program::parse(",[.,]").unwrap();

    let mut input: &[u8] = b"tape machine\n";
    let mut output = Vec::new();

    Engine::new(&program).run(&mut input, &mut output).unwrap();

    print!("captured: {}", String::from_utf8_lossy(&output));
}
