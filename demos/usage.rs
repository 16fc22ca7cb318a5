use bfvm::{Engine, Program};
use std::io;

fn main() {
    // Classic "Hello World!" program
    let source = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";

    let program = match Program::parse(source) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("parse error: {err}");
            std::process::exit(1);
        }
    };

    let mut engine = Engine::new(&program);
    if let Err(err) = engine.run(&mut io::stdin().lock(), &mut io::stdout().lock()) {
        eprintln!("runtime error: {err}");
        std::process::exit(1);
    }
}
