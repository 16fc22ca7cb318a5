use std::io::{self, IsTerminal, Write};
use std::sync::mpsc;
use std::time::Duration;
use std::{env, fs, thread};

use clap::Args;

use crate::cli_util::{print_parse_error, print_runtime_error};
use crate::{Engine, Program, RuntimeError};

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Read program source from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Wall-clock timeout in milliseconds (fallback BFVM_TIMEOUT_MS; default none)
    #[arg(long = "timeout", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Concatenated program source parts
    #[arg(value_name = "code", trailing_var_arg = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs {
        file,
        timeout_ms,
        code,
        ..
    } = args;

    if file.is_none() && code.is_empty() {
        usage_and_exit(program, 2);
    }

    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        usage_and_exit(program, 2);
    }

    let source = if let Some(path) = file {
        match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{program}: failed to read source file as UTF-8: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        }
    } else {
        code.join("")
    };

    // Parse up front so bracket errors surface before any execution.
    let parsed = match Program::parse(&source) {
        Ok(p) => p,
        Err(err) => {
            print_parse_error(Some(program), &source, &err);
            return 1;
        }
    };

    // Resolve the wall-clock limit: flag -> env -> none.
    let timeout_ms = timeout_ms.or_else(|| {
        env::var("BFVM_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
    });

    let exit_code = match timeout_ms {
        Some(ms) => run_with_deadline(program, parsed, ms),
        None => run_to_completion(program, &parsed),
    };

    // Keep piped output byte-exact; terminals get a readability newline.
    if exit_code == 0 && io::stdout().is_terminal() {
        println!();
    }
    let _ = io::stdout().flush();
    exit_code
}

fn run_to_completion(program: &str, parsed: &Program) -> i32 {
    let mut engine = Engine::new(parsed);
    match engine.run(&mut io::stdin().lock(), &mut io::stdout().lock()) {
        Ok(()) => 0,
        Err(err) => {
            let _ = io::stdout().flush();
            print_runtime_error(Some(program), &err);
            1
        }
    }
}

/// Execute on a worker thread and give up when the deadline passes. The
/// engine has no cancellation hook; process teardown reaps the worker.
fn run_with_deadline(program: &str, parsed: Program, timeout_ms: u64) -> i32 {
    let (tx, rx) = mpsc::channel::<Result<(), RuntimeError>>();

    thread::spawn(move || {
        let mut engine = Engine::new(&parsed);
        // Unlocked stdout: the parent must not block on a lock held by a
        // still-running worker after a timeout.
        let res = engine.run(&mut io::stdin().lock(), &mut io::stdout());
        let _ = tx.send(res);
    });

    match rx.recv_timeout(Duration::from_millis(timeout_ms)) {
        Ok(Ok(())) => 0,
        Ok(Err(err)) => {
            let _ = io::stdout().flush();
            print_runtime_error(Some(program), &err);
            1
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            eprintln!("Execution aborted: wall-clock timeout exceeded ({timeout_ms} ms)");
            let _ = io::stderr().flush();
            1
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => 1,
    }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run "<code>"
  {0} run --file <PATH>

Options:
  --file,   -f <PATH>  Read program source from PATH instead of positional "<code>"
  --timeout <MS>       Abort execution after MS milliseconds of wall-clock time
                       (fallback BFVM_TIMEOUT_MS; no limit by default)
  --help,   -h         Show this help

Notes:
- Characters outside of ><+-.,[] are comments and are ignored.
- Input (`,`) reads a single byte from stdin; at end of input the current cell is set to 0.
- Output (`.`) writes raw bytes to stdout; a trailing newline is added only when stdout is a terminal.

Examples:
- Run a program loaded from a file:
    {0} run --file ./hello.b
- Read bytes from a file as stdin (`,` will consume file input):
    {0} run ",[.,]" < input.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
