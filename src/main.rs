use std::env;
use std::io::{self, Write};

use bfvm::commands::{repl, run};
use clap::{Parser, Subcommand};

fn print_top_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run  "<code>"         # Run a program passed as arguments (parts are concatenated)
  {0} run  --file <PATH>    # Run a program loaded from file
  {0} repl                  # Start a read-eval-print loop

Run "{0} <subcommand> --help" for more info.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "bfvm", disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Run(run::RunArgs),
    Repl(repl::ReplArgs),
}

fn main() {
    // The program name as invoked, for help and diagnostic prefixes.
    let program = env::args().next().unwrap_or_else(|| String::from("bfvm"));

    let cli = Cli::parse();

    if cli.help || cli.command.is_none() {
        print_top_usage_and_exit(&program, if cli.help { 0 } else { 2 });
    }

    let code = match cli.command.unwrap() {
        Command::Run(args) => run::run(&program, args),
        Command::Repl(args) => repl::run(&program, args),
    };

    std::process::exit(code);
}
