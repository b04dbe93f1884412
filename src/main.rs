use bf_engine::commands::{optimize, repl, run};
use bf_engine::exit_codes;
use bf_engine::repl::ModeFlagOverride;
use clap::{Parser, Subcommand};
use std::env;
use std::io::{self, Write};

fn print_top_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run      [--debug|-d] [--yes|-y] "<code>"   # Check, optimize and run Brainfuck code (args are concatenated)
  {0} run      [--debug|-d] --file <PATH>         # Run Brainfuck code loaded from file
  {0} optimize "<code>" | --file <PATH>           # Print the program as it will be executed
  {0} repl     [--bare|--editor]                  # Start a Brainfuck REPL (read-eval-print loop)

With no subcommand, starts the REPL.
Run "{0} <subcommand> --help" for more info.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "bf", disable_help_flag = true, disable_help_subcommand = true)]
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
    Optimize(optimize::OptimizeArgs),
    Repl(repl::ReplArgs),
}

fn main() {
    bf_engine::logging::init();

    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("bf"));

    let cli = Cli::parse();

    if cli.help {
        print_top_usage_and_exit(&program, exit_codes::OK);
    }

    let code = match cli.command {
        Some(Command::Run(args)) => run::run(&program, args),
        Some(Command::Optimize(args)) => optimize::run(&program, args),
        Some(Command::Repl(args)) => {
            let mode_flag = args.mode_flag();
            repl::run(&program, args.help, mode_flag)
        }
        None => repl::run(&program, false, ModeFlagOverride::None),
    };

    std::process::exit(code);
}
