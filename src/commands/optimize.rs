use clap::Args;
use std::io::{self, Write};
use crate::cli_util::print_error;
use crate::instruction::to_source;
use crate::program::CompileOptions;
use crate::{config, exit_codes, lexer, Program};

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct OptimizeArgs {
    /// Read Brainfuck code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Concatenated Brainfuck code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Only strip non-instruction characters
    #[arg(long = "no-optimize")]
    pub no_optimize: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: OptimizeArgs) -> i32 {
    if args.help {
        usage_and_exit(program, exit_codes::OK);
    }

    let OptimizeArgs { file, code, no_optimize, .. } = args;

    if file.is_none() && code.is_empty() {
        usage_and_exit(program, exit_codes::USAGE);
    }

    let source = match super::load_source(program, file, code) {
        Ok(s) => s,
        Err(exit_code) => return exit_code,
    };

    let options = CompileOptions { optimize: config::optimize(no_optimize) };
    match Program::compile_with(&source, options) {
        Ok(compiled) => {
            println!("{}", compiled.to_source());
            let _ = io::stdout().flush();
            exit_codes::OK
        }
        Err(err) => {
            print_error(Some(program), &to_source(&lexer::filter(&source)), &err);
            err.exit_code()
        }
    }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} optimize [--no-optimize] "<code>"
  {0} optimize [--no-optimize] --file <PATH>

Options:
  --file,  -f <PATH>  Read Brainfuck code from PATH instead of positional "<code>"
  --no-optimize       Only strip non-instruction characters
  --help,  -h         Show this help

Description:
  Prints the program exactly as `run` would execute it: comments stripped,
  brackets checked, empty loops and undone moves removed, then +/- runs
  collapsed to their net effect. Removal happens before collapsing, so
  `[+-]<+->` prints as `[]<>`.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
