use clap::Args;
use std::io::{self, Write};
use crate::cli_util::print_error;
use crate::instruction::to_source;
use crate::program::CompileOptions;
use crate::{config, exit_codes, lexer, AlwaysContinue, Interpreter, Program, StdioPrompt};

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Print a step-by-step table of operations instead of executing
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Read Brainfuck code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Concatenated Brainfuck code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Skips per loop before asking to continue (fallback BF_LOOP_THRESHOLD; default 1000)
    #[arg(long = "loop-threshold", value_name = "N")]
    pub loop_threshold: Option<u64>,

    /// Run the filtered program without peephole optimization
    #[arg(long = "no-optimize")]
    pub no_optimize: bool,

    /// Answer "yes" to every runaway-loop prompt
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, exit_codes::OK);
    }

    let RunArgs {
        debug,
        file,
        code,
        loop_threshold,
        no_optimize,
        yes,
        ..
    } = args;

    if file.is_none() && code.is_empty() {
        usage_and_exit(program, exit_codes::USAGE);
    }

    let source = match super::load_source(program, file, code) {
        Ok(s) => s,
        Err(exit_code) => return exit_code,
    };

    let options = CompileOptions { optimize: config::optimize(no_optimize) };
    let compiled = match Program::compile_with(&source, options) {
        Ok(p) => p,
        Err(err) => {
            // Bracket positions index the filtered text.
            print_error(Some(program), &to_source(&lexer::filter(&source)), &err);
            return err.exit_code();
        }
    };

    let code = compiled.to_source();
    let mut bf = Interpreter::new(compiled).with_loop_threshold(config::loop_threshold(loop_threshold));
    let result = match (debug, yes) {
        (false, false) => bf.run(&mut StdioPrompt),
        (false, true) => bf.run(&mut AlwaysContinue),
        (true, false) => bf.run_debug(&mut StdioPrompt),
        (true, true) => bf.run_debug(&mut AlwaysContinue),
    };

    // For readability, ensure output ends with a newline
    println!();
    let _ = io::stdout().flush();

    match result {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            print_error(Some(program), &code, &err);
            err.exit_code()
        }
    }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [--debug|-d] [--yes|-y] [--loop-threshold N] [--no-optimize] "<code>"
  {0} run [--debug|-d] [--yes|-y] [--loop-threshold N] [--no-optimize] --file <PATH>

Options:
  --file,  -f <PATH>      Read Brainfuck code from PATH instead of positional "<code>"
  --debug, -d             Print a step-by-step table of operations instead of executing
  --yes,   -y             Keep going whenever a loop looks runaway (no prompt)
  --loop-threshold <N>    Skips per loop before prompting (env BF_LOOP_THRESHOLD; default 1000)
  --no-optimize           Skip the peephole optimizer (env BF_OPTIMIZE=0)
  --help,  -h             Show this help

Notes:
- Characters outside of Brainfuck's ><+-.,[] are ignored.
- Pointer moves wrap around the 30,000-cell tape; cells wrap modulo 256.
- Input (`,`) reads a single byte from stdin; on EOF the current cell is set to 0.
- When a loop is skipped more often than the threshold, you are asked on stderr
  whether to double the threshold; answering anything but "y" aborts (exit 3).

Examples:
- Load Brainfuck code from a file:
    {0} run --file ./program.bf
- Read bytes from a file as stdin (`,` will consume file input):
    {0} run ",[.,]" < input.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
