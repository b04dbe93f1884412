use std::io::{self, IsTerminal, Write};
use clap::Args;

use crate::exit_codes;
use crate::repl::{execute_bare_once, repl_loop, select_mode, ModeFlagOverride, ReplMode, Session};

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct ReplArgs {
    /// Force non-interactive bare mode
    #[arg(long = "bare", conflicts_with = "editor")]
    pub bare: bool,

    /// Force interactive mode (errors if stdin is not a TTY)
    #[arg(long = "editor", conflicts_with = "bare")]
    pub editor: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

impl ReplArgs {
    pub fn mode_flag(&self) -> ModeFlagOverride {
        if self.bare {
            ModeFlagOverride::Bare
        } else if self.editor {
            ModeFlagOverride::Editor
        } else {
            ModeFlagOverride::None
        }
    }
}

/// `bf repl`, also what `bf` runs with no subcommand.
pub fn run(program: &str, help: bool, mode_flag: ModeFlagOverride) -> i32 {
    if help {
        usage_and_exit(program, exit_codes::OK);
    }

    let mode = match select_mode(mode_flag) {
        Ok(m) => m,
        Err(err) => return fail(program, &err),
    };

    // Ctrl+C leaves the REPL at once, even mid-program.
    if let Err(err) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(exit_codes::OK);
    }) {
        return fail(program, &format!("failed to set ctrl+c handler: {err}"));
    }

    let session = Session::from_config();
    let result = match mode {
        ReplMode::Editor => {
            if io::stderr().is_terminal() {
                eprintln!("Brainfuck REPL. Ctrl+D (Ctrl+Z, Enter on Windows) runs the buffer; Ctrl+C exits.");
            }
            repl_loop(&session)
        }
        ReplMode::Bare => execute_bare_once(&session),
    };

    match result {
        Ok(()) => exit_codes::OK,
        Err(err) => fail(program, &format!("REPL error: {err}")),
    }
}

fn fail(program: &str, msg: &dyn std::fmt::Display) -> i32 {
    eprintln!("{program}: {msg}");
    let _ = io::stderr().flush();
    exit_codes::FAILURE
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} repl [--bare|--editor]

Options:
  --bare              Read stdin to EOF and run it once
  --editor            Force the interactive editor (errors if stdin is not a TTY)
  --help,   -h        Show this help

Notes:
- Mode: a flag wins over BF_REPL_MODE=bare|editor, which wins over auto-detection
  (editor when stdin is a TTY, bare otherwise).
- In the editor, Enter adds a line and Ctrl+D runs the buffer (Ctrl+Z, Enter on Windows).
  Alt/Ctrl+Up and Alt/Ctrl+Down browse earlier submissions. Ctrl+C exits.
- Each submission is checked and optimized like `{0} run`, then runs on a fresh tape.
  BF_OPTIMIZE and BF_LOOP_THRESHOLD apply; runaway-loop prompts appear on stderr.
- A newline follows each program's output.
- BF_REPL_ONCE=1 exits after the first submission that runs.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
