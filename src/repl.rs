//! Read-eval-print loop.
//!
//! Two front ends share one [`Session`]: an interactive reedline editor for
//! terminals and a bare mode that runs whatever arrives on a pipe once.
//! Every submission gets a fresh tape, pointer and set of loop counters.

use std::env;
use std::io::{self, IsTerminal, Read, Write};

use reedline::{DefaultPrompt, DefaultPromptSegment, Highlighter, HistoryItem, Reedline, Signal, StyledText};

use crate::program::CompileOptions;
use crate::{cli_util, config, lexer, theme, Instruction, Interpreter, Program, RunawayPolicy, StdioPrompt};

/// How the REPL talks to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    Bare,
    Editor,
}

/// Mode requested on the command line, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlagOverride {
    None,
    Bare,
    Editor,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeError {
    #[error("cannot start editor: stdin is not a TTY (use --bare or BF_REPL_MODE=bare)")]
    NotATerminal,
    #[error("invalid BF_REPL_MODE value: {0}, must be 'bare' or 'editor'")]
    InvalidEnv(String),
}

/// Pick the mode from the flag, then `BF_REPL_MODE`, then whether stdin is a TTY.
pub fn select_mode(flag: ModeFlagOverride) -> Result<ReplMode, ModeError> {
    resolve_mode(flag, env::var("BF_REPL_MODE").ok().as_deref(), io::stdin().is_terminal())
}

fn resolve_mode(flag: ModeFlagOverride, env_value: Option<&str>, stdin_tty: bool) -> Result<ReplMode, ModeError> {
    let wanted = match (flag, env_value) {
        (ModeFlagOverride::Bare, _) => ReplMode::Bare,
        (ModeFlagOverride::Editor, _) => ReplMode::Editor,
        (ModeFlagOverride::None, Some(raw)) => match raw.trim().to_ascii_lowercase().as_str() {
            "bare" => ReplMode::Bare,
            "editor" => ReplMode::Editor,
            _ => return Err(ModeError::InvalidEnv(raw.to_string())),
        },
        (ModeFlagOverride::None, None) if stdin_tty => ReplMode::Editor,
        (ModeFlagOverride::None, None) => ReplMode::Bare,
    };

    if wanted == ReplMode::Editor && !stdin_tty {
        return Err(ModeError::NotATerminal);
    }
    Ok(wanted)
}

/// What happened to one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No instructions in the text; nothing ran and nothing was printed.
    Skipped,
    Finished,
    /// A diagnostic was printed to stderr.
    Failed,
}

/// Settings applied to every submission in one REPL session.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    options: CompileOptions,
    loop_threshold: u64,
}

impl Session {
    pub fn new(options: CompileOptions, loop_threshold: u64) -> Self {
        Self { options, loop_threshold }
    }

    /// Settings from `BF_OPTIMIZE`, `BF_LOOP_THRESHOLD` and `bf.toml`.
    pub fn from_config() -> Self {
        Self::new(
            CompileOptions { optimize: config::optimize(false) },
            config::loop_threshold(None),
        )
    }

    /// Compile and run `text` on a fresh interpreter.
    ///
    /// Program output goes to stdout; diagnostics and runaway prompts go to
    /// stderr. Unless the submission was skipped, a newline follows the
    /// program output so the next prompt starts at column 0.
    pub fn submit<P: RunawayPolicy>(&self, text: &str, policy: &mut P) -> Outcome {
        let code = lexer::filter(text);
        if code.is_empty() {
            return Outcome::Skipped;
        }
        let code = crate::instruction::to_source(&code);

        let outcome = match Program::compile_with(&code, self.options) {
            Ok(program) => {
                let compiled = program.to_source();
                let mut bf = Interpreter::new(program).with_loop_threshold(self.loop_threshold);
                match bf.run(policy) {
                    Ok(()) => Outcome::Finished,
                    Err(err) => {
                        cli_util::print_error(None, &compiled, &err);
                        Outcome::Failed
                    }
                }
            }
            Err(err) => {
                cli_util::print_error(None, &code, &err);
                Outcome::Failed
            }
        };

        println!();
        let _ = io::stdout().flush();
        outcome
    }
}

/// Interactive loop over a reedline editor until Ctrl+C, EOF or an editor error.
pub fn repl_loop(session: &Session) -> io::Result<()> {
    let mut editor = init_line_editor()?;
    let once = env::var("BF_REPL_ONCE").ok().as_deref() == Some("1");

    while let Some(submission) = read_submission_interactive(&mut editor) {
        let outcome = session.submit(&submission, &mut StdioPrompt);
        // BF_REPL_ONCE=1 stops after the first submission that ran.
        if once && outcome != Outcome::Skipped {
            return Ok(());
        }
    }

    println!();
    io::stdout().flush()
}

/// Bare mode: read stdin to EOF and submit it once.
pub fn execute_bare_once(session: &Session) -> io::Result<()> {
    let submission = read_submission(&mut io::stdin().lock())?;
    if let Some(text) = submission {
        session.submit(&text, &mut StdioPrompt);
    }
    Ok(())
}

/// Everything up to EOF; `None` when nothing arrived.
///
/// Bytes that are not valid UTF-8 become U+FFFD, which the lexer drops.
pub fn read_submission<R: Read>(input: &mut R) -> io::Result<Option<String>> {
    let mut buffer = Vec::new();
    input.read_to_end(&mut buffer)?;
    Ok((!buffer.is_empty()).then(|| String::from_utf8_lossy(&buffer).into_owned()))
}

fn init_line_editor() -> io::Result<Reedline> {
    use reedline::{default_emacs_keybindings, EditCommand, Emacs, KeyCode, KeyModifiers, ReedlineEvent};

    // Enter adds a line; Ctrl+D (Ctrl+Z on Windows) submits the buffer.
    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Enter, ReedlineEvent::Edit(vec![EditCommand::InsertNewline]));
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('d'), ReedlineEvent::Submit);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('z'), ReedlineEvent::Submit);

    // Plain arrows move inside the buffer; with Alt or Ctrl they browse history.
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Up, ReedlineEvent::Up);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Down, ReedlineEvent::Down);
    for modifier in [KeyModifiers::ALT, KeyModifiers::CONTROL] {
        keybindings.add_binding(modifier, KeyCode::Up, ReedlineEvent::PreviousHistory);
        keybindings.add_binding(modifier, KeyCode::Down, ReedlineEvent::NextHistory);
    }

    let history = reedline::FileBackedHistory::new(1_000).map_err(|e| io::Error::other(e.to_string()))?;

    Ok(Reedline::create()
        .with_highlighter(Box::new(BrainfuckHighlighter))
        .with_history(Box::new(history))
        .with_edit_mode(Box::new(Emacs::new(keybindings))))
}

/// One submitted buffer, or `None` once the session should end.
fn read_submission_interactive(editor: &mut Reedline) -> Option<String> {
    let prompt = DefaultPrompt::new(DefaultPromptSegment::Basic("bf".to_string()), DefaultPromptSegment::Empty);

    match editor.read_line(&prompt) {
        Ok(Signal::Success(buffer)) => {
            if !buffer.trim().is_empty() {
                let _ = editor.history_mut().save(HistoryItem::from_command_line(buffer.clone()));
            }
            Some(buffer)
        }
        Ok(Signal::CtrlC) | Ok(Signal::CtrlD) => None,
        Err(e) => {
            eprintln!("repl: editor error: {e}");
            None
        }
    }
}

/// Colors runs of characters by instruction role; commentary is dimmed.
struct BrainfuckHighlighter;

impl Highlighter for BrainfuckHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut out = StyledText::new();
        for ch in line.chars() {
            let style = theme::instruction_style(Instruction::from_char(ch));
            match out.buffer.last_mut() {
                Some((last, text)) if *last == style => text.push(ch),
                _ => out.push((style, ch.to_string())),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::AlwaysAbort;
    use std::io::Cursor;

    #[test]
    fn read_submission_takes_everything_until_eof() {
        let mut input = Cursor::new(&b"+++\n>+.\n"[..]);
        assert_eq!(read_submission(&mut input).unwrap().as_deref(), Some("+++\n>+.\n"));
        assert_eq!(read_submission(&mut Cursor::new(Vec::<u8>::new())).unwrap(), None);
    }

    #[test]
    fn invalid_utf8_in_comments_is_tolerated() {
        let mut input = Cursor::new(&b"caf\xe9 +.\xff"[..]);
        let text = read_submission(&mut input).unwrap().unwrap();
        assert_eq!(crate::instruction::to_source(&lexer::filter(&text)), "+.");
    }

    #[test]
    fn flags_beat_env_beats_auto_detection() {
        assert_eq!(resolve_mode(ModeFlagOverride::Bare, Some("editor"), true), Ok(ReplMode::Bare));
        assert_eq!(resolve_mode(ModeFlagOverride::None, Some(" Bare "), true), Ok(ReplMode::Bare));
        assert_eq!(resolve_mode(ModeFlagOverride::None, None, true), Ok(ReplMode::Editor));
        assert_eq!(resolve_mode(ModeFlagOverride::None, None, false), Ok(ReplMode::Bare));
    }

    #[test]
    fn editor_needs_a_terminal() {
        assert_eq!(resolve_mode(ModeFlagOverride::Editor, None, false), Err(ModeError::NotATerminal));
        assert_eq!(resolve_mode(ModeFlagOverride::None, Some("editor"), false), Err(ModeError::NotATerminal));
        assert_eq!(
            resolve_mode(ModeFlagOverride::None, Some("fancy"), true),
            Err(ModeError::InvalidEnv("fancy".to_string()))
        );
    }

    #[test]
    fn highlighter_groups_runs_by_role() {
        let styled = BrainfuckHighlighter.highlight("++>ab.", 0);
        let pieces: Vec<&str> = styled.buffer.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(pieces, vec!["++", ">", "ab", "."]);
    }

    #[test]
    fn comment_only_submission_is_skipped() {
        let session = Session::new(CompileOptions::default(), 1000);
        assert_eq!(session.submit("nothing to see\n", &mut AlwaysAbort), Outcome::Skipped);
    }

    #[test]
    fn unbalanced_submission_fails() {
        let session = Session::new(CompileOptions::default(), 1000);
        assert_eq!(session.submit("+[", &mut AlwaysAbort), Outcome::Failed);
    }
}
