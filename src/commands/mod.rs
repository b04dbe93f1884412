pub mod optimize;
pub mod repl;
pub mod run;

use std::fs;
use std::io::{self, Write};

use crate::exit_codes;

/// Source text from `--file` or the concatenated positional parts.
///
/// On failure the diagnostic has been printed and the exit code is returned.
pub(crate) fn load_source(program: &str, file: Option<String>, code: Vec<String>) -> Result<String, i32> {
    if file.is_some() && !code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --file");
        let _ = io::stderr().flush();
        return Err(exit_codes::USAGE);
    }

    match file {
        // Comments may hold any bytes; only the instruction characters matter.
        Some(path) => match fs::read(&path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                eprintln!("{program}: failed to read code file {path}: {e}");
                let _ = io::stderr().flush();
                Err(exit_codes::FAILURE)
            }
        },
        None => Ok(code.join("")),
    }
}
