// crates/nt-cli/src/stdin.rs - Argument-or-stdin input
//
// Follows Unix conventions: read from stdin when no positional arg is given.

use anyhow::Result;
use std::io::{self, IsTerminal, Read};

/// Read input from stdin or use provided argument
///
/// UNIX PATTERN:
/// ```bash
/// nt add "Meeting notes" "Agenda: budget"   # Use argument
/// pbpaste | nt add "Meeting notes"          # Use stdin
/// nt list | tail -1 | cut -f1 | nt view     # Pipe an ID
/// ```
pub fn read_input_or_stdin(arg: Option<&str>) -> Result<String> {
    match arg {
        Some(value) => Ok(value.to_string()),
        None => {
            // Refuse to block on an interactive terminal
            if io::stdin().is_terminal() {
                return Err(anyhow::anyhow!(
                    "No input provided. Either provide an argument or pipe input.\n\nExamples:\n  nt add \"Title\" \"Body\"\n  echo \"Body\" | nt add \"Title\""
                ));
            }

            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            normalize_piped(&buffer)
        }
    }
}

/// Drop the trailing newline pipes usually add; interior newlines stay
fn normalize_piped(buffer: &str) -> Result<String> {
    let input = buffer.trim_end_matches(['\n', '\r']);
    if input.trim().is_empty() {
        return Err(anyhow::anyhow!("Empty input provided"));
    }
    Ok(input.to_string())
}
