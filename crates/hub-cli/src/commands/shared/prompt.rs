use std::io::{BufRead, Write};

/// Ask a yes/no question on stderr and read the answer from `input`.
/// Anything but `y`/`yes` is a no.
pub fn confirm<R: BufRead, W: Write>(question: &str, input: &mut R, prompt: &mut W) -> bool {
    if write!(prompt, "{question} [y/N] ").and_then(|()| prompt.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(error) => {
            tracing::warn!(%error, "could not read confirmation");
            false
        }
    }
}

/// [`confirm`] against the process's stdin and stderr.
pub fn confirm_on_terminal(question: &str) -> bool {
    confirm(question, &mut std::io::stdin().lock(), &mut std::io::stderr())
}
