//! Interactive fallback when no build tool was found.

use std::io::{self, BufRead, Write};

/// Words accepted as "yes" (English and Spanish, case-insensitive).
const AFFIRMATIVE: &[&str] = &["y", "yes", "s", "si", "sí"];

/// Ask the operator for a replacement build tool command.
///
/// The operator can answer on one line (`y /opt/pio/bin/pio`) or answer
/// `y` and give the command when asked. Anything that is not an affirmative
/// answer, end of input, or a blank command counts as declining.
///
/// # Example
///
/// ```rust
/// use pio_uploadfs::prompt_for_command;
///
/// let mut out = Vec::new();
/// let answer = prompt_for_command(&b"y\n/opt/pio\n"[..], &mut out).unwrap();
/// assert_eq!(answer.as_deref(), Some("/opt/pio"));
///
/// let answer = prompt_for_command(&b"n\n"[..], &mut out).unwrap();
/// assert!(answer.is_none());
/// ```
pub fn prompt_for_command<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> io::Result<Option<String>> {
    writeln!(output, "Could not find PlatformIO.")?;
    writeln!(output, "Install PlatformIO or provide the path to its executable.")?;
    write!(output, "Provide a custom build tool command? [y/N]: ")?;
    output.flush()?;

    let Some(line) = read_line(&mut input)? else {
        return Ok(None);
    };
    let line = line.trim();
    let (answer, rest) = match line.split_once(char::is_whitespace) {
        Some((answer, rest)) => (answer, rest.trim()),
        None => (line, ""),
    };

    if !is_affirmative(answer) {
        tracing::debug!(answer, "operator declined");
        return Ok(None);
    }
    if !rest.is_empty() {
        return Ok(Some(rest.to_string()));
    }

    write!(output, "Enter the full command (e.g. /path/to/platformio): ")?;
    output.flush()?;
    let command = read_line(&mut input)?
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    Ok(command)
}

fn is_affirmative(answer: &str) -> bool {
    let answer = answer.to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

/// Read one line, `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
