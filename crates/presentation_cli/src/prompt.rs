//! Interactive coordinate entry

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Prompt shown when the latitude was not given on the command line
pub const LATITUDE_PROMPT: &str = "Please input the latitude of your position (ex: 42.308216): ";

/// Prompt shown when the longitude was not given on the command line
pub const LONGITUDE_PROMPT: &str = "Please input the longitude of your position (ex: -71.072487): ";

/// Errors reading a coordinate from the terminal
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading or writing the terminal failed
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Input ended before a value was entered
    #[error("No input provided")]
    EndOfInput,

    /// The entry is not a number
    #[error("Invalid entry type: {0:?} is not a number")]
    NotANumber(String),
}

/// Print `prompt` and read one decimal coordinate
///
/// # Errors
///
/// Fails on I/O errors, end of input, or a non-numeric entry.
pub fn read_coordinate<R, W>(input: &mut R, output: &mut W, prompt: &str) -> Result<f64, PromptError>
where
    R: BufRead,
    W: Write,
{
    output.write_all(prompt.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(PromptError::EndOfInput);
    }

    let entry = line.trim();
    entry
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PromptError::NotANumber(entry.to_string()))
}
