//! Order script codec.
//!
//! One command per line, comma-separated, whitespace around fields ignored.
//! Blank lines and lines starting with `#` are skipped.
//!
//! - New order: `N, side(B or S), price(decimal), quantity(int)`
//! - Print both books: `P`
//! - Pause: `W, millis(int)`
//!
//! Values are only checked for syntax here. Whether a price or quantity is
//! acceptable is the engine's call, so `N, B, 0, 5` parses fine and gets
//! rejected at submission.

use std::time::Duration;

use matching_core::{Decimal, Price, Side};
use thiserror::Error;

/// Built-in demonstration scenario, run when no script is given.
pub const DEMO_SCRIPT: &str = "\
# Five resting buys over four price levels.
N, B, 5, 20
N, B, 5, 15
N, B, 6, 20
N, B, 7, 10
N, B, 6.7, 15
P
# One sell sweeps every bid level and rests the remainder.
N, S, 5, 90
P
# A buy takes what is left of the sell.
N, B, 7, 20
P
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Submit {
        side: Side,
        price: Price,
        quantity: u32,
    },
    PrintBook,
    Wait(Duration),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: `{command}` takes {expected} field(s), found {found}")]
    FieldCount {
        line: usize,
        command: char,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid {field} `{value}`")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Parse a whole script. Line numbers in errors are 1-based.
pub fn parse_script(text: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if let Some(cmd) = parse_line(idx + 1, raw)? {
            commands.push(cmd);
        }
    }
    Ok(commands)
}

/// Parse a single line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: usize, raw: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let tokens: Vec<&str> = trimmed.split(',').map(str::trim).collect();

    let cmd = match tokens[0] {
        "N" => {
            expect_fields(line, 'N', &tokens, 3)?;
            parse_submit(line, &tokens)?
        }
        "P" => {
            expect_fields(line, 'P', &tokens, 0)?;
            ScriptCommand::PrintBook
        }
        "W" => {
            expect_fields(line, 'W', &tokens, 1)?;
            let millis = tokens[1].parse::<u64>().map_err(|_| invalid(line, "delay", tokens[1]))?;
            ScriptCommand::Wait(Duration::from_millis(millis))
        }
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };

    Ok(Some(cmd))
}

fn parse_submit(line: usize, tokens: &[&str]) -> Result<ScriptCommand, ScriptError> {
    let mut side_chars = tokens[1].chars();
    let side = match (side_chars.next().and_then(Side::from_char), side_chars.next()) {
        (Some(side), None) => side,
        _ => return Err(invalid(line, "side", tokens[1])),
    };

    let price = tokens[2]
        .parse::<Decimal>()
        .map_err(|_| invalid(line, "price", tokens[2]))?;

    let quantity = tokens[3]
        .parse::<u32>()
        .map_err(|_| invalid(line, "quantity", tokens[3]))?;

    Ok(ScriptCommand::Submit { side, price, quantity })
}

fn expect_fields(line: usize, command: char, tokens: &[&str], expected: usize) -> Result<(), ScriptError> {
    let found = tokens.len() - 1;
    if found == expected {
        Ok(())
    } else {
        Err(ScriptError::FieldCount {
            line,
            command,
            expected,
            found,
        })
    }
}

fn invalid(line: usize, field: &'static str, value: &str) -> ScriptError {
    ScriptError::InvalidField {
        line,
        field,
        value: value.to_string(),
    }
}
