use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use sqlx::types::BigDecimal;
use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("{0} is not a valid number")]
    InvalidNumber(String),
    #[error("{0} is not a valid decimal number")]
    InvalidDecimal(String),
    #[error("{0} is required")]
    Required(&'static str),
}

/// Line-oriented prompts over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line of output
    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Ask for free text. Blank input and end of input both yield `None`.
    pub fn string_input(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        // Undecodable bytes are replaced rather than failing the read, so the
        // line is still consumed and reported by the parser.
        let mut bytes = Vec::new();
        self.input.read_until(b'\n', &mut bytes)?;
        let line = String::from_utf8_lossy(&bytes);

        let trimmed = line.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }

    pub fn int_input(&mut self, prompt: &str) -> Result<Option<i32>, AppError> {
        match self.string_input(prompt)? {
            Some(text) => Ok(Some(parse_int(&text)?)),
            None => Ok(None),
        }
    }

    pub fn decimal_input(&mut self, prompt: &str) -> Result<Option<BigDecimal>, AppError> {
        match self.string_input(prompt)? {
            Some(text) => Ok(Some(parse_decimal(&text)?)),
            None => Ok(None),
        }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}

pub fn parse_int(text: &str) -> Result<i32, InputError> {
    text.parse()
        .map_err(|_| InputError::InvalidNumber(text.to_string()))
}

/// Largest exponent accepted before rescaling; anything beyond cannot fit `NUMERIC(7, 2)`.
const MAX_EXPONENT: i64 = 32;

/// Hours are stored as `NUMERIC(7, 2)`, so magnitudes must stay below this.
const HOURS_LIMIT: i64 = 100_000;

/// Parse an hours value with exactly two decimal places.
///
/// Values that would need rounding to fit two places, or that are too large
/// for the hours columns, are rejected.
pub fn parse_decimal(text: &str) -> Result<BigDecimal, InputError> {
    let invalid = || InputError::InvalidDecimal(text.to_string());

    let value = BigDecimal::from_str(text).map_err(|_| invalid())?;

    // Rescaling costs time proportional to the exponent, so bound it first.
    let (_, scale) = value.as_bigint_and_exponent();
    if scale.abs() > MAX_EXPONENT {
        return Err(invalid());
    }

    let scaled = value.with_scale(2);
    if scaled != value || scaled.abs() >= BigDecimal::from(HOURS_LIMIT) {
        return Err(invalid());
    }

    Ok(scaled)
}
