//! Engine state to text conversion.
//!
//! Engine state is written as whitespace-separated decimal integers. The
//! [`StateReader`] walks such text token by token, validating each value
//! against its allowed range, and reports the first problem as a
//! [`StreamRngError`].

use std::str::SplitWhitespace;

use crate::error::{Result, StreamRngError};

/// Joins `values` into a single-space separated decimal string.
pub fn write_decimal<I>(values: I) -> String
where
    I: IntoIterator<Item = u64>,
{
    let mut output = String::new();
    for (n, value) in values.into_iter().enumerate() {
        if n > 0 {
            output.push(' ');
        }
        output.push_str(&value.to_string());
    }
    output
}

/// Sequential reader over serialized engine state.
///
/// Created with the number of values the engine state requires, so that
/// truncated input and trailing data are both reported against it.
pub struct StateReader<'a> {
    tokens: SplitWhitespace<'a>,
    position: usize,
    expected: usize,
}

impl<'a> StateReader<'a> {
    /// Creates a reader over `text` expecting exactly `expected` values.
    pub fn new(text: &'a str, expected: usize) -> Self {
        StateReader {
            tokens: text.split_whitespace(),
            position: 0,
            expected,
        }
    }

    /// Reads the next value, which must be strictly below `limit`.
    ///
    /// # Errors
    /// - [`StreamRngError::TruncatedState`] if the text has no more tokens.
    /// - [`StreamRngError::MalformedToken`] if the token is not a decimal `u64`.
    /// - [`StreamRngError::ValueOutOfRange`] if the value is `>= limit`.
    pub fn read_below(&mut self, limit: u64) -> Result<u64> {
        let value = self.read_any()?;
        if value >= limit {
            return Err(StreamRngError::ValueOutOfRange {
                position: self.position - 1,
                value,
                limit,
            });
        }
        Ok(value)
    }

    /// Reads the next value with no range restriction beyond `u64`.
    pub fn read_any(&mut self) -> Result<u64> {
        let token = self.tokens.next().ok_or(StreamRngError::TruncatedState {
            expected: self.expected,
            found: self.position,
        })?;
        let value = token
            .parse::<u64>()
            .map_err(|_| StreamRngError::MalformedToken {
                position: self.position,
                token: token.to_string(),
            })?;
        self.position += 1;
        Ok(value)
    }

    /// Confirms the text holds nothing after the last expected value.
    ///
    /// # Errors
    /// Returns [`StreamRngError::TrailingData`] if another token follows.
    pub fn finish(mut self) -> Result<()> {
        if self.tokens.next().is_some() {
            return Err(StreamRngError::TrailingData {
                expected: self.expected,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_decimal_basic() {
        assert_eq!(write_decimal([1u64, 22, 333]), "1 22 333");
    }

    #[test]
    fn test_write_decimal_empty() {
        assert_eq!(write_decimal(std::iter::empty()), "");
    }

    #[test]
    fn test_read_values_in_order() {
        let mut reader = StateReader::new("  7 0\n\t255 ", 3);
        assert_eq!(reader.read_below(8).unwrap(), 7);
        assert_eq!(reader.read_below(8).unwrap(), 0);
        assert_eq!(reader.read_any().unwrap(), 255);
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_read_out_of_range() {
        let mut reader = StateReader::new("3 8", 2);
        assert_eq!(reader.read_below(8).unwrap(), 3);
        assert_eq!(
            reader.read_below(8),
            Err(StreamRngError::ValueOutOfRange {
                position: 1,
                value: 8,
                limit: 8,
            })
        );
    }

    #[test]
    fn test_read_truncated() {
        let mut reader = StateReader::new("1", 4);
        reader.read_any().unwrap();
        assert_eq!(
            reader.read_any(),
            Err(StreamRngError::TruncatedState {
                expected: 4,
                found: 1,
            })
        );
    }

    #[test]
    fn test_read_malformed() {
        let mut reader = StateReader::new("-1", 1);
        assert_eq!(
            reader.read_any(),
            Err(StreamRngError::MalformedToken {
                position: 0,
                token: "-1".to_string(),
            })
        );
    }

    #[test]
    fn test_trailing_data() {
        let mut reader = StateReader::new("1 2", 1);
        reader.read_any().unwrap();
        assert_eq!(
            reader.finish(),
            Err(StreamRngError::TrailingData { expected: 1 })
        );
    }

    #[test]
    fn test_roundtrip_through_text() {
        let values = [0u64, 1, u64::MAX, 42];
        let text = write_decimal(values);
        let mut reader = StateReader::new(&text, values.len());
        for &value in &values {
            assert_eq!(reader.read_any().unwrap(), value);
        }
        assert!(reader.finish().is_ok());
    }
}
