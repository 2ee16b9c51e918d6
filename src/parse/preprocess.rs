use std::collections::TryReserveError;

use thiserror::Error;

pub const REDIRECT: u8 = b'>';
pub const PARALLEL: u8 = b'&';

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("failed to allocate normalized line: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Normalizes a raw line so it can be tokenized on whitespace alone.
///
/// Tabs become spaces, and every `>` or `&` gets a single space on each side
/// unless one is already there. Every other byte is copied through untouched.
pub fn preprocess(line: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let mut out = Vec::new();
    out.try_reserve(line.len().saturating_mul(2))?;

    let mut bytes = line.iter().copied().peekable();

    while let Some(b) = bytes.next() {
        match b {
            b'\t' => out.push(b' '),
            REDIRECT | PARALLEL => {
                if out.last().is_some_and(|prev| *prev != b' ') {
                    out.push(b' ');
                }
                out.push(b);
                if matches!(bytes.peek(), Some(next) if *next != b' ' && *next != b'\t') {
                    out.push(b' ');
                }
            }
            b => out.push(b),
        }
    }

    Ok(out)
}
