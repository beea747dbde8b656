//! Stream input: `n W` followed by `n` whitespace-separated integers.

use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing header: expected stream length and window size")]
    MissingHeader,

    #[error("token {position} is not a valid integer: {token:?}")]
    InvalidToken { position: usize, token: String },

    #[error("expected {expected} values, got {got}")]
    Truncated { expected: usize, got: usize },

    #[error("window size {window_size} must be between 1 and the stream length {len}")]
    InvalidWindow { window_size: usize, len: usize },
}

/// Parsed input: window size and the stream it slides over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stream {
    pub window_size: usize,
    pub values: Vec<i64>,
}

/// Read the whole input from `path`, or from stdin when `None`.
pub fn read_input(path: Option<&Path>) -> Result<String, InputError> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };

    debug!(bytes = text.len(), "input read");
    Ok(text)
}

pub fn parse_stream(text: &str) -> Result<Stream, InputError> {
    // 1-based token positions for error messages.
    let mut tokens = text.split_whitespace().enumerate().map(|(i, t)| (i + 1, t));

    let (Some(n), Some(w)) = (tokens.next(), tokens.next()) else {
        return Err(InputError::MissingHeader);
    };
    let len: usize = parse_token(n)?;
    let window_size: usize = parse_token(w)?;

    if window_size == 0 || window_size > len {
        return Err(InputError::InvalidWindow { window_size, len });
    }

    let values = tokens
        .by_ref()
        .take(len)
        .map(parse_token)
        .collect::<Result<Vec<i64>, _>>()?;

    if values.len() < len {
        return Err(InputError::Truncated {
            expected: len,
            got: values.len(),
        });
    }

    let extra = tokens.count();
    if extra > 0 {
        warn!(extra, "ignoring trailing tokens after the stream");
    }

    Ok(Stream {
        window_size,
        values,
    })
}

fn parse_token<T: std::str::FromStr>((position, token): (usize, &str)) -> Result<T, InputError> {
    token.parse().map_err(|_| InputError::InvalidToken {
        position,
        token: token.to_string(),
    })
}
