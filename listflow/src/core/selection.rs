//! Resolution of user position lists (`"1,3,5"` or `"all"`) into indices.

use std::collections::BTreeSet;

use super::error::TaskError;

/// Tasks targeted by a batch command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    /// Raw comma-separated tokens, validated by [`resolve`].
    Positions(Vec<String>),
}

impl Selection {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("todas") {
            return Selection::All;
        }
        Selection::Positions(
            trimmed
                .split(',')
                .map(|token| token.trim().to_string())
                .collect(),
        )
    }
}

/// Valid indices (0-based, deduplicated, ascending) plus one error per
/// rejected token, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub indices: BTreeSet<usize>,
    pub rejected: Vec<TaskError>,
}

/// Validate a selection against a collection of `len` tasks.
pub fn resolve(selection: &Selection, len: usize) -> Resolved {
    match selection {
        Selection::All => Resolved {
            indices: (0..len).collect(),
            rejected: Vec::new(),
        },
        Selection::Positions(tokens) => {
            let mut resolved = Resolved::default();
            for token in tokens {
                match parse_position(token, len) {
                    Ok(index) => {
                        resolved.indices.insert(index);
                    }
                    Err(err) => resolved.rejected.push(err),
                }
            }
            resolved
        }
    }
}

/// Parse a single 1-based position and return its 0-based index.
pub fn parse_position(token: &str, len: usize) -> Result<usize, TaskError> {
    let token = token.trim();
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TaskError::NotANumber {
            token: token.to_string(),
        });
    }
    // Digit-only tokens too large for i64 are out of range, not malformed.
    let position = match token.parse::<i64>() {
        Ok(position) => position,
        Err(_) if token.starts_with('-') => i64::MIN,
        Err(_) => i64::MAX,
    };
    if position < 1 || position as u64 > len as u64 {
        return Err(TaskError::NotFound { position, len });
    }
    Ok(position as usize - 1)
}
