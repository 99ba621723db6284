//! Best-effort recovery of a typed JSON value from free-form model output.
//!
//! Models asked for JSON often wrap it in prose, markdown fences or an extra
//! array. We first try the whole text as `T`, then the first balanced
//! `{ ... }` inside it.

use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq)]
pub enum JsonExtraction<T> {
    /// The whole text parsed as `T`.
    Parsed(T),
    /// A `T` was found embedded in surrounding text.
    Extracted(T),
    Failed { reason: String },
}

impl<T> JsonExtraction<T> {
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Parsed(value) | Self::Extracted(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }
}

pub fn extract_json<T: DeserializeOwned>(text: &str) -> JsonExtraction<T> {
    let strict_err = match serde_json::from_str::<T>(text.trim()) {
        Ok(value) => return JsonExtraction::Parsed(value),
        Err(e) => e,
    };

    let Some(candidate) = first_balanced_object(text) else {
        return JsonExtraction::Failed {
            reason: format!("not the expected JSON ({strict_err}) and no object found in text"),
        };
    };

    match serde_json::from_str::<T>(candidate) {
        Ok(value) => JsonExtraction::Extracted(value),
        Err(e) => JsonExtraction::Failed {
            reason: format!("embedded object is not the expected JSON: {e}"),
        },
    }
}

/// Slice of `text` from the first `{` to the brace that closes it.
///
/// Braces inside string literals are ignored. Returns `None` when the opening
/// brace is never closed.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}
