//! Author avatar initials and colour.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::identity::ANONYMOUS;

/// Background colours, indexed by name hash.
pub const PALETTE: [&str; 8] = [
    "red", "orange", "yellow", "green", "blue", "indigo", "purple", "pink",
];

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Avatar {
    pub initials: String,
    pub color: String,
}

impl Avatar {
    /// Derive initials and a stable colour from a display name.
    #[must_use]
    pub fn for_name(name: &str) -> Self {
        let clean = match name.trim() {
            "" => ANONYMOUS,
            trimmed => trimmed,
        };
        Self {
            initials: initials(clean),
            color: PALETTE[palette_index(clean)].to_string(),
        }
    }
}

fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first = |word: &str| word.chars().next();
    let letters: String = match words.as_slice() {
        [] => "U".into(),
        [only] => first(*only).map_or_else(|| "U".into(), String::from),
        [head, .., tail] => first(*head).into_iter().chain(first(*tail)).collect(),
    };
    letters.to_uppercase()
}

/// 32-bit `hash * 31 + code_unit` over UTF-16 code units.
fn palette_index(name: &str) -> usize {
    let hash = name.encode_utf16().fold(0_i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    hash.unsigned_abs() as usize % PALETTE.len()
}
