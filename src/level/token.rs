//! Line tokenizer for level text
//!
//! Directive keywords match whole whitespace-separated words anywhere in a
//! line, so `model composite` names a model rather than hiding a `pos`
//! directive. The `arena` section marker matches anywhere, decorated or not
//! (`arena:`, `[arena]`, `#arena`).

use std::fmt;

use glam::Vec3;

/// Directive keywords understood by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Arena,
    Pos,
    Rot,
    Scl,
    Model,
}

impl Keyword {
    pub const ALL: [Self; 5] = [Self::Arena, Self::Pos, Self::Rot, Self::Scl, Self::Model];

    /// Section markers match as substrings, directives as whole words
    #[must_use]
    pub const fn is_section_marker(self) -> bool {
        matches!(self, Self::Arena)
    }

    /// Spelling in level text
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arena => "arena",
            Self::Pos => "pos",
            Self::Rot => "rot",
            Self::Scl => "scl",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of level text with its 1-based line number
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self { number, text }
    }

    /// Text after the first occurrence of `keyword`.
    #[must_use]
    pub fn after(&self, keyword: Keyword) -> Option<&'a str> {
        let word = keyword.as_str();
        let text = self.text;
        if keyword.is_section_marker() {
            return text.find(word).map(|start| &text[start + word.len()..]);
        }
        text.match_indices(word)
            .map(|(start, _)| (start, start + word.len()))
            .find(|&(start, end)| {
                let open = text[..start].chars().next_back().is_none_or(char::is_whitespace);
                let close = text[end..].chars().next().is_none_or(char::is_whitespace);
                open && close
            })
            .map(|(_, end)| &text[end..])
    }
}

/// Cut `text` to at most `max` bytes without splitting a character.
#[must_use]
pub fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Read up to three numbers, left to right, stopping at the first bad field.
///
/// Returns the vector (unread components are zero) and how many fields parsed.
#[must_use]
pub fn parse_vec3(text: &str) -> (Vec3, usize) {
    let mut values = [0.0_f32; 3];
    let mut parsed = 0;
    for (slot, field) in values.iter_mut().zip(text.split_whitespace()) {
        match field.parse::<f32>() {
            Ok(value) => {
                *slot = value;
                parsed += 1;
            }
            Err(_) => break,
        }
    }
    (Vec3::from_array(values), parsed)
}
