//! Compound selectors.
//!
//! Supports a single compound selector: an optional tag name followed by any
//! number of `.class`, `[attr]` and `[attr=value]` parts. Combinators and
//! pseudo-classes are rejected.

use std::str::FromStr;

use crate::DomError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Class(String),
    Has(String),
    Equals(String, String),
}

/// A parsed compound selector, e.g. `button[disabled]` or `ul.results`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    parts: Vec<Part>,
}

impl Selector {
    /// Parse a selector.
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let invalid = || DomError::InvalidSelector(input.to_string());
        let input_trimmed = input.trim();
        if input_trimmed.is_empty() {
            return Err(invalid());
        }

        let mut rest = input_trimmed;
        let tag_len = rest.find(['.', '[']).unwrap_or(rest.len());
        let tag = &rest[..tag_len];
        if !tag.is_empty() && !is_ident(tag) {
            return Err(invalid());
        }
        rest = &rest[tag_len..];

        let mut parts = Vec::new();
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('.') {
                let len = after.find(['.', '[']).unwrap_or(after.len());
                let class = &after[..len];
                if !is_ident(class) {
                    return Err(invalid());
                }
                parts.push(Part::Class(class.to_string()));
                rest = &after[len..];
            } else if let Some(after) = rest.strip_prefix('[') {
                let end = after.find(']').ok_or_else(invalid)?;
                let body = &after[..end];
                match body.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim_matches(|c| c == '"' || c == '\'');
                        if !is_ident(name) {
                            return Err(invalid());
                        }
                        parts.push(Part::Equals(name.to_string(), value.to_string()));
                    }
                    None => {
                        if !is_ident(body) {
                            return Err(invalid());
                        }
                        parts.push(Part::Has(body.to_string()));
                    }
                }
                rest = &after[end + 1..];
            } else {
                return Err(invalid());
            }
        }

        Ok(Self {
            tag: (!tag.is_empty()).then(|| tag.to_ascii_lowercase()),
            parts,
        })
    }

    /// Check an element's tag and attributes against this selector.
    pub fn matches(&self, tag: &str, attrs: &[(String, String)]) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        let attr = |name: &str| {
            attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        };

        self.parts.iter().all(|part| match part {
            Part::Class(class) => attr("class")
                .map(|classes| classes.split_whitespace().any(|c| c == class))
                .unwrap_or(false),
            Part::Has(name) => attr(name).is_some(),
            Part::Equals(name, value) => attr(name) == Some(value.as_str()),
        })
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
