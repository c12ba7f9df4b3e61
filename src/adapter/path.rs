// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Path expressions evaluated against stored objects.
//!
//! Supported forms, optionally wrapped in `{...}`:
//! `.status.phase`, `metadata.name`, `.status.conditions[0].type`,
//! `.metadata.labels['app.kubernetes.io/name']` and
//! `.status.conditions[?(@.type=="Ready")].status`.
//! A filter selects the first array element whose field matches.

use crate::error::{AdapterError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
    Filter { field: Vec<String>, value: String },
}

/// A parsed path; construction fails on syntax it cannot evaluate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JsonPath {
    text: String,
    segments: Vec<Segment>,
}

impl JsonPath {
    pub fn parse(text: &str) -> Result<Self> {
        let segments = Parser::new(text).parse().map_err(|reason| {
            AdapterError::Config(format!("invalid wait path '{}': {}", text, reason))
        })?;
        Ok(Self {
            text: text.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn evaluate<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        let mut current = value;
        for segment in &self.segments {
            current = match segment {
                Segment::Key(key) => current.as_object()?.get(key)?,
                Segment::Index(index) => current.as_array()?.get(*index)?,
                Segment::Filter { field, value } => current.as_array()?.iter().find(|item| {
                    lookup(item, field).is_some_and(|found| render_value(found) == *value)
                })?,
            };
        }
        Some(current)
    }
}

fn lookup<'a>(value: &'a Value, keys: &[String]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(value, |current, key| current.as_object()?.get(key))
}

/// Text form of a scalar as compared against expected values
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for JsonPath {
    type Error = AdapterError;

    fn try_from(value: String) -> Result<Self> {
        JsonPath::parse(&value)
    }
}

impl From<JsonPath> for String {
    fn from(value: JsonPath) -> Self {
        value.text
    }
}

impl PartialEq<&str> for JsonPath {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

type ParseResult<T> = std::result::Result<T, String>;

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.trim().chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> ParseResult<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(match self.peek() {
                Some(c) => format!("expected '{}' at position {}, found '{}'", expected, self.pos, c),
                None => format!("expected '{}' at end of path", expected),
            })
        }
    }

    fn parse(mut self) -> ParseResult<Vec<Segment>> {
        if self.chars.first() == Some(&'{') {
            if self.chars.last() != Some(&'}') {
                return Err("unbalanced '{'".to_string());
            }
            self.chars.remove(0);
            self.chars.pop();
            let inner: String = self.chars.iter().collect();
            self.chars = inner.trim().chars().collect();
        }

        let mut segments = Vec::new();
        if self.chars.is_empty() || self.chars == ['.'] {
            return Ok(segments);
        }

        self.eat('.');
        if self.peek() != Some('[') {
            segments.push(Segment::Key(self.key()?));
        }

        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.pos += 1;
                    segments.push(Segment::Key(self.key()?));
                }
                '[' => {
                    self.pos += 1;
                    segments.push(self.bracket()?);
                }
                other => return Err(format!("unexpected '{}' at position {}", other, self.pos)),
            }
        }
        Ok(segments)
    }

    fn key(&mut self) -> ParseResult<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '.' | '[' | ']' | '{' | '}' | '(' | ')' | '@' | '?' | '*' | '\'' | '"' | '=') {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(format!("empty key at position {}", start));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn quoted(&mut self) -> ParseResult<String> {
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(format!("expected quoted string at position {}", self.pos)),
        };
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let text = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(text);
            }
            self.pos += 1;
        }
        Err("unterminated string".to_string())
    }

    fn bracket(&mut self) -> ParseResult<Segment> {
        let segment = match self.peek() {
            Some('\'' | '"') => Segment::Key(self.quoted()?),
            Some('?') => {
                self.pos += 1;
                self.filter()?
            }
            Some(c) if c.is_ascii_digit() => {
                let start = self.pos;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
                let digits: String = self.chars[start..self.pos].iter().collect();
                Segment::Index(digits.parse().map_err(|_| format!("index {} out of range", digits))?)
            }
            Some(c) => return Err(format!("unsupported selector '{}' at position {}", c, self.pos)),
            None => return Err("unterminated '['".to_string()),
        };
        self.expect(']')?;
        Ok(segment)
    }

    /// `(@.field.path=="value")`, the leading `?` already consumed
    fn filter(&mut self) -> ParseResult<Segment> {
        self.expect('(')?;
        self.expect('@')?;
        let mut field = Vec::new();
        while self.eat('.') {
            field.push(self.key()?);
        }
        if field.is_empty() {
            return Err("filter needs a field, e.g. ?(@.type==\"Ready\")".to_string());
        }
        self.expect('=')?;
        self.expect('=')?;
        let value = self.quoted()?;
        self.expect(')')?;
        Ok(Segment::Filter { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object() -> Value {
        json!({
            "metadata": {
                "name": "default-ipv4",
                "labels": {"app.kubernetes.io/name": "calico"}
            },
            "spec": {"allowedUses": ["Workload", "Tunnel"]},
            "status": {
                "conditions": [
                    {"type": "Synced", "status": "False"},
                    {"type": "Ready", "status": "True"}
                ]
            },
            "matrix": [[1, 2], [3, 4]]
        })
    }

    fn eval(path: &str) -> Option<Value> {
        JsonPath::parse(path).unwrap().evaluate(&object()).cloned()
    }

    #[test]
    fn test_dotted_and_indexed_forms() {
        assert_eq!(eval(".metadata.name"), Some(json!("default-ipv4")));
        assert_eq!(eval("metadata.name"), Some(json!("default-ipv4")));
        assert_eq!(eval("{.spec.allowedUses[1]}"), Some(json!("Tunnel")));
        assert_eq!(eval(".status.conditions[0].type"), Some(json!("Synced")));
        assert_eq!(eval(".matrix[1][0]"), Some(json!(3)));
        assert_eq!(eval(".status.conditions[3]"), None);
        assert_eq!(eval(".spec.missing"), None);
        assert_eq!(eval(".metadata.name[0]"), None);
        assert_eq!(eval("{}"), Some(object()));
    }

    #[test]
    fn test_quoted_key_with_dots() {
        assert_eq!(
            eval(".metadata.labels['app.kubernetes.io/name']"),
            Some(json!("calico"))
        );
        assert_eq!(
            eval(r#"{.metadata.labels["app.kubernetes.io/name"]}"#),
            Some(json!("calico"))
        );
    }

    #[test]
    fn test_filter_selects_matching_element() {
        assert_eq!(
            eval(r#"{.status.conditions[?(@.type=="Ready")].status}"#),
            Some(json!("True"))
        );
        assert_eq!(
            eval(".status.conditions[?(@.type=='Synced')].status"),
            Some(json!("False"))
        );
        assert_eq!(eval(r#".status.conditions[?(@.type=="Stalled")]"#), None);
    }

    #[test]
    fn test_malformed_paths_are_rejected() {
        for path in [
            ".status.conditions[x",
            ".status.conditions[x]",
            ".status.conditions[0",
            ".status..phase",
            ".status.",
            "{.status.phase",
            ".status.conditions[*].type",
            ".metadata.labels['app",
            r#".status.conditions[?(@.type="Ready")]"#,
            ".status.conditions[?(@==\"Ready\")]",
        ] {
            let err = JsonPath::parse(path).unwrap_err();
            assert!(matches!(err, AdapterError::Config(_)), "accepted {}", path);
        }
    }

    #[test]
    fn test_keeps_original_text() {
        let path = JsonPath::parse("{.status.phase}").unwrap();
        assert_eq!(path.to_string(), "{.status.phase}");
        assert_eq!(path, "{.status.phase}");
    }
}
