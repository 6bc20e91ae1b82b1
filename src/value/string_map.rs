//! Flat `key1=value1;key2=value2` string maps
//!
//! Syntax:
//! - entries are separated by `;`, key and value by the first `=`
//! - `\` escapes the next character (`\;`, `\=`, `\\`, `\"`, `\'`)
//! - a key or value may be wrapped in `"` or `'`; inside quotes `;` and `=`
//!   are literal and a doubled quote stands for one quote character
//! - an entry without `=` maps its key to null; empty entries are skipped
//! - whitespace around unquoted keys and values is trimmed
//!
//! All parsed values are strings.

use std::iter::Peekable;
use std::str::CharIndices;

use super::errors::{ValueError, ValueResult};
use super::types::{Value, ValueMap};

/// Parser and formatter for flat string maps.
pub struct StringValueMap;

struct Cursor<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices().peekable(),
            len: text.len(),
        }
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map(|(i, _)| *i).unwrap_or(self.len)
    }

    fn at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    /// Reads one token up to an unescaped, unquoted stop character.
    /// Returns the token and the stop character consumed, if any.
    fn read_token(&mut self, stops: &[char]) -> ValueResult<(String, Option<char>)> {
        self.skip_whitespace();
        match self.chars.peek() {
            Some((_, q)) if *q == '"' || *q == '\'' => {
                let quote = *q;
                self.read_quoted(quote, stops)
            }
            _ => self.read_plain(stops),
        }
    }

    fn read_quoted(&mut self, quote: char, stops: &[char]) -> ValueResult<(String, Option<char>)> {
        let start = self.offset();
        self.chars.next();
        let mut text = String::new();
        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => {
                    if matches!(self.chars.peek(), Some((_, next)) if *next == quote) {
                        self.chars.next();
                        text.push(quote);
                    } else {
                        break;
                    }
                }
                Some((_, c)) => text.push(c),
                None => {
                    return Err(ValueError::InvalidStringMap {
                        offset: start,
                        reason: "unterminated quote".into(),
                    })
                }
            }
        }

        self.skip_whitespace();
        let offset = self.offset();
        match self.chars.next() {
            None => Ok((text, None)),
            Some((_, c)) if stops.contains(&c) => Ok((text, Some(c))),
            Some((_, c)) => Err(ValueError::InvalidStringMap {
                offset,
                reason: format!("unexpected '{}' after closing quote", c),
            }),
        }
    }

    fn read_plain(&mut self, stops: &[char]) -> ValueResult<(String, Option<char>)> {
        let mut text = String::new();
        while let Some((offset, c)) = self.chars.next() {
            if c == '\\' {
                match self.chars.next() {
                    Some((_, escaped)) => text.push(escaped),
                    None => {
                        return Err(ValueError::InvalidStringMap {
                            offset,
                            reason: "dangling escape".into(),
                        })
                    }
                }
            } else if stops.contains(&c) {
                return Ok((text.trim_end().to_string(), Some(c)));
            } else {
                text.push(c);
            }
        }
        Ok((text.trim_end().to_string(), None))
    }
}

/// Writes a key or value so the parser reads it back unchanged. Empty or
/// whitespace-padded text is double-quoted.
fn write_token(text: &str, out: &mut String) {
    let padded = text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace);
    if text.is_empty() || padded {
        out.push('"');
        for c in text.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
        return;
    }
    for c in text.chars() {
        if matches!(c, '\\' | ';' | '=' | '"' | '\'') {
            out.push('\\');
        }
        out.push(c);
    }
}

impl StringValueMap {
    /// Parses a flat string map.
    ///
    /// # Errors
    ///
    /// `InvalidStringMap` for unterminated quotes, dangling escapes,
    /// garbage after a closing quote, or an empty key before `=`.
    pub fn parse(text: &str) -> ValueResult<ValueMap> {
        let mut map = ValueMap::new();
        let mut cursor = Cursor::new(text);

        while !cursor.at_end() {
            let key_offset = cursor.offset();
            let (key, stop) = cursor.read_token(&[';', '='])?;
            match stop {
                Some('=') => {
                    if key.is_empty() {
                        return Err(ValueError::InvalidStringMap {
                            offset: key_offset,
                            reason: "empty key".into(),
                        });
                    }
                    let (value, _) = cursor.read_token(&[';'])?;
                    map.insert(key, Value::String(value));
                }
                _ => {
                    if !key.is_empty() {
                        map.insert(key, Value::Null);
                    }
                }
            }
        }

        Ok(map)
    }

    /// Formats a map so that [`StringValueMap::parse`] restores it, with
    /// non-string scalars in their stringified form. An empty key has no
    /// parseable form.
    pub fn format(map: &ValueMap) -> String {
        let mut out = String::new();
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            write_token(key, &mut out);
            if !value.is_null() {
                out.push('=');
                write_token(&value.to_string(), &mut out);
            }
        }
        out
    }
}

impl Value {
    /// Parses `key1=value1;key2=value2` into a map value.
    pub fn from_string_map(text: &str) -> ValueResult<Value> {
        StringValueMap::parse(text).map(Value::Map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let map = StringValueMap::parse("host=localhost; port = 8080;debug").unwrap();
        assert_eq!(map["host"], Value::from("localhost"));
        assert_eq!(map["port"], Value::from("8080"));
        assert_eq!(map["debug"], Value::Null);
    }

    #[test]
    fn test_parse_escapes_and_quotes() {
        let map = StringValueMap::parse(r#"a\=b=1\;2;q="x;y=z";s='it''s'"#).unwrap();
        assert_eq!(map["a=b"], Value::from("1;2"));
        assert_eq!(map["q"], Value::from("x;y=z"));
        assert_eq!(map["s"], Value::from("it's"));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let map = StringValueMap::parse("expr=a=b").unwrap();
        assert_eq!(map["expr"], Value::from("a=b"));
    }

    #[test]
    fn test_empty_entries_skipped() {
        let map = StringValueMap::parse(";;a=1;;").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], Value::from("1"));
        assert!(StringValueMap::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_empty_value() {
        let map = StringValueMap::parse("a=").unwrap();
        assert_eq!(map["a"], Value::from(""));
    }

    #[test]
    fn test_errors() {
        assert!(StringValueMap::parse("a=\"open").is_err());
        assert!(StringValueMap::parse("a=1\\").is_err());
        assert!(StringValueMap::parse("a=\"x\"y").is_err());
        assert!(StringValueMap::parse("=1").is_err());
    }

    #[test]
    fn test_format_round_trip() {
        let map = StringValueMap::parse(r#"k=v;odd\;key="a=b";none"#).unwrap();
        let text = StringValueMap::format(&map);
        assert_eq!(StringValueMap::parse(&text).unwrap(), map);
    }

    #[test]
    fn test_format_keeps_padding_and_empty_values() {
        let map = Value::from_pairs([
            ("k", "  padded "),
            (" lead", "x"),
            ("empty", ""),
            ("quoted", " say \"hi\"; a=b "),
        ]);
        let Value::Map(map) = map else {
            panic!("expected a map");
        };

        let text = StringValueMap::format(&map);
        assert!(text.contains(r#"k="  padded ""#));
        assert_eq!(StringValueMap::parse(&text).unwrap(), map);
    }

    #[test]
    fn test_from_string_map() {
        let value = Value::from_string_map("a=1").unwrap();
        assert_eq!(value, Value::from_pairs([("a", "1")]));
    }
}
