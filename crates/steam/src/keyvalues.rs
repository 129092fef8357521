//! Minimal parser for Valve's text KeyValues format.
//!
//! Covers the subset used by `appmanifest_*.acf` and `libraryfolders.vdf`:
//! quoted keys and values, nested `{}` blocks, `\"`/`\\`/`\n`/`\t` escapes,
//! and `//` line comments. Duplicate keys keep their first occurrence on
//! lookup.

use crate::SteamError;

/// A parsed KeyValues node: either a string or a nested object.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Obj(KeyValues),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Obj(_) => None,
        }
    }

    pub fn as_obj(&self) -> Option<&KeyValues> {
        match self {
            Value::Str(_) => None,
            Value::Obj(kv) => Some(kv),
        }
    }
}

/// An ordered list of key/value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValues(Vec<(String, Value)>);

impl KeyValues {
    /// Looks up a key, case-insensitively.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Looks up a string value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Looks up a nested object by key.
    pub fn get_obj(&self, key: &str) -> Option<&KeyValues> {
        self.get(key).and_then(Value::as_obj)
    }

    /// Iterates over all entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Parses a KeyValues document into its root object.
pub fn parse(input: &str) -> Result<KeyValues, SteamError> {
    let mut chars = input.char_indices().peekable();
    let root = parse_object_body(input, &mut chars, true)?;
    Ok(root)
}

type CharStream<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

/// Parses key/value pairs until `}` (nested) or end of input (top level).
fn parse_object_body(
    input: &str,
    chars: &mut CharStream<'_>,
    top_level: bool,
) -> Result<KeyValues, SteamError> {
    let mut entries = Vec::new();

    loop {
        skip_whitespace_and_comments(chars);

        match chars.peek().copied() {
            None => {
                if top_level {
                    return Ok(KeyValues(entries));
                }
                return Err(SteamError::Vdf("unterminated object".into()));
            }
            Some((_, '}')) => {
                if top_level {
                    return Err(SteamError::Vdf("unexpected '}' at top level".into()));
                }
                chars.next();
                return Ok(KeyValues(entries));
            }
            Some(_) => {}
        }

        let key = parse_token(input, chars)?;

        skip_whitespace_and_comments(chars);
        match chars.peek().copied() {
            Some((_, '{')) => {
                chars.next();
                let obj = parse_object_body(input, chars, false)?;
                entries.push((key, Value::Obj(obj)));
            }
            Some(_) => {
                let value = parse_token(input, chars)?;
                entries.push((key, Value::Str(value)));
            }
            None => {
                return Err(SteamError::Vdf(format!("key '{key}' has no value")));
            }
        }
    }
}

/// Parses a quoted or bare token.
fn parse_token(input: &str, chars: &mut CharStream<'_>) -> Result<String, SteamError> {
    match chars.peek().copied() {
        Some((_, '"')) => {
            chars.next();
            let mut out = String::new();
            loop {
                match chars.next() {
                    Some((_, '"')) => return Ok(out),
                    Some((_, '\\')) => match chars.next() {
                        Some((_, 'n')) => out.push('\n'),
                        Some((_, 't')) => out.push('\t'),
                        Some((_, c)) => out.push(c),
                        None => return Err(SteamError::Vdf("unterminated escape".into())),
                    },
                    Some((_, c)) => out.push(c),
                    None => return Err(SteamError::Vdf("unterminated string".into())),
                }
            }
        }
        Some((start, _)) => {
            let mut end = input.len();
            while let Some((i, c)) = chars.peek().copied() {
                if c.is_whitespace() || c == '{' || c == '}' || c == '"' {
                    end = i;
                    break;
                }
                chars.next();
            }
            if chars.peek().is_none() {
                end = input.len();
            }
            Ok(input[start..end].to_string())
        }
        None => Err(SteamError::Vdf("expected token, found end of input".into())),
    }
}

fn skip_whitespace_and_comments(chars: &mut CharStream<'_>) {
    loop {
        while let Some((_, c)) = chars.peek().copied() {
            if c.is_whitespace() {
                chars.next();
            } else {
                break;
            }
        }

        // Line comment: consume through end of line, then rescan.
        let mut lookahead = chars.clone();
        if let (Some((_, '/')), Some((_, '/'))) = (lookahead.next(), lookahead.next()) {
            for (_, c) in chars.by_ref() {
                if c == '\n' {
                    break;
                }
            }
            continue;
        }

        return;
    }
}
