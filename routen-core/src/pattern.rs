//! Path pattern compilation and matching.
//!
//! A pattern string compiles once into an anchored regex over the request
//! path. Segment grammar:
//!
//! - `literal`: matched verbatim
//! - `:name`: captures exactly one segment
//! - `:name?`: optional single segment
//! - `:name+`: one or more segments, captured joined by `/`
//! - `:name*`: zero or more segments, joined by `/`
//! - `:name(\d+)`: capture constrained by an inline regex; modifiers compose
//! - `*` / `**`: one segment / zero-or-more segments, uncaptured
//! - `(regex)`: uncaptured inline regex segment (`(.*)` crosses separators)
//!
//! Matching is segment-granular and exact: trailing slashes are not
//! absorbed, so `/hello/:name` does not match `/hello/ray/`.

use crate::error::PatternError;
use crate::params::Params;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

/// A compiled route pattern.
///
/// Compilation is deterministic: the same source string always produces a
/// matcher that agrees with any other compile of that string on every input.
#[derive(Debug)]
pub struct PathPattern {
    source: Box<str>,
    regex: Regex,
}

impl PathPattern {
    /// Compile `source` into a reusable matcher.
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(&translate(source)?)?;
        Ok(Self {
            source: source.into(),
            regex,
        })
    }

    /// The pattern string this matcher was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Match a request path, extracting captures.
    ///
    /// `None` means no match (a structural mismatch, a failed modifier, or
    /// a failed inline regex). It is a plain value, never an error.
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let captures = self.regex.captures(path)?;
        let mut params = Params::new();
        for name in self.regex.capture_names().flatten() {
            params.insert(name, captures.name(name).map(|m| m.as_str().to_owned()));
        }
        Some(params)
    }
}

/// A compilation cache keyed by pattern source string.
///
/// The same string always yields the same compiled instance (`Arc`-shared),
/// so two routes registered with one pattern reuse one matcher. The set is
/// filled while the route table is built and read-only afterwards.
#[derive(Debug, Default)]
pub struct PatternSet {
    cache: HashMap<Box<str>, Arc<PathPattern>>,
}

impl PatternSet {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `source`, reusing a previously compiled instance if present.
    pub fn compile(&mut self, source: &str) -> Result<Arc<PathPattern>, PatternError> {
        if let Some(pattern) = self.cache.get(source) {
            return Ok(Arc::clone(pattern));
        }
        let pattern = Arc::new(PathPattern::compile(source)?);
        self.cache.insert(source.into(), Arc::clone(&pattern));
        Ok(pattern)
    }

    /// Number of distinct patterns compiled.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn translate(source: &str) -> Result<String, PatternError> {
    let trimmed = source.strip_prefix('/').unwrap_or(source);
    let mut out = String::with_capacity(source.len() * 2 + 2);
    out.push('^');
    if trimmed.is_empty() {
        // "/" (or "") matches only the root path.
        out.push('/');
    } else {
        for segment in trimmed.split('/') {
            translate_segment(segment, &mut out)?;
        }
    }
    out.push('$');
    Ok(out)
}

fn translate_segment(segment: &str, out: &mut String) -> Result<(), PatternError> {
    if segment == "*" {
        out.push_str("/[^/]+");
        return Ok(());
    }
    if segment == "**" {
        out.push_str("(?:/.*)?");
        return Ok(());
    }
    if let Some(rest) = segment.strip_prefix(':') {
        return translate_capture(segment, rest, out);
    }
    if segment.starts_with('(') {
        let (inner, tail) = take_group(segment, segment)?;
        let unit = format!("(?:{inner})");
        emit(out, &unit, None, parse_modifier(segment, tail)?);
        return Ok(());
    }
    out.push('/');
    out.push_str(&regex::escape(segment));
    Ok(())
}

fn translate_capture(segment: &str, rest: &str, out: &mut String) -> Result<(), PatternError> {
    let name_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    let (name, tail) = rest.split_at(name_len);
    if name.is_empty() || name.as_bytes()[0].is_ascii_digit() {
        return Err(PatternError::InvalidName(segment.to_owned()));
    }

    let (unit, tail) = if tail.starts_with('(') {
        let (inner, after) = take_group(tail, segment)?;
        (format!("(?:{inner})"), after)
    } else {
        ("[^/]+".to_owned(), tail)
    };

    emit(out, &unit, Some(name), parse_modifier(segment, tail)?);
    Ok(())
}

/// Append the regex piece for one segment: `unit` matches a single
/// segment's worth of path, `name` wraps it in a named group, and the
/// modifier governs repetition and optionality. Each piece carries its own
/// leading `/` so that optional forms absorb the separator too.
fn emit(out: &mut String, unit: &str, name: Option<&str>, modifier: Option<u8>) {
    let captured = match name {
        Some(name) => match modifier {
            Some(b'+') | Some(b'*') => format!("(?P<{name}>{unit}(?:/{unit})*)"),
            _ => format!("(?P<{name}>{unit})"),
        },
        None => match modifier {
            Some(b'+') | Some(b'*') => format!("{unit}(?:/{unit})*"),
            _ => unit.to_owned(),
        },
    };
    match modifier {
        Some(b'?') | Some(b'*') => {
            out.push_str("(?:/");
            out.push_str(&captured);
            out.push_str(")?");
        }
        _ => {
            out.push('/');
            out.push_str(&captured);
        }
    }
}

fn parse_modifier(segment: &str, tail: &str) -> Result<Option<u8>, PatternError> {
    match tail.as_bytes() {
        [] => Ok(None),
        [m @ (b'?' | b'+' | b'*')] => Ok(Some(*m)),
        _ => Err(PatternError::TrailingChars(segment.to_owned())),
    }
}

/// Split `s` (starting at `(`) into the group body and the remainder after
/// the matching `)`. Honors nesting and backslash escapes.
fn take_group<'a>(s: &'a str, segment: &str) -> Result<(&'a str, &'a str), PatternError> {
    let bytes = s.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&s[1..i], &s[i + 1..]));
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(PatternError::UnbalancedParen(segment.to_owned()))
}
