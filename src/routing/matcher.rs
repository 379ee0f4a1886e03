//! Path pattern matching.
//!
//! # Responsibilities
//! - Normalize a requested path (query, fragment, trailing slash)
//! - Percent-decode request segments before comparing them
//! - Match literal paths exactly (case-sensitive)
//! - Match patterns with one positional parameter and capture its segment
//! - Report how specific a pattern is so literal paths outrank parameters
//!
//! # Design Decisions
//! - No regex: segment-by-segment comparison, O(segments)
//! - Empty parameter segments never match
//! - Decoding is per segment, so an encoded `/` never splits a segment
//! - A segment that does not decode to UTF-8 matches nothing
//! - Specificity is part of the matcher, not of declaration order

use std::fmt;

use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Trait for matching request paths against a route pattern.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns the match if `path` fits this pattern.
    fn match_path(&self, path: &RequestPath) -> Option<PathMatch>;

    /// Precedence of this pattern; higher wins when several match.
    fn specificity(&self) -> Specificity;

    /// The pattern as declared.
    fn pattern(&self) -> &str;
}

/// A requested path, normalized and split into decoded segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    segments: Vec<String>,
}

/// A request segment that is not valid percent-encoded UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("path segment {0:?} does not decode to UTF-8")]
pub struct InvalidPathEncoding(pub String);

impl RequestPath {
    pub fn parse(raw: &str) -> Result<Self, InvalidPathEncoding> {
        let normalized = normalize_path(raw);
        let segments = split_segments(&normalized)
            .map(|segment| {
                percent_decode_str(segment)
                    .decode_utf8()
                    .map(|decoded| decoded.into_owned())
                    .map_err(|_| InvalidPathEncoding(segment.to_string()))
            })
            .collect::<Result<Vec<_>, InvalidPathEncoding>>()?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathMatch {
    /// Captured positional parameter, if the pattern has one.
    pub param: Option<(String, String)>,
}

impl PathMatch {
    /// Value captured for the parameter named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.param
            .as_ref()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Match precedence. Literal patterns always outrank parameterized ones;
/// within a class, more static segments outrank fewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    literal: bool,
    static_segments: usize,
}

impl Specificity {
    pub fn is_literal(&self) -> bool {
        self.literal
    }
}

/// Pattern compilation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern {0:?} must start with '/'")]
    NotAbsolute(String),

    #[error("pattern {0:?} declares more than one parameter")]
    MultipleParams(String),

    #[error("pattern {0:?} has an unnamed parameter")]
    UnnamedParam(String),
}

/// Matches one exact path.
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    path: String,
    segments: Vec<String>,
}

impl LiteralMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        let path = normalize_path(&path.into());
        let segments = split_segments(&path).map(str::to_owned).collect();
        Self { path, segments }
    }
}

impl Matcher for LiteralMatcher {
    fn match_path(&self, path: &RequestPath) -> Option<PathMatch> {
        (path.segments() == self.segments.as_slice()).then(PathMatch::default)
    }

    fn specificity(&self) -> Specificity {
        Specificity {
            literal: true,
            static_segments: self.segments.len(),
        }
    }

    fn pattern(&self) -> &str {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// Matches a pattern with exactly one `:name` segment.
#[derive(Debug, Clone)]
pub struct ParamMatcher {
    pattern: String,
    segments: Vec<Segment>,
}

impl ParamMatcher {
    fn static_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Static(_)))
            .count()
    }

    /// Name of the positional parameter.
    pub fn param_name(&self) -> &str {
        self.segments
            .iter()
            .find_map(|s| match s {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Static(_) => None,
            })
            .unwrap_or_default()
    }
}

impl Matcher for ParamMatcher {
    fn match_path(&self, path: &RequestPath) -> Option<PathMatch> {
        let mut requested = path.segments().iter();
        let mut captured = None;

        for segment in &self.segments {
            let part = requested.next()?;
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(_) if part.is_empty() => return None,
                Segment::Param(name) => captured = Some((name.clone(), part.clone())),
            }
        }

        if requested.next().is_some() {
            return None;
        }
        Some(PathMatch { param: captured })
    }

    fn specificity(&self) -> Specificity {
        Specificity {
            literal: false,
            static_segments: self.static_count(),
        }
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Compile a route pattern into its matcher.
pub fn compile(pattern: &str) -> Result<Box<dyn Matcher>, PatternError> {
    if !pattern.starts_with('/') {
        return Err(PatternError::NotAbsolute(pattern.to_string()));
    }
    let normalized = normalize_path(pattern);

    let segments: Vec<Segment> = split_segments(&normalized)
        .map(|s| match s.strip_prefix(':') {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Static(s.to_string()),
        })
        .collect();

    let params: Vec<&str> = segments
        .iter()
        .filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
        .collect();

    match params.as_slice() {
        [] => Ok(Box::new(LiteralMatcher::new(normalized))),
        [name] if name.is_empty() => Err(PatternError::UnnamedParam(pattern.to_string())),
        [_] => Ok(Box::new(ParamMatcher {
            pattern: normalized,
            segments,
        })),
        _ => Err(PatternError::MultipleParams(pattern.to_string())),
    }
}

/// Normalize a requested path before matching.
///
/// Drops the query string and fragment, guarantees a leading `/` and removes
/// one trailing `/` (the root path stays `/`).
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = &raw[..end];

    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let root = trimmed.is_empty();
    trimmed.split('/').filter(move |_| !root)
}
