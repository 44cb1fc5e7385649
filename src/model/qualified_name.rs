//! Dotted qualified names.
//!
//! A [`QualifiedName`] is the identity of a package, class, or member as a
//! non-empty sequence of dot-separated segments (`flash.utils.Dictionary`).
//! A trailing type-argument suffix (`Vector.<int>`) stays attached to the
//! segment it instantiates and never starts a segment of its own; it is also
//! ignored when two names are compared for binding purposes, so
//! `Vector.<int>` and `Vector.<String>` name the same namespace shape.

use std::fmt;

use smol_str::SmolStr;

/// A non-empty, dot-separated qualified name.
///
/// Derived equality and hashing are exact (the type-argument suffix
/// counts); use [`QualifiedName::equivalent_to`] for suffix-insensitive
/// comparison.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    segments: Vec<SmolStr>,
}

impl QualifiedName {
    /// Create a single-segment name.
    pub fn new(segment: impl Into<SmolStr>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// Parse a dotted name, keeping type-argument suffixes (`.<...>`)
    /// attached to the segment before them.
    ///
    /// Returns `None` for empty input, empty segments (`a..b`), or
    /// segments whose base name is not identifier-shaped.
    pub fn from_dotted(text: &str) -> Option<Self> {
        let mut segments = Vec::new();
        let mut start = 0usize;
        let mut depth = 0usize;

        for (i, c) in text.char_indices() {
            match c {
                '<' => depth += 1,
                '>' => depth = depth.saturating_sub(1),
                '.' if depth == 0 => {
                    // `Foo.<Bar>`: the dot introduces a suffix, not a segment
                    if text[i + 1..].starts_with('<') {
                        continue;
                    }
                    if i == start {
                        return None;
                    }
                    segments.push(SmolStr::new(&text[start..i]));
                    start = i + 1;
                }
                _ => {}
            }
        }

        if start >= text.len() {
            return None;
        }
        segments.push(SmolStr::new(&text[start..]));

        if segments.iter().any(|s| !is_identifier(base_name(s))) {
            return None;
        }
        Some(Self { segments })
    }

    /// The segments, outermost first.
    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// The final (simple) segment, including any type-argument suffix.
    pub fn name(&self) -> &SmolStr {
        self.segments.last().expect("qualified names are non-empty")
    }

    /// The final segment without its type-argument suffix.
    pub fn base_name(&self) -> &str {
        base_name(self.name())
    }

    /// The name with the final segment removed, or `None` for a
    /// single-segment name.
    pub fn parent(&self) -> Option<QualifiedName> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Append a segment.
    pub fn child(&self, segment: impl Into<SmolStr>) -> QualifiedName {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is a single-segment (top-level) name.
    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 1
    }

    /// Componentwise comparison up the whole chain, ignoring
    /// type-argument suffixes on each segment.
    pub fn equivalent_to(&self, other: &QualifiedName) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(a, b)| base_name(a) == base_name(b))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Strip the type-argument suffix from a segment: `Vector.<int>` -> `Vector`.
pub(crate) fn base_name(segment: &str) -> &str {
    match segment.split_once(".<") {
        Some((base, _)) => base,
        None => segment,
    }
}

/// Identifier shape check for a segment's base name. The source language
/// allows Unicode identifiers plus `$` and `_`.
fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(unicode_ident::is_xid_start(first) || first == '_' || first == '$') {
        return false;
    }
    chars.all(|c| unicode_ident::is_xid_continue(c) || c == '$')
}
