//! Segment paths and the tokenizer for user-typed path arguments.
//!
//! Nodes keep no parent pointer, so `..` is applied by truncating the
//! segment sequence rather than by walking the tree upwards. Resolution
//! against actual nodes lives in [`crate::tree::MemoryTree::resolve`].

use std::fmt;

/// A location in the tree as the sequence of names from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<String>,
}

/// One `/`-separated piece of a path token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Parent,
    Current,
    Child(&'a str),
}

impl<'a> Step<'a> {
    fn parse(part: &'a str) -> Self {
        match part {
            ".." => Self::Parent,
            "." | "" => Self::Current,
            name => Self::Child(name),
        }
    }
}

/// Splits a path token into its anchor and steps. The anchor is true when
/// the token starts from the root (`/`, `~`, `/x`, `~/x`).
#[must_use]
pub fn split_token(token: &str) -> (bool, Vec<Step<'_>>) {
    let (anchored, rest) = if let Some(rest) = token.strip_prefix('/') {
        (true, rest)
    } else if token == "~" {
        (true, "")
    } else if let Some(rest) = token.strip_prefix("~/") {
        (true, rest)
    } else {
        (false, token)
    };
    let steps = rest
        .split('/')
        .map(Step::parse)
        .filter(|step| *step != Step::Current)
        .collect();
    (anchored, steps)
}

impl NodePath {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a display path such as `/home/user`. Empty pieces are
    /// skipped; `.` and `..` are not interpreted.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self::from_segments(path.split('/').filter(|s| !s.is_empty()))
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, `None` at the root.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Splits into parent path and final name. `None` at the root.
    #[must_use]
    pub fn split_last(&self) -> Option<(Self, &str)> {
        let (name, parent) = self.segments.split_last()?;
        Some((Self::from_segments(parent.iter().cloned()), name.as_str()))
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.segments.push(name.into());
    }

    /// Drops the last segment. A no-op at the root.
    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        let mut joined = self.clone();
        joined.push(name);
        joined
    }

    /// True when `self` is `other` or lies below it.
    #[must_use]
    pub fn starts_with(&self, other: &Self) -> bool {
        self.segments.starts_with(&other.segments)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}
