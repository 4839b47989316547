//! npm-style version range specifiers
//!
//! Supports the range syntax clients send in `Accept-Version`:
//! - `1.2.3`, `=1.2.3`, `v1.2.3` - exact match
//! - `1.2`, `1.2.x`, `1.x`, `1`, `*`, `x`, `` - wildcards
//! - `^1.2.3`, `^1.0`, `^0.2.3` - compatible with version
//! - `~1.2.3`, `~1.1` - approximately equivalent
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `>=1.0.0 <2.0.0` - AND (space separated)
//! - `^1.0.0 || ^2.0.0` - OR
//! - `1.0.0 - 2.0.0` - hyphen range
//!
//! Every form is lowered to sets of primitive comparators. A pre-release
//! version only satisfies a set when one of its comparators names a
//! pre-release of the same `MAJOR.MINOR.PATCH`.

use semver::{Prerelease, Version};

use crate::version::semver::{below_release, same_release};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Below every release and pre-release of the bound (`<bound-0`)
    Below,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    fn matches(&self, version: &Version) -> bool {
        match self.op {
            Op::Eq => *version == self.version,
            Op::Gt => *version > self.version,
            Op::Gte => *version >= self.version,
            Op::Lt => *version < self.version,
            Op::Lte => *version <= self.version,
            Op::Below => below_release(version, &self.version),
        }
    }
}

/// Version as written inside a range, where trailing components may be
/// omitted or wildcarded (`1`, `1.2`, `1.2.x`)
#[derive(Debug, Clone, Default)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Partial {
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim().trim_start_matches(['=', 'v']);
        let text = text.split_once('+').map_or(text, |(head, _)| head);
        let (core, pre) = match text.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (text, None),
        };

        if core.is_empty() {
            return pre.is_none().then(Self::default);
        }

        let mut parts = core.split('.');
        let major = parse_component(parts.next())?;
        let minor = parse_component(parts.next())?;
        let patch = parse_component(parts.next())?;
        if parts.next().is_some() {
            return None;
        }

        // A wildcard swallows every later component (`1.x.3` is `1.x`)
        let minor = major.and(minor);
        let patch = minor.and(patch);

        let pre = match pre {
            Some("") => return None,
            Some(pre) if patch.is_some() => Prerelease::new(pre).ok()?,
            Some(_) => return None,
            None => Prerelease::EMPTY,
        };

        Some(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// The lowest version covered, with missing components as zero
    fn floor(&self) -> Version {
        let mut version = Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        version.pre = self.pre.clone();
        version
    }
}

fn parse_component(part: Option<&str>) -> Option<Option<u64>> {
    match part {
        None | Some("x" | "X" | "*") => Some(None),
        // Leading zeros (`01`) are rejected
        Some("0") => Some(Some(0)),
        Some(digits)
            if !digits.is_empty()
                && !digits.starts_with('0')
                && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            digits.parse().ok().map(Some)
        }
        Some(_) => None,
    }
}

fn next_major(major: u64) -> Option<Version> {
    Some(Version::new(major.checked_add(1)?, 0, 0))
}

fn next_minor(major: u64, minor: u64) -> Option<Version> {
    Some(Version::new(major, minor.checked_add(1)?, 0))
}

fn nothing() -> Vec<Comparator> {
    vec![Comparator::new(Op::Below, Version::new(0, 0, 0))]
}

/// `1.2.3`, `1.2`, `1`, `*`
fn exact(p: &Partial) -> Option<Vec<Comparator>> {
    let floor = p.floor();
    Some(match (p.major, p.minor, p.patch) {
        (None, _, _) => Vec::new(),
        (Some(major), None, _) => vec![
            Comparator::new(Op::Gte, floor),
            Comparator::new(Op::Below, next_major(major)?),
        ],
        (Some(major), Some(minor), None) => vec![
            Comparator::new(Op::Gte, floor),
            Comparator::new(Op::Below, next_minor(major, minor)?),
        ],
        (Some(_), Some(_), Some(_)) => vec![Comparator::new(Op::Eq, floor)],
    })
}

/// `^1.2.3` := `>=1.2.3 <2.0.0-0`, with the leftmost non-zero component pinned
fn caret(p: &Partial) -> Option<Vec<Comparator>> {
    let upper = match (p.major, p.minor, p.patch) {
        (None, _, _) => return Some(Vec::new()),
        (Some(major), None, _) => next_major(major)?,
        (Some(0), Some(minor), None) => next_minor(0, minor)?,
        (Some(major), Some(_), None) => next_major(major)?,
        (Some(0), Some(0), Some(patch)) => Version::new(0, 0, patch.checked_add(1)?),
        (Some(0), Some(minor), Some(_)) => next_minor(0, minor)?,
        (Some(major), Some(_), Some(_)) => next_major(major)?,
    };
    Some(vec![
        Comparator::new(Op::Gte, p.floor()),
        Comparator::new(Op::Below, upper),
    ])
}

/// `~1.2.3` := `>=1.2.3 <1.3.0-0`, `~1` := `>=1.0.0 <2.0.0-0`
fn tilde(p: &Partial) -> Option<Vec<Comparator>> {
    let upper = match (p.major, p.minor) {
        (None, _) => return Some(Vec::new()),
        (Some(major), None) => next_major(major)?,
        (Some(major), Some(minor)) => next_minor(major, minor)?,
    };
    Some(vec![
        Comparator::new(Op::Gte, p.floor()),
        Comparator::new(Op::Below, upper),
    ])
}

fn greater(p: &Partial) -> Option<Vec<Comparator>> {
    Some(match (p.major, p.minor, p.patch) {
        (None, _, _) => nothing(),
        (Some(major), None, _) => vec![Comparator::new(Op::Gte, next_major(major)?)],
        (Some(major), Some(minor), None) => {
            vec![Comparator::new(Op::Gte, next_minor(major, minor)?)]
        }
        (Some(_), Some(_), Some(_)) => vec![Comparator::new(Op::Gt, p.floor())],
    })
}

fn greater_or_equal(p: &Partial) -> Option<Vec<Comparator>> {
    Some(match p.major {
        None => Vec::new(),
        Some(_) => vec![Comparator::new(Op::Gte, p.floor())],
    })
}

fn less(p: &Partial) -> Option<Vec<Comparator>> {
    Some(match (p.major, p.patch) {
        (None, _) => nothing(),
        (Some(_), None) => vec![Comparator::new(Op::Below, p.floor())],
        (Some(_), Some(_)) => vec![Comparator::new(Op::Lt, p.floor())],
    })
}

fn less_or_equal(p: &Partial) -> Option<Vec<Comparator>> {
    Some(match (p.major, p.minor, p.patch) {
        (None, _, _) => Vec::new(),
        (Some(major), None, _) => vec![Comparator::new(Op::Below, next_major(major)?)],
        (Some(major), Some(minor), None) => {
            vec![Comparator::new(Op::Below, next_minor(major, minor)?)]
        }
        (Some(_), Some(_), Some(_)) => vec![Comparator::new(Op::Lte, p.floor())],
    })
}

/// `1.2.3 - 2.3.4` := `>=1.2.3 <=2.3.4`, a partial upper end covers its whole range
fn hyphen(from: &Partial, to: &Partial) -> Option<Vec<Comparator>> {
    let mut comparators = greater_or_equal(from)?;
    comparators.extend(less_or_equal(to)?);
    Some(comparators)
}

fn parse_comparator(token: &str) -> Option<Vec<Comparator>> {
    if let Some(rest) = token.strip_prefix(">=") {
        greater_or_equal(&Partial::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix("<=") {
        less_or_equal(&Partial::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix('>') {
        greater(&Partial::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix('<') {
        less(&Partial::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix('^') {
        caret(&Partial::parse(rest)?)
    } else if let Some(rest) = token.strip_prefix("~>").or_else(|| token.strip_prefix('~')) {
        tilde(&Partial::parse(rest)?)
    } else {
        exact(&Partial::parse(token)?)
    }
}

/// Split an AND range into comparator tokens, re-attaching operators that
/// were written apart from their version (`>= 1.2.3`)
fn split_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut pending = String::new();

    for word in text.split_whitespace() {
        pending.push_str(word);
        if !word.chars().all(|c| matches!(c, '<' | '>' | '=' | '^' | '~')) {
            tokens.push(std::mem::take(&mut pending));
        }
    }
    if !pending.is_empty() {
        tokens.push(pending);
    }

    tokens
}

fn parse_set(text: &str) -> Option<Vec<Comparator>> {
    let text = text.trim();

    if let Some((from, to)) = text.split_once(" - ") {
        return hyphen(&Partial::parse(from)?, &Partial::parse(to)?);
    }

    let mut comparators = Vec::new();
    for token in split_tokens(text) {
        comparators.extend(parse_comparator(&token)?);
    }
    Some(comparators)
}

fn set_satisfies(set: &[Comparator], version: &Version) -> bool {
    if !set.iter().all(|c| c.matches(version)) {
        return false;
    }

    version.pre.is_empty()
        || set
            .iter()
            .any(|c| !c.version.pre.is_empty() && same_release(&c.version, version))
}

/// A parsed version requirement: an OR of comparator sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    sets: Vec<Vec<Comparator>>,
}

impl VersionSpec {
    /// Parse a range specifier. Returns `None` if any part is malformed.
    pub fn parse(spec: &str) -> Option<Self> {
        spec.split("||")
            .map(parse_set)
            .collect::<Option<Vec<_>>>()
            .map(|sets| Self { sets })
    }

    /// The `*` specifier
    pub fn any() -> Self {
        Self {
            sets: vec![Vec::new()],
        }
    }

    /// Check if a version satisfies this specifier
    pub fn satisfies(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| set_satisfies(set, version))
    }
}
