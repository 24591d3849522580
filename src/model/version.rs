//! Version normalization.
//!
//! BOMs carry whatever version string the source ecosystem reported, which is
//! frequently not semantic (`v1.1.1.RELEASE`, `1_27_1_1`, `0.4.M3`). The
//! normalizer maps every string to a numeric tuple that can be compared; it
//! never fails and degrades unparsable input to `0.0.0`.

use regex::Regex;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

/// Arity of a normalized version unless the input has more numeric segments.
const DEFAULT_ARITY: usize = 3;

/// Underscore-delimited numeric version such as `1_27_1_1`.
static UNDERSCORE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:_\d+)+$").expect("valid regex"));

/// An ordered tuple of non-negative integers derived from a version string.
///
/// Comparison is lexicographic with shorter tuples treated as zero-padded on
/// the right, so `1.0` and `1.0.0` compare equal.
#[derive(Debug, Clone)]
pub struct NormalizedVersion {
    segments: Vec<u64>,
}

/// Kind of change between two normalized versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionDelta {
    /// All segments equal (after zero padding)
    Same,
    /// Segment 0 differs
    Major,
    /// Segment 0 equal, a later segment differs
    Minor,
}

impl NormalizedVersion {
    /// Build from raw segments
    #[must_use]
    pub fn from_segments(segments: Vec<u64>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Segment at `index`, zero when the tuple is shorter
    #[must_use]
    pub fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn major(&self) -> u64 {
        self.segment(0)
    }

    /// Classify the change from `self` to `other`.
    #[must_use]
    pub fn delta(&self, other: &Self) -> VersionDelta {
        if self.major() != other.major() {
            VersionDelta::Major
        } else if self == other {
            VersionDelta::Same
        } else {
            VersionDelta::Minor
        }
    }
}

impl PartialEq for NormalizedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NormalizedVersion {}

impl PartialOrd for NormalizedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NormalizedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for NormalizedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Normalize a free-form version string.
///
/// * one leading `v`/`V` is stripped
/// * a `-`/`+` pre-release or build suffix is ignored, as are trailing
///   qualifier segments (`1.2.3.4.RELEASE` → `1.2.3.4`)
/// * `1_27_1_1` is read as `1.27.1.1`; other underscores are left alone
/// * any other segment that is not purely numeric becomes `0` (`1.x.3` → `1.0.3`)
/// * numeric segments are read as integers, so a leading zero is dropped
///   (`1.06` → `1.6.0`) while `1.29` stays `1.29.0`
/// * the result has three segments unless the input has four or more numeric
///   segments, in which case all are kept
#[must_use]
pub fn normalize(raw: &str) -> NormalizedVersion {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix(['v', 'V'])
        .unwrap_or(trimmed);

    if let Ok(parsed) = semver::Version::parse(stripped) {
        return NormalizedVersion::from_segments(vec![parsed.major, parsed.minor, parsed.patch]);
    }

    let core = strip_trailing_qualifiers(strip_release_suffix(stripped));

    let dotted: Cow<'_, str> = if UNDERSCORE_VERSION.is_match(core) {
        Cow::Owned(core.replace('_', "."))
    } else {
        Cow::Borrowed(core)
    };

    let mut numeric = 0usize;
    let mut segments: Vec<u64> = dotted
        .split('.')
        .map(|segment| {
            if is_numeric(segment) {
                numeric += 1;
                segment.parse::<u64>().unwrap_or(u64::MAX)
            } else {
                0
            }
        })
        .collect();

    if numeric <= DEFAULT_ARITY {
        segments.resize(DEFAULT_ARITY, 0);
    }

    NormalizedVersion::from_segments(segments)
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Drop `.`-separated qualifier segments after the last numeric one
/// (`1.2.3.4.RELEASE` → `1.2.3.4`, `1_27_1_1.RELEASE` → `1_27_1_1`).
fn strip_trailing_qualifiers(version: &str) -> &str {
    let mut core = version;
    loop {
        let last = core.rsplit('.').next().unwrap_or(core);
        if is_numeric(last) || UNDERSCORE_VERSION.is_match(last) {
            return core;
        }
        match core.rsplit_once('.') {
            Some((head, _)) => core = head,
            None => return "",
        }
    }
}

/// Cut a `-`/`+` suffix unless it starts the string.
fn strip_release_suffix(version: &str) -> &str {
    match version.find(['-', '+']) {
        Some(pos) if pos > 0 => &version[..pos],
        _ => version,
    }
}
