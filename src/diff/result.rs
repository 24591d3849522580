//! Diff result structures.

use crate::model::ComponentRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of comparing one component across two BOM snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffResultKind {
    /// Same name and version in both snapshots
    Identical,
    /// Only present in the new snapshot
    New,
    /// Only present in the old snapshot
    Obsolete,
    /// Version changed and the major segment differs
    MajorUpdate,
    /// Version changed within the same major segment
    MinorUpdate,
}

impl DiffResultKind {
    /// All kinds, in report order
    pub const ALL: [Self; 5] = [
        Self::Identical,
        Self::New,
        Self::Obsolete,
        Self::MajorUpdate,
        Self::MinorUpdate,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identical => "IDENTICAL",
            Self::New => "NEW",
            Self::Obsolete => "OBSOLETE",
            Self::MajorUpdate => "MAJOR_UPDATE",
            Self::MinorUpdate => "MINOR_UPDATE",
        }
    }

    /// Whether this outcome represents a difference
    #[must_use]
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Identical)
    }
}

impl fmt::Display for DiffResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationEntry {
    pub name: String,
    /// New version for updates and additions, old version otherwise
    pub version: String,
    /// Previous version, only set for updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_old: Option<String>,
    pub result: DiffResultKind,
}

impl ClassificationEntry {
    pub(crate) fn single(record: &ComponentRecord, result: DiffResultKind) -> Self {
        Self {
            name: record.name.clone(),
            version: record.version.clone(),
            version_old: None,
            result,
        }
    }

    pub(crate) fn update(
        old: &ComponentRecord,
        new: &ComponentRecord,
        result: DiffResultKind,
    ) -> Self {
        Self {
            name: new.name.clone(),
            version: new.version.clone(),
            version_old: Some(old.version.clone()),
            result,
        }
    }
}

impl fmt::Display for ClassificationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version_old {
            Some(old) => write!(
                f,
                "{}, {} -> {}, {}",
                self.name, old, self.version, self.result
            ),
            None => write!(f, "{}, {}, {}", self.name, self.version, self.result),
        }
    }
}

/// Per-outcome counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub identical: usize,
    pub new: usize,
    pub obsolete: usize,
    pub major_updates: usize,
    pub minor_updates: usize,
}

impl DiffSummary {
    pub(crate) fn record(&mut self, kind: DiffResultKind) {
        match kind {
            DiffResultKind::Identical => self.identical += 1,
            DiffResultKind::New => self.new += 1,
            DiffResultKind::Obsolete => self.obsolete += 1,
            DiffResultKind::MajorUpdate => self.major_updates += 1,
            DiffResultKind::MinorUpdate => self.minor_updates += 1,
        }
    }

    #[must_use]
    pub const fn count(&self, kind: DiffResultKind) -> usize {
        match kind {
            DiffResultKind::Identical => self.identical,
            DiffResultKind::New => self.new,
            DiffResultKind::Obsolete => self.obsolete,
            DiffResultKind::MajorUpdate => self.major_updates,
            DiffResultKind::MinorUpdate => self.minor_updates,
        }
    }

    /// Number of entries that are not `IDENTICAL`
    #[must_use]
    pub const fn total_changes(&self) -> usize {
        self.new + self.obsolete + self.major_updates + self.minor_updates
    }
}

/// Complete result of classifying two BOM snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[must_use]
pub struct BomDiff {
    /// Components present unchanged in both snapshots, in old-list order
    pub equal_set: Vec<ComponentRecord>,
    /// Every entry that is not `IDENTICAL`, in name visitation order
    pub diff_entries: Vec<ClassificationEntry>,
    /// All entries including `IDENTICAL`, in name visitation order
    pub report: Vec<ClassificationEntry>,
    pub summary: DiffSummary,
}

impl BomDiff {
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.summary.total_changes() > 0
    }

    /// Entries to report: everything with `include_identical`, else differences only
    #[must_use]
    pub fn entries(&self, include_identical: bool) -> &[ClassificationEntry] {
        if include_identical {
            &self.report
        } else {
            &self.diff_entries
        }
    }
}
