//! Diff classification engine.

use super::{BomDiff, ClassificationEntry, DiffResultKind};
use crate::merge::deduplicate;
use crate::model::{normalize, ComponentRecord, VersionDelta};
use indexmap::IndexMap;

/// Classify the delta between an old and a new component list.
///
/// Names are visited in old-list order, followed by names that only occur in
/// the new list. Within a name, identical versions pair up first; remaining
/// old versions are paired with remaining new versions in encounter order and
/// classified as updates, and whatever is left over becomes `OBSOLETE` (old)
/// or `NEW` (new).
///
/// Duplicate `(name, version)` pairs inside one input list are collapsed
/// before classification, keeping the first occurrence.
pub fn classify(old: &[ComponentRecord], new: &[ComponentRecord]) -> BomDiff {
    let old = deduplicate(old);
    let new = deduplicate(new);

    let old_by_name = group_by_name(&old);
    let new_by_name = group_by_name(&new);

    let mut names: Vec<&str> = old_by_name.keys().copied().collect();
    names.extend(
        new_by_name
            .keys()
            .copied()
            .filter(|name| !old_by_name.contains_key(name)),
    );

    let mut identical = vec![false; old.len()];
    let mut report = Vec::with_capacity(old.len().max(new.len()));

    for name in names {
        let old_idx = old_by_name.get(&name).map_or(&[][..], Vec::as_slice);
        let new_idx = new_by_name.get(&name).map_or(&[][..], Vec::as_slice);
        classify_name(&old, &new, old_idx, new_idx, &mut identical, &mut report);
    }

    let equal_set: Vec<ComponentRecord> = old
        .iter()
        .zip(&identical)
        .filter(|(_, same)| **same)
        .map(|(record, _)| record.clone())
        .collect();

    let mut diff = BomDiff {
        equal_set,
        diff_entries: report
            .iter()
            .filter(|entry| entry.result.is_change())
            .cloned()
            .collect(),
        ..BomDiff::default()
    };
    for entry in &report {
        diff.summary.record(entry.result);
    }
    diff.report = report;

    tracing::debug!(
        old = old.len(),
        new = new.len(),
        identical = diff.summary.identical,
        changes = diff.summary.total_changes(),
        "classified BOM delta"
    );

    diff
}

/// Indices of records grouped by exact name, in first-seen order.
fn group_by_name(records: &[ComponentRecord]) -> IndexMap<&str, Vec<usize>> {
    let mut groups: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (idx, record) in records.iter().enumerate() {
        groups.entry(record.name.as_str()).or_default().push(idx);
    }
    groups
}

/// Classify all versions of a single name.
fn classify_name(
    old: &[ComponentRecord],
    new: &[ComponentRecord],
    old_idx: &[usize],
    new_idx: &[usize],
    identical: &mut [bool],
    report: &mut Vec<ClassificationEntry>,
) {
    let in_new = |version: &str| new_idx.iter().any(|&n| new[n].version == version);
    let in_old = |version: &str| old_idx.iter().any(|&o| old[o].version == version);

    let mut unmatched_new = new_idx
        .iter()
        .copied()
        .filter(|&n| !in_old(&new[n].version));

    for &o in old_idx {
        let old_rec = &old[o];
        if in_new(&old_rec.version) {
            identical[o] = true;
            report.push(ClassificationEntry::single(old_rec, DiffResultKind::Identical));
        } else if let Some(n) = unmatched_new.next() {
            let new_rec = &new[n];
            let kind = update_kind(&old_rec.version, &new_rec.version);
            report.push(ClassificationEntry::update(old_rec, new_rec, kind));
        } else {
            report.push(ClassificationEntry::single(old_rec, DiffResultKind::Obsolete));
        }
    }

    for n in unmatched_new {
        report.push(ClassificationEntry::single(&new[n], DiffResultKind::New));
    }
}

/// Major when the first normalized segment differs, minor otherwise.
fn update_kind(old_version: &str, new_version: &str) -> DiffResultKind {
    match normalize(old_version).delta(&normalize(new_version)) {
        VersionDelta::Major => DiffResultKind::MajorUpdate,
        VersionDelta::Minor | VersionDelta::Same => DiffResultKind::MinorUpdate,
    }
}
