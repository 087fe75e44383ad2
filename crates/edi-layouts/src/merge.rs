//! Structural merge of layout overrides
//!
//! The override document is partial: it may carry a handful of changed
//! fields, whole new records, or whole new layouts. Merging always starts
//! from a fresh copy of the baseline, so the built-in defaults are never
//! aliased or mutated by a session.

use crate::model::LayoutSet;

/// Superimpose `overrides` onto a copy of `baseline`.
///
/// Per matching layout, per matching record: override fields replace
/// same-label fields and append new labels, keeping the baseline column
/// order for untouched fields. Unmatched override records and layouts are
/// added wholesale. A matching layout's own `name`/`record_width` are kept
/// from the baseline; only its records participate.
pub fn overlay(baseline: &LayoutSet, overrides: &LayoutSet) -> LayoutSet {
    let mut merged = baseline.clone();

    for (layout_key, override_layout) in overrides {
        let Some(base_layout) = merged.get_mut(layout_key) else {
            merged.insert(layout_key.clone(), override_layout.clone());
            continue;
        };

        for (record_id, override_record) in &override_layout.records {
            match base_layout.records.get_mut(record_id) {
                Some(base_record) => {
                    base_record
                        .fields
                        .extend(override_record.fields.clone());
                }
                None => {
                    base_layout
                        .records
                        .insert(record_id.clone(), override_record.clone());
                }
            }
        }
    }

    merged
}
