//! Event grouping: partition events by investor, chronologically sorted.

use crate::domain::event::ContributionEvent;
use std::collections::BTreeMap;

/// Partition `events` by investor id.
///
/// Each partition is sorted by date with a stable sort, so same-day events keep
/// their input order. Keys iterate in ascending investor id order.
pub fn group_by_investor(events: &[ContributionEvent]) -> BTreeMap<String, Vec<ContributionEvent>> {
    let mut groups: BTreeMap<String, Vec<ContributionEvent>> = BTreeMap::new();
    for event in events {
        groups
            .entry(event.investor_id.clone())
            .or_default()
            .push(event.clone());
    }
    for partition in groups.values_mut() {
        partition.sort_by_key(|e| e.date);
    }
    groups
}
