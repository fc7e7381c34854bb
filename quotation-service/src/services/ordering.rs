//! "Latest first" ordering for work orders and anything linked to them.
//!
//! Records are ranked by a tiered key:
//! 1. a parseable timestamp (creation time, else update time), newest first;
//! 2. records with a timestamp before records without one;
//! 3. the digits embedded in the reference code, compared as strings, descending;
//! 4. otherwise the original order (sorting is stable).

use crate::models::{WorkItemGroup, WorkOrder};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A record that carries the signals used for latest-first ordering.
pub trait Chronological {
    fn created_at(&self) -> Option<&str>;
    fn updated_at(&self) -> Option<&str>;
    fn reference_code(&self) -> Option<&str>;
}

impl Chronological for WorkOrder {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    fn reference_code(&self) -> Option<&str> {
        self.reference_code.as_deref()
    }
}

impl<T: Chronological> Chronological for &T {
    fn created_at(&self) -> Option<&str> {
        (**self).created_at()
    }

    fn updated_at(&self) -> Option<&str> {
        (**self).updated_at()
    }

    fn reference_code(&self) -> Option<&str> {
        (**self).reference_code()
    }
}

/// Parse a timestamp into epoch milliseconds.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.fff]`, `YYYY-MM-DDTHH:MM:SS` and
/// bare `YYYY-MM-DD` (midnight). Naive forms are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Digits of a reference code with everything else dropped.
pub fn reference_digits(code: &str) -> String {
    code.chars().filter(char::is_ascii_digit).collect()
}

struct SortKey {
    timestamp: Option<i64>,
    digits: String,
}

impl SortKey {
    fn of<T: Chronological + ?Sized>(record: &T) -> Self {
        let timestamp = record
            .created_at()
            .and_then(parse_timestamp)
            .or_else(|| record.updated_at().and_then(parse_timestamp));
        let digits = record.reference_code().map(reference_digits).unwrap_or_default();
        Self { timestamp, digits }
    }

    /// `Less` means `self` sorts before `other`.
    fn latest_first(&self, other: &Self) -> Ordering {
        let by_time = match (self.timestamp, other.timestamp) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_time.then_with(|| other.digits.cmp(&self.digits))
    }
}

/// Comparator placing the later record first.
pub fn compare_latest_first<A, B>(a: &A, b: &B) -> Ordering
where
    A: Chronological + ?Sized,
    B: Chronological + ?Sized,
{
    SortKey::of(a).latest_first(&SortKey::of(b))
}

/// Stable in-place latest-first sort.
pub fn sort_latest_first<T: Chronological>(records: &mut [T]) {
    // Keys are computed once; the comparator never re-parses timestamps.
    let mut keyed: Vec<(SortKey, usize)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| (SortKey::of(r), i))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.latest_first(b));

    let order: Vec<usize> = keyed.into_iter().map(|(_, i)| i).collect();
    apply_permutation(records, order);
}

/// Order groups by the work orders they came from, latest first.
///
/// Groups without a known work order carry no signal and keep their
/// relative position behind the ones that do.
pub fn sort_groups_latest_first(groups: &mut [WorkItemGroup], work_orders: &[WorkOrder]) {
    let by_id: HashMap<&str, &WorkOrder> = work_orders
        .iter()
        .map(|wo| (wo.work_order_id.as_str(), wo))
        .collect();

    let mut keyed: Vec<(SortKey, usize)> = groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let key = match by_id.get(group.work_order_id.as_str()) {
                Some(wo) => SortKey::of(*wo),
                None => SortKey {
                    timestamp: None,
                    digits: String::new(),
                },
            };
            (key, i)
        })
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.latest_first(b));

    let order: Vec<usize> = keyed.into_iter().map(|(_, i)| i).collect();
    apply_permutation(groups, order);
}

/// Rearrange so that position `n` holds the element previously at `order[n]`.
fn apply_permutation<T>(items: &mut [T], order: Vec<usize>) {
    let mut target: Vec<usize> = vec![0; order.len()];
    for (new_pos, old_pos) in order.into_iter().enumerate() {
        target[old_pos] = new_pos;
    }

    for start in 0..items.len() {
        while target[start] != start {
            let dest = target[start];
            items.swap(start, dest);
            target.swap(start, dest);
        }
    }
}
