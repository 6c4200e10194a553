//! Client-side sort policy for prescription lists.
//!
//! The list view sorts by patient name (string comparison) or prescription date (parsed as
//! a date). Selecting a new key resets the order to ascending; re-selecting the active key
//! flips it. The sort is stable; records whose date fails to parse order after every
//! parseable date, keeping the comparator a total order.

use crate::model::Prescription;
use chrono::{DateTime, NaiveDate};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Patient name, compared as strings.
    Name,
    /// `dateOfPrescription`, compared as calendar dates.
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Which column is active and in which direction, per list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(SortKey, SortOrder)>,
}

impl SortState {
    /// No sort applied; records stay in stored order.
    pub fn new() -> Self {
        Self::default()
    }

    /// A state with the given key and order already selected.
    pub fn with(key: SortKey, order: SortOrder) -> Self {
        Self {
            active: Some((key, order)),
        }
    }

    /// Selects a sort key the way the list view does: a new key starts ascending,
    /// re-selecting the active key flips the order.
    pub fn toggle(&mut self, key: SortKey) {
        self.active = match self.active {
            Some((active, order)) if active == key => Some((key, order.flipped())),
            _ => Some((key, SortOrder::Ascending)),
        };
    }

    pub fn active(&self) -> Option<(SortKey, SortOrder)> {
        self.active
    }

    /// Stable-sorts `records` under the active key and order. A no-op when no key is
    /// selected.
    pub fn apply(&self, records: &mut [Prescription]) {
        let Some((key, order)) = self.active else {
            return;
        };
        records.sort_by(|a, b| {
            let ordering = compare(key, a, b);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }
}

fn compare(key: SortKey, a: &Prescription, b: &Prescription) -> Ordering {
    match key {
        SortKey::Name => a.name.as_str().cmp(b.name.as_str()),
        SortKey::Date => {
            match (
                parse_date(a.date_of_prescription.as_str()),
                parse_date(b.date_of_prescription.as_str()),
            ) {
                (Some(a), Some(b)) => a.cmp(&b),
                // Unparseable dates order after every parseable one.
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
