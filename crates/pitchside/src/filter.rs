//! Filter/query engine over the merged table.
//!
//! A [`FilterSpec`] is built per interaction, applied as a conjunction of
//! predicates, and discarded; it never mutates the merged table. The
//! empty-selection semantics are deliberately asymmetric and must stay
//! that way: city (and the other always-on predicates) treat an empty
//! selection as "nothing matches", while the team predicate treats an
//! empty selection as "no team filter at all". The season predicate is
//! disabled outright when the dataset has no season column.

use serde::{Deserialize, Serialize};

use crate::schema::MergedRecord;

/// A conjunction of set-membership and range predicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Selected seasons. `None` disables the predicate entirely (the
    /// dataset carries no season column).
    #[serde(default)]
    pub seasons: Option<Vec<String>>,
    /// Selected cities. An empty selection matches nothing.
    pub cities: Vec<String>,
    /// Selected teams, matched against either team1 or team2. An empty
    /// selection means "no team filter", not "exclude everything".
    #[serde(default)]
    pub teams: Vec<String>,
    /// Temperature range, inclusive on both ends.
    pub temp_range: (f64, f64),
}

impl FilterSpec {
    /// The initial "everything selected" spec for a dataset, mirroring a
    /// freshly opened filter sidebar: every season (or a disabled season
    /// predicate when the column is absent), every city, every team, and
    /// a temperature range widened by one degree on each side.
    pub fn select_all(records: &[MergedRecord]) -> Self {
        let (lo, hi) = temp_extent(records).unwrap_or((0.0, 0.0));
        Self {
            seasons: seasons(records),
            cities: cities(records),
            teams: teams(records),
            temp_range: (round1(lo - 1.0), round1(hi + 1.0)),
        }
    }

    /// Whether a single record satisfies every predicate.
    pub fn matches(&self, record: &MergedRecord) -> bool {
        if let Some(selected) = &self.seasons {
            let in_selection = record
                .season
                .as_ref()
                .is_some_and(|s| selected.iter().any(|sel| sel == s));
            if !in_selection {
                return false;
            }
        }

        if !self.cities.iter().any(|c| c == &record.city) {
            return false;
        }

        if !self.teams.is_empty() {
            let team_hit = [&record.team1, &record.team2].into_iter().any(|team| {
                team.as_ref()
                    .is_some_and(|t| self.teams.iter().any(|sel| sel == t))
            });
            if !team_hit {
                return false;
            }
        }

        let (lo, hi) = self.temp_range;
        record.temp_c >= lo && record.temp_c <= hi
    }

    /// The subset of records satisfying the conjunction, in input order.
    pub fn apply(&self, records: &[MergedRecord]) -> Vec<MergedRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

/// Distinct seasons in the dataset, sorted. `None` when no record carries
/// one, which disables the season predicate.
pub fn seasons(records: &[MergedRecord]) -> Option<Vec<String>> {
    let mut out: Vec<String> = distinct(records.iter().filter_map(|r| r.season.clone()));
    if out.is_empty() {
        None
    } else {
        out.sort();
        Some(out)
    }
}

/// Distinct cities, sorted.
pub fn cities(records: &[MergedRecord]) -> Vec<String> {
    let mut out = distinct(records.iter().map(|r| r.city.clone()));
    out.sort();
    out
}

/// Distinct teams across both team columns, sorted.
pub fn teams(records: &[MergedRecord]) -> Vec<String> {
    let mut out = distinct(
        records
            .iter()
            .flat_map(|r| [r.team1.clone(), r.team2.clone()])
            .flatten(),
    );
    out.sort();
    out
}

/// Minimum and maximum temp_c, or `None` for an empty table.
pub fn temp_extent(records: &[MergedRecord]) -> Option<(f64, f64)> {
    let mut temps = records.iter().map(|r| r.temp_c);
    let first = temps.next()?;
    let (lo, hi) = temps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    Some((lo, hi))
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values.filter(|v| seen.insert(v.clone())).collect()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
