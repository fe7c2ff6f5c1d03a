//! Query output: matched rows with their distances, plus the bookkeeping a
//! caller needs to render or export them.

use meetfinder_core::{
    round_tenth, ColumnRole, ColumnRoleMap, CompetitionRecord, CompetitionTable, Coordinate,
};

/// Header appended to exported rows.
pub const DISTANCE_COLUMN: &str = "distance_miles";

/// One matched row. `distance_miles` is full precision.
#[derive(Debug, Clone, Copy)]
pub struct Match<'t> {
    /// Zero-based position of the record in the source table.
    pub row: usize,
    pub record: &'t CompetitionRecord,
    pub distance_miles: f64,
}

/// "N of M postcodes resolved" bookkeeping for one query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub rows: usize,
    pub rows_with_postcode: usize,
    pub resolved: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSummary {
    pub count: usize,
    pub closest: f64,
    pub furthest: f64,
    pub average: f64,
}

impl DistanceSummary {
    /// Returns `None` for an empty input.
    #[must_use]
    pub fn from_distances<I: IntoIterator<Item = f64>>(distances: I) -> Option<Self> {
        let mut count = 0usize;
        let mut closest = f64::INFINITY;
        let mut furthest = f64::NEG_INFINITY;
        let mut total = 0.0;
        for d in distances {
            count += 1;
            closest = closest.min(d);
            furthest = furthest.max(d);
            total += d;
        }
        if count == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let average = total / count as f64;
        Some(Self {
            count,
            closest,
            furthest,
            average,
        })
    }
}

impl std::fmt::Display for DistanceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "closest {:.1} miles, furthest {:.1} miles, average {:.1} miles",
            self.closest, self.furthest, self.average
        )
    }
}

/// Rows within the query radius, sorted nearest first (table order on ties).
#[derive(Debug, Clone)]
pub struct MatchResult<'t> {
    pub(crate) table: &'t CompetitionTable,
    pub(crate) origin: Coordinate,
    pub(crate) radius_miles: f64,
    pub(crate) roles: ColumnRoleMap,
    pub(crate) matches: Vec<Match<'t>>,
    pub(crate) stats: ResolutionStats,
}

impl<'t> MatchResult<'t> {
    #[must_use]
    pub fn matches(&self) -> &[Match<'t>] {
        &self.matches
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    #[must_use]
    pub fn table(&self) -> &'t CompetitionTable {
        self.table
    }

    #[must_use]
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    #[must_use]
    pub fn radius_miles(&self) -> f64 {
        self.radius_miles
    }

    /// The column roles the query was run with.
    #[must_use]
    pub fn roles(&self) -> &ColumnRoleMap {
        &self.roles
    }

    #[must_use]
    pub fn stats(&self) -> ResolutionStats {
        self.stats
    }

    /// Summary over the matched rows only.
    #[must_use]
    pub fn summary(&self) -> Option<DistanceSummary> {
        DistanceSummary::from_distances(self.matches.iter().map(|m| m.distance_miles))
    }

    /// Non-blank text of `role`'s column for a matched row.
    #[must_use]
    pub fn field(&self, m: &Match<'_>, role: ColumnRole) -> Option<String> {
        let header = self.roles.get(role)?;
        self.table.text(m.record, header)
    }

    /// Original headers followed by [`DISTANCE_COLUMN`].
    #[must_use]
    pub fn export_headers(&self) -> Vec<String> {
        let mut headers = self.table.headers().to_vec();
        headers.push(DISTANCE_COLUMN.to_owned());
        headers
    }

    /// One row per match: original cells as text, then the distance rounded
    /// to one decimal.
    pub fn export_rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.matches.iter().map(|m| {
            let mut row: Vec<String> = m.record.cells().iter().map(ToString::to_string).collect();
            row.push(format!("{:.1}", round_tenth(m.distance_miles)));
            row
        })
    }
}
