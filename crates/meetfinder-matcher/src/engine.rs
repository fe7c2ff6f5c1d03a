//! Orchestrates geocoding, classification, and distance over one table.

use meetfinder_core::{classify, distance_miles, CellValue, ColumnRole, CompetitionTable};
use meetfinder_geocode::{CoordinateResolver, PostcodeLookup};

use crate::error::QueryFailure;
use crate::result::{DistanceSummary, Match, MatchResult, ResolutionStats};

/// Rows between progress log lines.
const PROGRESS_EVERY: usize = 10;

/// Runs distance queries through one [`CoordinateResolver`], so every query
/// made with the same engine shares its lookup cache.
pub struct MatchingEngine<L> {
    resolver: CoordinateResolver<L>,
}

impl<L: PostcodeLookup> MatchingEngine<L> {
    pub fn new(resolver: CoordinateResolver<L>) -> Self {
        Self { resolver }
    }

    #[must_use]
    pub fn resolver(&self) -> &CoordinateResolver<L> {
        &self.resolver
    }

    pub fn into_resolver(self) -> CoordinateResolver<L> {
        self.resolver
    }

    /// Finds every row within `radius_miles` of `origin_postcode`.
    ///
    /// The origin is resolved first, then the postcode column is located.
    /// Rows with a blank or unresolvable postcode are dropped silently.
    /// Matches are sorted by ascending distance; equal distances keep table
    /// order.
    ///
    /// # Errors
    ///
    /// - [`QueryFailure::InvalidRadius`] if `radius_miles` is not a finite
    ///   positive number. Nothing is looked up.
    /// - [`QueryFailure::UnresolvableOrigin`] if the origin cannot be geocoded.
    /// - [`QueryFailure::NoPostcodeColumn`] if no header looks like a postcode.
    ///   No row postcodes are looked up.
    pub async fn find_within_distance<'t>(
        &mut self,
        origin_postcode: &str,
        radius_miles: f64,
        table: &'t CompetitionTable,
    ) -> Result<MatchResult<'t>, QueryFailure> {
        if !(radius_miles.is_finite() && radius_miles > 0.0) {
            return Err(QueryFailure::InvalidRadius(radius_miles));
        }

        let origin = self
            .resolver
            .resolve(origin_postcode)
            .await
            .map_err(|_| QueryFailure::UnresolvableOrigin {
                postcode: origin_postcode.trim().to_owned(),
            })?;
        tracing::info!(postcode = %origin_postcode.trim(), %origin, "resolved origin");

        let roles = classify(table.headers());
        let Some(postcode_column) = roles
            .get(ColumnRole::Postcode)
            .and_then(|header| table.column_index(header))
        else {
            return Err(QueryFailure::NoPostcodeColumn {
                available: table.headers().to_vec(),
            });
        };
        tracing::info!(
            column = %table.headers()[postcode_column],
            rows = table.len(),
            "calculating distances"
        );

        let mut stats = ResolutionStats {
            rows: table.len(),
            ..ResolutionStats::default()
        };
        let mut resolved_distances = Vec::new();
        let mut matches = Vec::new();

        for (row, record) in table.records().iter().enumerate() {
            let Some(postcode) = record
                .cells()
                .get(postcode_column)
                .and_then(CellValue::as_text)
            else {
                continue;
            };
            stats.rows_with_postcode += 1;

            if let Ok(target) = self.resolver.resolve(&postcode).await {
                stats.resolved += 1;
                let distance = distance_miles(origin, target);
                resolved_distances.push(distance);
                if distance <= radius_miles {
                    matches.push(Match {
                        row,
                        record,
                        distance_miles: distance,
                    });
                }
            }

            if stats.rows_with_postcode % PROGRESS_EVERY == 0 {
                tracing::debug!(
                    processed = stats.rows_with_postcode,
                    total = stats.rows,
                    "processed postcodes"
                );
            }
        }

        // Stable: equal distances keep table order.
        matches.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));

        match DistanceSummary::from_distances(resolved_distances) {
            Some(summary) => tracing::info!(
                resolved = stats.resolved,
                with_postcode = stats.rows_with_postcode,
                matched = matches.len(),
                %summary,
                "distance calculation complete"
            ),
            None => tracing::info!(
                with_postcode = stats.rows_with_postcode,
                "no row postcodes could be resolved"
            ),
        }

        Ok(MatchResult {
            table,
            origin,
            radius_miles,
            roles,
            matches,
            stats,
        })
    }
}
