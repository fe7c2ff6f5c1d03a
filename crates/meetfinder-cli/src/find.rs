//! The `find` and `lookup` commands.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use meetfinder_core::{round_tenth, AppConfig, ColumnRole, SearchLinks};
use meetfinder_geocode::{CoordinateResolver, PostcodesClient};
use meetfinder_matcher::{MatchResult, MatchingEngine};

use crate::{dataset, export};

/// Radii above this still run, with a warning.
const LARGE_RADIUS_MILES: f64 = 500.0;

const MISSING_NAME: &str = "Competition name not available";

/// Where, if anywhere, matches are written as CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutputTarget {
    None,
    /// `competitions_near_<postcode>_within_<radius>miles.csv` in the working directory.
    Default,
    Path(PathBuf),
}

fn build_resolver(config: &AppConfig) -> anyhow::Result<CoordinateResolver<PostcodesClient>> {
    let client = PostcodesClient::from_config(config).context("failed to build postcode client")?;
    Ok(CoordinateResolver::new(client)
        .with_min_interval(Duration::from_millis(config.inter_request_delay_ms)))
}

/// Trim and upper-case; the result must be 5 to 8 characters long.
pub(crate) fn validate_postcode(raw: &str) -> anyhow::Result<String> {
    let postcode = raw.trim().to_uppercase();
    let len = postcode.chars().count();
    if !(5..=8).contains(&len) {
        anyhow::bail!("invalid postcode '{}': expected 5 to 8 characters", raw.trim());
    }
    Ok(postcode)
}

pub(crate) fn validate_radius(radius_miles: f64) -> anyhow::Result<()> {
    if !(radius_miles.is_finite() && radius_miles > 0.0) {
        anyhow::bail!("radius must be greater than 0, got {radius_miles}");
    }
    if radius_miles > LARGE_RADIUS_MILES {
        tracing::warn!(radius_miles, "large search radius; this may match most of the dataset");
    }
    Ok(())
}

/// Human-readable listing of matches followed by the summary lines.
pub(crate) fn render_results(result: &MatchResult<'_>, postcode: &str) -> String {
    let mut out = String::new();
    let radius = result.radius_miles();

    if result.is_empty() {
        let _ = writeln!(out, "No competitions found within {radius} miles.");
    } else {
        let _ = writeln!(
            out,
            "Found {} competition(s) within {radius} miles of {postcode}:",
            result.len()
        );
        for (i, m) in result.matches().iter().enumerate() {
            let name = result.field(m, ColumnRole::Name);
            let venue = result.field(m, ColumnRole::Venue);
            let location = result.field(m, ColumnRole::Postcode);

            let _ = writeln!(out);
            let _ = writeln!(out, "{:>3}. {}", i + 1, name.as_deref().unwrap_or(MISSING_NAME));
            let _ = writeln!(out, "     Distance: {:.1} miles", round_tenth(m.distance_miles));
            for (label, role) in [
                ("Date", ColumnRole::Date),
                ("Venue", ColumnRole::Venue),
                ("Host", ColumnRole::Host),
                ("Level", ColumnRole::Level),
            ] {
                if let Some(value) = result.field(m, role) {
                    let _ = writeln!(out, "     {label}: {value}");
                }
            }
            match result.field(m, ColumnRole::Link) {
                Some(link) => {
                    let _ = writeln!(out, "     Link: {link}");
                }
                None => {
                    let links = SearchLinks::for_competition(
                        name.as_deref().unwrap_or_default(),
                        venue.as_deref(),
                        location.as_deref(),
                    );
                    let _ = writeln!(out, "     Search: {}", links.google);
                }
            }
        }
    }

    let _ = writeln!(out);
    if let Some(summary) = result.summary() {
        let _ = writeln!(out, "Summary: {summary}");
    }
    let stats = result.stats();
    let _ = writeln!(
        out,
        "Resolved {} of {} postcodes ({} rows in dataset).",
        stats.resolved, stats.rows_with_postcode, stats.rows
    );
    out
}

pub(crate) async fn run_find(
    config: &AppConfig,
    postcode: Option<&str>,
    radius_miles: f64,
    data: Option<&Path>,
    output: OutputTarget,
) -> anyhow::Result<()> {
    let Some(raw) = postcode.or(config.home_postcode.as_deref()) else {
        anyhow::bail!("no postcode given; pass --postcode or set MEETFINDER_HOME_POSTCODE");
    };
    let postcode = validate_postcode(raw)?;
    validate_radius(radius_miles)?;

    let path = dataset::resolve_dataset(config, data)?;
    let table = dataset::load_table(&path)?;

    let mut engine = MatchingEngine::new(build_resolver(config)?);
    let result = engine
        .find_within_distance(&postcode, radius_miles, &table)
        .await?;
    tracing::debug!(
        external_calls = engine.resolver().external_calls(),
        cached = engine.resolver().cache_len(),
        "lookups finished"
    );

    print!("{}", render_results(&result, &postcode));

    let target = match output {
        OutputTarget::None => return Ok(()),
        OutputTarget::Default => export::default_output_name(&postcode, radius_miles),
        OutputTarget::Path(path) => path,
    };
    if result.is_empty() {
        println!("Nothing to save.");
        return Ok(());
    }
    export::write_results_csv(&target, &result)?;
    println!("Results saved to {}", target.display());
    Ok(())
}

pub(crate) async fn run_lookup(config: &AppConfig, postcode: &str) -> anyhow::Result<()> {
    let postcode = validate_postcode(postcode)?;
    let mut resolver = build_resolver(config)?;
    let coordinate = resolver
        .resolve(&postcode)
        .await
        .map_err(|_| anyhow::anyhow!("could not resolve postcode {postcode}"))?;
    println!("{postcode}: {coordinate}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use meetfinder_core::{CellValue, CompetitionTable, Coordinate};
    use meetfinder_geocode::{GeocodeError, PostcodeLookup};

    use super::*;

    struct FixedLookup(HashMap<&'static str, (f64, f64)>);

    impl PostcodeLookup for FixedLookup {
        async fn lookup(&self, postcode: &str) -> Result<Coordinate, GeocodeError> {
            self.0
                .get(postcode)
                .and_then(|&(lat, lon)| Coordinate::new(lat, lon))
                .ok_or_else(|| GeocodeError::NotFound {
                    postcode: postcode.to_owned(),
                })
        }
    }

    fn engine() -> MatchingEngine<FixedLookup> {
        // 0.01 degrees of latitude is roughly 0.69 miles.
        let known = HashMap::from([
            ("HOME1", (52.0, -1.5)),
            ("NEAR1", (52.01, -1.5)),
            ("FAR1", (53.0, -1.5)),
        ]);
        MatchingEngine::new(CoordinateResolver::new(FixedLookup(known)))
    }

    fn table() -> CompetitionTable {
        let mut table = CompetitionTable::new(vec![
            "Event Name".to_owned(),
            "Postcode".to_owned(),
            "Date".to_owned(),
            "Entry Link".to_owned(),
        ]);
        for row in [
            ["Far Meet", "FAR1", "2026-05-01", ""],
            ["", "NEAR1", "2026-06-01", ""],
            ["Club Open", "NEAR1", "2026-07-01", "https://example.org/open"],
        ] {
            table
                .push_row(row.iter().map(|c| CellValue::from_raw(c)).collect())
                .unwrap();
        }
        table
    }

    #[test]
    fn validate_postcode_normalises_case_and_whitespace() {
        assert_eq!(validate_postcode("  sw1a 1aa ").unwrap(), "SW1A 1AA");
    }

    #[test]
    fn validate_postcode_rejects_bad_lengths() {
        assert!(validate_postcode("AB1").is_err());
        assert!(validate_postcode("ABCDEFGHI").is_err());
        assert!(validate_postcode("   ").is_err());
    }

    #[test]
    fn validate_radius_rejects_non_positive() {
        assert!(validate_radius(0.0).is_err());
        assert!(validate_radius(-3.0).is_err());
        assert!(validate_radius(f64::NAN).is_err());
        assert!(validate_radius(750.0).is_ok());
    }

    #[tokio::test]
    async fn render_lists_matches_with_fallbacks() {
        let table = table();
        let mut engine = engine();
        let result = engine.find_within_distance("HOME1", 5.0, &table).await.unwrap();

        let text = render_results(&result, "HOME1");
        assert!(text.contains("Found 2 competition(s) within 5 miles of HOME1"), "{text}");
        assert!(text.contains(MISSING_NAME), "{text}");
        assert!(text.contains("Link: https://example.org/open"), "{text}");
        assert!(text.contains("Search: https://www.google.com/search?q="), "{text}");
        assert!(text.contains("Search: https://www.google.com/search?q=NEAR1+athletics"), "{text}");
        assert!(text.contains("Distance: 0.7 miles"), "{text}");
        assert!(!text.contains("Far Meet"), "{text}");
        assert!(text.contains("Resolved 3 of 3 postcodes (3 rows in dataset)."), "{text}");
    }

    #[tokio::test]
    async fn render_reports_empty_result() {
        let table = table();
        let mut engine = engine();
        let result = engine.find_within_distance("HOME1", 0.1, &table).await.unwrap();

        let text = render_results(&result, "HOME1");
        assert!(text.starts_with("No competitions found within 0.1 miles."), "{text}");
        assert!(!text.contains("Summary:"), "{text}");
    }
}
