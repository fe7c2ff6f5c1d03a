//! CSV export of query results.

use std::path::{Path, PathBuf};

use anyhow::Context;
use meetfinder_matcher::MatchResult;

/// `competitions_near_<postcode>_within_<radius>miles.csv`, with spaces
/// removed from the postcode.
pub(crate) fn default_output_name(postcode: &str, radius_miles: f64) -> PathBuf {
    let code: String = postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    PathBuf::from(format!(
        "competitions_near_{code}_within_{radius_miles:?}miles.csv"
    ))
}

/// Write the original columns plus `distance_miles` for every match.
pub(crate) fn write_results_csv(path: &Path, result: &MatchResult<'_>) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(result.export_headers())?;
    for row in result.export_rows() {
        writer.write_record(&row)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(file = %path.display(), rows = result.len(), "results saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_name_strips_spaces() {
        assert_eq!(
            default_output_name("SW1A 1AA", 10.0),
            PathBuf::from("competitions_near_SW1A1AA_within_10.0miles.csv")
        );
    }

    #[test]
    fn default_name_keeps_fractional_radius() {
        assert_eq!(
            default_output_name("M1 1AE", 12.5),
            PathBuf::from("competitions_near_M11AE_within_12.5miles.csv")
        );
    }

    #[test]
    fn default_name_replaces_path_separators() {
        let name = default_output_name("AB1/2CD", 5.0);
        assert_eq!(name.components().count(), 1);
    }
}
