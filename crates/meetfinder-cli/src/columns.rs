use std::path::Path;

use meetfinder_core::{classify, columns_matching, AppConfig, ColumnRole};

use crate::dataset;

/// Print the role picked for each field and every header that matched it.
pub(crate) fn run_columns(config: &AppConfig, data: Option<&Path>) -> anyhow::Result<()> {
    let path = dataset::resolve_dataset(config, data)?;
    let table = dataset::load_table(&path)?;
    let headers = table.headers();
    let roles = classify(headers);

    println!("Dataset: {}", path.display());
    println!("Columns ({}): {}", headers.len(), headers.join(", "));
    println!();
    for role in ColumnRole::ALL {
        let picked = roles.get(role).unwrap_or("-");
        let label = role.to_string();
        let others: Vec<&str> = columns_matching(headers, role)
            .into_iter()
            .filter(|h| *h != picked)
            .collect();
        if others.is_empty() {
            println!("  {label:<9} {picked}");
        } else {
            println!("  {label:<9} {picked}  (also matched: {})", others.join(", "));
        }
    }

    if !roles.is_resolved(ColumnRole::Postcode) {
        println!();
        println!("No postcode column detected; distance searches will fail on this dataset.");
    }
    Ok(())
}
