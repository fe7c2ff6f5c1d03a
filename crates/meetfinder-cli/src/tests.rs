use clap::Parser;

use super::*;

#[test]
fn parses_find_with_all_flags() {
    let cli = Cli::try_parse_from([
        "meetfinder",
        "find",
        "--postcode",
        "SW1A 1AA",
        "--radius",
        "25",
        "--data",
        "sheets/latest.csv",
        "--output",
        "near.csv",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Find {
            postcode: Some(ref p),
            data: Some(_),
            output: Some(_),
            save: false,
            ..
        } if p == "SW1A 1AA"
    ));
}

#[test]
fn parses_find_short_flags_and_fractional_radius() {
    let cli = Cli::try_parse_from(["meetfinder", "find", "-p", "M1 1AE", "-r", "12.5"]).unwrap();
    match cli.command {
        Commands::Find { radius, save, .. } => {
            assert!((radius - 12.5).abs() < f64::EPSILON);
            assert!(!save);
        }
        other => panic!("expected find, got {other:?}"),
    }
}

#[test]
fn find_postcode_is_optional() {
    let cli = Cli::try_parse_from(["meetfinder", "find", "--radius", "10"]).unwrap();
    assert!(matches!(cli.command, Commands::Find { postcode: None, .. }));
}

#[test]
fn find_requires_radius() {
    assert!(Cli::try_parse_from(["meetfinder", "find", "--postcode", "M1 1AE"]).is_err());
}

#[test]
fn find_rejects_non_numeric_radius() {
    assert!(Cli::try_parse_from(["meetfinder", "find", "--radius", "far"]).is_err());
}

#[test]
fn save_and_output_conflict() {
    let result = Cli::try_parse_from([
        "meetfinder", "find", "--radius", "5", "--save", "--output", "x.csv",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_lookup_positional_postcode() {
    let cli = Cli::try_parse_from(["meetfinder", "lookup", "SW1A 1AA"]).unwrap();
    assert!(matches!(cli.command, Commands::Lookup { ref postcode } if postcode == "SW1A 1AA"));
}

#[test]
fn parses_columns_and_datasets() {
    let cli = Cli::try_parse_from(["meetfinder", "columns"]).unwrap();
    assert!(matches!(cli.command, Commands::Columns { data: None }));

    let cli = Cli::try_parse_from(["meetfinder", "datasets"]).unwrap();
    assert!(matches!(cli.command, Commands::Datasets));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["meetfinder"]).is_err());
}
