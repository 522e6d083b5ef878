use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["placerev"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn collect_defaults() {
    let cli = Cli::try_parse_from(["placerev", "collect"]).expect("expected valid cli args");
    let Some(Commands::Collect {
        region,
        query,
        location,
        radius,
        max_results,
        max_reviews,
        output,
        json,
        dry_run,
    }) = cli.command
    else {
        panic!("expected collect command");
    };
    assert_eq!(region, "Madrid");
    assert!(query.is_none());
    assert!(location.is_none());
    assert!(radius.is_none());
    assert!(max_results.is_none());
    assert!(max_reviews.is_none());
    assert!(output.is_none());
    assert!(!json);
    assert!(!dry_run);
}

#[test]
fn collect_parses_location_and_limits() {
    let cli = Cli::try_parse_from([
        "placerev",
        "collect",
        "--location",
        "40.4168,-3.7038",
        "--radius",
        "5000",
        "--max-results",
        "20",
        "--max-reviews",
        "3",
        "--output",
        "reviews.csv",
        "--dry-run",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Collect {
            location: Some(Location { lat, lng }),
            radius: Some(5000),
            max_results: Some(20),
            max_reviews: Some(3),
            output: Some(_),
            dry_run: true,
            ..
        }) if (lat - 40.4168).abs() < 1e-9 && (lng + 3.7038).abs() < 1e-9
    ));
}

#[test]
fn collect_rejects_malformed_location() {
    let result = Cli::try_parse_from(["placerev", "collect", "--location", "madrid"]);
    assert!(result.is_err());
}

#[test]
fn collect_rejects_out_of_range_location() {
    let result = Cli::try_parse_from(["placerev", "collect", "--location", "95.0,0.0"]);
    assert!(result.is_err());
}

#[test]
fn collect_accepts_query_and_json() {
    let cli = Cli::try_parse_from([
        "placerev",
        "collect",
        "--query",
        "academias Valencia",
        "--json",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Collect { query: Some(ref q), json: true, .. }) if q == "academias Valencia"
    ));
}

#[test]
fn dry_run_does_not_need_api_key() {
    let cli = Cli::try_parse_from(["placerev", "collect", "--dry-run"])
        .expect("expected valid cli args");
    let command = cli.command.expect("expected collect command");
    assert!(!needs_api_key(&command));
}

#[test]
fn real_collect_needs_api_key() {
    let cli = Cli::try_parse_from(["placerev", "collect", "--json"])
        .expect("expected valid cli args");
    let command = cli.command.expect("expected collect command");
    assert!(needs_api_key(&command));
}
