use super::*;

#[test]
fn no_command_is_interactive() {
    let cli = Cli::try_parse_from(["foodwaste"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_zip_command() {
    let cli = Cli::try_parse_from(["foodwaste", "zip", "8000"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Zip { ref code }) if code == "8000"
    ));
}

#[test]
fn parses_geo_command_without_radius() {
    let cli = Cli::try_parse_from(["foodwaste", "geo", "55.676", "12.568"])
        .expect("expected valid cli args");
    let Some(command) = cli.command else {
        panic!("expected a subcommand");
    };
    assert!(matches!(command, Commands::Geo { radius: None, .. }));

    let request = command.to_request().unwrap();
    assert_eq!(
        request.to_query().query_string(),
        "geo=55.676,12.568&radius=5"
    );
}

#[test]
fn parses_geo_command_with_negative_longitude_and_radius() {
    let cli = Cli::try_parse_from(["foodwaste", "geo", "55.5", "-3.25", "--radius", "2.5"])
        .expect("expected valid cli args");
    let request = cli.command.unwrap().to_request().unwrap();
    assert_eq!(
        request.to_query().query_string(),
        "geo=55.5,-3.25&radius=2.5"
    );
}

#[test]
fn parses_store_command() {
    let cli = Cli::try_parse_from(["foodwaste", "store", "efba0457-090e-4132-81ba-c5b8ecb6cb98"])
        .expect("expected valid cli args");
    let request = cli.command.unwrap().to_request().unwrap();
    assert!(matches!(request, SearchRequest::StoreId(ref id) if id == "efba0457-090e-4132-81ba-c5b8ecb6cb98"));
}

#[test]
fn invalid_arguments_are_validation_errors() {
    let cli = Cli::try_parse_from(["foodwaste", "geo", "north", "12.5"]).unwrap();
    let err = cli.command.unwrap().to_request().unwrap_err();
    assert!(matches!(err, RunError::Validation(_)));
}

#[test]
fn zip_requires_a_code() {
    assert!(Cli::try_parse_from(["foodwaste", "zip"]).is_err());
}
