use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_migrate() {
    let cli = Cli::try_parse_from([
        "smig",
        "-v",
        "--output",
        "json",
        "migrate",
        "--app-version",
        "14.3.0",
        "--force",
    ])
    .unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.output, OutputFormat::Json);
    match cli.command {
        Commands::Migrate(args) => {
            assert_eq!(args.connection.app_version.as_deref(), Some("14.3.0"));
            assert!(args.force);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_script() {
    let cli = Cli::try_parse_from([
        "smig",
        "script",
        "--dialect",
        "mysql",
        "--app-version",
        "14.0.0",
    ])
    .unwrap();
    match cli.command {
        Commands::Script(args) => {
            assert_eq!(args.dialect, "mysql");
            assert!(!args.show);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_split_requires_file() {
    assert!(Cli::try_parse_from(["smig", "split"]).is_err());
}
