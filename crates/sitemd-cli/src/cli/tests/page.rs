use super::*;
use std::path::PathBuf;

#[test]
fn parse_page() {
    match parse(&["sitemd", "page"]) {
        CliCommand::Page { quiet } => assert!(!quiet),
        other => panic!("expected Page, got {:?}", other),
    }
    match parse(&["sitemd", "page", "-q"]) {
        CliCommand::Page { quiet } => assert!(quiet),
        other => panic!("expected Page, got {:?}", other),
    }
}

#[test]
fn parse_global_config_after_subcommand() {
    let cli = Cli::try_parse_from(["sitemd", "page", "--config", "/tmp/sitemd.toml"]).unwrap();
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/sitemd.toml")));
}

#[test]
fn parse_requires_subcommand() {
    assert!(Cli::try_parse_from(["sitemd"]).is_err());
}
