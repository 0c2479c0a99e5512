use super::*;
use std::path::PathBuf;

#[test]
fn parse_crawl_defaults() {
    match parse(&["sitemd", "crawl", "https://example.com/docs", "out"]) {
        CliCommand::Crawl {
            url,
            output_dir,
            depth,
            quiet,
            prefix_policy,
            layout,
        } => {
            assert_eq!(url, "https://example.com/docs");
            assert_eq!(output_dir, PathBuf::from("out"));
            assert_eq!(depth, None);
            assert!(!quiet);
            assert_eq!(prefix_policy, None);
            assert_eq!(layout, None);
        }
        other => panic!("expected Crawl, got {:?}", other),
    }
}

#[test]
fn parse_crawl_all_flags() {
    let cmd = parse(&[
        "sitemd",
        "crawl",
        "https://example.com/docs",
        "docs-md",
        "-d",
        "2",
        "--quiet",
        "--prefix-policy",
        "full-path",
        "--layout",
        "nested",
    ]);
    match cmd {
        CliCommand::Crawl {
            depth,
            quiet,
            prefix_policy,
            layout,
            ..
        } => {
            assert_eq!(depth, Some(2));
            assert!(quiet);
            assert_eq!(prefix_policy, Some(PrefixPolicyArg::FullPath));
            assert_eq!(layout, Some(LayoutArg::Nested));
        }
        other => panic!("expected Crawl, got {:?}", other),
    }
}

#[test]
fn parse_crawl_requires_output_dir() {
    assert!(Cli::try_parse_from(["sitemd", "crawl", "https://example.com/docs"]).is_err());
}

#[test]
fn parse_crawl_rejects_unknown_layout() {
    assert!(Cli::try_parse_from([
        "sitemd",
        "crawl",
        "https://example.com/docs",
        "out",
        "--layout",
        "tree"
    ])
    .is_err());
}

#[test]
fn arg_enums_convert_to_core_types() {
    use sitemd_core::url_model::{Layout, PrefixPolicy};
    assert_eq!(PrefixPolicy::from(PrefixPolicyArg::StripStart), PrefixPolicy::StripStart);
    assert_eq!(Layout::from(LayoutArg::Nested), Layout::Nested);
}
