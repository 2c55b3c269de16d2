//! Argument parsing tests for the pdfvec CLI

use clap::Parser;
use clap_complete::Shell;
use pdfvec::cli::commands::completions::write_completions;
use pdfvec::cli::{Cli, Commands, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_index_defaults() {
    let cli = Cli::try_parse_from(["pdfvec", "index"]).unwrap();

    assert_eq!(cli.format, OutputFormat::Human);
    assert!(!cli.verbose);
    match cli.command {
        Commands::Index(args) => {
            assert!(args.input.is_none());
            assert!(args.output.is_none());
            assert!(args.exclude.is_empty());
            assert!(!args.quiet);
        }
        other => panic!("expected index, got {other:?}"),
    }
}

#[test]
fn test_index_all_flags() {
    let cli = Cli::try_parse_from([
        "pdfvec",
        "--format",
        "json",
        "index",
        "papers",
        "--output",
        "out",
        "--api-key",
        "abc",
        "-e",
        "draft-*",
        "-e",
        "old-*",
        "--quiet",
        "--verbose",
    ])
    .unwrap();

    assert_eq!(cli.format, OutputFormat::Json);
    assert!(cli.verbose);
    let Commands::Index(args) = cli.command else {
        panic!("expected index");
    };
    assert_eq!(args.input, Some(PathBuf::from("papers")));
    assert_eq!(args.output, Some(PathBuf::from("out")));
    assert_eq!(args.api_key.as_deref(), Some("abc"));
    assert_eq!(args.exclude, vec!["draft-*", "old-*"]);
    assert!(args.quiet);
}

#[test]
fn test_show_config_subcommand() {
    let cli = Cli::try_parse_from(["pdfvec", "show-config", "--path"]).unwrap();
    assert!(matches!(cli.command, Commands::ShowConfig(ref args) if args.path));
}

#[test]
fn test_unknown_format_rejected() {
    assert!(Cli::try_parse_from(["pdfvec", "--format", "xml", "index"]).is_err());
}

#[test]
fn test_subcommand_required() {
    assert!(Cli::try_parse_from(["pdfvec"]).is_err());
}

#[test]
fn test_completions_mention_subcommands() {
    let mut out = Vec::new();
    write_completions(Shell::Bash, &mut out);

    let script = String::from_utf8(out).unwrap();
    assert!(script.contains("pdfvec"));
    assert!(script.contains("show-config"));
}
