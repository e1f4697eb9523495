//! Tests for CLI argument parsing and input resolution

use std::path::PathBuf;

use clap::Parser;
use rstest::rstest;

use treestore::cli::commands::resolve_input;
use treestore::cli::{Cli, CliError, Commands};
use treestore::config::Settings;
use treestore::{InputFormat, NodeId};

#[rstest]
#[case("7", NodeId::from(7))]
#[case("root", NodeId::from("root"))]
fn given_id_argument_when_parsing_then_numeric_when_possible(#[case] arg: &str, #[case] expected: NodeId) {
    let cli = Cli::try_parse_from(["treestore", "ancestors", arg]).unwrap();
    match cli.command {
        Commands::Ancestors { id } => assert_eq!(id, expected),
        other => panic!("unexpected command: {:?}", other),
    }
}

#[rstest]
#[case("item")]
#[case("children")]
#[case("descendants")]
#[case("ancestors")]
fn given_integer_argument_when_parsing_any_query_then_numeric_id(#[case] command: &str) {
    let cli = Cli::try_parse_from(["treestore", command, "1"]).unwrap();
    let id = match cli.command {
        Commands::Item { id }
        | Commands::Children { id }
        | Commands::Descendants { id }
        | Commands::Ancestors { id } => id,
        other => panic!("unexpected command: {:?}", other),
    };
    assert_eq!(id, NodeId::Num(1));
}

#[test]
fn given_global_flags_after_subcommand_when_parsing_then_accepted() {
    let cli = Cli::try_parse_from([
        "treestore", "children", "1", "--input", "items.toml", "--format", "toml", "--no-type",
    ])
    .unwrap();
    assert_eq!(cli.input, Some(PathBuf::from("items.toml")));
    assert_eq!(cli.format, Some(InputFormat::Toml));
    assert!(cli.no_type);
}

#[test]
fn given_item_without_id_when_parsing_then_error() {
    assert!(Cli::try_parse_from(["treestore", "item"]).is_err());
}

#[test]
fn given_no_input_anywhere_when_resolving_then_usage_error() {
    let cli = Cli::try_parse_from(["treestore", "all"]).unwrap();
    let err = resolve_input(&cli, &Settings::default()).unwrap_err();
    assert!(matches!(err, CliError::Usage(_)));
    assert_eq!(err.exit_code(), treestore::exitcode::USAGE);
}

#[test]
fn given_default_file_in_settings_when_resolving_then_used_unless_flag_given() {
    let settings = Settings {
        default_file: Some(PathBuf::from("/data/items.json")),
        ..Default::default()
    };

    let cli = Cli::try_parse_from(["treestore", "tree"]).unwrap();
    assert_eq!(resolve_input(&cli, &settings).unwrap(), PathBuf::from("/data/items.json"));

    let cli = Cli::try_parse_from(["treestore", "tree", "-i", "other.json"]).unwrap();
    assert_eq!(resolve_input(&cli, &settings).unwrap(), PathBuf::from("other.json"));
}
