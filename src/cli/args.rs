//! CLI argument definitions using clap

use std::convert::Infallible;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::InputFormat;
use crate::domain::NodeId;

/// Index flat parent-referencing records into a tree and query it
#[derive(Parser, Debug)]
#[command(name = "treestore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Items file (JSON array or TOML `[[items]]`), default: settings `default_file`
    #[arg(short, long, global = true, env = "TREESTORE_INPUT", value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Input format, default: settings `format`
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<InputFormat>,

    /// Do not print item type tags
    #[arg(long, global = true)]
    pub no_type: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all items in input order
    All,

    /// Show a single item
    Item {
        /// Item id (integers are numeric ids)
        #[arg(value_parser = parse_node_id)]
        id: NodeId,
    },

    /// List direct children
    Children {
        /// Item id
        #[arg(value_parser = parse_node_id)]
        id: NodeId,
    },

    /// List all descendants, breadth-first
    Descendants {
        /// Item id
        #[arg(value_parser = parse_node_id)]
        id: NodeId,
    },

    /// List the ancestor chain, nearest first
    Ancestors {
        /// Item id
        #[arg(value_parser = parse_node_id)]
        id: NodeId,
    },

    /// Show the hierarchy as a tree
    Tree,

    /// List items without children
    Leaves,

    /// List items without a linked parent
    Roots,

    /// Show item, root and leaf counts and tree depth
    Info,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// clap would otherwise pick `From<String>`, which never yields a numeric id.
fn parse_node_id(arg: &str) -> Result<NodeId, Infallible> {
    arg.parse()
}
