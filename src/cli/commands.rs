//! Command dispatch: load the index once, then run the requested query

use std::io::{self, Write};
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::load_store_from_path;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{NodeId, TreeDisplay, TreeStore};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Completions must not depend on a readable settings file
    if let Commands::Completion { shell } = &cli.command {
        write_completions(*shell, &mut out);
        return Ok(());
    }

    let settings = Settings::load()?;
    run_command(cli, &settings, &mut out)
}

/// Run the parsed command with resolved settings, writing results to `out`.
pub fn run_command(cli: &Cli, settings: &Settings, out: &mut impl Write) -> CliResult<()> {
    if let Commands::Completion { shell } = &cli.command {
        write_completions(*shell, out);
        return Ok(());
    }

    let show_type = settings.show_type && !cli.no_type;
    let store = open_store(cli, settings)?;

    match &cli.command {
        Commands::All => output::items(out, store.iter(), show_type)?,
        Commands::Item { id } => cmd_item(out, &store, id, show_type)?,
        Commands::Children { id } => output::items(out, store.get_children(id), show_type)?,
        Commands::Descendants { id } => output::items(out, store.get_all_children(id), show_type)?,
        Commands::Ancestors { id } => cmd_ancestors(out, &store, id, show_type)?,
        Commands::Tree => output::line(out, &store.to_tree_string())?,
        Commands::Leaves => output::items(out, store.leaves(), show_type)?,
        Commands::Roots => output::items(out, store.roots(), show_type)?,
        Commands::Info => cmd_info(out, &store)?,
        Commands::Completion { .. } => {}
    }
    Ok(())
}

fn write_completions(shell: Shell, out: &mut impl Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

/// Input file from the command line, falling back to settings.
pub fn resolve_input(cli: &Cli, settings: &Settings) -> CliResult<PathBuf> {
    cli.input
        .clone()
        .or_else(|| settings.default_file.clone())
        .ok_or_else(|| {
            CliError::Usage("no input file: pass --input or set default_file in settings".into())
        })
}

#[instrument(level = "debug", skip_all)]
fn open_store(cli: &Cli, settings: &Settings) -> CliResult<TreeStore> {
    let path = resolve_input(cli, settings)?;
    let format = cli.format.unwrap_or(settings.format);
    debug!(path = %path.display(), %format, "loading items");
    Ok(load_store_from_path(&path, format)?)
}

#[instrument(level = "debug", skip(out, store))]
fn cmd_item(out: &mut impl Write, store: &TreeStore, id: &NodeId, show_type: bool) -> CliResult<()> {
    let item = store
        .get_item(id)
        .ok_or_else(|| CliError::NotFound(id.clone()))?;
    output::line(out, &output::format_item(item, show_type))?;
    Ok(())
}

fn cmd_ancestors(out: &mut impl Write, store: &TreeStore, id: &NodeId, show_type: bool) -> io::Result<()> {
    let chain = store
        .get_all_parents(id)
        .into_iter()
        .map(|item| output::format_item(item, show_type))
        .join(" <- ");
    if chain.is_empty() {
        return Ok(());
    }
    output::line(out, &chain)
}

fn cmd_info(out: &mut impl Write, store: &TreeStore) -> io::Result<()> {
    output::header(out, "Tree index")?;
    output::detail(out, "items", &store.len())?;
    output::detail(out, "roots", &store.roots().len())?;
    output::detail(out, "leaves", &store.leaves().len())?;
    output::detail(out, "depth", &store.depth())
}
