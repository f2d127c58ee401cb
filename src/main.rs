//! Siteframe - codec and editor for siteframe payloads.

mod cli;
mod commands;
mod config;
mod editor;
mod io;
mod logger;
mod siteframe;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::ToolConfig;
use io::{Output, read_input};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::set_quiet(cli.quiet);

    let config = ToolConfig::load(&cli)?;
    if let Some(path) = &config.config_path {
        log!("config"; "loaded {}", path.display());
    }

    let payload = read_input(&cli.command.input().input)?;
    let out = Output::new(cli.output.as_deref(), &config);

    run(&cli.command, &payload, &config, &out)
}

fn run(command: &Commands, payload: &str, config: &ToolConfig, out: &Output) -> Result<()> {
    match command {
        Commands::Normalize { .. } => commands::normalize(payload, out),
        Commands::Parse { .. } => commands::parse(payload, out),
        Commands::Format { check, .. } => commands::format(payload, *check, config, out),
        Commands::Render { .. } => commands::render(payload, config, out),
        Commands::Edit { edits, .. } => commands::edit(payload, edits, config, out),
        Commands::Buttons { .. } => commands::buttons(payload, config, out),
        Commands::Patch {
            search,
            replace,
            full,
            ..
        } => commands::patch(
            payload,
            search.as_deref(),
            replace.as_deref(),
            full.as_deref(),
            out,
        ),
        Commands::Stats { .. } => commands::stats(payload, out),
    }
}
