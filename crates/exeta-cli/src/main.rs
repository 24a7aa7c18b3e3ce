//! Exeta CLI - rebuild per-entity sprite sheets from packed atlases
//!
//! This binary provides the batch extractor and the lookup tools used to
//! debug catalogs and atlas directories.

mod cli_args;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands};
use exeta_cli::commands;
use exeta_cli::config::{ExtractConfig, ExtractOverrides};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

fn dispatch(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Extract {
            config,
            catalog,
            atlas_dir,
            out_dir,
            row_width,
            layout,
            no_thumbnails,
            filter,
            only,
            quiet,
            json,
            report,
        } => {
            let mut extract_config = ExtractConfig::load_or_default(config.as_deref())?;
            ExtractOverrides {
                catalog,
                atlas_dir,
                out_dir,
                row_width,
                layout,
                no_thumbnails,
                frame: filter.frame,
                direction: filter.direction,
                addon: filter.addon,
                mount: filter.mount,
                layers: filter.layers,
            }
            .apply(&mut extract_config);

            let run = commands::extract::ExtractRun {
                only,
                quiet,
                json,
                report,
            };
            commands::extract::run(&extract_config, &run)
        }
        Commands::Locate {
            atlas_dir,
            sprite,
            size,
            json,
        } => commands::locate::run(&atlas_dir, sprite, size, json),
        Commands::Inspect {
            catalog,
            id,
            filter,
            json,
        } => {
            let filter = filter
                .into_config()
                .to_filter()
                .context("Invalid sprite selection filter")?;
            commands::inspect::run(&catalog, id, &filter, json)
        }
    }
}
