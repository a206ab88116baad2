//! Cookbook CLI Application
//!
//! Command-line interface for the cookbook recipe manager.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use cookbook_core::{params::ListCategories, CookbookBuilder};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        image_dir,
        no_color,
        command,
    } = Args::parse();

    let cookbook = CookbookBuilder::new()
        .with_database_path(database_file)
        .with_image_dir(image_dir)
        .build()
        .await
        .context("Failed to open cookbook")?;

    info!(
        "Cookbook started with database {}",
        cookbook.database_path().display()
    );

    let cli = Cli::new(cookbook, TerminalRenderer::new(!no_color));

    match command {
        Some(Category { command }) => cli.handle_category_command(command).await,
        Some(Recipe { command }) => cli.handle_recipe_command(command).await,
        Some(Cook(args)) => cli.cook(args).await,
        Some(Backup { command }) => cli.handle_backup_command(command).await,
        Some(Images { command }) => cli.handle_image_command(command).await,
        None => cli.list_categories(&ListCategories::default()).await,
    }
}
