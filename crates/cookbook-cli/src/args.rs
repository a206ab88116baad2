use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{BackupCommands, CategoryCommands, CookArgs, ImageCommands, RecipeCommands};

/// Cookbook: a local recipe manager for the terminal
///
/// Organize recipes into categories, keep ingredients and steps in order,
/// attach photos, cook step by step and move the whole collection between
/// machines as a JSON backup.
#[derive(Parser)]
#[command(version, about, name = "cookbook")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cookbook/cookbook.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Directory holding recipe images. Defaults to an `images` directory
    /// next to the database file
    #[arg(long, global = true)]
    pub image_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Cookbook CLI
///
/// Running without a command lists the categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage categories
    #[command(alias = "c")]
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Manage recipes
    #[command(alias = "r")]
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Show a recipe as a cooking checklist
    Cook(CookArgs),
    /// Export or import a JSON backup
    #[command(alias = "b")]
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },
    /// Maintain the image directory
    Images {
        #[command(subcommand)]
        command: ImageCommands,
    },
}
