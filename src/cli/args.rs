//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::config::{Profile, ENV_APP_ENV};

/// Ajali incident reporting backend
#[derive(Parser, Debug)]
#[command(name = "ajali")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration profile: development, production, testing or default
    #[arg(long, global = true, env = ENV_APP_ENV, default_value = "default")]
    pub profile: Profile,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Manage the database schema
    Schema(SchemaArgs),

    /// Print the resolved configuration with secrets redacted
    Config,
}

/// Arguments for the serve command. Unset values come from the settings.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Parser, Debug)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub action: SchemaAction,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaAction {
    /// Create missing tables
    Create,
    /// Drop all tables
    Drop,
    /// Drop and recreate all tables
    Reset,
}
