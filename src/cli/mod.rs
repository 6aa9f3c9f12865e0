//! CLI module - Command-line interface for Shiftdesk
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Shiftdesk - daily shift report service
#[derive(Parser)]
#[command(name = "shiftdesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user
    Add {
        /// Login name
        username: String,
        /// Display name
        #[arg(long)]
        full_name: String,
        /// Role (`admin` or `operator`)
        #[arg(long, default_value = crate::constants::roles::OPERATOR)]
        role: String,
        /// Initial password
        #[arg(long)]
        password: String,
    },
    /// List all users
    #[command(alias = "ls")]
    List,
}

pub use commands::*;
