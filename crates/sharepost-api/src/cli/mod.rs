//! CLI command definitions for the `sharepost` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod dialog;
pub mod route;
pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sharepost_types::channel::ChannelType;

/// Share and move Mattermost posts between channels.
#[derive(Parser)]
#[command(name = "sharepost", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to sharepost.toml.
    #[arg(long, global = true, env = "SHAREPOST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP service the host forwards plugin traffic to.
    Serve {
        /// Host to bind to (overrides `server.host`).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `server.port`).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the share dialog that would open for a post.
    Dialog {
        /// Post the dialog is opened for.
        #[arg(long)]
        post_id: String,

        /// Type of the channel being viewed (O, P, D, G).
        #[arg(long, default_value = "O")]
        channel_type: ChannelType,

        /// Site URL (overrides `mattermost.site_url`).
        #[arg(long)]
        site_url: Option<String>,
    },

    /// Print the server route dialogs are submitted to.
    Route {
        /// Site URL (overrides `mattermost.site_url`).
        #[arg(long)]
        site_url: Option<String>,
    },
}
