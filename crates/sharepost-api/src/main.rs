//! sharepost CLI and HTTP service entry point.
//!
//! Binary name: `sharepost`
//!
//! Parses CLI arguments, loads `sharepost.toml`, initializes tracing, then
//! dispatches to the command handler or starts the HTTP service.

mod cli;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands};
use sharepost_infra::config::{load_service_config, resolve_config_path};
use sharepost_observe::tracing_setup::{
    TracingOptions, filter_for_verbosity, init_tracing, shutdown_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = load_service_config(&config_path).await;

    let options = TracingOptions {
        default_filter: filter_for_verbosity(cli.verbose, cli.quiet).to_string(),
        json: config.log.json,
        otel: config.log.otel,
    };
    if let Err(e) = init_tracing(&options) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }
    tracing::debug!(path = %config_path.display(), "configuration resolved");

    let site_url = config.mattermost.site_url.clone();
    let result = match cli.command {
        Commands::Serve { host, port } => cli::serve::serve(config, host, port).await,
        Commands::Dialog {
            post_id,
            channel_type,
            site_url: override_url,
        } => cli::dialog::print_dialog(&post_id, channel_type, override_url.or(site_url)),
        Commands::Route {
            site_url: override_url,
        } => cli::route::print_route(override_url.or(site_url), cli.json),
    };

    shutdown_tracing();
    result
}
