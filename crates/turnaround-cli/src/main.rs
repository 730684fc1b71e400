//! turnaround CLI - Ground-Handling Task Dashboard
//!
//! Command-line interface for rendering the task table, listing filter
//! options, dumping the demo dataset, and serving the login-gated dashboard.

mod commands;
mod server;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use turnaround_core::{DashboardConfig, DateScope, Selection, View};

#[derive(Parser)]
#[command(name = "turnaround")]
#[command(author, version, about = "Ground-handling task dashboard", long_about = None)]
struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (TOML)
    #[arg(short, long, env = "TURNAROUND_CONFIG", global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Row filters shared by several commands
#[derive(Args, Clone, Debug)]
struct FilterArgs {
    /// Date scope (all, today, yesterday)
    #[arg(short, long, default_value = "all")]
    date: DateScope,

    /// Restrict to an aircraft tail number (repeatable)
    #[arg(long = "aircraft", value_name = "TAIL")]
    aircraft: Vec<String>,

    /// Restrict to a flight number (repeatable)
    #[arg(long = "flight", value_name = "FLIGHT")]
    flights: Vec<String>,
}

impl FilterArgs {
    fn selection(&self) -> Selection {
        Selection::new(self.date)
            .aircraft(self.aircraft.iter().cloned())
            .flights(self.flights.iter().cloned())
    }
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the task table as HTML
    Render {
        /// Table view (all, departure, arrival)
        #[arg(long, default_value = "all")]
        view: View,

        #[command(flatten)]
        filters: FilterArgs,

        /// Emit a complete dashboard page instead of the table fragment
        #[arg(long)]
        page: bool,

        /// Leave out the table's style block
        #[arg(long)]
        no_styles: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the aircraft and flights selectable for a filter
    Options {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Dump the generated task records
    Records {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Serve the dashboard over HTTP
    Serve {
        /// Listen address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(DashboardConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Render {
            view,
            filters,
            page,
            no_styles,
            output,
        } => commands::render(
            &config,
            &commands::RenderRequest {
                view,
                selection: filters.selection(),
                page,
                styles: !no_styles,
            },
            output.as_deref(),
        ),
        Commands::Options { filters, format } => {
            commands::options(&config, &filters.selection(), format == OutputFormat::Json)
        }
        Commands::Records { format } => commands::records(&config, format == OutputFormat::Json),
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            runtime.block_on(server::serve(config, &host, port))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn render_arguments_build_selection() {
        let cli = Cli::parse_from([
            "turnaround",
            "render",
            "--view",
            "arrival",
            "--date",
            "yesterday",
            "--aircraft",
            "A1000",
            "--aircraft",
            "B2000",
            "--flight",
            "KL417",
        ]);
        let Commands::Render { view, filters, page, .. } = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(view, View::Arrival);
        assert!(!page);
        let selection = filters.selection();
        assert_eq!(selection.scope, DateScope::Yesterday);
        assert_eq!(selection.aircraft, vec!["A1000", "B2000"]);
        assert_eq!(selection.flights, vec!["KL417"]);
    }

    #[test]
    fn serve_accepts_host_names() {
        let cli = Cli::parse_from(["turnaround", "serve", "--host", "localhost", "--port", "9000"]);
        let Commands::Serve { host, port } = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(host.as_deref(), Some("localhost"));
        assert_eq!(port, Some(9000));
    }

    #[test]
    fn unknown_view_is_rejected() {
        assert!(Cli::try_parse_from(["turnaround", "render", "--view", "cargo"]).is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let missing = PathBuf::from("/nonexistent/turnaround.toml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }
}
