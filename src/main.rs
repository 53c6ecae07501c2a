use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use extlist::{
    config::Config,
    inventory::{Inventory, InventoryOptions},
    model::Browser,
    output::{default_output_path, format_report_to_string, print_report, OutputFormat},
    platform::default_profile_dir,
    profile::ProfileLayout,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "extlist")]
#[command(
    author,
    version,
    about = "List installed browser extensions and check whether they are still in the Chrome Web Store",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Profile directory, or a browser user-data directory containing `Default`
    profile: Option<PathBuf>,

    /// Where to write the report. Defaults to a timestamped
    /// `chrome-extensions-<time>.<ext>` file in the current working directory
    /// (not next to the executable)
    output: Option<PathBuf>,

    /// Browser whose default profile to use when no path is given
    /// (chrome, chromium, brave, edge, vivaldi)
    #[arg(short, long)]
    browser: Option<String>,

    /// Print the report to stdout instead of writing a file
    #[arg(long)]
    print: bool,

    /// Output format (html, json, table)
    #[arg(short, long)]
    format: Option<String>,

    /// Skip store availability checks
    #[arg(long)]
    offline: bool,

    /// Pause between store requests, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Store request timeout, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "extlist=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Config { init, path }) = cli.command {
        return handle_config(init, path);
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("ignoring unreadable config file: {}", e);
        Config::default()
    });

    if cli.offline {
        config.check_availability = false;
    }
    if let Some(ms) = cli.delay_ms {
        config.probe_delay_ms = ms;
    }
    if let Some(secs) = cli.timeout_secs {
        config.probe_timeout_secs = secs;
    }

    let format_str = cli.format.unwrap_or(config.default_format.clone());
    let format = OutputFormat::from_str(&format_str).map_err(|e| anyhow!(e))?;

    let profile_path = match cli.profile {
        Some(path) => path,
        None => {
            let browser = match cli.browser {
                Some(name) => Browser::from_str(&name).map_err(|e| anyhow!(e))?,
                None => config.default_browser,
            };
            default_profile_dir(browser)
                .ok_or_else(|| anyhow!("No {} profile found; pass a profile path", browser))?
        }
    };

    let layout = ProfileLayout::resolve(&profile_path)?;
    let options = InventoryOptions::new(layout);
    let prober = config.prober()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Exporting");

    let report = Inventory::new(options)
        .collect_with_progress(prober.as_ref(), |done, total| {
            spinner.set_message(format!("Exporting {}/{}", done, total));
        })
        .await;
    spinner.finish_and_clear();
    let report = report?;

    if cli.print {
        print_report(&report, format)?;
        return Ok(());
    }

    let path = match cli.output {
        Some(path) => path,
        None => default_output_path(&std::env::current_dir()?, report.scan_time, format),
    };
    std::fs::write(&path, format_report_to_string(&report, format)?)?;
    eprintln!(
        "Wrote {} extensions to {}",
        report.records.len(),
        path.display()
    );

    Ok(())
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'extlist config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_names_default_output_location() {
        let help = Cli::command().render_long_help().to_string();
        let help = help.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(help.contains("current working directory (not next to the executable)"));
    }

    #[test]
    fn test_positional_profile_and_output() {
        let cli = Cli::try_parse_from(["extlist", "/profile", "out.html", "--offline"]).unwrap();
        assert_eq!(cli.profile, Some(PathBuf::from("/profile")));
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
        assert!(cli.offline);
    }
}
