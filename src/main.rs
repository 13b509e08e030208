mod catalog;
mod config;
mod executor;
mod macos;
mod resolver;
mod services;

use anyhow::{Context, Result, bail};
use clap::Parser;
use dialoguer::{Select, theme::ColorfulTheme};
use executor::{Executor, Outcome, Selection, SystemRunner};
use macos::{AlertDialog, Toast, show_toast};
use resolver::Resolver;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Forcibly restart a macOS system process or daemon
#[derive(Parser, Debug)]
#[command(name = "sysrestart", version, about)]
struct Cli {
    /// Process label, or a service identifier with --advanced.
    /// Prompts interactively when omitted.
    target: Option<String>,

    /// Pick from currently loaded com.apple services instead of the
    /// curated list
    #[arg(long)]
    advanced: bool,

    /// Run the underlying command through sudo (overrides the config file)
    #[arg(long)]
    sudo: bool,

    /// Print the available targets and exit
    #[arg(long)]
    list: bool,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds to wait between child exit and reporting
    #[arg(long)]
    grace_ms: Option<u64>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    init_logging();
    catalog::validate().context("target catalog is inconsistent")?;

    let cli = Cli::parse();

    let cfg = match cli.config.clone().or_else(config::default_config_path) {
        Some(path) => config::load_config(&path)?,
        None => config::Config::default(),
    };
    let elevated = cli.sudo || cfg.use_sudo;
    let grace = Duration::from_millis(cli.grace_ms.unwrap_or(cfg.grace_period_ms));

    if cli.list {
        return print_targets(cli.advanced).await;
    }

    let label = match cli.target.clone() {
        Some(label) => label,
        None => match pick_target(cli.advanced).await {
            Ok(Some(label)) => label,
            // Escape at the selection prompt: a deliberate no-op.
            Ok(None) => return Ok(()),
            Err(e) => {
                show_toast(Toast::Failure, "Unable to list targets");
                return Err(e);
            }
        },
    };
    let selection = Selection {
        label,
        advanced: cli.advanced,
    };

    if !selection.label.is_empty() {
        show_toast(
            Toast::Progress,
            &format!("Restarting {}...", selection.label),
        );
    }

    let resolver = Resolver::default();
    let prompt = AlertDialog;
    let runner = SystemRunner;
    let executor = Executor::new(&resolver, &prompt, &runner, grace);

    match executor.perform(&selection, elevated).await {
        Outcome::Success { label } => {
            log::info!("{} restarted", label);
            show_toast(Toast::Success, &format!("{} restarted", label));
            Ok(())
        }
        Outcome::Declined => {
            // No toast: the user backed out, nothing happened.
            log::info!("restart declined by user");
            Ok(())
        }
        Outcome::Failure(err) => {
            log::error!("restart failed: {}", err);
            show_toast(Toast::Failure, &err.to_string());
            std::process::exit(1);
        }
    }
}

async fn print_targets(advanced: bool) -> Result<()> {
    if advanced {
        let services = services::list_system_services()
            .await
            .context("failed to enumerate system services")?;
        for service in services {
            println!("{service}");
        }
    } else {
        for label in catalog::labels() {
            println!("{label}");
        }
    }
    Ok(())
}

/// Interactive selection; Ok(None) means the user backed out with Escape.
async fn pick_target(advanced: bool) -> Result<Option<String>> {
    let items: Vec<String> = if advanced {
        let services = services::list_system_services()
            .await
            .context("failed to enumerate system services")?;
        if services.is_empty() {
            bail!("no loaded system services found");
        }
        services
    } else {
        catalog::labels().map(String::from).collect()
    };

    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Process to restart")
        .default(0)
        .items(&items)
        .interact_opt()
        .context("selection prompt failed")?;

    Ok(choice.map(|index| items[index].clone()))
}

fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:5}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}
