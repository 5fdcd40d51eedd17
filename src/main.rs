use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config_updater::cli::orchestration::{self, WorkflowArgs};
use config_updater::config;
use config_updater::domain::UpdateOutcome;
use config_updater::git::GitCli;
use config_updater::ui::{self, ConsoleNotifier, Notifier};

#[derive(Parser)]
#[command(
    name = "config-updater",
    version,
    about = "Check a configuration checkout against upstream release tags and update it"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Working copy to manage")]
    repo: Option<PathBuf>,

    #[arg(long, global = true, help = "Offer prerelease (alpha) versions")]
    allow_unstable: bool,

    #[arg(short, long, global = true, help = "Log git invocations")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report whether a newer version is available
    Check,
    /// Check for a newer version and merge it
    Update {
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    /// List the versions on offer
    Versions,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let notifier = ConsoleNotifier;
    let workflow = WorkflowArgs {
        config_path: args.config,
        repo: args.repo,
        allow_unstable: args.allow_unstable,
    };

    let config = match config::load_config(workflow.config_path.as_deref()) {
        Ok(cfg) => workflow.apply_to(cfg),
        Err(e) => {
            notifier.outcome(&UpdateOutcome::from(e));
            std::process::exit(1);
        }
    };
    let settings = config.update_settings();

    let repo = match GitCli::open(config.repository_path()) {
        Ok(repo) => repo.with_git_binary(&config.repository.git),
        Err(e) => {
            notifier.outcome(&UpdateOutcome::from(e));
            std::process::exit(1);
        }
    };
    tracing::info!(workdir = %repo.workdir().display(), "managing working copy");

    let outcome = match args.command {
        Command::Check => {
            ui::display_status("Checking for updates...");
            orchestration::run_check(&repo, settings, &notifier)
        }
        Command::Update { yes } => {
            ui::display_status("Checking for updates...");
            let result = orchestration::run_update(&repo, settings, &notifier, |current, latest| {
                if yes {
                    Ok(true)
                } else {
                    ui::confirm_update(current, latest)
                }
            });
            match result {
                Ok(outcome) => outcome,
                Err(e) => {
                    notifier.aborted(&e);
                    std::process::exit(1);
                }
            }
        }
        Command::Versions => orchestration::run_versions(&repo, settings, &notifier),
    };

    if outcome.is_failure() {
        std::process::exit(1);
    }
}
