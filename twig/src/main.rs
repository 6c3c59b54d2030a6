mod cli;
mod logging;

use clap::{Parser, Subcommand};
use cli::{CliError, CliResult};
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use twig_core::{
    config::{self, Config},
    git::{CliGitProvider, GitError, GitProvider},
    reconcile::stash_and_switch,
    state::{AppState, SessionOutcome},
};
use twig_tui::Theme;

#[derive(Parser)]
#[command(version, about = "Interactive git branch switcher with fuzzy filtering")]
struct Cli {
    /// Read settings from this TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a log file at this level (off, error, warn, info, debug, trace)
    #[arg(long, value_parser = parse_level)]
    log_level: Option<log::LevelFilter>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print local branches; the current one is marked with `*`
    List {
        #[arg(long)]
        json: bool,
    },
    /// Pick changed paths and stash only those
    Stash,
}

fn parse_level(s: &str) -> Result<log::LevelFilter, String> {
    s.parse().map_err(|_| format!("unknown log level '{s}'"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(config::load_config).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(error) => {
            cli::print_error(&CliError::config(format!("{error:#}")));
            return ExitCode::from(2);
        }
    };

    let level = match cli.log_level {
        Some(level) => Some(level),
        None => config.log_level_filter().unwrap_or_default(),
    };
    if let Some(level) = level
        && let Err(error) = logging::init(level)
    {
        eprintln!("twig: logging disabled: {error:#}");
    }

    let git: Arc<dyn GitProvider> = Arc::new(CliGitProvider::new());

    let result = check_repository(git.as_ref()).and_then(|()| match cli.command {
        Some(Commands::List { json }) => cli::cmd_list(git.as_ref(), json),
        Some(Commands::Stash) => {
            cli::cmd_stash(git.as_ref(), &Theme::from_config(&config.theme))
        }
        None => run_tui(&config, &git),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            cli::print_error(&error);
            ExitCode::from(error.code())
        }
    }
}

fn check_repository(git: &dyn GitProvider) -> CliResult<()> {
    if git.is_inside_repository() {
        Ok(())
    } else {
        Err(GitError::NotARepository.into())
    }
}

fn run_tui(config: &Config, git: &Arc<dyn GitProvider>) -> CliResult<()> {
    let branches = git.list_branches()?;
    log::info!(
        "starting on {} with {} candidate branches",
        branches.current_name().unwrap_or("(no branch)"),
        branches.len()
    );

    let mut state = AppState::new(branches);
    let theme = Theme::from_config(&config.theme);

    let mut terminal = ratatui::init();
    let outcome = twig_tui::run(&mut terminal, &mut state, git, &theme, &config.confirm);
    ratatui::restore();

    match outcome? {
        SessionOutcome::Canceled => {
            println!("user canceled");
            Ok(())
        }
        SessionOutcome::Finished(branch) => {
            let report = stash_and_switch(git.as_ref(), &branch);
            if let Some(error) = report.stash_error {
                eprintln!("twig: stash failed, switching anyway: {error}");
            }
            report.switch.map_err(CliError::from)
        }
    }
}
