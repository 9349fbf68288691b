mod action;
mod archive;
mod cli;
mod clipboard;
mod config;
mod parallel;
mod report;
mod transform;

use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

use action::{ActionContext, ActionError, KeySender, NoKeys, SystemOpener, XdotoolKeys};
use clipboard::{ClipboardResource, SystemClipboard, XclipClipboard};
use config::{ClipboardBackend, ConfigError, HotclipConfig, KeyBackend};
use parallel::ParallelResolver;

#[derive(Debug, thiserror::Error)]
enum Error {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Action(#[from] ActionError),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let name = cli.command.name();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, command = name, "command failed");
        eprintln!("hotclip {name}: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };
    let config = config::load_or_init(&path)?;
    tracing::debug!(path = %path.display(), bindings = config.bindings.len(), "config loaded");

    let clipboard: Box<dyn ClipboardResource> = match config.clipboard.backend {
        ClipboardBackend::System => Box::new(SystemClipboard::new()),
        ClipboardBackend::Xclip => Box::new(XclipClipboard::new()),
    };
    let keys: Box<dyn KeySender> = if cli.no_keys || config.keys.backend == KeyBackend::None {
        Box::new(NoKeys)
    } else {
        Box::new(XdotoolKeys)
    };
    let resolver = ParallelResolver::new(&config.parallel.prefixes);
    let archive_dir = match config.archive_dir() {
        Ok(dir) => Some(dir),
        Err(e) => {
            tracing::debug!(error = %e, "no default archive dir");
            None
        }
    };

    let ctx = ActionContext {
        clipboard: &*clipboard,
        keys: &*keys,
        opener: &SystemOpener,
        resolver: &resolver,
        policy: config.clipboard.retry,
        timing: config.timing,
        archive_dir,
    };

    dispatch(&ctx, &config, cli.command)?;
    Ok(())
}

fn dispatch(
    ctx: &ActionContext<'_>,
    config: &HotclipConfig,
    command: Command,
) -> Result<(), ActionError> {
    match command {
        Command::Case { mode } => {
            if let Some(text) = ctx.convert_clipboard_case(mode)? {
                println!("{text}");
            }
        }
        Command::Paste { text } => ctx.paste_text(&text)?,
        Command::GenId => {
            let id = ctx.generate_id_and_paste()?;
            println!("{id}");
        }
        Command::SaveUrl { url, dir } => {
            let dir = match dir {
                Some(dir) => dir,
                None => ctx.default_archive_dir()?.to_path_buf(),
            };
            let outcome = match url {
                Some(url) => Some(ctx.save_url(&url, &dir)?),
                None => ctx.save_browser_url(&dir)?,
            };
            report::print_archive(outcome.as_ref());
        }
        Command::Parallel { root, create, path } => {
            let resolution = match path {
                Some(path) => ctx.open_parallel_of(&path, &root, create)?,
                None => ctx.open_parallel_dir(&root, create)?,
            };
            report::print_resolution(&resolution);
        }
        Command::OpenClipboardUrl => {
            let opened = ctx.open_clipboard_url()?;
            report::print_opened(opened.as_deref());
        }
        Command::Bindings => report::print_bindings(&config.bindings),
        Command::Run { chord } => {
            let binding = action::find_binding(&config.bindings, &chord)
                .ok_or_else(|| ActionError::UnknownChord(chord.clone()))?;
            let outcome = ctx.run_all(&binding.actions)?;
            report::print_outcome(&chord, outcome);
        }
    }
    Ok(())
}
