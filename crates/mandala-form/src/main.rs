// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! mandala: terminal front end for the Mandala Creator form.
//!
//! Each input line is submitted as a thought. `:clear` empties the input and
//! dismisses an alert, `:reset` starts a fresh form (abandoning a pending
//! request) and `:quit` exits. `--once` submits a single thought and prints the outcome.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use mandala_app_core::{config::ConfigService, config_port::ConfigPort, prefs::ClientPrefs};
use mandala_client::GenerationClient;
use mandala_config_fs::FsConfigStore;
use mandala_form::terminal::{render_text, TerminalSurface};
use mandala_form::ui_effects::EffectsRunner;
use mandala_form::{Controller, FormEvent, LifecyclePhase};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn a thought into a mandala")]
struct Args {
    /// Base URL of the generation service (overrides saved prefs)
    #[arg(long)]
    endpoint: Option<String>,
    /// Transport timeout in seconds (overrides saved prefs)
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Directory holding saved prefs (defaults to the platform config dir)
    #[arg(long)]
    config_dir: Option<PathBuf>,
    /// Persist the effective prefs
    #[arg(long)]
    save_prefs: bool,
    /// Submit one thought, print the outcome and exit
    #[arg(long, value_name = "THOUGHT")]
    once: Option<String>,
}

fn load_prefs(args: &Args) -> ClientPrefs {
    let store = match &args.config_dir {
        Some(dir) => FsConfigStore::with_base(dir),
        None => FsConfigStore::new(),
    };
    let config = store
        .inspect(|s| debug!(dir = %s.base().display(), "prefs directory"))
        .map(ConfigService::new)
        .inspect_err(|err| warn!(%err, "config store unavailable; prefs won't persist"))
        .ok();
    let mut prefs = config
        .as_ref()
        .and_then(|c| c.load_prefs())
        .unwrap_or_default();

    if let Some(endpoint) = &args.endpoint {
        prefs.endpoint.clone_from(endpoint);
    }
    if let Some(secs) = args.timeout_secs {
        prefs.request_timeout_secs = Some(secs);
    }
    if args.save_prefs {
        match &config {
            Some(cfg) => cfg.save_prefs(&prefs),
            None => warn!("--save-prefs ignored: no config store"),
        }
    }
    prefs
}

async fn run_once(
    thought: String,
    runner: EffectsRunner<GenerationClient>,
    mut events: UnboundedReceiver<FormEvent>,
) -> Result<ExitCode> {
    let mut controller = Controller::new(runner, TerminalSurface::new(io::sink()));
    controller.dispatch(FormEvent::Submit(thought));
    controller.settle(&mut events).await;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(render_text(&controller.view()).as_bytes())
        .context("write result")?;
    stdout.flush()?;

    Ok(match controller.state().phase.kind() {
        LifecyclePhase::Error => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn run_interactive(
    runner: EffectsRunner<GenerationClient>,
    mut events: UnboundedReceiver<FormEvent>,
) -> Result<ExitCode> {
    let mut controller = Controller::new(runner, TerminalSurface::new(io::stdout()));
    controller.dispatch(FormEvent::Reset);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("read stdin")? else {
                    break;
                };
                let ev = match line.trim() {
                    ":quit" => break,
                    ":reset" => FormEvent::Reset,
                    ":clear" => FormEvent::InputChanged(String::new()),
                    _ => FormEvent::Submit(line.clone()),
                };
                controller.dispatch(ev);
            }
            Some(ev) = events.recv() => controller.dispatch(ev),
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let prefs = load_prefs(&args);
    let client = GenerationClient::new(&prefs.endpoint, prefs.request_timeout())
        .context("build generation client")?;
    let (tx, rx) = mpsc::unbounded_channel();
    let runner = EffectsRunner::new(client, tx, prefs.result_scroll_delay());

    match args.once {
        Some(thought) => run_once(thought, runner, rx).await,
        None => run_interactive(runner, rx).await,
    }
}
