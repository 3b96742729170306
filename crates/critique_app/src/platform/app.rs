use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use critique_core::{update, Msg, ShellState};
use critique_engine::FileStateStore;
use critique_logging::{critique_info, critique_warn};
use log::LevelFilter;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui;
use crate::cli::{Cli, Commands};

/// How long the loop waits for a message before polling the engine again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let loaded = AppConfig::load(&cli.config);
    let mut config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => AppConfig::default(),
    };
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(config.log, level);
    if let Err(err) = &loaded {
        critique_warn!("Using default configuration: {}", err);
    }

    if let Commands::Export { dir: Some(dir) } = &cli.command {
        config.export_dir = dir.clone();
    }

    let store = FileStateStore::open(&config.state_dir)
        .with_context(|| format!("opening state directory {:?}", config.state_dir))?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut runner = EffectRunner::new(&config, store, msg_tx);
    let mut shell = Shell::new(ShellState::with_tiers(config.tiers()));

    shell.dispatch(runner.restored(), &mut runner);
    for msg in command_messages(cli.command) {
        shell.dispatch(msg, &mut runner);
    }

    loop {
        while let Ok(msg) = msg_rx.try_recv() {
            shell.dispatch(msg, &mut runner);
        }
        if !shell.state.is_busy() {
            break;
        }
        if let Some(msg) = runner.poll_engine() {
            shell.dispatch(msg, &mut runner);
            continue;
        }
        if let Ok(msg) = msg_rx.recv_timeout(POLL_INTERVAL) {
            shell.dispatch(msg, &mut runner);
        }
    }

    print_lines(&ui::render::render(&shell.state.view()));
    Ok(())
}

/// The page interactions a subcommand stands for.
fn command_messages(command: Commands) -> Vec<Msg> {
    match command {
        Commands::Analyze {
            document,
            job_description,
        } => vec![
            Msg::DocumentSelected(document),
            Msg::JobDescriptionChanged(job_description.unwrap_or_default()),
            Msg::SubmitClicked,
        ],
        Commands::History => Vec::new(),
        Commands::Show { id } => id.map(Msg::HistorySelected).into_iter().collect(),
        Commands::Theme => vec![Msg::ThemeToggled],
        Commands::Debug => vec![Msg::DebugToggled],
        Commands::Export { .. } => vec![Msg::ExportClicked],
    }
}

struct Shell {
    state: ShellState,
}

impl Shell {
    fn new(state: ShellState) -> Self {
        Self { state }
    }

    fn dispatch(&mut self, msg: Msg, runner: &mut EffectRunner) {
        if let Msg::ExportFinished(Ok(path)) = &msg {
            critique_info!("Snapshot written to {:?}", path);
            println!("Exported {}", path.display());
        }

        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        let was_dirty = self.state.consume_dirty();
        runner.enqueue(effects);

        if was_dirty && self.state.is_busy() {
            print_lines(&ui::render::render_status(&self.state.view()));
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
