use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Local;
use critique_core::{load_theme, save_theme, Effect, HistoryStore, Msg, ScanStamp};
use critique_engine::{
    export_snapshot, EngineEvent, EngineHandle, FileStateStore, HtmlSnapshotRenderer,
};
use critique_logging::{critique_debug, critique_error, critique_info, critique_warn};

use super::config::AppConfig;

/// Decorative progress schedule: step `n` completes at the given offset from
/// submission.
const PROGRESS_SCHEDULE: [(usize, Duration); 3] = [
    (1, Duration::from_millis(2_500)),
    (2, Duration::from_millis(5_000)),
    (3, Duration::from_millis(12_000)),
];

/// Executes shell effects against history, the engine and the filesystem,
/// feeding outcomes back as messages.
pub struct EffectRunner {
    history: HistoryStore<FileStateStore>,
    engine: EngineHandle,
    timers: ProgressTimers,
    export_dir: PathBuf,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, store: FileStateStore, msg_tx: mpsc::Sender<Msg>) -> Self {
        Self {
            history: HistoryStore::new(store, scan_clock),
            engine: EngineHandle::new(config.client_settings()),
            timers: ProgressTimers::default(),
            export_dir: config.export_dir.clone(),
            msg_tx,
        }
    }

    /// Message hydrating the shell from persisted state.
    pub fn restored(&self) -> Msg {
        Msg::Restored {
            theme: load_theme(self.history.state()),
            current: self.history.load_current(),
            history: self.history.list_entries(),
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartProgressTimers => self.timers.start(self.msg_tx.clone()),
                Effect::CancelProgressTimers => self.timers.cancel(),
                Effect::SubmitAnalysis {
                    document,
                    job_description,
                } => {
                    critique_info!(
                        "SubmitAnalysis document={:?} job_description_len={}",
                        document,
                        job_description.as_ref().map_or(0, String::len)
                    );
                    self.engine.submit(document, job_description);
                }
                Effect::RecordResult(result) => {
                    match self.history.record_result(result.clone()) {
                        Ok(entry) => critique_info!("Recorded scan {} ({})", entry.id, entry.name),
                        Err(err) => critique_error!("Failed to record scan: {}", err),
                    }
                    self.send(Msg::ResultRecorded {
                        current: result,
                        history: self.history.list_entries(),
                    });
                }
                Effect::SelectHistoryEntry(id) => match self.history.select_entry(id) {
                    Ok(Some(current)) => self.send(Msg::CurrentReplaced {
                        current,
                        history: self.history.list_entries(),
                    }),
                    Ok(None) => critique_debug!("No history entry with id {}", id),
                    Err(err) => critique_error!("Failed to select scan {}: {}", id, err),
                },
                Effect::PersistTheme(theme) => {
                    if let Err(err) = save_theme(self.history.state(), theme) {
                        critique_error!("Failed to persist theme: {}", err);
                    }
                }
                Effect::ExportSnapshot(request) => {
                    let outcome =
                        export_snapshot(&self.export_dir, &request, &HtmlSnapshotRenderer)
                            .map(|summary| summary.path)
                            .map_err(|err| err.to_string());
                    self.send(Msg::ExportFinished(outcome));
                }
            }
        }
    }

    /// Next engine completion, translated into a shell message.
    pub fn poll_engine(&self) -> Option<Msg> {
        let EngineEvent::AnalysisCompleted(result) = self.engine.try_recv()?;
        Some(match result {
            Ok(result) => Msg::AnalysisSucceeded(result),
            Err(err) => {
                critique_warn!("Analysis failed: {:?}", err);
                Msg::AnalysisFailed(err.to_string())
            }
        })
    }

    fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }
}

fn scan_clock() -> ScanStamp {
    let now = Local::now();
    ScanStamp {
        millis: now.timestamp_millis(),
        label: now.format("%H:%M:%S").to_string(),
    }
}

/// One schedule thread per submission. Cancelling flips the flag; a
/// thread that wakes up afterwards exits without sending.
#[derive(Default)]
struct ProgressTimers {
    cancel: Option<Arc<AtomicBool>>,
}

impl ProgressTimers {
    fn start(&mut self, msg_tx: mpsc::Sender<Msg>) {
        self.cancel();
        let cancelled = Arc::new(AtomicBool::new(false));
        self.cancel = Some(cancelled.clone());

        thread::spawn(move || {
            let started = Instant::now();
            for (step, at) in PROGRESS_SCHEDULE {
                if let Some(wait) = at.checked_sub(started.elapsed()) {
                    thread::sleep(wait);
                }
                if cancelled.load(Ordering::SeqCst)
                    || msg_tx.send(Msg::ProgressAdvanced { step }).is_err()
                {
                    return;
                }
            }
        });
    }

    fn cancel(&mut self) {
        if let Some(cancelled) = self.cancel.take() {
            cancelled.store(true, Ordering::SeqCst);
        }
    }
}

impl Drop for ProgressTimers {
    fn drop(&mut self) {
        self.cancel();
    }
}
