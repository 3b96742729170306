use std::path::PathBuf;

use crate::{AnalysisResult, ResultView, ScanId, Theme};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Start the decorative progress timers.
    StartProgressTimers,
    /// Drop every pending decorative timer.
    CancelProgressTimers,
    SubmitAnalysis {
        document: PathBuf,
        job_description: Option<String>,
    },
    RecordResult(AnalysisResult),
    SelectHistoryEntry(ScanId),
    PersistTheme(Theme),
    ExportSnapshot(SnapshotRequest),
}

/// Everything the snapshot collaborator needs, captured with controls hidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRequest {
    pub theme: Theme,
    pub view: ResultView,
    pub controls_visible: bool,
}
