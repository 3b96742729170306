use std::path::PathBuf;

use crate::{AnalysisResult, HistoryEntry, ScanId, Theme};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Hydrate the shell from persisted state.
    Restored {
        theme: Theme,
        current: Option<AnalysisResult>,
        history: Vec<HistoryEntry>,
    },
    /// User picked (or cleared) the document to analyze.
    DocumentSelected(Option<PathBuf>),
    JobDescriptionChanged(String),
    SubmitClicked,
    /// A decorative timer fired; `step` (1-based) is complete.
    ProgressAdvanced { step: usize },
    AnalysisSucceeded(AnalysisResult),
    AnalysisFailed(String),
    /// The successful result is in history and is now current.
    ResultRecorded {
        current: AnalysisResult,
        history: Vec<HistoryEntry>,
    },
    HistorySelected(ScanId),
    /// A history selection replaced the current result; re-render everything.
    CurrentReplaced {
        current: AnalysisResult,
        history: Vec<HistoryEntry>,
    },
    ThemeToggled,
    DebugToggled,
    DebugDismissed,
    ExportClicked,
    ExportFinished(Result<PathBuf, String>),
    NotificationDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
