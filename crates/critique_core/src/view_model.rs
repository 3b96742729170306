use std::path::PathBuf;

use crate::{ResultView, SidebarView, StepStatus, Theme, PROGRESS_STEPS};

pub const ANALYZE_LABEL: &str = "Analyze with AI";
pub const ANALYZING_LABEL: &str = "Analyzing...";
pub const NO_RAW_TEXT: &str = "No raw text found. (Run a new scan to see data)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellView {
    pub theme: Theme,
    pub document: Option<PathBuf>,
    pub submit: SubmitButtonView,
    /// `None` while the progress indicator is hidden.
    pub progress: Option<[StepStatus; PROGRESS_STEPS]>,
    pub notification: Option<String>,
    pub controls_visible: bool,
    pub result: Option<ResultView>,
    pub sidebar: SidebarView,
    /// Debug modal body, present while the modal is open.
    pub debug: Option<String>,
    pub dirty: bool,
}
