use std::path::PathBuf;

use crate::view_model::{ShellView, SubmitButtonView, ANALYZE_LABEL, ANALYZING_LABEL, NO_RAW_TEXT};
use crate::{render_result, render_sidebar, AnalysisResult, HistoryEntry, Theme, TierPolicy};

/// Number of steps in the decorative progress indicator.
pub const PROGRESS_STEPS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepStatus {
    #[default]
    Pending,
    Active,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Ready,
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTiers {
    pub primary: TierPolicy,
    pub sidebar: TierPolicy,
}

impl Default for ShellTiers {
    fn default() -> Self {
        Self {
            primary: TierPolicy::primary(),
            sidebar: TierPolicy::sidebar(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShellState {
    theme: Theme,
    document: Option<PathBuf>,
    job_description: String,
    submit: SubmitState,
    progress_visible: bool,
    steps: [StepStatus; PROGRESS_STEPS],
    notification: Option<String>,
    debug_open: bool,
    controls_hidden: bool,
    current: Option<AnalysisResult>,
    history: Vec<HistoryEntry>,
    tiers: ShellTiers,
    dirty: bool,
}

impl ShellState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tiers(tiers: ShellTiers) -> Self {
        Self {
            tiers,
            ..Self::default()
        }
    }

    pub fn view(&self) -> ShellView {
        let in_flight = self.submit == SubmitState::InFlight;
        ShellView {
            theme: self.theme,
            document: self.document.clone(),
            submit: SubmitButtonView {
                label: if in_flight {
                    ANALYZING_LABEL
                } else {
                    ANALYZE_LABEL
                },
                enabled: !in_flight,
            },
            progress: self.progress_visible.then_some(self.steps),
            notification: self.notification.clone(),
            controls_visible: !self.controls_hidden,
            result: self
                .current
                .as_ref()
                .map(|result| render_result(result, &self.tiers.primary)),
            sidebar: render_sidebar(&self.history, &self.tiers.sidebar),
            debug: self.debug_open.then(|| self.debug_text()),
            dirty: self.dirty,
        }
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// True while a submission or an export has not settled.
    pub fn is_busy(&self) -> bool {
        self.submit == SubmitState::InFlight || self.controls_hidden
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn current(&self) -> Option<&AnalysisResult> {
        self.current.as_ref()
    }

    pub fn tiers(&self) -> &ShellTiers {
        &self.tiers
    }

    fn debug_text(&self) -> String {
        self.current
            .as_ref()
            .and_then(|result| result.raw_text.clone())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_RAW_TEXT.to_string())
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn document(&self) -> Option<&PathBuf> {
        self.document.as_ref()
    }

    pub(crate) fn job_description(&self) -> &str {
        &self.job_description
    }

    pub(crate) fn controls_hidden(&self) -> bool {
        self.controls_hidden
    }

    pub(crate) fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.mark_dirty();
    }

    pub(crate) fn set_document(&mut self, document: Option<PathBuf>) {
        self.document = document;
        self.mark_dirty();
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        self.job_description = text;
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>) {
        self.notification = Some(message.into());
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notification(&mut self) {
        if self.notification.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_submission(&mut self) {
        self.submit = SubmitState::InFlight;
        self.progress_visible = true;
        self.steps = [StepStatus::Pending; PROGRESS_STEPS];
        self.steps[0] = StepStatus::Active;
        self.mark_dirty();
    }

    /// Marks `step` (1-based) done and activates the next one.
    pub(crate) fn advance_progress(&mut self, step: usize) {
        if step == 0 || step >= PROGRESS_STEPS {
            return;
        }
        self.steps[step - 1] = StepStatus::Done;
        self.steps[step] = StepStatus::Active;
        self.mark_dirty();
    }

    pub(crate) fn complete_progress(&mut self) {
        self.steps = [StepStatus::Done; PROGRESS_STEPS];
        self.mark_dirty();
    }

    /// Back to the ready state with the progress indicator hidden.
    pub(crate) fn settle_submission(&mut self) {
        self.submit = SubmitState::Ready;
        self.progress_visible = false;
        self.steps = [StepStatus::Pending; PROGRESS_STEPS];
        self.mark_dirty();
    }

    pub(crate) fn replace_current(
        &mut self,
        current: Option<AnalysisResult>,
        history: Vec<HistoryEntry>,
    ) {
        self.current = current;
        self.history = history;
        self.mark_dirty();
    }

    pub(crate) fn toggle_debug(&mut self) {
        self.debug_open = !self.debug_open;
        self.mark_dirty();
    }

    pub(crate) fn close_debug(&mut self) {
        if self.debug_open {
            self.debug_open = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_controls_hidden(&mut self, hidden: bool) {
        self.controls_hidden = hidden;
        self.mark_dirty();
    }
}
