//! Critique core: data model, history cache, result rendering and the pure
//! presentation-shell state machine. No IO happens in this crate; persistence
//! goes through the [`StateStore`] seam.
mod effect;
mod history;
mod msg;
mod render;
mod result;
mod state;
mod state_store;
mod theme;
mod update;
mod view_model;

pub use effect::{Effect, SnapshotRequest};
pub use history::{HistoryEntry, HistoryStore, ScanStamp, HISTORY_CAPACITY, UNKNOWN_CANDIDATE};
pub use msg::Msg;
pub use render::{
    is_general_advice, render_badge, render_improvement, render_result, render_sidebar, Badge,
    BadgeKind, BadgeList, HistoryRow, ImprovementCard, ImprovementList, Polarity, ResultView,
    ScoreBar, ScoreTier, SidebarView, TierPalette, TierPolicy, CANDIDATE_FALLBACK, DEFAULT_SCORE,
    GENERIC_RATIONALE, MISSING_MARKER, NO_HISTORY, NO_POINTS, NO_SUGGESTIONS, SUMMARY_FALLBACK,
};
pub use result::{AnalysisResult, RewriteSuggestion, ScanId};
pub use state::{ShellState, ShellTiers, StepStatus, SubmitState, PROGRESS_STEPS};
pub use state_store::{MemoryStateStore, StateKey, StateStore, StoreError};
pub use theme::{load_theme, save_theme, Theme};
pub use update::{update, MISSING_DOCUMENT_MESSAGE};
pub use view_model::{ShellView, SubmitButtonView, ANALYZE_LABEL, ANALYZING_LABEL, NO_RAW_TEXT};
