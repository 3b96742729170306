//! Pure projection of an [`AnalysisResult`] onto display state.

use serde::{Deserialize, Serialize};

use crate::{AnalysisResult, HistoryEntry, RewriteSuggestion, ScanId};

/// Score shown when the service did not return a numeric one.
pub const DEFAULT_SCORE: i64 = 50;
pub const CANDIDATE_FALLBACK: &str = "Candidate";
pub const SUMMARY_FALLBACK: &str = "No summary provided.";
pub const NO_POINTS: &str = "No specific points found.";
pub const NO_SUGGESTIONS: &str = "No specific suggestions generated.";
pub const NO_HISTORY: &str = "No history yet.";
pub const GENERIC_RATIONALE: &str = "To improve clarity and impact.";
/// Prefix the service puts on weaknesses that name an absent qualification.
pub const MISSING_MARKER: &str = "MISSING:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPalette {
    pub success: String,
    pub warning: String,
    pub danger: String,
}

/// Three ordered score tiers. A score at or above `success_at` is a success,
/// at or above `warning_at` a warning, anything lower is danger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPolicy {
    pub success_at: i64,
    pub warning_at: i64,
    pub palette: TierPalette,
}

impl TierPolicy {
    /// Tiers of the main score bar.
    pub fn primary() -> Self {
        Self {
            success_at: 80,
            warning_at: 50,
            palette: TierPalette {
                success: "#16a34a".to_string(),
                warning: "#ca8a04".to_string(),
                danger: "#dc2626".to_string(),
            },
        }
    }

    /// Tiers of the history sidebar mini-scores. Configured separately from
    /// [`TierPolicy::primary`] even though the default boundaries coincide.
    pub fn sidebar() -> Self {
        Self {
            success_at: 80,
            warning_at: 50,
            palette: TierPalette {
                success: "#22c55e".to_string(),
                warning: "#f59e0b".to_string(),
                danger: "#ef4444".to_string(),
            },
        }
    }

    pub fn classify(&self, score: i64) -> ScoreTier {
        if score >= self.success_at {
            ScoreTier::Success
        } else if score >= self.warning_at {
            ScoreTier::Warning
        } else {
            ScoreTier::Danger
        }
    }

    pub fn color(&self, tier: ScoreTier) -> &str {
        match tier {
            ScoreTier::Success => &self.palette.success,
            ScoreTier::Warning => &self.palette.warning,
            ScoreTier::Danger => &self.palette.danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBar {
    /// Fill width in percent, clamped to `0..=100`.
    pub width_percent: u8,
    pub tier: ScoreTier,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Strength,
    Weakness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub polarity: Polarity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeList {
    Badges(Vec<Badge>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImprovementCard {
    /// Single-column advice.
    General {
        advice: String,
        rationale: Option<String>,
    },
    /// Original excerpt paired with its replacement.
    Rewrite {
        original: String,
        improved: String,
        rationale: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImprovementList {
    Cards(Vec<ImprovementCard>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub candidate_name: String,
    pub score: i64,
    pub score_bar: ScoreBar,
    pub summary: String,
    pub strengths: BadgeList,
    pub weaknesses: BadgeList,
    pub improvements: ImprovementList,
    pub raw_text: Option<String>,
}

pub fn render_result(result: &AnalysisResult, tiers: &TierPolicy) -> ResultView {
    let score = result.overall_score.unwrap_or(DEFAULT_SCORE);
    let tier = tiers.classify(score);

    ResultView {
        candidate_name: result
            .candidate_name()
            .unwrap_or(CANDIDATE_FALLBACK)
            .to_string(),
        score,
        score_bar: ScoreBar {
            width_percent: score.clamp(0, 100) as u8,
            tier,
            color: tiers.color(tier).to_string(),
        },
        summary: result
            .summary
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(SUMMARY_FALLBACK)
            .to_string(),
        strengths: render_badges(result.strengths.as_deref(), BadgeKind::Strength),
        weaknesses: render_badges(result.weaknesses.as_deref(), BadgeKind::Weakness),
        improvements: render_improvements(result.improvements.as_deref()),
        raw_text: result.raw_text.clone().filter(|text| !text.is_empty()),
    }
}

fn render_badges(items: Option<&[String]>, kind: BadgeKind) -> BadgeList {
    match items {
        Some(items) if !items.is_empty() => BadgeList::Badges(
            items.iter().map(|item| render_badge(item, kind)).collect(),
        ),
        _ => BadgeList::Placeholder(NO_POINTS),
    }
}

/// A badge is negative when it comes from the weakness list or carries the
/// missing-qualification marker. The marker never reaches the display.
pub fn render_badge(item: &str, kind: BadgeKind) -> Badge {
    let flagged = item.contains(MISSING_MARKER);
    let polarity = if kind == BadgeKind::Weakness || flagged {
        Polarity::Negative
    } else {
        Polarity::Positive
    };
    Badge {
        text: item.replacen(MISSING_MARKER, "", 1).trim().to_string(),
        polarity,
    }
}

fn render_improvements(items: Option<&[RewriteSuggestion]>) -> ImprovementList {
    match items {
        Some(items) if !items.is_empty() => {
            ImprovementList::Cards(items.iter().map(render_improvement).collect())
        }
        _ => ImprovementList::Placeholder(NO_SUGGESTIONS),
    }
}

pub fn render_improvement(suggestion: &RewriteSuggestion) -> ImprovementCard {
    let rationale = suggestion
        .rationale
        .as_deref()
        .map(str::trim)
        .filter(|why| !why.is_empty());

    if is_general_advice(&suggestion.original) {
        ImprovementCard::General {
            advice: suggestion.improved.clone(),
            rationale: rationale.map(ToOwned::to_owned),
        }
    } else {
        ImprovementCard::Rewrite {
            original: suggestion.original.clone(),
            improved: suggestion.improved.clone(),
            rationale: rationale.unwrap_or(GENERIC_RATIONALE).to_string(),
        }
    }
}

/// Empty originals and ones that merely label the advice ("General feedback")
/// are not excerpts to rewrite. Whitespace-only text is still an excerpt.
pub fn is_general_advice(original: &str) -> bool {
    let lowered = original.to_lowercase();
    lowered.is_empty() || lowered.contains("general") || lowered.contains("feedback")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub id: ScanId,
    pub name: String,
    pub timestamp: String,
    pub score: i64,
    pub tier: ScoreTier,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarView {
    Rows(Vec<HistoryRow>),
    Placeholder(&'static str),
}

pub fn render_sidebar(entries: &[HistoryEntry], tiers: &TierPolicy) -> SidebarView {
    if entries.is_empty() {
        return SidebarView::Placeholder(NO_HISTORY);
    }
    SidebarView::Rows(
        entries
            .iter()
            .map(|entry| {
                let tier = tiers.classify(entry.score);
                HistoryRow {
                    id: entry.id,
                    name: entry.name.clone(),
                    timestamp: entry.timestamp.clone(),
                    score: entry.score,
                    tier,
                    color: tiers.color(tier).to_string(),
                }
            })
            .collect(),
    )
}
