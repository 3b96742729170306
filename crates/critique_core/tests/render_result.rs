use critique_core::{
    render_badge, render_improvement, render_result, render_sidebar, AnalysisResult, Badge,
    BadgeKind, BadgeList, HistoryEntry, ImprovementCard, ImprovementList, Polarity,
    RewriteSuggestion, ScoreTier, SidebarView, TierPolicy, CANDIDATE_FALLBACK, DEFAULT_SCORE,
    GENERIC_RATIONALE, NO_HISTORY, NO_POINTS, NO_SUGGESTIONS, SUMMARY_FALLBACK,
};
use pretty_assertions::assert_eq;

fn with_score(score: Option<i64>) -> AnalysisResult {
    AnalysisResult {
        overall_score: score,
        ..AnalysisResult::default()
    }
}

#[test]
fn primary_tiers_are_inclusive_at_the_upper_boundary() {
    let tiers = TierPolicy::primary();
    let tier_of = |score| render_result(&with_score(Some(score)), &tiers).score_bar.tier;

    assert_eq!(tier_of(80), ScoreTier::Success);
    assert_eq!(tier_of(79), ScoreTier::Warning);
    assert_eq!(tier_of(50), ScoreTier::Warning);
    assert_eq!(tier_of(49), ScoreTier::Danger);
}

#[test]
fn sidebar_tiers_are_configured_independently() {
    let sidebar = TierPolicy {
        success_at: 70,
        warning_at: 30,
        ..TierPolicy::sidebar()
    };
    assert_eq!(sidebar.classify(70), ScoreTier::Success);
    assert_eq!(sidebar.classify(30), ScoreTier::Warning);
    assert_eq!(sidebar.classify(29), ScoreTier::Danger);
    assert_eq!(TierPolicy::primary().classify(70), ScoreTier::Warning);
    assert_ne!(TierPolicy::primary().palette, TierPolicy::sidebar().palette);
}

#[test]
fn missing_score_defaults_and_bar_is_clamped() {
    let tiers = TierPolicy::primary();
    let view = render_result(&with_score(None), &tiers);
    assert_eq!(view.score, DEFAULT_SCORE);
    assert_eq!(view.score_bar.width_percent, 50);
    assert_eq!(view.score_bar.color, "#ca8a04");

    assert_eq!(render_result(&with_score(Some(140)), &tiers).score_bar.width_percent, 100);
    assert_eq!(render_result(&with_score(Some(-3)), &tiers).score_bar.width_percent, 0);
}

#[test]
fn empty_result_renders_placeholders() {
    let view = render_result(&AnalysisResult::default(), &TierPolicy::primary());

    assert_eq!(view.candidate_name, CANDIDATE_FALLBACK);
    assert_eq!(view.summary, SUMMARY_FALLBACK);
    assert_eq!(view.strengths, BadgeList::Placeholder(NO_POINTS));
    assert_eq!(view.weaknesses, BadgeList::Placeholder(NO_POINTS));
    assert_eq!(view.improvements, ImprovementList::Placeholder(NO_SUGGESTIONS));
    assert_eq!(view.raw_text, None);
}

#[test]
fn missing_marker_is_negative_and_stripped() {
    assert_eq!(
        render_badge("MISSING: AWS experience", BadgeKind::Weakness),
        Badge {
            text: "AWS experience".to_string(),
            polarity: Polarity::Negative,
        }
    );
    // The marker flips a strength to negative too.
    assert_eq!(
        render_badge("MISSING: LDAP", BadgeKind::Strength).polarity,
        Polarity::Negative
    );
    assert_eq!(
        render_badge("Rust", BadgeKind::Strength),
        Badge {
            text: "Rust".to_string(),
            polarity: Polarity::Positive,
        }
    );
    assert_eq!(
        render_badge("Vague dates", BadgeKind::Weakness).polarity,
        Polarity::Negative
    );
}

#[test]
fn empty_lists_render_placeholders_not_empty_containers() {
    let result = AnalysisResult {
        strengths: Some(Vec::new()),
        improvements: Some(Vec::new()),
        ..AnalysisResult::default()
    };
    let view = render_result(&result, &TierPolicy::primary());
    assert_eq!(view.strengths, BadgeList::Placeholder(NO_POINTS));
    assert_eq!(view.improvements, ImprovementList::Placeholder(NO_SUGGESTIONS));
}

#[test]
fn empty_original_renders_general_advice() {
    let card = render_improvement(&RewriteSuggestion {
        original: String::new(),
        improved: "Quantify results".to_string(),
        rationale: Some("Recruiters skim".to_string()),
    });
    assert_eq!(
        card,
        ImprovementCard::General {
            advice: "Quantify results".to_string(),
            rationale: Some("Recruiters skim".to_string()),
        }
    );
}

#[test]
fn labelled_original_renders_general_advice() {
    for label in ["General", "Overall feedback", "GENERAL TIP"] {
        let card = render_improvement(&RewriteSuggestion {
            original: label.to_string(),
            improved: "Tighten wording".to_string(),
            rationale: None,
        });
        assert_eq!(
            card,
            ImprovementCard::General {
                advice: "Tighten wording".to_string(),
                rationale: None,
            },
            "label {label:?}"
        );
    }
}

#[test]
fn whitespace_original_is_still_an_excerpt() {
    let card = render_improvement(&RewriteSuggestion {
        original: "   ".to_string(),
        improved: "Lead with the outcome".to_string(),
        rationale: None,
    });
    assert_eq!(
        card,
        ImprovementCard::Rewrite {
            original: "   ".to_string(),
            improved: "Lead with the outcome".to_string(),
            rationale: GENERIC_RATIONALE.to_string(),
        }
    );
}

#[test]
fn specific_original_renders_rewrite_card() {
    let card = render_improvement(&RewriteSuggestion {
        original: "Responsible for servers".to_string(),
        improved: "Cut deploy time by 40%".to_string(),
        rationale: None,
    });
    assert_eq!(
        card,
        ImprovementCard::Rewrite {
            original: "Responsible for servers".to_string(),
            improved: "Cut deploy time by 40%".to_string(),
            rationale: GENERIC_RATIONALE.to_string(),
        }
    );
}

#[test]
fn sidebar_rows_follow_history_order() {
    let entries = vec![
        HistoryEntry {
            id: 2,
            name: "Newer".to_string(),
            score: 85,
            timestamp: "10:01:00".to_string(),
            full_data: AnalysisResult::default(),
        },
        HistoryEntry {
            id: 1,
            name: "Older".to_string(),
            score: 20,
            timestamp: "10:00:00".to_string(),
            full_data: AnalysisResult::default(),
        },
    ];

    let SidebarView::Rows(rows) = render_sidebar(&entries, &TierPolicy::sidebar()) else {
        panic!("expected rows");
    };
    assert_eq!(rows[0].id, 2);
    assert_eq!(rows[0].tier, ScoreTier::Success);
    assert_eq!(rows[0].color, "#22c55e");
    assert_eq!(rows[1].tier, ScoreTier::Danger);

    assert_eq!(
        render_sidebar(&[], &TierPolicy::sidebar()),
        SidebarView::Placeholder(NO_HISTORY)
    );
}
