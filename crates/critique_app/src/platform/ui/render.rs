use critique_core::{
    BadgeList, ImprovementCard, ImprovementList, Polarity, ResultView, ScoreTier, ShellView,
    SidebarView, StepStatus,
};

use super::constants::*;

/// Lines shown while a submission is in flight: button label, progress and
/// any pending notification.
pub fn render_status(view: &ShellView) -> Vec<String> {
    let mut lines = vec![format!("[{}]", view.submit.label)];
    if let Some(steps) = &view.progress {
        lines.extend(
            steps
                .iter()
                .zip(STEP_LABELS)
                .map(|(status, label)| format!("  {} {}", step_marker(*status), label)),
        );
    }
    push_notification(&mut lines, view);
    lines
}

/// Full shell: notification, current result, history sidebar and the
/// debug modal when open.
pub fn render(view: &ShellView) -> Vec<String> {
    let mut lines = vec![format!("Theme: {}", view.theme.as_str())];
    push_notification(&mut lines, view);

    match &view.result {
        Some(result) => push_result(&mut lines, result),
        None => lines.push("No scan yet. Run `critique analyze <resume>`.".to_string()),
    }

    lines.push(String::new());
    lines.push("History".to_string());
    match &view.sidebar {
        SidebarView::Placeholder(message) => lines.push(format!("  {message}")),
        SidebarView::Rows(rows) => lines.extend(rows.iter().map(|row| {
            format!(
                "  #{id} {time} {name} [{score} {tier}]",
                id = row.id,
                time = row.timestamp,
                name = row.name,
                score = row.score,
                tier = tier_label(row.tier),
            )
        })),
    }

    if let Some(raw) = &view.debug {
        lines.push(String::new());
        lines.push("--- Raw extracted text ---".to_string());
        lines.extend(raw.lines().map(str::to_string));
        lines.push("---".to_string());
    }
    lines
}

fn push_notification(lines: &mut Vec<String>, view: &ShellView) {
    if let Some(message) = &view.notification {
        lines.extend(message.lines().map(|line| format!("! {line}")));
    }
}

fn push_result(lines: &mut Vec<String>, result: &ResultView) {
    lines.push(String::new());
    lines.push(format!("== {} ==", result.candidate_name));
    lines.push(format!(
        "Score: {}/100 {} ({})",
        result.score,
        score_bar(result.score_bar.width_percent),
        tier_label(result.score_bar.tier)
    ));
    lines.push(String::new());
    lines.push(format!("Summary: {}", result.summary));

    lines.push(String::new());
    lines.push("Strengths".to_string());
    push_badges(lines, &result.strengths);
    lines.push("Weaknesses".to_string());
    push_badges(lines, &result.weaknesses);

    lines.push(String::new());
    lines.push("Suggested rewrites".to_string());
    match &result.improvements {
        ImprovementList::Placeholder(message) => lines.push(format!("  {message}")),
        ImprovementList::Cards(cards) => {
            for card in cards {
                push_card(lines, card);
            }
        }
    }
}

fn push_badges(lines: &mut Vec<String>, badges: &BadgeList) {
    match badges {
        BadgeList::Placeholder(message) => lines.push(format!("  {message}")),
        BadgeList::Badges(items) => lines.extend(items.iter().map(|badge| {
            let mark = match badge.polarity {
                Polarity::Positive => '+',
                Polarity::Negative => '-',
            };
            format!("  {mark} {}", badge.text)
        })),
    }
}

fn push_card(lines: &mut Vec<String>, card: &ImprovementCard) {
    match card {
        ImprovementCard::General { advice, rationale } => {
            lines.push(format!("  * General advice: {advice}"));
            if let Some(why) = rationale {
                lines.push(format!("    Why: {why}"));
            }
        }
        ImprovementCard::Rewrite {
            original,
            improved,
            rationale,
        } => {
            lines.push(format!("  * Original: \"{original}\""));
            lines.push(format!("    Better:   \"{improved}\""));
            lines.push(format!("    {rationale}"));
        }
    }
}

fn score_bar(width_percent: u8) -> String {
    let filled = usize::from(width_percent) * SCORE_BAR_CELLS / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        " ".repeat(SCORE_BAR_CELLS - filled)
    )
}

fn step_marker(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Pending => "[ ]",
        StepStatus::Active => "[>]",
        StepStatus::Done => "[x]",
    }
}

fn tier_label(tier: ScoreTier) -> &'static str {
    match tier {
        ScoreTier::Success => "strong",
        ScoreTier::Warning => "fair",
        ScoreTier::Danger => "weak",
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use critique_core::{update, AnalysisResult, HistoryEntry, Msg, ShellState, Theme};
    use pretty_assertions::assert_eq;

    use super::*;

    fn restored(current: Option<AnalysisResult>, history: Vec<HistoryEntry>) -> ShellState {
        update(
            ShellState::new(),
            Msg::Restored {
                theme: Theme::Dark,
                current,
                history,
            },
        )
        .0
    }

    #[test]
    fn score_bar_fills_in_five_percent_cells() {
        assert_eq!(score_bar(0), format!("[{}]", " ".repeat(20)));
        assert_eq!(score_bar(52), format!("[{}{}]", "#".repeat(10), " ".repeat(10)));
        assert_eq!(score_bar(100), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn empty_shell_shows_placeholders() {
        let lines = render(&restored(None, Vec::new()).view());
        assert_eq!(lines[0], "Theme: dark");
        assert!(lines.contains(&"  No history yet.".to_string()));
    }

    #[test]
    fn result_lines_show_badges_and_cards() {
        let result: AnalysisResult = sample_result();
        let entry = HistoryEntry {
            id: 7,
            name: "Ada".to_string(),
            score: 45,
            timestamp: "08:15:00".to_string(),
            full_data: result.clone(),
        };
        let lines = render(&restored(Some(result), vec![entry]).view());

        assert!(lines.contains(&"== Ada ==".to_string()));
        assert!(lines.contains(&"  + Rust".to_string()));
        assert!(lines.contains(&"  - AWS experience".to_string()));
        assert!(lines.contains(&"  * General advice: Quantify impact".to_string()));
        assert!(lines.contains(&"  #7 08:15:00 Ada [45 weak]".to_string()));
    }

    #[test]
    fn status_lists_progress_steps() {
        let state = update(
            ShellState::new(),
            Msg::DocumentSelected(Some(PathBuf::from("cv.pdf"))),
        )
        .0;
        let state = update(state, Msg::SubmitClicked).0;

        assert_eq!(
            render_status(&state.view()),
            vec![
                "[Analyzing...]".to_string(),
                "  [>] Reading document".to_string(),
                "  [ ] Extracting experience".to_string(),
                "  [ ] Matching against the role".to_string(),
                "  [ ] Writing critique".to_string(),
            ]
        );
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            candidate_name: Some("Ada".to_string()),
            overall_score: Some(45),
            strengths: Some(vec!["Rust".to_string()]),
            weaknesses: Some(vec!["MISSING: AWS experience".to_string()]),
            improvements: Some(vec![critique_core::RewriteSuggestion::advice(
                "Quantify impact",
            )]),
            ..AnalysisResult::default()
        }
    }
}
