use crate::{render_result, Effect, Msg, ShellState, SnapshotRequest, SubmitState};

/// Shown when the user submits without choosing a document.
pub const MISSING_DOCUMENT_MESSAGE: &str = "Please select a file first!";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ShellState, msg: Msg) -> (ShellState, Vec<Effect>) {
    let effects = match msg {
        Msg::Restored {
            theme,
            current,
            history,
        } => {
            state.set_theme(theme);
            state.replace_current(current, history);
            Vec::new()
        }
        Msg::DocumentSelected(document) => {
            state.set_document(document);
            Vec::new()
        }
        Msg::JobDescriptionChanged(text) => {
            state.set_job_description(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.submit_state() == SubmitState::InFlight {
                return (state, Vec::new());
            }
            let Some(document) = state.document().cloned() else {
                state.notify(MISSING_DOCUMENT_MESSAGE);
                return (state, Vec::new());
            };
            let job_description = Some(state.job_description().trim())
                .filter(|text| !text.is_empty())
                .map(ToOwned::to_owned);

            state.dismiss_notification();
            state.begin_submission();
            vec![
                Effect::StartProgressTimers,
                Effect::SubmitAnalysis {
                    document,
                    job_description,
                },
            ]
        }
        Msg::ProgressAdvanced { step } => {
            // Real completion always wins; late timers are dropped.
            if state.submit_state() == SubmitState::InFlight {
                state.advance_progress(step);
            }
            Vec::new()
        }
        Msg::AnalysisSucceeded(result) => {
            if state.submit_state() != SubmitState::InFlight {
                return (state, Vec::new());
            }
            state.complete_progress();
            vec![Effect::CancelProgressTimers, Effect::RecordResult(result)]
        }
        Msg::AnalysisFailed(message) => {
            state.settle_submission();
            state.notify(format!("Analysis Failed:\n{message}"));
            vec![Effect::CancelProgressTimers]
        }
        Msg::ResultRecorded { current, history } => {
            state.settle_submission();
            state.replace_current(Some(current), history);
            Vec::new()
        }
        Msg::HistorySelected(id) => vec![Effect::SelectHistoryEntry(id)],
        Msg::CurrentReplaced { current, history } => {
            state.close_debug();
            state.replace_current(Some(current), history);
            Vec::new()
        }
        Msg::ThemeToggled => {
            let theme = state.theme().toggled();
            state.set_theme(theme);
            vec![Effect::PersistTheme(theme)]
        }
        Msg::DebugToggled => {
            state.toggle_debug();
            Vec::new()
        }
        Msg::DebugDismissed => {
            state.close_debug();
            Vec::new()
        }
        Msg::ExportClicked => {
            if state.controls_hidden() {
                return (state, Vec::new());
            }
            let Some(view) = state
                .current()
                .map(|result| render_result(result, &state.tiers().primary))
            else {
                return (state, Vec::new());
            };
            state.set_controls_hidden(true);
            vec![Effect::ExportSnapshot(SnapshotRequest {
                theme: state.theme(),
                view,
                controls_visible: !state.controls_hidden(),
            })]
        }
        Msg::ExportFinished(outcome) => {
            state.set_controls_hidden(false);
            if let Err(message) = outcome {
                state.notify(format!("Export Failed:\n{message}"));
            }
            Vec::new()
        }
        Msg::NotificationDismissed => {
            state.dismiss_notification();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
