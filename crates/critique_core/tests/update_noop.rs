use critique_core::{update, AnalysisResult, Msg, ShellState};

fn assert_ignored(msg: Msg) {
    let state = ShellState::new();
    let (mut next, effects) = update(state.clone(), msg.clone());

    assert!(effects.is_empty(), "{msg:?} produced {effects:?}");
    assert!(!next.consume_dirty(), "{msg:?} dirtied the shell");
    assert_eq!(state, next, "{msg:?} changed state");
}

#[test]
fn noop_changes_nothing() {
    assert_ignored(Msg::NoOp);
}

#[test]
fn dismissing_without_a_notification_changes_nothing() {
    assert_ignored(Msg::NotificationDismissed);
}

#[test]
fn completions_without_a_submission_are_ignored() {
    assert_ignored(Msg::ProgressAdvanced { step: 2 });
    assert_ignored(Msg::AnalysisSucceeded(AnalysisResult::default()));
}
