use super::*;

fn open_with_draft(text: &str) -> ConsultationSession {
    let session = ConsultationSession::default();
    session.open();
    session.update_draft(text);
    session
}

fn success(title: &str, memo: &str) -> Result<ProposalResult, ProposalFailure> {
    Ok(ProposalResult::new(title, memo))
}

#[test]
fn starts_idle() {
    let session = ConsultationSession::default();
    assert_eq!(session.phase(), ConsultationPhase::Idle);
    assert_eq!(session.snapshot(), ConsultationState::default());
}

#[test]
fn open_is_idempotent() {
    let session = ConsultationSession::default();
    let mut rx = session.subscribe();

    session.open();
    assert!(rx.has_changed().expect("sender alive"));
    rx.borrow_and_update();

    session.open();
    assert!(!rx.has_changed().expect("sender alive"));
    assert_eq!(session.phase(), ConsultationPhase::Open);
}

#[test]
fn close_keeps_draft_and_error() {
    let mut session = open_with_draft("keep me");
    let form = FormModel::new();
    let ticket = session.submit().expect("ticket");
    session.complete(
        ProposalCompletion::new(
            ticket.generation(),
            Err(ProposalFailure::rejected(503, Some("busy".into()))),
        ),
        &form,
    );

    session.close();

    let state = session.snapshot();
    assert!(!state.is_open);
    assert_eq!(state.draft_text, "keep me");
    assert_eq!(state.error.as_deref(), Some("busy"));
}

#[test]
fn whitespace_drafts_never_submit() {
    for draft in ["", " ", "\t\n", "\u{3000}"] {
        let mut session = open_with_draft(draft);
        let mut rx = session.subscribe();

        assert_eq!(session.submit_blocker(), Some(SubmitBlocker::EmptyDraft));
        assert!(session.submit().is_none(), "draft {draft:?} must not submit");
        assert!(!rx.has_changed().expect("sender alive"));
        assert_eq!(session.pending_generation(), None);
        rx.borrow_and_update();
    }
}

#[test]
fn submit_requires_open_modal() {
    let mut session = ConsultationSession::default();
    session.update_draft("x");

    assert_eq!(session.submit_blocker(), Some(SubmitBlocker::ModalClosed));
    assert!(session.submit().is_none());
    assert!(!session.snapshot().is_loading);
}

#[test]
fn submit_enters_submitting_and_clears_error() {
    let mut session = open_with_draft("x");
    let form = FormModel::new();
    let first = session.submit().expect("first ticket");
    session.complete(
        ProposalCompletion::new(first.generation(), Err(ProposalFailure::transport("down"))),
        &form,
    );
    assert_eq!(session.snapshot().error.as_deref(), Some("down"));

    let ticket = session.submit().expect("retry ticket");

    let state = session.snapshot();
    assert_eq!(state.phase(), ConsultationPhase::Submitting);
    assert_eq!(state.error, None);
    assert_eq!(ticket.text(), "x");
    assert!(ticket.generation() > first.generation());
}

#[test]
fn submit_while_loading_is_ignored() {
    let mut session = open_with_draft("x");
    let ticket = session.submit().expect("ticket");
    let before = session.snapshot();

    assert_eq!(session.submit_blocker(), Some(SubmitBlocker::RequestInFlight));
    assert!(session.submit().is_none());
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.pending_generation(), Some(ticket.generation()));
}

#[test]
fn ticket_keeps_untrimmed_draft() {
    let mut session = open_with_draft("  いもをほりたい \n");
    let ticket = session.submit().expect("ticket");
    assert_eq!(ticket.text(), "  いもをほりたい \n");
}

#[test]
fn success_merges_form_and_closes() {
    let mut session = open_with_draft("いもをほりたい");
    let form = FormModel::new();
    let ticket = session.submit().expect("ticket");

    let disposition = session.complete(
        ProposalCompletion::new(ticket.generation(), success("芋掘り計画", "準備リスト")),
        &form,
    );

    assert_eq!(disposition, CompletionDisposition::Applied);
    assert_eq!(session.snapshot(), ConsultationState::default());
    assert_eq!(form.snapshot().title, "芋掘り計画");
    assert_eq!(form.snapshot().memo, "準備リスト");
}

#[test]
fn success_with_absent_fields_follows_policy() {
    let form = FormModel::new();
    form.set_title("old title");
    form.set_memo("old memo");

    let mut session = ConsultationSession::new(AbsentFieldPolicy::Preserve);
    session.open();
    session.update_draft("x");
    let ticket = session.submit().expect("ticket");
    session.complete(
        ProposalCompletion::new(
            ticket.generation(),
            Ok(ProposalResult {
                title: Some("new title".into()),
                memo: None,
            }),
        ),
        &form,
    );

    assert_eq!(form.snapshot().title, "new title");
    assert_eq!(form.snapshot().memo, "old memo");
}

#[test]
fn failure_keeps_modal_and_draft() {
    let mut session = open_with_draft("x");
    let form = FormModel::new();
    form.set_title("untouched");
    let ticket = session.submit().expect("ticket");

    let disposition = session.complete(
        ProposalCompletion::new(
            ticket.generation(),
            Err(ProposalFailure::rejected(500, Some("busy".into()))),
        ),
        &form,
    );

    assert_eq!(disposition, CompletionDisposition::Rejected);
    let state = session.snapshot();
    assert!(state.is_open);
    assert!(!state.is_loading);
    assert_eq!(state.draft_text, "x");
    assert_eq!(state.error.as_deref(), Some("busy"));
    assert_eq!(form.snapshot().title, "untouched");
    assert_eq!(session.phase(), ConsultationPhase::Open);
}

#[test]
fn close_during_submission_cancels_and_discards_late_result() {
    let mut session = open_with_draft("x");
    let form = FormModel::new();
    form.set_title("mine");
    let ticket = session.submit().expect("ticket");

    session.close();
    let state = session.snapshot();
    assert!(!state.is_open);
    assert!(!state.is_loading);
    assert_eq!(session.pending_generation(), None);

    let disposition = session.complete(
        ProposalCompletion::new(ticket.generation(), success("late", "late")),
        &form,
    );

    assert_eq!(disposition, CompletionDisposition::Stale);
    assert_eq!(form.snapshot().title, "mine");
    assert_eq!(session.snapshot().draft_text, "x");
}

#[test]
fn reopened_session_ignores_previous_generation() {
    let mut session = open_with_draft("first");
    let form = FormModel::new();
    let old = session.submit().expect("old ticket");
    session.close();

    session.open();
    let current = session.submit().expect("new ticket");

    assert_eq!(
        session.complete(
            ProposalCompletion::new(old.generation(), success("old", "old")),
            &form,
        ),
        CompletionDisposition::Stale
    );
    assert_eq!(session.phase(), ConsultationPhase::Submitting);

    assert_eq!(
        session.complete(
            ProposalCompletion::new(current.generation(), success("new", "new")),
            &form,
        ),
        CompletionDisposition::Applied
    );
    assert_eq!(form.snapshot().title, "new");
}

#[test]
fn loading_implies_open_across_transitions() {
    let mut session = open_with_draft("x");
    let form = FormModel::new();
    let check = |session: &ConsultationSession| {
        let state = session.snapshot();
        assert!(!state.is_loading || state.is_open, "{state:?}");
    };

    let ticket = session.submit().expect("ticket");
    check(&session);
    session.update_draft("edited while loading");
    check(&session);
    session.complete(
        ProposalCompletion::new(ticket.generation(), Err(ProposalFailure::transport("x"))),
        &form,
    );
    check(&session);
    session.submit().expect("retry");
    session.close();
    check(&session);
}
