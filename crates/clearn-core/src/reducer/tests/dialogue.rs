use super::*;
use pretty_assertions::assert_eq;

#[test]
fn blank_submissions_are_ignored() {
    let mut state = state();
    for text in ["", "   ", "\n\t "] {
        let effects = run_user(&mut state, UserAction::Submit(text.to_string()));
        assert!(effects.is_empty());
    }
    assert!(state.dialogue.transcript().is_empty());
}

#[test]
fn submit_appends_trimmed_user_message_and_schedules_reply() {
    let mut state = state();
    let effects = run_user(&mut state, UserAction::Submit("  I need help  ".to_string()));

    let transcript = state.dialogue.transcript();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].role, ChatRole::User);
    assert_eq!(transcript[0].text, "I need help");
    assert_eq!(transcript[0].seq, 1);

    assert_eq!(effects.len(), 3);
    assert!(matches!(&effects[0], SiteEffect::AppendMessage(message) if message.text == "I need help"));
    assert_eq!(effects[1], SiteEffect::SetDraft(String::new()));
    let pending = scheduled(&effects).expect("reply scheduled");
    assert_eq!(pending.prompt, "I need help");
    assert_eq!(pending.delay, REPLY_DELAY);
    assert_eq!(pending.request_id, 1);
}

#[test]
fn delivered_reply_appends_and_scrolls() {
    let mut state = state();
    let effects = run_user(&mut state, UserAction::Submit("hello".to_string()));
    let pending = scheduled(&effects).expect("reply scheduled");

    let effects = deliver(&mut state, &pending, "hi there");
    assert_eq!(effects.len(), 2);
    assert!(matches!(&effects[0], SiteEffect::AppendMessage(message)
        if message.role == ChatRole::Assistant && message.text == "hi there" && message.seq == 2));
    assert_eq!(effects[1], SiteEffect::ScrollTranscriptToEnd);
}

#[test]
fn request_ids_increase_per_submission() {
    let mut state = state();
    let first = scheduled(&run_user(&mut state, UserAction::Submit("one".to_string())))
        .expect("first");
    let second = scheduled(&run_user(&mut state, UserAction::Submit("two".to_string())))
        .expect("second");
    assert_eq!(first.session_id, second.session_id);
    assert_eq!((first.request_id, second.request_id), (1, 2));
}

#[test]
fn draft_flow_uses_suggested_prompt() {
    let mut state = state();
    let effects = run_user(&mut state, UserAction::UseSuggestedPrompt(1));
    assert_eq!(effects, vec![SiteEffect::SetDraft(SUGGESTED_PROMPTS[1].to_string())]);
    assert_eq!(
        state.dialogue.session().map(|session| session.draft()),
        Some(SUGGESTED_PROMPTS[1])
    );

    let effects = run_user(&mut state, UserAction::SubmitDraft);
    let pending = scheduled(&effects).expect("reply scheduled");
    assert_eq!(pending.prompt, SUGGESTED_PROMPTS[1]);
    assert_eq!(state.dialogue.session().map(|session| session.draft()), Some(""));
}

#[test]
fn unknown_suggested_prompt_is_ignored() {
    let mut state = state();
    let effects = run_user(&mut state, UserAction::UseSuggestedPrompt(SUGGESTED_PROMPTS.len()));
    assert!(effects.is_empty());
    assert!(state.dialogue.session().is_none());
}

#[test]
fn submitting_an_empty_draft_is_ignored() {
    let mut state = state();
    assert!(run_user(&mut state, UserAction::SubmitDraft).is_empty());
    run_user(&mut state, UserAction::SetDraft("   ".to_string()));
    assert!(run_user(&mut state, UserAction::SubmitDraft).is_empty());
    assert!(state.dialogue.transcript().is_empty());
}

#[test]
fn open_and_close_toggle_visibility_and_keep_session() {
    let mut state = state();
    assert!(state.dialogue.session().is_none());

    assert_eq!(
        run_user(&mut state, UserAction::OpenChat),
        vec![SiteEffect::SetChatVisible(true)]
    );
    assert!(run_user(&mut state, UserAction::OpenChat).is_empty());
    let session_id = state.dialogue.session().map(|session| session.id());
    assert_eq!(session_id, Some(1));

    run_user(&mut state, UserAction::Submit("hello".to_string()));
    assert_eq!(
        run_user(&mut state, UserAction::CloseChat),
        vec![SiteEffect::SetChatVisible(false)]
    );
    assert!(!state.dialogue.is_visible());
    assert_eq!(state.dialogue.transcript().len(), 1);

    run_user(&mut state, UserAction::OpenChat);
    assert_eq!(state.dialogue.session().map(|session| session.id()), session_id);
}

#[test]
fn reply_for_stale_session_is_dropped() {
    let mut state = state();
    let pending = scheduled(&run_user(&mut state, UserAction::Submit("help".to_string())))
        .expect("scheduled");
    run_runtime(&mut state, RuntimeAction::TeardownChat);
    assert!(state.dialogue.session().is_none());

    // A fresh session must not adopt the old reply either.
    run_user(&mut state, UserAction::OpenChat);
    assert_eq!(state.dialogue.session().map(|session| session.id()), Some(2));
    assert!(deliver(&mut state, &pending, "late").is_empty());
    assert!(state.dialogue.transcript().is_empty());
}

#[test]
fn replies_attach_in_delivery_order() {
    let mut state = state();
    let first = scheduled(&run_user(&mut state, UserAction::Submit("courses".to_string())))
        .expect("first");
    let second = scheduled(&run_user(&mut state, UserAction::Submit("jobs".to_string())))
        .expect("second");

    deliver(&mut state, &first, "about courses");
    deliver(&mut state, &second, "about jobs");

    let texts: Vec<&str> = state
        .dialogue
        .transcript()
        .iter()
        .map(|message| message.text.as_str())
        .collect();
    assert_eq!(texts, vec!["courses", "jobs", "about courses", "about jobs"]);
}
