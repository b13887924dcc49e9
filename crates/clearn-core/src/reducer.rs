use super::actions::RuntimeAction;
use super::actions::SiteAction;
use super::actions::UserAction;
use super::dialogue::PendingReply;
use super::state::ChatMessage;
use super::state::FontScale;
use super::state::SiteState;
use super::state::ThemeState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteEffect {
    PersistPreference {
        key: &'static str,
        value: &'static str,
    },
    ApplyTheme(ThemeState),
    ApplyFontScale(FontScale),
    ActivateQuote {
        previous: Option<usize>,
        index: usize,
    },
    SetChatVisible(bool),
    AppendMessage(ChatMessage),
    SetDraft(String),
    ScheduleReply(PendingReply),
    ScrollTranscriptToEnd,
}

pub fn reduce(state: &mut SiteState, action: SiteAction) -> Vec<SiteEffect> {
    match action {
        SiteAction::User(user) => reduce_user(state, user),
        SiteAction::Runtime(runtime) => reduce_runtime(state, runtime),
    }
}

/// Effects that put a freshly loaded state on screen.
pub fn initial_effects(state: &SiteState) -> Vec<SiteEffect> {
    let mut effects = state.theme.apply();
    effects.extend(state.font_scale.apply());
    effects.extend(state.carousel.apply());
    effects
}

fn reduce_user(state: &mut SiteState, action: UserAction) -> Vec<SiteEffect> {
    match action {
        UserAction::ToggleTheme => state.theme.toggle(),
        UserAction::ToggleFontScale => state.font_scale.toggle(),
        UserAction::SelectQuote(index) => state.carousel.select(index),
        UserAction::OpenChat => state.dialogue.open(),
        UserAction::CloseChat => state.dialogue.close(),
        UserAction::SetDraft(text) => state.dialogue.set_draft(text),
        UserAction::UseSuggestedPrompt(index) => state.dialogue.use_suggested_prompt(index),
        UserAction::SubmitDraft => state.dialogue.submit_draft(),
        UserAction::Submit(text) => state.dialogue.submit(&text),
    }
}

fn reduce_runtime(state: &mut SiteState, action: RuntimeAction) -> Vec<SiteEffect> {
    match action {
        RuntimeAction::CarouselTick => state.carousel.tick(),
        RuntimeAction::DeliverReply {
            session_id,
            request_id,
            text,
        } => state.dialogue.deliver_reply(session_id, request_id, text),
        RuntimeAction::TeardownChat => state.dialogue.teardown(),
    }
}

#[cfg(test)]
mod tests;
