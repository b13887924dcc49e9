use std::time::Duration;

pub(super) use super::initial_effects;
pub(super) use super::reduce;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::SiteAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::dialogue::PendingReply;
pub(super) use crate::dialogue::SUGGESTED_PROMPTS;
pub(super) use crate::preferences::FONT_SCALE_KEY;
pub(super) use crate::preferences::THEME_KEY;
pub(super) use crate::reducer::SiteEffect;
pub(super) use crate::state::ChatRole;
pub(super) use crate::state::FontScale;
pub(super) use crate::state::QUOTES;
pub(super) use crate::state::SiteState;
pub(super) use crate::state::ThemeState;

mod dialogue;
mod preferences_toggle;

const REPLY_DELAY: Duration = Duration::from_millis(1_000);

fn state() -> SiteState {
    SiteState::new(ThemeState::Dark, FontScale::Medium, REPLY_DELAY)
}

fn run_user(state: &mut SiteState, action: UserAction) -> Vec<SiteEffect> {
    reduce(state, SiteAction::User(action))
}

fn run_runtime(state: &mut SiteState, action: RuntimeAction) -> Vec<SiteEffect> {
    reduce(state, SiteAction::Runtime(action))
}

fn scheduled(effects: &[SiteEffect]) -> Option<PendingReply> {
    effects.iter().find_map(|effect| match effect {
        SiteEffect::ScheduleReply(pending) => Some(pending.clone()),
        _ => None,
    })
}

fn deliver(state: &mut SiteState, pending: &PendingReply, text: &str) -> Vec<SiteEffect> {
    run_runtime(
        state,
        RuntimeAction::DeliverReply {
            session_id: pending.session_id,
            request_id: pending.request_id,
            text: text.to_string(),
        },
    )
}
