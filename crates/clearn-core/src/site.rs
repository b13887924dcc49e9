use std::time::Duration;

use rand::Rng;
use tracing::debug;
use tracing::info;

use super::actions::RuntimeAction;
use super::actions::SiteAction;
use super::actions::UserAction;
use super::carousel::QuoteCarousel;
use super::config::ConfigError;
use super::config::SiteConfig;
use super::dialogue::DialogueEngine;
use super::dialogue::PendingReply;
use super::font_scale::FontScaleController;
use super::preferences::PreferenceStore;
use super::preferences::StorageBackend;
use super::reducer::SiteEffect;
use super::reducer::initial_effects;
use super::reducer::reduce;
use super::render::Control;
use super::render::LIGHT_THEME_FLAG;
use super::render::RenderSurface;
use super::reply::select_reply;
use super::scheduler::TimerQueue;
use super::state::FontScale;
use super::state::QUOTES;
use super::state::SiteState;
use super::state::ThemeState;
use super::theme::ThemeController;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SiteTimer {
    CarouselTick,
    Reply(PendingReply),
}

/// Runtime host for one page session.
///
/// Owns the reducer state together with the capabilities it needs: the
/// preference store, the timer queue and the random source for fallback
/// replies. Storage and scheduling effects are executed here; everything
/// visual goes to the [`RenderSurface`] passed into each call.
pub struct Site<B, R> {
    config: SiteConfig,
    state: SiteState,
    store: PreferenceStore<B>,
    timers: TimerQueue<SiteTimer>,
    rng: R,
}

impl<B: StorageBackend, R: Rng> Site<B, R> {
    /// Rejects configs that fail [`SiteConfig::validate`], so replies and
    /// carousel ticks always wait a non-zero delay.
    pub fn start(
        config: SiteConfig,
        backend: B,
        rng: R,
        surface: &mut dyn RenderSurface,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let store = PreferenceStore::new(backend);
        let state = SiteState {
            theme: ThemeController::from_store(&store),
            font_scale: FontScaleController::from_store(&store),
            carousel: QuoteCarousel::new(QUOTES),
            dialogue: DialogueEngine::new(config.dialogue.reply_delay()),
        };
        let mut timers = TimerQueue::new();
        timers.every(config.carousel.period(), SiteTimer::CarouselTick);
        info!(
            theme = state.theme.state().label(),
            font_scale = state.font_scale.scale().stored_value(),
            "site started"
        );

        let mut site = Self {
            config,
            state,
            store,
            timers,
            rng,
        };
        surface.mount_quote_track(&site.state.carousel.track());
        let effects = initial_effects(&site.state);
        site.run_effects(effects, surface);
        Ok(site)
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    pub fn store(&self) -> &PreferenceStore<B> {
        &self.store
    }

    /// Virtual time since start.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Time left until the next timer fires.
    pub fn until_next_timer(&self) -> Option<Duration> {
        self.timers
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.timers.now()))
    }

    /// Replies scheduled but not yet delivered.
    pub fn pending_replies(&self) -> usize {
        self.timers
            .pending()
            .filter(|timer| matches!(timer, SiteTimer::Reply(_)))
            .count()
    }

    pub fn dispatch(&mut self, action: SiteAction, surface: &mut dyn RenderSurface) {
        let effects = reduce(&mut self.state, action);
        self.run_effects(effects, surface);
    }

    /// Moves the clock forward, firing every timer that falls due on the way.
    pub fn advance(&mut self, by: Duration, surface: &mut dyn RenderSurface) {
        let until = self.timers.now().saturating_add(by);
        while let Some(timer) = self.timers.pop_due(until) {
            self.fire(timer, surface);
        }
        self.timers.advance_to(until);
    }

    pub fn toggle_theme(&mut self, surface: &mut dyn RenderSurface) {
        self.dispatch(SiteAction::User(UserAction::ToggleTheme), surface);
    }

    pub fn toggle_font_scale(&mut self, surface: &mut dyn RenderSurface) {
        self.dispatch(SiteAction::User(UserAction::ToggleFontScale), surface);
    }

    pub fn select_quote(&mut self, index: usize, surface: &mut dyn RenderSurface) {
        self.dispatch(SiteAction::User(UserAction::SelectQuote(index)), surface);
    }

    pub fn submit(&mut self, text: &str, surface: &mut dyn RenderSurface) {
        self.dispatch(
            SiteAction::User(UserAction::Submit(text.to_string())),
            surface,
        );
    }

    fn fire(&mut self, timer: SiteTimer, surface: &mut dyn RenderSurface) {
        match timer {
            SiteTimer::CarouselTick => {
                self.dispatch(SiteAction::Runtime(RuntimeAction::CarouselTick), surface);
            }
            SiteTimer::Reply(pending) => {
                let text = select_reply(&pending.prompt, &mut self.rng);
                debug!(
                    session_id = pending.session_id,
                    request_id = pending.request_id,
                    "reply due"
                );
                self.dispatch(
                    SiteAction::Runtime(RuntimeAction::DeliverReply {
                        session_id: pending.session_id,
                        request_id: pending.request_id,
                        text: text.to_string(),
                    }),
                    surface,
                );
            }
        }
    }

    fn run_effects(&mut self, effects: Vec<SiteEffect>, surface: &mut dyn RenderSurface) {
        for effect in effects {
            match effect {
                SiteEffect::PersistPreference { key, value } => self.store.set(key, value),
                SiteEffect::ScheduleReply(pending) => {
                    self.timers.after(pending.delay, SiteTimer::Reply(pending));
                }
                SiteEffect::ApplyTheme(theme) => {
                    let light = theme == ThemeState::Light;
                    surface.set_root_flag(LIGHT_THEME_FLAG, light);
                    surface.set_control(Control::ThemeToggle, theme.glyph(), light);
                }
                SiteEffect::ApplyFontScale(scale) => {
                    surface.set_root_font_size(self.config.font_scale.px_for(scale));
                    surface.set_control(
                        Control::FontScaleToggle,
                        scale.label(),
                        scale == FontScale::Large,
                    );
                }
                SiteEffect::ActivateQuote { previous, index } => {
                    if let Some(previous) = previous {
                        surface.set_quote_active(previous, false);
                    }
                    surface.set_quote_active(index, true);
                }
                SiteEffect::SetChatVisible(visible) => surface.set_chat_visible(visible),
                SiteEffect::AppendMessage(message) => surface.append_message(&message),
                SiteEffect::SetDraft(text) => surface.set_draft(&text),
                SiteEffect::ScrollTranscriptToEnd => surface.scroll_transcript_to_end(),
            }
        }
    }
}
