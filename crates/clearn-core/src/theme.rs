use tracing::debug;

use super::preferences::PreferenceStore;
use super::preferences::StorageBackend;
use super::preferences::THEME_KEY;
use super::reducer::SiteEffect;
use super::state::ThemeState;

#[derive(Debug, Clone)]
pub struct ThemeController {
    state: ThemeState,
}

impl ThemeController {
    pub fn new(state: ThemeState) -> Self {
        Self { state }
    }

    pub fn from_store<B: StorageBackend>(store: &PreferenceStore<B>) -> Self {
        Self::new(ThemeState::from_stored(store.get(THEME_KEY).as_deref()))
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    /// Re-applies the current state without touching storage.
    pub fn apply(&self) -> Vec<SiteEffect> {
        vec![SiteEffect::ApplyTheme(self.state)]
    }

    pub fn toggle(&mut self) -> Vec<SiteEffect> {
        self.state = self.state.toggled();
        debug!(theme = self.state.label(), "theme toggled");
        vec![
            SiteEffect::ApplyTheme(self.state),
            SiteEffect::PersistPreference {
                key: THEME_KEY,
                value: self.state.stored_value(),
            },
        ]
    }
}
