use tracing::debug;

use super::preferences::FONT_SCALE_KEY;
use super::preferences::PreferenceStore;
use super::preferences::StorageBackend;
use super::reducer::SiteEffect;
use super::state::FontScale;

#[derive(Debug, Clone)]
pub struct FontScaleController {
    scale: FontScale,
}

impl FontScaleController {
    pub fn new(scale: FontScale) -> Self {
        Self { scale }
    }

    pub fn from_store<B: StorageBackend>(store: &PreferenceStore<B>) -> Self {
        Self::new(FontScale::from_stored(store.get(FONT_SCALE_KEY).as_deref()))
    }

    pub fn scale(&self) -> FontScale {
        self.scale
    }

    pub fn apply(&self) -> Vec<SiteEffect> {
        vec![SiteEffect::ApplyFontScale(self.scale)]
    }

    pub fn toggle(&mut self) -> Vec<SiteEffect> {
        self.scale = self.scale.toggled();
        debug!(font_scale = self.scale.stored_value(), "font scale toggled");
        vec![
            SiteEffect::ApplyFontScale(self.scale),
            SiteEffect::PersistPreference {
                key: FONT_SCALE_KEY,
                value: self.scale.stored_value(),
            },
        ]
    }
}
