use std::time::Duration;

use super::carousel::QuoteCarousel;
use super::dialogue::DialogueEngine;
use super::font_scale::FontScaleController;
use super::theme::ThemeController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeState {
    #[default]
    Dark,
    Light,
}

impl ThemeState {
    /// Anything other than the exact `light` marker resolves to the default.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn stored_value(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Glyph shown on the toggle; it advertises the state a click moves to.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Dark => "☀️",
            Self::Light => "🌙",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontScale {
    #[default]
    Medium,
    Large,
}

impl FontScale {
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("large") => Self::Large,
            _ => Self::Medium,
        }
    }

    pub fn stored_value(self) -> &'static str {
        match self {
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Medium => Self::Large,
            Self::Large => Self::Medium,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Medium => "A",
            Self::Large => "A+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub const QUOTES: &[Quote] = &[
    Quote {
        text: "The beautiful thing about learning is that no one can take it away from you.",
        author: "B.B. King",
    },
    Quote {
        text: "Education is the most powerful weapon which you can use to change the world.",
        author: "Nelson Mandela",
    },
    Quote {
        text: "The future belongs to those who believe in the beauty of their dreams.",
        author: "Eleanor Roosevelt",
    },
    Quote {
        text: "Knowledge is power, but enthusiasm pulls the switch.",
        author: "Ivern Ball",
    },
    Quote {
        text: "Your career is a journey, not a destination. Embrace every step.",
        author: "Unknown",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// 1-based position in the transcript.
    pub seq: u64,
    pub ts_ms: i64,
}

#[derive(Debug, Clone)]
pub struct SiteState {
    pub theme: ThemeController,
    pub font_scale: FontScaleController,
    pub carousel: QuoteCarousel,
    pub dialogue: DialogueEngine,
}

impl SiteState {
    pub fn new(theme: ThemeState, font_scale: FontScale, reply_delay: Duration) -> Self {
        Self {
            theme: ThemeController::new(theme),
            font_scale: FontScaleController::new(font_scale),
            carousel: QuoteCarousel::new(QUOTES),
            dialogue: DialogueEngine::new(reply_delay),
        }
    }
}
