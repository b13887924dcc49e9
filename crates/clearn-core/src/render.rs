use std::collections::BTreeMap;
use std::collections::BTreeSet;

use super::carousel::SlideView;
use super::state::ChatMessage;

/// Root flag switched on while the light theme is active.
pub const LIGHT_THEME_FLAG: &str = "light-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Control {
    ThemeToggle,
    FontScaleToggle,
}

/// Rendering host the site draws into. The core only writes to it; it never
/// asks the surface about layout.
pub trait RenderSurface {
    fn set_root_flag(&mut self, flag: &str, on: bool);
    fn set_root_font_size(&mut self, px: u16);
    fn set_control(&mut self, control: Control, label: &str, active: bool);
    fn mount_quote_track(&mut self, slides: &[SlideView]);
    fn set_quote_active(&mut self, index: usize, active: bool);
    fn set_chat_visible(&mut self, visible: bool);
    fn append_message(&mut self, message: &ChatMessage);
    fn set_draft(&mut self, text: &str);
    fn scroll_transcript_to_end(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub label: String,
    pub active: bool,
}

/// Surface that keeps the last rendered state in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub root_flags: BTreeSet<String>,
    pub root_font_px: Option<u16>,
    pub controls: BTreeMap<Control, ControlView>,
    pub slide_count: usize,
    pub active_quotes: BTreeSet<usize>,
    pub chat_visible: bool,
    pub messages: Vec<ChatMessage>,
    pub draft: String,
    pub scrolls: usize,
}

impl RecordingSurface {
    pub fn control(&self, control: Control) -> Option<&ControlView> {
        self.controls.get(&control)
    }
}

impl RenderSurface for RecordingSurface {
    fn set_root_flag(&mut self, flag: &str, on: bool) {
        if on {
            self.root_flags.insert(flag.to_string());
        } else {
            self.root_flags.remove(flag);
        }
    }

    fn set_root_font_size(&mut self, px: u16) {
        self.root_font_px = Some(px);
    }

    fn set_control(&mut self, control: Control, label: &str, active: bool) {
        self.controls.insert(
            control,
            ControlView {
                label: label.to_string(),
                active,
            },
        );
    }

    fn mount_quote_track(&mut self, slides: &[SlideView]) {
        self.slide_count = slides.len();
    }

    fn set_quote_active(&mut self, index: usize, active: bool) {
        if active {
            self.active_quotes.insert(index);
        } else {
            self.active_quotes.remove(&index);
        }
    }

    fn set_chat_visible(&mut self, visible: bool) {
        self.chat_visible = visible;
    }

    fn append_message(&mut self, message: &ChatMessage) {
        self.messages.push(message.clone());
    }

    fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    fn scroll_transcript_to_end(&mut self) {
        self.scrolls += 1;
    }
}
