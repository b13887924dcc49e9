use tracing::debug;
use tracing::warn;

use super::reducer::SiteEffect;
use super::state::Quote;

/// One slide of the rendered track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideView {
    /// Index into the original quote sequence.
    pub index: usize,
    pub quote: Quote,
    pub active: bool,
}

/// Fixed quote sequence with a single active position.
///
/// The position is the only mutable state, so exactly one quote is active
/// at any time. Every change is reported as `ActivateQuote { previous, index }`
/// and surfaces must clear `previous` before marking `index`.
#[derive(Debug, Clone)]
pub struct QuoteCarousel {
    quotes: &'static [Quote],
    position: usize,
}

impl QuoteCarousel {
    pub fn new(quotes: &'static [Quote]) -> Self {
        assert!(!quotes.is_empty(), "carousel needs at least one quote");
        Self {
            quotes,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn quote_count(&self) -> usize {
        self.quotes.len()
    }

    pub fn current(&self) -> &Quote {
        &self.quotes[self.position]
    }

    pub fn apply(&self) -> Vec<SiteEffect> {
        vec![SiteEffect::ActivateQuote {
            previous: None,
            index: self.position,
        }]
    }

    pub fn tick(&mut self) -> Vec<SiteEffect> {
        let next = (self.position + 1) % self.quotes.len();
        self.activate(next)
    }

    pub fn select(&mut self, index: usize) -> Vec<SiteEffect> {
        if index >= self.quotes.len() {
            warn!(index, len = self.quotes.len(), "ignoring quote selection out of range");
            return Vec::new();
        }
        self.activate(index)
    }

    /// The quote set twice over so a scrolling track wraps without a seam.
    pub fn track(&self) -> Vec<SlideView> {
        self.quotes
            .iter()
            .enumerate()
            .chain(self.quotes.iter().enumerate())
            .map(|(index, quote)| SlideView {
                index,
                quote: *quote,
                active: index == self.position,
            })
            .collect()
    }

    fn activate(&mut self, index: usize) -> Vec<SiteEffect> {
        if index == self.position {
            return Vec::new();
        }
        let previous = self.position;
        self.position = index;
        debug!(previous, index, "quote activated");
        vec![SiteEffect::ActivateQuote {
            previous: Some(previous),
            index,
        }]
    }
}
