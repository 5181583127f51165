//! Event-driven suggestion box.
//!
//! The controller owns the index, a single pending-query slot, the selection
//! cursor and the open flag. Whoever owns the event loop feeds it input,
//! focus, key and pointer events, and calls [`SuggestionController::poll`]
//! when [`SuggestionController::next_deadline`] passes. All output goes
//! through a [`SuggestionView`].

use std::time::{Duration, Instant};

use super::index::SearchIndex;
use super::loader::{load_index, PageCards, RecordSource};
use super::render::SuggestionPanel;
use crate::config::SearchConfig;

/// Rendering side of the suggestion box
pub trait SuggestionView {
    /// Replace the panel contents and make it visible
    fn show(&mut self, panel: &SuggestionPanel);
    /// Hide the panel
    fn hide(&mut self);
    /// Move the focus indicator to `index`, clearing it everywhere else
    fn set_active(&mut self, index: Option<usize>);
    /// Drop input focus
    fn blur(&mut self);
    /// Navigate the browsing context
    fn navigate(&mut self, href: &str);
    /// Submit the enclosing search form with the raw query
    fn submit(&mut self, query: &str);
}

/// Keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

/// Where a pointer interaction landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Inside,
    Outside,
}

/// Timing and gating policy
#[derive(Debug, Clone, Copy)]
pub struct ControllerSettings {
    pub debounce: Duration,
    pub min_query_len: usize,
    pub max_suggestions: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for ControllerSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            debounce: config.debounce(),
            min_query_len: config.min_query_len,
            max_suggestions: config.max_suggestions,
        }
    }
}

#[derive(Debug, Clone)]
struct PendingQuery {
    query: String,
    due: Instant,
}

pub struct SuggestionController<V: SuggestionView> {
    index: SearchIndex,
    view: V,
    settings: ControllerSettings,
    pending: Option<PendingQuery>,
    panel: Option<SuggestionPanel>,
    cursor: Option<usize>,
    open: bool,
    /// Input value as typed; only its trimmed form is gated and searched
    input: String,
}

impl<V: SuggestionView> SuggestionController<V> {
    pub fn new(index: SearchIndex, view: V, settings: ControllerSettings) -> Self {
        Self {
            index,
            view,
            settings,
            pending: None,
            panel: None,
            cursor: None,
            open: false,
            input: String::new(),
        }
    }

    /// Load the record set once (source first, page cards as fallback) and
    /// bind a controller to it.
    pub async fn load(
        source: &impl RecordSource,
        page: &impl PageCards,
        view: V,
        settings: ControllerSettings,
    ) -> Self {
        let index = load_index(source, page)
            .await
            .with_limit(settings.max_suggestions);
        tracing::debug!("Suggestion index ready with {} records", index.len());
        Self::new(index, view, settings)
    }

    /// The input value changed. Replaces any pending query.
    pub fn on_input(&mut self, value: &str, now: Instant) {
        self.input = value.to_string();
        self.pending = Some(PendingQuery {
            query: value.trim().to_string(),
            due: now + self.settings.debounce,
        });
    }

    /// Run the pending query if its quiet period has elapsed.
    ///
    /// Returns true if a query was dispatched (or the panel closed by the
    /// length gate).
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(ref p) if p.due <= now => {}
            _ => return false,
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };

        if self.qualifies(&pending.query) {
            self.show(&pending.query);
        } else {
            self.close();
        }
        true
    }

    /// When the pending query becomes due, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// The input regained focus. Reopens immediately for a qualifying query.
    pub fn on_focus(&mut self, value: &str) {
        self.input = value.to_string();
        let query = value.trim();
        if self.qualifies(query) {
            self.show(query);
        }
    }

    pub fn on_key(&mut self, key: Key) {
        match key {
            Key::ArrowDown => {
                let last = self.item_count() as isize - 1;
                let next = (self.cursor_index() + 1).min(last);
                self.set_cursor(next);
            }
            Key::ArrowUp => {
                let next = (self.cursor_index() - 1).max(-1);
                self.set_cursor(next);
            }
            Key::Enter => self.activate(),
            Key::Escape => {
                self.close();
                self.view.blur();
            }
            Key::Other => {}
        }
    }

    pub fn on_pointer(&mut self, target: PointerTarget) {
        if target == PointerTarget::Outside {
            self.close();
        }
    }

    /// Unbind from the view. Any pending query is dropped.
    pub fn teardown(mut self) -> V {
        self.pending = None;
        self.view
    }

    #[cfg(test)]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[cfg(test)]
    pub fn panel(&self) -> Option<&SuggestionPanel> {
        self.panel.as_ref()
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn qualifies(&self, query: &str) -> bool {
        query.chars().count() >= self.settings.min_query_len
    }

    fn show(&mut self, query: &str) {
        let results = self.index.search(query);
        let panel = SuggestionPanel::build(query, &results);
        self.view.show(&panel);
        self.panel = Some(panel);
        self.open = true;
        self.cursor = None;
    }

    fn close(&mut self) {
        self.view.hide();
        self.open = false;
        self.cursor = None;
    }

    fn activate(&mut self) {
        let target = self
            .cursor
            .and_then(|i| self.panel.as_ref()?.get(i))
            .map(|item| item.href().to_string());

        match target {
            Some(href) => {
                self.view.navigate(&href);
                self.close();
            }
            None => {
                let input = self.input.clone();
                self.view.submit(&input);
            }
        }
    }

    /// Rendered items the cursor can land on; zero while closed.
    fn item_count(&self) -> usize {
        match self.panel {
            Some(ref panel) if self.open => panel.len(),
            _ => 0,
        }
    }

    fn cursor_index(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    fn set_cursor(&mut self, index: isize) {
        self.cursor = usize::try_from(index).ok();
        self.view.set_active(self.cursor);
    }
}
