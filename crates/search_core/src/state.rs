use crate::view_model::{project, AppViewModel};
use crate::ResultCache;

/// Query shown in the search box of a fresh session.
pub const DEFAULT_QUERY: &str = "redux";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No search has started.
    #[default]
    Empty,
    Loading {
        active_key: String,
    },
    Success {
        active_key: String,
    },
    Error {
        active_key: String,
        message: String,
    },
}

impl SessionState {
    /// The submitted key currently on display, if any search has started.
    pub fn active_key(&self) -> Option<&str> {
        match self {
            SessionState::Empty => None,
            SessionState::Loading { active_key }
            | SessionState::Success { active_key }
            | SessionState::Error { active_key, .. } => Some(active_key),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SessionState::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    input_term: String,
    session: SessionState,
    cache: ResultCache,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_input_term(DEFAULT_QUERY)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_term(term: impl Into<String>) -> Self {
        Self {
            input_term: term.into(),
            session: SessionState::Empty,
            cache: ResultCache::new(),
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        project(&self.session, &self.cache, &self.input_term)
    }

    pub fn input_term(&self) -> &str {
        &self.input_term
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Returns whether state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input_term(&mut self, term: String) {
        if self.input_term != term {
            self.input_term = term;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_session(&mut self, session: SessionState) {
        if self.session != session {
            self.session = session;
            self.mark_dirty();
        }
    }

    pub(crate) fn cache_mut(&mut self) -> &mut ResultCache {
        &mut self.cache
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
