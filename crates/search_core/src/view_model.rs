use crate::{Hit, ResultCache, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input_value: String,
    pub active_key: Option<String>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub hits: Vec<Hit>,
    pub can_load_more: bool,
}

/// Derives the render-ready view from session state and cache. Pure.
pub fn project(session: &SessionState, cache: &ResultCache, input_term: &str) -> AppViewModel {
    let hits = session
        .active_key()
        .and_then(|key| cache.get(key))
        .map(|entry| entry.hits().to_vec())
        .unwrap_or_default();
    let error_message = match session {
        SessionState::Error { message, .. } => Some(message.clone()),
        _ => None,
    };

    AppViewModel {
        input_value: input_term.to_owned(),
        active_key: session.active_key().map(ToOwned::to_owned),
        is_loading: session.is_loading(),
        error_message,
        hits,
        can_load_more: session.is_success(),
    }
}
