use crate::{AppState, Effect, FailureReason, Msg, PageResult, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input_term(text);
            Vec::new()
        }
        Msg::Submitted => submit(&mut state),
        Msg::LoadMoreClicked => load_more(&mut state),
        Msg::DismissClicked(hit_id) => {
            if let SessionState::Success { active_key } = state.session().clone() {
                if state.cache_mut().remove_hit(&active_key, &hit_id) {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::RestoreSearchTerm(term) => {
            if *state.session() == SessionState::Empty {
                state.set_input_term(term);
            }
            Vec::new()
        }
        Msg::FetchSucceeded(page) => {
            apply_page(&mut state, page);
            Vec::new()
        }
        Msg::FetchFailed { key, reason } => {
            apply_failure(&mut state, key, reason);
            Vec::new()
        }
        Msg::Teardown => vec![Effect::CancelAll],
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    let key = state.input_term().to_owned();
    let mut effects = vec![Effect::PersistSearchTerm(key.clone())];
    if state.cache().has(&key) {
        state.set_session(SessionState::Success { active_key: key });
    } else {
        effects.push(Effect::FetchPage {
            key: key.clone(),
            page: 0,
        });
        state.set_session(SessionState::Loading { active_key: key });
    }
    effects
}

fn load_more(state: &mut AppState) -> Vec<Effect> {
    // Only reachable from Success; the UI hides the control otherwise.
    let SessionState::Success { active_key } = state.session().clone() else {
        return Vec::new();
    };
    // No next page once the echoed page number is already at u32::MAX.
    let Some(next_page) = state
        .cache()
        .get(&active_key)
        .and_then(|entry| entry.last_page().checked_add(1))
    else {
        return Vec::new();
    };
    state.set_session(SessionState::Loading {
        active_key: active_key.clone(),
    });
    vec![Effect::FetchPage {
        key: active_key,
        page: next_page,
    }]
}

fn apply_page(state: &mut AppState, page: PageResult) {
    let query = page.query.clone();
    let is_active = state.session().active_key() == Some(query.as_str());
    let merged = state.cache_mut().append_page(&query, page);
    if !is_active {
        // Stale response: keep the cache warm, leave the display alone.
        return;
    }
    if merged {
        state.mark_dirty();
    }
    state.set_session(SessionState::Success { active_key: query });
}

fn apply_failure(state: &mut AppState, key: String, reason: FailureReason) {
    let FailureReason::Network(message) = reason else {
        return;
    };
    if state.session().active_key() != Some(key.as_str()) {
        return;
    }
    state.set_session(SessionState::Error {
        active_key: key,
        message,
    });
}
