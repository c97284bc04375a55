use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_info, engine_warn};
use search_core::{Effect, FailureReason, Hit, Msg, PageResult};
use search_engine::{ApiHit, EngineEvent, EngineHandle, FetchError, FetchedPage};

use super::config::AppConfig;
use super::persistence;

pub struct EffectRunner {
    engine: EngineHandle,
    state_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, msg_tx: mpsc::Sender<Msg>) -> std::io::Result<Self> {
        let engine = EngineHandle::new(config.fetch_settings())?;
        let runner = Self {
            engine,
            state_dir: config.state_dir.clone(),
        };
        runner.spawn_event_loop(msg_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { key, page } => {
                    engine_info!("FetchPage page={} key_len={} key={:?}", page, key.len(), key);
                    self.engine.fetch_page(key, page);
                }
                Effect::PersistSearchTerm(term) => {
                    if let Err(err) = persistence::save_last_term(&self.state_dir, &term) {
                        engine_error!(
                            "Failed to persist search term to {:?}: {}",
                            self.state_dir,
                            err
                        );
                    }
                }
                Effect::CancelAll => self.engine.cancel_all(),
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(50)) else {
                continue;
            };
            if msg_tx.send(event_to_msg(event)).is_err() {
                break;
            }
        });
    }
}

pub(crate) fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageCompleted { request, result } => match result {
            Ok(page) => Msg::FetchSucceeded(map_page(page)),
            Err(err) => Msg::FetchFailed {
                key: request.query,
                reason: map_failure(&err),
            },
        },
    }
}

fn map_page(page: FetchedPage) -> PageResult {
    PageResult {
        query: page.query,
        page_number: page.page,
        hits: page.hits.into_iter().map(map_hit).collect(),
    }
}

fn map_hit(hit: ApiHit) -> Hit {
    Hit {
        id: hit.object_id,
        title: hit.title.unwrap_or_default(),
        url: hit.url.unwrap_or_default(),
        author: hit.author.unwrap_or_default(),
        comment_count: hit.num_comments.unwrap_or(0),
        score: hit.points.unwrap_or(0),
    }
}

fn map_failure(err: &FetchError) -> FailureReason {
    if err.is_cancelled() {
        FailureReason::Cancelled
    } else {
        engine_warn!("Fetch failed: {}", err);
        FailureReason::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use search_engine::{FailureKind, PageRequest};

    fn request(query: &str, page: u32) -> PageRequest {
        PageRequest {
            id: 0,
            query: query.to_string(),
            page,
        }
    }

    #[test]
    fn successful_page_maps_api_fields_onto_hits() {
        let event = EngineEvent::PageCompleted {
            request: request("redux", 1),
            result: Ok(FetchedPage {
                query: "redux".to_string(),
                page: 1,
                hits: vec![ApiHit {
                    object_id: "42".to_string(),
                    title: Some("Redux".to_string()),
                    url: None,
                    author: Some("dan".to_string()),
                    num_comments: Some(7),
                    points: None,
                }],
            }),
        };

        assert_eq!(
            event_to_msg(event),
            Msg::FetchSucceeded(PageResult {
                query: "redux".to_string(),
                page_number: 1,
                hits: vec![Hit {
                    id: "42".to_string(),
                    title: "Redux".to_string(),
                    url: String::new(),
                    author: "dan".to_string(),
                    comment_count: 7,
                    score: 0,
                }],
            })
        );
    }

    #[test]
    fn cancelled_and_network_failures_map_to_reasons() {
        let cancelled = EngineEvent::PageCompleted {
            request: request("redux", 0),
            result: Err(FetchError {
                kind: FailureKind::Cancelled,
                message: "request cancelled".to_string(),
            }),
        };
        assert_eq!(
            event_to_msg(cancelled),
            Msg::FetchFailed {
                key: "redux".to_string(),
                reason: FailureReason::Cancelled,
            }
        );

        let failed = EngineEvent::PageCompleted {
            request: request("redux", 0),
            result: Err(FetchError {
                kind: FailureKind::HttpStatus(503),
                message: "503 Service Unavailable".to_string(),
            }),
        };
        assert_eq!(
            event_to_msg(failed),
            Msg::FetchFailed {
                key: "redux".to_string(),
                reason: FailureReason::Network(
                    "http status 503: 503 Service Unavailable".to_string()
                ),
            }
        );
    }
}
