use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_trace};
use tokio_util::sync::CancellationToken;

use crate::fetch::{FetchSettings, ReqwestFetcher, SearchFetcher};
use crate::{EngineEvent, FetchError, PageRequest, RequestId};

enum EngineCommand {
    Fetch(PageRequest),
    CancelAll,
}

/// Issues page fetches on a background runtime and hands back their results.
///
/// Every request gets a generation id. `cancel_all` raises a watermark so that
/// any request issued before it resolves as cancelled, whether or not its
/// network call already finished.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
    next_id: Arc<AtomicU64>,
    cancelled_before: Arc<AtomicU64>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> std::io::Result<Self> {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn SearchFetcher>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancelled_before = Arc::new(AtomicU64::new(0));

        let watermark = cancelled_before.clone();
        thread::spawn(move || {
            let mut token = CancellationToken::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Fetch(request) => {
                        runtime.spawn(run_request(
                            fetcher.clone(),
                            request,
                            token.child_token(),
                            watermark.clone(),
                            event_tx.clone(),
                        ));
                    }
                    EngineCommand::CancelAll => {
                        token.cancel();
                        token = CancellationToken::new();
                    }
                }
            }
            engine_debug!("Engine command loop stopped");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            next_id: Arc::new(AtomicU64::new(0)),
            cancelled_before,
        })
    }

    /// Starts fetching `page` of `query`. Exactly one `PageCompleted` event
    /// follows for the returned id.
    pub fn fetch_page(&self, query: impl Into<String>, page: u32) -> RequestId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = PageRequest {
            id,
            query: query.into(),
            page,
        };
        engine_debug!(
            "Fetch request id={} page={} query={:?}",
            id,
            page,
            request.query
        );
        let _ = self.cmd_tx.send(EngineCommand::Fetch(request));
        id
    }

    /// Cancels every request issued so far.
    pub fn cancel_all(&self) {
        let watermark = self.next_id.load(Ordering::SeqCst);
        self.cancelled_before.fetch_max(watermark, Ordering::SeqCst);
        engine_info!("Cancelling all requests below id {}", watermark);
        let _ = self.cmd_tx.send(EngineCommand::CancelAll);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        let event = self.event_rx.lock().ok()?.try_recv().ok()?;
        Some(self.screen(event))
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        let event = self.event_rx.lock().ok()?.recv_timeout(timeout).ok()?;
        Some(self.screen(event))
    }

    fn is_cancelled(&self, id: RequestId) -> bool {
        id < self.cancelled_before.load(Ordering::SeqCst)
    }

    // Delivery-time check: results that raced a cancel_all are suppressed here.
    fn screen(&self, event: EngineEvent) -> EngineEvent {
        match event {
            EngineEvent::PageCompleted { request, result } => {
                let result = if self.is_cancelled(request.id) {
                    Err(FetchError::cancelled())
                } else {
                    result
                };
                EngineEvent::PageCompleted { request, result }
            }
        }
    }
}

async fn run_request(
    fetcher: Arc<dyn SearchFetcher>,
    request: PageRequest,
    token: CancellationToken,
    cancelled_before: Arc<AtomicU64>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    engine_trace!("Request id={} started", request.id);
    let result = tokio::select! {
        _ = token.cancelled() => Err(FetchError::cancelled()),
        result = fetcher.fetch_page(&request.query, request.page) => result,
    };
    let result = if request.id < cancelled_before.load(Ordering::SeqCst) {
        Err(FetchError::cancelled())
    } else {
        result
    };
    if let Err(err) = &result {
        engine_debug!("Request id={} failed: {}", request.id, err);
    }
    let _ = event_tx.send(EngineEvent::PageCompleted { request, result });
}
