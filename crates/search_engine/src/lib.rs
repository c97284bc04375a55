//! Search engine: HTTP fetching, response decoding and request control.
mod decode;
mod engine;
mod fetch;
mod types;

pub use decode::{decode_search_page, ApiHit, SearchResponse};
pub use engine::EngineHandle;
pub use fetch::{build_search_url, FetchSettings, ReqwestFetcher, SearchFetcher};
pub use types::{EngineEvent, FailureKind, FetchError, FetchedPage, PageRequest, RequestId};
