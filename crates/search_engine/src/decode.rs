use serde::Deserialize;

use crate::{FailureKind, FetchError};

/// A hit as returned by the search API. Story fields may be null for some
/// item types, so everything except the id is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiHit {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub num_comments: Option<u32>,
    #[serde(default)]
    pub points: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<ApiHit>,
    pub page: u32,
}

pub fn decode_search_page(bytes: &[u8]) -> Result<SearchResponse, FetchError> {
    serde_json::from_slice(bytes).map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
}
