use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use reqwest::Url;

use crate::{decode_search_page, FailureKind, FetchError, FetchedPage};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub hits_per_page: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://hn.algolia.com/api/v1".to_string(),
            hits_per_page: 100,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Builds `{base}/search?query={query}&page={page}&hitsPerPage={size}`.
///
/// The query is form-encoded as a single parameter, so characters such as
/// `#`, `&` and `+` reach the server as part of the key.
pub fn build_search_url(
    base_url: &str,
    query: &str,
    page: u32,
    hits_per_page: u32,
) -> Result<Url, FetchError> {
    let mut url = Url::parse(&format!("{}/search", base_url.trim_end_matches('/')))
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.query_pairs_mut()
        .append_pair("query", query)
        .append_pair("page", &page.to_string())
        .append_pair("hitsPerPage", &hits_per_page.to_string());
    Ok(url)
}

#[async_trait::async_trait]
pub trait SearchFetcher: Send + Sync {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<FetchedPage, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl SearchFetcher for ReqwestFetcher {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<FetchedPage, FetchError> {
        let url = build_search_url(
            &self.settings.base_url,
            query,
            page,
            self.settings.hits_per_page,
        )?;
        let client = self.build_client()?;
        engine_debug!("GET {}", url);

        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_search_page(&bytes)?;
        Ok(FetchedPage {
            query: query.to_string(),
            page: decoded.page,
            hits: decoded.hits,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_query_page_and_page_size() {
        let url = build_search_url("https://hn.example.com/api/v1/", "redux", 2, 100).unwrap();
        assert_eq!(
            url.as_str(),
            "https://hn.example.com/api/v1/search?query=redux&page=2&hitsPerPage=100"
        );
    }

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn expected(query: &str, page: &str, size: &str) -> Vec<(String, String)> {
        vec![
            ("query".to_string(), query.to_string()),
            ("page".to_string(), page.to_string()),
            ("hitsPerPage".to_string(), size.to_string()),
        ]
    }

    #[test]
    fn query_is_not_normalized() {
        let url = build_search_url("https://hn.example.com", "Rust Lang", 0, 10).unwrap();
        assert_eq!(pairs(&url), expected("Rust Lang", "0", "10"));
    }

    #[test]
    fn reserved_characters_stay_inside_the_query() {
        for key in ["C#", "AT&T", "c++", "a=b?c"] {
            let url = build_search_url("https://hn.example.com", key, 3, 10).unwrap();
            assert_eq!(url.fragment(), None, "key {key:?}");
            assert_eq!(pairs(&url), expected(key, "3", "10"), "key {key:?}");
        }
    }

    #[test]
    fn bad_base_is_invalid_url() {
        let err = build_search_url("not a base", "q", 0, 10).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
