//! Wikipedia (MediaWiki action API) knowledge source

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use super::{KnowledgeSource, LookupOutcome, RetrieverError};
use crate::model::KnowledgeSourceConfig;

/// Response shape of `action=query&prop=extracts`
#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    /// Keyed by page id, in the order returned by the service
    #[serde(default)]
    pages: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Page {
    extract: Option<String>,
    missing: Option<serde_json::Value>,
}

/// Retriever for Wikipedia intro extracts
pub struct WikipediaRetriever {
    client: Client,
    endpoint: Url,
    user_agent: String,
}

impl WikipediaRetriever {
    pub fn new(config: &KnowledgeSourceConfig) -> Result<Self, RetrieverError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| RetrieverError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(RetrieverError::InvalidEndpoint(config.endpoint.clone()));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Fetch the intro extract for a title
    ///
    /// `Ok(None)` when the service has no usable entry for the title.
    async fn fetch_extract(&self, title: &str) -> Result<Option<String>, RetrieverError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header("User-Agent", &self.user_agent)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        interpret_response(status, &body)
    }
}

/// Map a raw service response to the extract of its first page
fn interpret_response(status: StatusCode, body: &str) -> Result<Option<String>, RetrieverError> {
    if status != StatusCode::OK {
        return Err(RetrieverError::Status(status));
    }

    let parsed: QueryResponse =
        serde_json::from_str(body).map_err(|e| RetrieverError::ParseError(e.to_string()))?;

    let Some(first) = parsed.query.and_then(|q| q.pages.into_iter().next()) else {
        return Ok(None);
    };

    let page: Page = serde_json::from_value(first.1)
        .map_err(|e| RetrieverError::ParseError(e.to_string()))?;

    if page.missing.is_some() {
        return Ok(None);
    }

    Ok(page
        .extract
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty()))
}

#[async_trait]
impl KnowledgeSource for WikipediaRetriever {
    async fn lookup(&self, topic: &str) -> LookupOutcome {
        let title = topic.trim();
        if title.is_empty() {
            return LookupOutcome::Absent;
        }

        tracing::debug!(title = %title, "Fetching Wikipedia extract");
        let start_time = Instant::now();

        match self.fetch_extract(title).await {
            Ok(Some(text)) => {
                tracing::debug!(
                    title = %title,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    extract_length = text.len(),
                    "Wikipedia extract retrieved"
                );
                LookupOutcome::Content(text)
            }
            Ok(None) => {
                tracing::debug!(
                    title = %title,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "No Wikipedia entry for title"
                );
                LookupOutcome::Absent
            }
            Err(e) => {
                tracing::warn!(
                    title = %title,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Wikipedia lookup failed"
                );
                LookupOutcome::Failure(e.to_string())
            }
        }
    }

    fn name(&self) -> &'static str {
        "wikipedia"
    }
}
