//! Transport seam to the knowledge-graph query service.
//!
//! The pagination loop only sees [`SparqlService`]; the concrete HTTP
//! client lives behind it so retrieval logic can be tested without a
//! network. Transport and parse failures are distinct: the loop hard-
//! stops on the former and soft-stops on the latter.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use thiserror::Error;

use crate::retrieve::{RetrieveError, RetrieveResult};

/// Public Wikidata query service.
pub const DEFAULT_ENDPOINT: &str = "https://query.wikidata.org/sparql";

// The public endpoint rejects requests without an identifying agent.
const DEFAULT_USER_AGENT: &str = "gazkit/0.1 (gazetteer acquisition)";

/// Failure classification for one page fetch.
#[derive(Debug, Error)]
pub enum PageError {
    /// The service could not be reached or returned an error status.
    #[error("transport failure: {0}")]
    Transport(String),
    /// A response arrived but was not valid SPARQL JSON.
    #[error("response parse failure: {0}")]
    Parse(String),
}

/// A query service yielding bound literal values, one per result row.
pub trait SparqlService {
    fn query(&self, query: &str) -> Result<Vec<String>, PageError>;
}

/// Blocking HTTP implementation of [`SparqlService`].
pub struct WikidataService {
    client: Client,
    endpoint: String,
}

impl WikidataService {
    pub fn new(endpoint: impl Into<String>) -> RetrieveResult<Self> {
        Self::with_user_agent(endpoint, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(
        endpoint: impl Into<String>,
        user_agent: &str,
    ) -> RetrieveResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/sparql-results+json"),
        );
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/sparql-query"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| RetrieveError::Client(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl SparqlService for WikidataService {
    fn query(&self, query: &str) -> Result<Vec<String>, PageError> {
        let response = self
            .client
            .post(&self.endpoint)
            .body(query.to_string())
            .send()
            .map_err(|e| PageError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| PageError::Transport(e.to_string()))?;
        let parsed: SparqlResponse = response
            .json()
            .map_err(|e| PageError::Parse(e.to_string()))?;
        Ok(parsed.into_literals())
    }
}

// SPARQL 1.1 results-JSON envelope, narrowed to the single `?n` variable
// the gazetteer queries bind.

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

impl SparqlResponse {
    fn into_literals(self) -> Vec<String> {
        self.results
            .bindings
            .into_iter()
            .map(|b| b.n.value)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<SparqlBinding>,
}

#[derive(Debug, Deserialize)]
struct SparqlBinding {
    n: SparqlValue,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}
