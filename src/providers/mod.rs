//! External collaborators: the language model and the web search API
//!
//! Both sit behind traits so the insight service can be exercised with
//! stand-ins. Web search never fails from the caller's point of view; a
//! language-model failure is always reported.

pub mod openai;
pub mod serper;

pub use openai::{OpenAiClient, OpenAiConfig};
pub use serper::{SerperClient, SerperConfig};

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::YearMonth;

/// Errors from the language-model collaborator
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0} is not configured")]
    MissingCredential(&'static str),

    #[error("Request to language model failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Language model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed language model response: {0}")]
    Malformed(String),
}

/// A single chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Persona and style instructions
    pub system: String,
    /// The assembled prompt
    pub user: String,
    /// Ask the provider to return a JSON object
    pub json_output: bool,
}

/// Language-model collaborator
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Fail fast when the provider cannot be called at all (missing key)
    fn ensure_configured(&self) -> Result<(), ProviderError>;

    /// Run one chat completion and return the assistant's text
    async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError>;
}

/// Web-search collaborator
///
/// Returns a short text summary of results, or an empty string when search
/// is unavailable for any reason.
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, keyword: &str, period: YearMonth) -> String;
}

/// Build the HTTP client shared by both providers
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
