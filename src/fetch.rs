use serde::Deserialize;
use tracing::info;

use crate::branch::Branch;
use crate::settings::Source;

const WIKI_API_URL: &str = "https://en.wikipedia.org/w/api.php";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid API response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("wiki API error {code}: {info}")]
    Api { code: String, info: String },
    #[error("wiki API response has no page text")]
    MissingContent,
}

/// Fetches list pages, one request per call.
pub struct Fetcher {
    client: reqwest::Client,
    source: Source,
}

impl Fetcher {
    pub fn new(source: Source, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, source })
    }

    /// URL the page is requested from, for messages.
    pub fn url_for(&self, branch: Branch) -> String {
        match self.source {
            Source::Html => branch.page_url(),
            Source::Api => format!("{}?{}", WIKI_API_URL, api_query(branch.page_title())),
        }
    }

    /// Fetch the rendered article HTML for a branch.
    pub async fn fetch(&self, branch: Branch) -> Result<String, FetchError> {
        let url = self.url_for(branch);
        info!("Fetching {}", url);
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        match self.source {
            Source::Html => Ok(body),
            Source::Api => parse_api_body(&body),
        }
    }
}

fn api_query(title: &str) -> String {
    format!("action=parse&page={}&format=json&prop=text&redirects=1", title)
}

#[derive(Deserialize)]
struct ApiResponse {
    parse: Option<ParsePayload>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ParsePayload {
    text: Option<ParseText>,
}

#[derive(Deserialize)]
struct ParseText {
    #[serde(rename = "*")]
    html: String,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

/// Pull the article HTML out of an `action=parse` JSON response.
fn parse_api_body(body: &str) -> Result<String, FetchError> {
    let resp: ApiResponse = serde_json::from_str(body)?;
    if let Some(err) = resp.error {
        return Err(FetchError::Api {
            code: err.code,
            info: err.info,
        });
    }
    resp.parse
        .and_then(|p| p.text)
        .map(|t| t.html)
        .ok_or(FetchError::MissingContent)
}
