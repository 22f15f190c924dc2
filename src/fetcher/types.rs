use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

/// A fetched page, decoded to UTF-8 and ready for extraction.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after redirects.
    pub url_final: Url,
    pub status: StatusCode,
    /// Body decoded from whatever charset the server/page declared.
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}
