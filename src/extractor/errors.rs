use crate::fetcher::FetchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The page yielded too little readable text to count as an article.
    /// Terminal: the right response is "try another URL", not a retry.
    #[error("could not extract enough article text ({chars} chars)")]
    InsufficientContent { chars: usize },
}
