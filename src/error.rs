use crate::extract::error::ExtractError;
use crate::fetch::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoramameError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}
