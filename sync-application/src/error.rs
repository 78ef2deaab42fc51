use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The only failure that aborts a whole run; everything else is scoped
    /// to one call and aggregated into the summary counts.
    #[error("calendar authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
