use async_trait::async_trait;

use crate::entities::{Credentials, EventDraft, RawEvent, RemoteEvent};

/// A scraper collaborator. Each source yields raw listings; how they are
/// extracted from a page is not this engine's concern.
#[async_trait]
pub trait EventSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_events(&self) -> anyhow::Result<Vec<RawEvent>>;
}

/// The calendar system. `list_events` may or may not include events still
/// awaiting moderation depending on the deployment.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    async fn authenticate(&self) -> anyhow::Result<()>;
    async fn list_events(&self) -> anyhow::Result<Vec<RemoteEvent>>;
    async fn create_event(&self, draft: &EventDraft) -> anyhow::Result<RemoteEvent>;
    async fn delete_event(&self, id: i64) -> anyhow::Result<()>;
}

/// Administrative capability, probed at startup. The API-backed
/// implementation lives in infrastructure; a browser-automation fallback can
/// implement the same trait when no authenticated API route exists.
#[async_trait]
pub trait AdminInterface: Send + Sync {
    /// Cheap capability check; `false` means this implementation cannot act
    /// against the target deployment and another should be selected.
    async fn probe(&self) -> anyhow::Result<bool>;
    async fn delete_event(&self, id: i64) -> anyhow::Result<()>;
}

/// Injected credential source; credentials are never embedded in code or
/// configuration structs passed around the engine.
pub trait CredentialsProvider: Send + Sync {
    fn credentials(&self) -> anyhow::Result<Credentials>;
}
