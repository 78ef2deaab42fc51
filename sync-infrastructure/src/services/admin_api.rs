// API-backed administrative interface
// Preferred implementation of the admin capability; a browser-automation
// fallback can stand in behind the same trait when probing fails

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use sync_domain::ports::{AdminInterface, CalendarApi};

pub struct ApiAdminInterface {
    calendar: Arc<dyn CalendarApi>,
}

impl ApiAdminInterface {
    pub fn new(calendar: Arc<dyn CalendarApi>) -> Self {
        Self { calendar }
    }
}

#[async_trait]
impl AdminInterface for ApiAdminInterface {
    async fn probe(&self) -> anyhow::Result<bool> {
        // If the authenticated session can list events, the delete route is
        // available on the same credentials.
        match self.calendar.list_events().await {
            Ok(_) => Ok(true),
            Err(err) => {
                debug!(error = %err, "api admin probe failed");
                Ok(false)
            }
        }
    }

    async fn delete_event(&self, id: i64) -> anyhow::Result<()> {
        self.calendar.delete_event(id).await
    }
}
