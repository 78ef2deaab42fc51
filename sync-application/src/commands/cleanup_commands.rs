// Remote duplicate cleanup
// Groups what the calendar already holds by composite key and removes all
// but the earliest entry of each group. Dry run unless forced.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use sync_domain::entities::RemoteEvent;
use sync_domain::services::remote_fingerprint;

use crate::error::SyncError;
use crate::state::AppState;

#[derive(Debug, Default, Serialize)]
pub struct CleanupReport {
    pub groups: usize,
    pub removable: usize,
    pub removed: usize,
    pub failed: usize,
    pub dry_run: bool,
}

pub async fn run_cleanup(state: &AppState, force: bool) -> Result<CleanupReport, SyncError> {
    state
        .calendar
        .authenticate()
        .await
        .map_err(|err| SyncError::AuthenticationFailed(err.to_string()))?;

    let events = state
        .calendar
        .list_events()
        .await
        .map_err(SyncError::Internal)?;

    let mut report = CleanupReport {
        dry_run: !force,
        ..CleanupReport::default()
    };

    let mut removable = Vec::new();
    for (keep, extras) in duplicate_groups(events) {
        report.groups += 1;
        info!(
            keep_id = keep.id,
            title = %keep.title,
            extras = extras.len(),
            "duplicate group"
        );
        removable.extend(extras);
    }
    report.removable = removable.len();

    if !force {
        for event in &removable {
            info!(id = event.id, title = %event.title, "would remove");
        }
        return Ok(report);
    }

    if !state.admin.probe().await.unwrap_or(false) {
        return Err(SyncError::Internal(anyhow::anyhow!(
            "no administrative capability against this deployment"
        )));
    }

    for event in removable {
        match state.admin.delete_event(event.id).await {
            Ok(()) => {
                info!(id = event.id, title = %event.title, "duplicate removed");
                report.removed += 1;
            }
            Err(err) => {
                warn!(id = event.id, error = %err, "failed to remove duplicate");
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

/// Partition events sharing a composite key into (earliest id, the rest).
/// Groups of one are not duplicates and are dropped.
fn duplicate_groups(events: Vec<RemoteEvent>) -> Vec<(RemoteEvent, Vec<RemoteEvent>)> {
    let mut by_key: HashMap<String, Vec<RemoteEvent>> = HashMap::new();
    for event in events {
        let key = remote_fingerprint(&event).composite_key;
        by_key.entry(key).or_default().push(event);
    }

    let mut groups = Vec::new();
    for (_, mut members) in by_key {
        if members.len() < 2 {
            continue;
        }
        members.sort_by_key(|event| event.id);
        let keep = members.remove(0);
        groups.push((keep, members));
    }
    groups.sort_by_key(|(keep, _)| keep.id);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use sync_domain::entities::RemotePlace;

    fn remote(id: i64, title: &str, start: i64) -> RemoteEvent {
        RemoteEvent {
            id,
            title: title.to_string(),
            place: Some(RemotePlace {
                id: 1,
                name: "Will's Pub".to_string(),
            }),
            start_datetime: start,
            end_datetime: None,
            description: None,
        }
    }

    #[test]
    fn earliest_id_is_kept() {
        let groups = duplicate_groups(vec![
            remote(12, "Night Witch", 1755716400),
            remote(3, "NIGHT WITCH", 1755720000),
            remote(7, "night witch", 1755723600),
            remote(4, "Unrelated", 1755716400),
        ]);
        assert_eq!(groups.len(), 1);
        let (keep, extras) = &groups[0];
        assert_eq!(keep.id, 3);
        let mut extra_ids: Vec<i64> = extras.iter().map(|event| event.id).collect();
        extra_ids.sort();
        assert_eq!(extra_ids, vec![7, 12]);
    }

    #[test]
    fn singletons_are_not_groups() {
        let groups = duplicate_groups(vec![
            remote(1, "A", 1755716400),
            remote(2, "B", 1755716400),
        ]);
        assert!(groups.is_empty());
    }
}
