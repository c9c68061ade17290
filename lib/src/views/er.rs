// lib/src/views/er.rs
//! Emergency room board: triage-ordered active cases, refreshed on a timer.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace, warn};
use models::medical::{ErCase, ErStatus};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::state::{load_list, LoadIssue, MountGuard, Notice};
use crate::api::HospitalApi;
use crate::ordering::{er_stats, order_triage, ErStats};
use crate::refresh::{RefreshCoordinator, Resource};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErBoard {
    pub cases: Vec<ErCase>,
    pub stats: ErStats,
    pub issue: Option<LoadIssue>,
}

pub async fn load_er_board<B: HospitalApi + ?Sized>(api: &B) -> ErBoard {
    let loaded = load_list("ER cases", api.active_er_cases()).await;
    let cases = order_triage(loaded.items);
    ErBoard { stats: er_stats(&cases), cases, issue: loaded.issue }
}

/// Always goes to the backend.
pub async fn refresh_er_board(coordinator: &RefreshCoordinator) -> ErBoard {
    coordinator.invalidate(&[Resource::ErCases]).await;
    load_er_board(coordinator).await
}

pub async fn update_er_status(coordinator: &RefreshCoordinator, id: &str, status: ErStatus) -> Notice {
    let result = coordinator.update_er_status(id, status).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::ErCases]).await;
    }
    Notice::from_result(&result, &format!("Case moved to {}", status.as_str()), "Failed to update status")
}

/// Running ER poller. Dropping the handle aborts the task.
pub struct PollHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    mount: MountGuard,
}

impl PollHandle {
    /// Stops polling and waits for the task to finish. A fetch already in
    /// flight completes but its result is discarded.
    pub async fn stop(mut self) {
        self.mount.unmount();
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    warn!("ER poller ended abnormally: {}", e);
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().map(|t| !t.is_finished()).unwrap_or(false)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.mount.unmount();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Fetches the board immediately and then every `every`, sending each result
/// to `updates`. Stops when the handle is stopped or dropped, or when the
/// receiver goes away.
pub fn spawn_er_poller(
    coordinator: Arc<RefreshCoordinator>,
    every: Duration,
    updates: mpsc::Sender<ErBoard>,
) -> PollHandle {
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let mount = MountGuard::new();
    let guard = mount.clone();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = &mut stop_rx => {
                    debug!("ER poller stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let Some(board) = guard.run(refresh_er_board(&coordinator)).await else {
                        break;
                    };
                    trace!("ER poll: {} active, {} critical", board.stats.total, board.stats.critical);
                    if updates.send(board).await.is_err() {
                        debug!("ER board receiver dropped, stopping poller");
                        break;
                    }
                }
            }
        }
    });

    PollHandle { stop: Some(stop_tx), task: Some(task), mount }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::ER_ACTIVE;
    use crate::api::testing::FakeBackend;
    use crate::api::HttpMethod;
    use models::errors::HospitalError;
    use models::medical::TriageLevel;
    use serde_json::json;

    fn er_backend() -> Arc<FakeBackend> {
        Arc::new(FakeBackend::new().with_response(
            HttpMethod::Get,
            ER_ACTIVE,
            json!([
                { "_id": "1", "patientName": "A", "triageLevel": "Green", "status": "Waiting", "createdAt": "2024-03-01T08:10:00Z" },
                { "_id": "2", "patientName": "B", "triageLevel": "Red", "status": "In Treatment", "createdAt": "2024-03-01T08:05:00Z" },
                { "_id": "3", "patientName": "C", "triageLevel": "Red", "status": "Waiting", "createdAt": "2024-03-01T08:03:00Z" },
                { "_id": "4", "patientName": "D", "triageLevel": "Yellow", "status": "Waiting", "createdAt": "2024-03-01T08:01:00Z" }
            ]),
        ))
    }

    #[tokio::test]
    async fn board_is_triage_ordered_with_stats() {
        let board = load_er_board(er_backend().as_ref()).await;
        let ids: Vec<_> = board.cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "4", "1"]);
        assert_eq!(board.cases[0].triage_level, TriageLevel::Red);
        assert_eq!(board.stats, ErStats { critical: 2, waiting: 3, total: 4 });
        assert!(board.issue.is_none());
    }

    #[tokio::test]
    async fn null_triage_level_keeps_the_board_and_sorts_last() {
        let fake = FakeBackend::new().with_response(
            HttpMethod::Get,
            ER_ACTIVE,
            json!([
                { "_id": "n", "patientName": "N", "triageLevel": null, "status": null, "createdAt": "2024-03-01T08:00:00Z" },
                { "_id": "r", "patientName": "R", "triageLevel": "Red", "status": "Waiting", "createdAt": "2024-03-01T08:30:00Z" }
            ]),
        );
        let board = load_er_board(&fake).await;
        assert!(board.issue.is_none());
        let ids: Vec<_> = board.cases.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["r", "n"]);
        assert_eq!(board.cases[1].triage_level, TriageLevel::Unknown);
        assert_eq!(board.stats, ErStats { critical: 1, waiting: 1, total: 2 });
    }

    #[tokio::test]
    async fn read_failure_yields_an_empty_board() {
        let fake = FakeBackend::new().with_error(HttpMethod::Get, ER_ACTIVE, HospitalError::Network("down".into()));
        let board = load_er_board(&fake).await;
        assert!(board.cases.is_empty());
        assert_eq!(board.stats.total, 0);
        assert!(board.issue.is_some());
    }

    #[tokio::test]
    async fn status_update_invalidates_the_board() {
        let fake = er_backend();
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        load_er_board(&coordinator).await;
        assert!(coordinator.is_cached(Resource::ErCases));

        let notice = update_er_status(&coordinator, "3", ErStatus::InTreatment).await;
        assert_eq!(notice, Notice::Success("Case moved to In Treatment".into()));
        assert!(!coordinator.is_cached(Resource::ErCases));
    }

    #[tokio::test]
    async fn failed_status_update_uses_generic_message() {
        let fake = Arc::new(FakeBackend::new().with_error(
            HttpMethod::Put,
            "/er/3/status",
            HospitalError::Backend { status: 500, message: String::new() },
        ));
        let coordinator = RefreshCoordinator::new(fake, 8);
        let notice = update_er_status(&coordinator, "3", ErStatus::Admitted).await;
        assert_eq!(notice, Notice::Failure("Failed to update status".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn poller_refetches_on_every_interval() {
        let fake = er_backend();
        let coordinator = Arc::new(RefreshCoordinator::new(fake.clone(), 8));
        let (tx, mut rx) = mpsc::channel(4);
        let started = tokio::time::Instant::now();

        let handle = spawn_er_poller(coordinator, Duration::from_secs(30), tx);
        let first = rx.recv().await.unwrap();
        assert_eq!(first.cases.len(), 4);
        assert!(started.elapsed() < Duration::from_secs(1));

        rx.recv().await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(30));
        assert_eq!(fake.count(HttpMethod::Get, ER_ACTIVE), 2);

        handle.stop().await;
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_polling() {
        let fake = er_backend();
        let coordinator = Arc::new(RefreshCoordinator::new(fake.clone(), 8));
        let (tx, mut rx) = mpsc::channel(4);

        let handle = spawn_er_poller(coordinator, Duration::from_secs(30), tx);
        rx.recv().await.unwrap();
        drop(handle);

        assert!(rx.recv().await.is_none());
        assert_eq!(fake.count(HttpMethod::Get, ER_ACTIVE), 1);
    }
}
