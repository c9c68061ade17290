// lib/src/views/maintenance.rs
use models::medical::{Bed, MaintenanceTicket, NewTicket};

use super::state::{load_list, LoadIssue, Notice};
use crate::api::HospitalApi;
use crate::ordering::order_maintenance;
use crate::refresh::{RefreshCoordinator, Resource};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaintenanceBoard {
    pub tickets: Vec<MaintenanceTicket>,
    /// Offered when a ticket concerns a specific bed.
    pub beds: Vec<Bed>,
    pub issues: Vec<LoadIssue>,
}

impl MaintenanceBoard {
    pub fn open_tickets(&self) -> impl Iterator<Item = &MaintenanceTicket> {
        self.tickets.iter().filter(|t| !t.is_resolved())
    }
}

pub async fn load_maintenance_board<B: HospitalApi + ?Sized>(api: &B) -> MaintenanceBoard {
    let (tickets, beds) = futures::join!(
        load_list("maintenance tickets", api.maintenance_tickets()),
        load_list("beds", api.beds()),
    );
    MaintenanceBoard {
        tickets: order_maintenance(tickets.items),
        beds: beds.items,
        issues: tickets.issue.into_iter().chain(beds.issue).collect(),
    }
}

pub async fn create_ticket(coordinator: &RefreshCoordinator, ticket: NewTicket) -> Notice {
    if ticket.item.trim().is_empty() {
        return Notice::Failure("Describe the affected item".into());
    }
    let result = coordinator.create_ticket(&ticket).await;
    if result.is_ok() {
        // cleaning tickets can change a bed's status
        coordinator.invalidate(&[Resource::Maintenance, Resource::Beds]).await;
    }
    Notice::from_result(&result, "Ticket Created!", "Failed to create ticket")
}

pub async fn resolve_ticket(coordinator: &RefreshCoordinator, id: &str) -> Notice {
    let result = coordinator.resolve_ticket(id).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Maintenance, Resource::Beds]).await;
    }
    Notice::from_result(&result, "Ticket resolved", "Failed to resolve ticket")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::{BEDS, MAINTENANCE};
    use crate::api::testing::FakeBackend;
    use crate::api::HttpMethod;
    use models::medical::TicketPriority;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn tickets_are_ordered_by_priority() {
        let fake = FakeBackend::new()
            .with_response(
                HttpMethod::Get,
                MAINTENANCE,
                json!([
                    { "_id": "t1", "priority": "Low", "item": "Lamp", "status": "Open", "createdAt": "2024-03-01T08:00:00Z" },
                    { "_id": "t2", "priority": "High", "item": "Oxygen valve", "status": "Open", "createdAt": "2024-03-01T09:00:00Z" },
                    { "_id": "t3", "priority": "Urgent", "item": "Door", "status": "Resolved", "createdAt": "2024-03-01T07:00:00Z" },
                    { "_id": "t4", "priority": "Medium", "item": "Sink", "status": "Open", "createdAt": "2024-03-01T10:00:00Z" }
                ]),
            )
            .with_response(HttpMethod::Get, BEDS, json!([{ "_id": "b1", "bedNumber": "101" }]));

        let board = load_maintenance_board(&fake).await;
        let ids: Vec<_> = board.tickets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t4", "t1", "t3"]);
        assert_eq!(board.tickets[3].priority, TicketPriority::Unknown);
        assert_eq!(board.open_tickets().count(), 3);
        assert_eq!(board.beds.len(), 1);
    }

    #[tokio::test]
    async fn new_ticket_posts_the_form_and_invalidates() {
        let fake = Arc::new(FakeBackend::new());
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        load_maintenance_board(&coordinator).await;

        let ticket = NewTicket { item: "Bed rail".into(), description: "Loose".into(), ..Default::default() };
        assert!(create_ticket(&coordinator, ticket).await.is_success());

        let post = fake.calls().into_iter().find(|c| c.method == HttpMethod::Post).unwrap();
        assert_eq!(post.path, MAINTENANCE);
        assert_eq!(post.body.as_ref().unwrap()["issueType"], "Repair");
        assert_eq!(post.body.as_ref().unwrap()["priority"], "Medium");
        assert!(!coordinator.is_cached(Resource::Maintenance));
        assert!(!coordinator.is_cached(Resource::Beds));
    }

    #[tokio::test]
    async fn ticket_without_item_is_not_sent() {
        let fake = Arc::new(FakeBackend::new());
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        assert!(!create_ticket(&coordinator, NewTicket::default()).await.is_success());
        assert!(fake.calls().is_empty());
    }
}
