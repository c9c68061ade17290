// lib/src/views/feedback.rs
use models::medical::{Feedback, FeedbackResolution, FeedbackStatus, NewFeedback};
use models::session::{Role, Session};

use super::state::{load_list, Loaded, Notice};
use crate::api::HospitalApi;
use crate::refresh::{RefreshCoordinator, Resource};

/// Patients see only their own submissions; admins see everything.
pub async fn load_feedback<B: HospitalApi + ?Sized>(api: &B, session: &Session) -> Loaded<Feedback> {
    let loaded = load_list("feedback", api.feedback()).await;
    match session.role {
        Role::Patient => {
            let user_id = session.user_id.clone();
            loaded.map(|all| all.into_iter().filter(|f| f.is_from(&user_id)).collect())
        }
        Role::Doctor | Role::Admin => loaded,
    }
}

pub async fn submit_feedback(coordinator: &RefreshCoordinator, feedback: NewFeedback) -> Notice {
    if !(1..=5).contains(&feedback.rating) {
        return Notice::Failure("Please select a star rating".into());
    }
    let result = coordinator.submit_feedback(&feedback).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Feedback]).await;
    }
    Notice::from_result(&result, "Feedback Submitted Successfully!", "Failed to submit feedback")
}

pub async fn resolve_feedback(
    coordinator: &RefreshCoordinator,
    id: &str,
    status: FeedbackStatus,
    response: &str,
) -> Notice {
    let resolution = FeedbackResolution { admin_response: response.trim().to_string(), status };
    let result = coordinator.resolve_feedback(id, &resolution).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Feedback]).await;
    }
    Notice::from_result(&result, "Response sent!", "Error updating status")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::FEEDBACK;
    use crate::api::testing::FakeBackend;
    use crate::api::HttpMethod;
    use models::session::UserProfile;
    use serde_json::json;
    use std::sync::Arc;

    fn backend() -> FakeBackend {
        FakeBackend::new().with_response(
            HttpMethod::Get,
            FEEDBACK,
            json!([
                { "_id": "f1", "type": "Complaint", "rating": 1, "patient": { "_id": "p1", "name": "Ada" } },
                { "_id": "f2", "type": "Compliment", "rating": 5, "patient": "p2" },
                { "_id": "f3", "type": "Suggestion", "rating": 3, "patient": "p1" }
            ]),
        )
    }

    #[tokio::test]
    async fn patients_only_see_their_own_feedback() {
        let patient = Session::new("t", UserProfile::new("p1", "Ada", Role::Patient));
        let ids: Vec<_> = load_feedback(&backend(), &patient).await.items.into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["f1", "f3"]);

        let admin = Session::new("t", UserProfile::new("a1", "Root", Role::Admin));
        assert_eq!(load_feedback(&backend(), &admin).await.items.len(), 3);
    }

    #[tokio::test]
    async fn rating_is_required() {
        let fake = Arc::new(FakeBackend::new());
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        let unrated = NewFeedback {
            kind: "Complaint".into(),
            department: "Pharmacy".into(),
            message: "Long queue".into(),
            rating: 0,
        };
        assert_eq!(
            submit_feedback(&coordinator, unrated).await,
            Notice::Failure("Please select a star rating".into())
        );
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn resolution_sends_response_and_status() {
        let fake = Arc::new(FakeBackend::new());
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        let notice = resolve_feedback(&coordinator, "f1", FeedbackStatus::Investigating, " Looking into it ").await;
        assert!(notice.is_success());

        let call = fake.calls().pop().unwrap();
        assert_eq!(call.path, "/feedback/f1/resolve");
        assert_eq!(call.body, Some(json!({ "adminResponse": "Looking into it", "status": "Investigating" })));
    }
}
