// lib/src/views/prescriptions.rs
use models::medical::{AccountSummary, Medicine, NewPrescription, Prescription};
use models::session::Session;

use super::state::{load_list, Loaded, Notice};
use crate::api::HospitalApi;
use crate::ordering::order_prescriptions_newest_first;
use crate::refresh::{RefreshCoordinator, Resource};

/// The patient's prescription history, newest first.
pub async fn load_prescription_history<B: HospitalApi + ?Sized>(api: &B) -> Loaded<Prescription> {
    load_list("prescriptions", api.my_prescriptions()).await.map(order_prescriptions_newest_first)
}

/// Patients a doctor can prescribe for.
pub async fn load_prescribable_patients<B: HospitalApi + ?Sized>(api: &B) -> Loaded<AccountSummary> {
    load_list("patients", api.patient_accounts()).await
}

/// First patient whose name contains `query`, ignoring case.
pub fn find_patient<'a>(patients: &'a [AccountSummary], query: &str) -> Option<&'a AccountSummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    patients.iter().find(|p| p.name.to_lowercase().contains(&needle))
}

/// Row prefilled in a fresh prescription form.
pub fn default_medicine() -> Medicine {
    Medicine {
        name: String::new(),
        dosage: "500mg".into(),
        frequency: "1-0-1".into(),
        duration: "5 days".into(),
    }
}

pub async fn write_prescription(
    coordinator: &RefreshCoordinator,
    session: &Session,
    patient_id: &str,
    medicines: Vec<Medicine>,
    notes: &str,
) -> Notice {
    if patient_id.trim().is_empty() {
        return Notice::Failure("Please select a patient".into());
    }
    if medicines.is_empty() || medicines.iter().any(|m| m.name.trim().is_empty()) {
        return Notice::Failure("Please specify medicine names".into());
    }
    let prescription = NewPrescription {
        patient: patient_id.trim().to_string(),
        doctor: session.user_id.clone(),
        medicines,
        notes: notes.trim().to_string(),
    };
    let result = coordinator.write_prescription(&prescription).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::MyPrescriptions]).await;
    }
    Notice::from_result(&result, "Prescription Sent!", "Failed to send prescription")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::{MY_PRESCRIPTIONS, PRESCRIPTIONS};
    use crate::api::testing::FakeBackend;
    use crate::api::HttpMethod;
    use models::session::{Role, UserProfile};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn history_is_newest_first() {
        let fake = FakeBackend::new().with_response(
            HttpMethod::Get,
            MY_PRESCRIPTIONS,
            json!([
                { "_id": "r1", "createdAt": "2024-01-10T00:00:00Z", "doctor": { "name": "Dr. Strange" } },
                { "_id": "r2", "createdAt": "2024-02-10T00:00:00Z" }
            ]),
        );
        let history = load_prescription_history(&fake).await.items;
        assert_eq!(history[0].id, "r2");
        assert_eq!(history[0].doctor_name(), "Doctor");
        assert_eq!(history[1].doctor_name(), "Dr. Strange");
    }

    #[test]
    fn patient_lookup_by_partial_name() {
        let patients: Vec<AccountSummary> = serde_json::from_value(json!([
            { "_id": "p1", "name": "Ada Lovelace" },
            { "_id": "p2", "name": "Alan Turing" }
        ]))
        .unwrap();
        assert_eq!(find_patient(&patients, "turing").map(|p| p.id.as_str()), Some("p2"));
        assert!(find_patient(&patients, "  ").is_none());
    }

    #[tokio::test]
    async fn prescription_is_signed_by_the_session_doctor() {
        let fake = Arc::new(FakeBackend::new());
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        let doctor = Session::new("t", UserProfile::new("d1", "Dr. House", Role::Doctor));
        let mut med = default_medicine();
        med.name = "Amoxicillin".into();

        let notice = write_prescription(&coordinator, &doctor, "p2", vec![med], "After meals").await;
        assert_eq!(notice, Notice::Success("Prescription Sent!".into()));

        let call = fake.calls().pop().unwrap();
        assert_eq!(call.path, PRESCRIPTIONS);
        let body = call.body.unwrap();
        assert_eq!(body["doctor"], "d1");
        assert_eq!(body["patient"], "p2");
        assert_eq!(body["medicines"][0]["frequency"], "1-0-1");
    }

    #[tokio::test]
    async fn unnamed_medicines_are_rejected() {
        let fake = Arc::new(FakeBackend::new());
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        let doctor = Session::new("t", UserProfile::new("d1", "Dr. House", Role::Doctor));
        let notice = write_prescription(&coordinator, &doctor, "p2", vec![default_medicine()], "").await;
        assert_eq!(notice, Notice::Failure("Please specify medicine names".into()));
        assert!(fake.calls().is_empty());
    }
}
