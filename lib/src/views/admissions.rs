// lib/src/views/admissions.rs
//! Ward occupancy: beds grouped by ward, with the active admission per bed.

use std::collections::HashMap;

use models::medical::{AccountSummary, Admission, AdmitRequest, Bed, BedStatus};
use models::session::Session;

use super::state::{load_list, LoadIssue, Notice};
use crate::api::HospitalApi;
use crate::refresh::{RefreshCoordinator, Resource};

#[derive(Debug, Clone, PartialEq)]
pub struct Ward {
    pub name: String,
    pub beds: Vec<Bed>,
}

impl Ward {
    pub fn occupied(&self) -> usize {
        self.beds.iter().filter(|b| b.status == BedStatus::Occupied).count()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdmissionsBoard {
    /// In order of first appearance in the bed list.
    pub wards: Vec<Ward>,
    /// Active admission keyed by bed id.
    pub admissions: HashMap<String, Admission>,
    /// Candidates for the admit form.
    pub patients: Vec<AccountSummary>,
    pub issues: Vec<LoadIssue>,
}

impl AdmissionsBoard {
    pub fn admission_for_bed(&self, bed_id: &str) -> Option<&Admission> {
        self.admissions.get(bed_id)
    }

    pub fn bed(&self, bed_id: &str) -> Option<&Bed> {
        self.wards.iter().flat_map(|w| w.beds.iter()).find(|b| b.id == bed_id)
    }
}

pub fn group_by_ward(beds: Vec<Bed>) -> Vec<Ward> {
    let mut wards: Vec<Ward> = Vec::new();
    for bed in beds {
        let name = bed.ward().to_string();
        match wards.iter_mut().find(|w| w.name == name) {
            Some(ward) => ward.beds.push(bed),
            None => wards.push(Ward { name, beds: vec![bed] }),
        }
    }
    wards
}

pub async fn load_admissions_board<B: HospitalApi + ?Sized>(api: &B) -> AdmissionsBoard {
    let (beds, admissions, patients) = futures::join!(
        load_list("beds", api.beds()),
        load_list("admissions", api.active_admissions()),
        load_list("patients", api.patient_accounts()),
    );
    AdmissionsBoard {
        wards: group_by_ward(beds.items),
        admissions: admissions.items.into_iter().map(|a| (a.bed.clone(), a)).collect(),
        patients: patients.items,
        issues: [beds.issue, admissions.issue, patients.issue].into_iter().flatten().collect(),
    }
}

/// Admits `patient_id` to `bed_id` under the logged-in clinician.
pub async fn admit_patient(
    coordinator: &RefreshCoordinator,
    session: &Session,
    bed_id: &str,
    patient_id: &str,
    reason: &str,
) -> Notice {
    if patient_id.trim().is_empty() {
        return Notice::Failure("Select a patient".into());
    }
    let request = AdmitRequest {
        bed_id: bed_id.to_string(),
        patient_id: patient_id.trim().to_string(),
        doctor_id: session.user_id.clone(),
        reason: reason.trim().to_string(),
    };
    let result = coordinator.admit(&request).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Beds, Resource::Admissions]).await;
    }
    Notice::from_result(&result, "Patient Admitted!", "Admission failed")
}

/// Discharges whoever occupies `bed_id`; the bed goes to cleaning.
pub async fn discharge_bed(coordinator: &RefreshCoordinator, board: &AdmissionsBoard, bed_id: &str) -> Notice {
    let Some(admission) = board.admission_for_bed(bed_id) else {
        return Notice::Failure("No active admission found for this bed.".into());
    };
    let result = coordinator.discharge(&admission.id).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Beds, Resource::Admissions, Resource::Maintenance]).await;
    }
    Notice::from_result(&result, "Patient Discharged! Bed is now Cleaning.", "Discharge failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::{ACTIVE_ADMISSIONS, ADMIT, BEDS};
    use crate::api::testing::FakeBackend;
    use crate::api::HttpMethod;
    use models::session::{Role, UserProfile};
    use serde_json::json;
    use std::sync::Arc;

    fn ward_backend() -> Arc<FakeBackend> {
        Arc::new(
            FakeBackend::new()
                .with_response(
                    HttpMethod::Get,
                    BEDS,
                    json!([
                        { "_id": "b1", "bedNumber": "ICU-1", "wardName": "ICU", "status": "Occupied" },
                        { "_id": "b2", "bedNumber": "G-1", "status": "Available" },
                        { "_id": "b3", "bedNumber": "ICU-2", "wardName": "ICU", "status": "Cleaning" }
                    ]),
                )
                .with_response(
                    HttpMethod::Get,
                    ACTIVE_ADMISSIONS,
                    json!([{ "_id": "adm1", "bed": "b1", "patient": { "_id": "p1", "name": "Ada" }, "reason": "Sepsis" }]),
                ),
        )
    }

    #[tokio::test]
    async fn beds_group_by_ward_with_admissions_by_bed() {
        let board = load_admissions_board(ward_backend().as_ref()).await;
        let names: Vec<_> = board.wards.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["ICU", "General"]);
        assert_eq!(board.wards[0].beds.len(), 2);
        assert_eq!(board.wards[0].occupied(), 1);
        assert_eq!(board.admission_for_bed("b1").map(|a| a.patient_name()), Some("Ada"));
        assert!(board.admission_for_bed("b2").is_none());
    }

    #[tokio::test]
    async fn admit_assigns_the_logged_in_doctor() {
        let fake = ward_backend();
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        let doctor = Session::new("t", UserProfile::new("d9", "Dr. Grey", Role::Doctor));

        let notice = admit_patient(&coordinator, &doctor, "b2", "p4", " Observation ").await;
        assert_eq!(notice, Notice::Success("Patient Admitted!".into()));
        let post = fake.calls().into_iter().find(|c| c.path == ADMIT).unwrap();
        assert_eq!(
            post.body,
            Some(json!({ "bedId": "b2", "patientId": "p4", "doctorId": "d9", "reason": "Observation" }))
        );
    }

    #[tokio::test]
    async fn admit_requires_a_patient() {
        let fake = ward_backend();
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        let doctor = Session::new("t", UserProfile::new("d9", "Dr. Grey", Role::Doctor));
        assert_eq!(
            admit_patient(&coordinator, &doctor, "b2", "", "x").await,
            Notice::Failure("Select a patient".into())
        );
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn discharge_uses_the_admission_id() {
        let fake = ward_backend();
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        let board = load_admissions_board(&coordinator).await;

        assert!(discharge_bed(&coordinator, &board, "b1").await.is_success());
        assert_eq!(fake.count(HttpMethod::Put, "/inpatient/discharge/adm1"), 1);
        assert!(!coordinator.is_cached(Resource::Beds));

        let empty = discharge_bed(&coordinator, &board, "b2").await;
        assert_eq!(empty, Notice::Failure("No active admission found for this bed.".into()));
    }
}
