// lib/src/api/endpoints.rs
//! Typed calls for every endpoint the console uses.

use async_trait::async_trait;
use log::debug;
use models::errors::HospitalResult;
use models::medical::{
    AccountSummary, Admission, AdmitRequest, Appointment, AppointmentStatus, AppointmentStatusUpdate, Bed,
    Doctor, DoctorForm, ErCase, ErStatus, ErStatusUpdate, Feedback, FeedbackResolution, InventoryItem,
    Invoice, MaintenanceTicket, NewAccount, NewAppointment, NewFeedback, NewInventoryItem, NewInvoice,
    NewPrescription, NewTicket, Prescription, StockAdjustment,
};
use models::session::{Credentials, LoginResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::backend::{HospitalBackend, HttpMethod};

pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";
pub const PATIENT_ACCOUNTS: &str = "/auth/patients";
pub const DOCTOR_ACCOUNTS: &str = "/auth/doctors";
pub const DOCTORS: &str = "/doctors";
pub const APPOINTMENTS: &str = "/appointments";
pub const ER_ACTIVE: &str = "/er/active";
pub const BEDS: &str = "/inpatient/beds";
pub const ACTIVE_ADMISSIONS: &str = "/inpatient/admissions/active";
pub const ADMIT: &str = "/inpatient/admit";
pub const MAINTENANCE: &str = "/maintenance";
pub const INVENTORY: &str = "/inventory";
pub const FEEDBACK: &str = "/feedback";
pub const INVOICES: &str = "/records/invoices";
pub const ALL_INVOICES: &str = "/records/invoices/all";
pub const MY_INVOICES: &str = "/records/invoices/my";
pub const PRESCRIPTIONS: &str = "/records/prescriptions";
pub const MY_PRESCRIPTIONS: &str = "/records/prescriptions/my";

async fn fetch<T, B>(backend: &B, path: &str) -> HospitalResult<T>
where
    T: DeserializeOwned,
    B: HospitalBackend + ?Sized,
{
    let value = backend.request(HttpMethod::Get, path, None).await?;
    Ok(serde_json::from_value(value)?)
}

async fn submit<P, B>(backend: &B, method: HttpMethod, path: &str, payload: &P) -> HospitalResult<()>
where
    P: Serialize + ?Sized + Sync,
    B: HospitalBackend + ?Sized,
{
    let body = serde_json::to_value(payload)?;
    backend.request(method, path, Some(body)).await?;
    Ok(())
}

async fn call<B>(backend: &B, method: HttpMethod, path: &str) -> HospitalResult<()>
where
    B: HospitalBackend + ?Sized,
{
    backend.request(method, path, None).await?;
    Ok(())
}

#[async_trait]
pub trait HospitalApi: HospitalBackend {
    async fn login(&self, credentials: &Credentials) -> HospitalResult<LoginResponse> {
        debug!("Logging in as {}", credentials.email);
        let body = serde_json::to_value(credentials)?;
        let value = self.request(HttpMethod::Post, LOGIN, Some(body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn register_account(&self, account: &NewAccount) -> HospitalResult<()> {
        submit(self, HttpMethod::Post, REGISTER, account).await
    }

    async fn patient_accounts(&self) -> HospitalResult<Vec<AccountSummary>> {
        fetch(self, PATIENT_ACCOUNTS).await
    }

    async fn doctor_accounts(&self) -> HospitalResult<Vec<AccountSummary>> {
        fetch(self, DOCTOR_ACCOUNTS).await
    }

    async fn doctors(&self) -> HospitalResult<Vec<Doctor>> {
        fetch(self, DOCTORS).await
    }

    async fn create_doctor(&self, form: &DoctorForm) -> HospitalResult<()> {
        submit(self, HttpMethod::Post, DOCTORS, form).await
    }

    async fn update_doctor(&self, id: &str, form: &DoctorForm) -> HospitalResult<()> {
        submit(self, HttpMethod::Put, &format!("{}/{}", DOCTORS, id), form).await
    }

    async fn delete_doctor(&self, id: &str) -> HospitalResult<()> {
        call(self, HttpMethod::Delete, &format!("{}/{}", DOCTORS, id)).await
    }

    async fn appointments(&self) -> HospitalResult<Vec<Appointment>> {
        fetch(self, APPOINTMENTS).await
    }

    async fn book_appointment(&self, appointment: &NewAppointment) -> HospitalResult<()> {
        submit(self, HttpMethod::Post, APPOINTMENTS, appointment).await
    }

    async fn update_appointment_status(&self, id: &str, status: AppointmentStatus) -> HospitalResult<()> {
        let update = AppointmentStatusUpdate { status };
        submit(self, HttpMethod::Put, &format!("{}/{}", APPOINTMENTS, id), &update).await
    }

    async fn active_er_cases(&self) -> HospitalResult<Vec<ErCase>> {
        fetch(self, ER_ACTIVE).await
    }

    async fn update_er_status(&self, id: &str, status: ErStatus) -> HospitalResult<()> {
        let update = ErStatusUpdate { status };
        submit(self, HttpMethod::Put, &format!("/er/{}/status", id), &update).await
    }

    async fn beds(&self) -> HospitalResult<Vec<Bed>> {
        fetch(self, BEDS).await
    }

    async fn active_admissions(&self) -> HospitalResult<Vec<Admission>> {
        fetch(self, ACTIVE_ADMISSIONS).await
    }

    async fn admit(&self, request: &AdmitRequest) -> HospitalResult<()> {
        submit(self, HttpMethod::Post, ADMIT, request).await
    }

    async fn discharge(&self, admission_id: &str) -> HospitalResult<()> {
        call(self, HttpMethod::Put, &format!("/inpatient/discharge/{}", admission_id)).await
    }

    async fn maintenance_tickets(&self) -> HospitalResult<Vec<MaintenanceTicket>> {
        fetch(self, MAINTENANCE).await
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> HospitalResult<()> {
        submit(self, HttpMethod::Post, MAINTENANCE, ticket).await
    }

    async fn resolve_ticket(&self, id: &str) -> HospitalResult<()> {
        call(self, HttpMethod::Put, &format!("{}/{}/resolve", MAINTENANCE, id)).await
    }

    async fn inventory(&self) -> HospitalResult<Vec<InventoryItem>> {
        fetch(self, INVENTORY).await
    }

    async fn add_inventory_item(&self, item: &NewInventoryItem) -> HospitalResult<()> {
        submit(self, HttpMethod::Post, INVENTORY, item).await
    }

    async fn adjust_stock(&self, id: &str, adjustment: &StockAdjustment) -> HospitalResult<()> {
        submit(self, HttpMethod::Post, &format!("{}/{}/adjust", INVENTORY, id), adjustment).await
    }

    async fn all_invoices(&self) -> HospitalResult<Vec<Invoice>> {
        fetch(self, ALL_INVOICES).await
    }

    async fn my_invoices(&self) -> HospitalResult<Vec<Invoice>> {
        fetch(self, MY_INVOICES).await
    }

    async fn create_invoice(&self, invoice: &NewInvoice) -> HospitalResult<()> {
        submit(self, HttpMethod::Post, INVOICES, invoice).await
    }

    async fn pay_invoice(&self, id: &str) -> HospitalResult<()> {
        call(self, HttpMethod::Put, &format!("{}/{}/pay", INVOICES, id)).await
    }

    async fn my_prescriptions(&self) -> HospitalResult<Vec<Prescription>> {
        fetch(self, MY_PRESCRIPTIONS).await
    }

    async fn write_prescription(&self, prescription: &NewPrescription) -> HospitalResult<()> {
        submit(self, HttpMethod::Post, PRESCRIPTIONS, prescription).await
    }

    async fn feedback(&self) -> HospitalResult<Vec<Feedback>> {
        fetch(self, FEEDBACK).await
    }

    async fn submit_feedback(&self, feedback: &NewFeedback) -> HospitalResult<()> {
        submit(self, HttpMethod::Post, FEEDBACK, feedback).await
    }

    async fn resolve_feedback(&self, id: &str, resolution: &FeedbackResolution) -> HospitalResult<()> {
        submit(self, HttpMethod::Put, &format!("{}/{}/resolve", FEEDBACK, id), resolution).await
    }
}

impl<B: HospitalBackend + ?Sized> HospitalApi for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeBackend;
    use models::medical::TriageLevel;
    use serde_json::json;

    #[tokio::test]
    async fn typed_reads_decode_lists() {
        let backend = FakeBackend::new().with_response(
            HttpMethod::Get,
            ER_ACTIVE,
            json!([{ "_id": "e1", "patientName": "Bob", "triageLevel": "Red",
                     "status": "Waiting", "createdAt": "2024-03-01T10:00:00Z" }]),
        );
        let cases = backend.active_er_cases().await.unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].triage_level, TriageLevel::Red);
    }

    #[tokio::test]
    async fn writes_send_the_expected_method_path_and_body() {
        let backend = FakeBackend::new();
        backend.update_er_status("e1", ErStatus::InTreatment).await.unwrap();
        backend.discharge("adm9").await.unwrap();
        backend.delete_doctor("d3").await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[0].path, "/er/e1/status");
        assert_eq!(calls[0].body, Some(json!({ "status": "In Treatment" })));
        assert_eq!(calls[1].path, "/inpatient/discharge/adm9");
        assert_eq!(calls[1].body, None);
        assert_eq!((calls[2].method, calls[2].path.as_str()), (HttpMethod::Delete, "/doctors/d3"));
    }

    #[tokio::test]
    async fn login_splits_token_from_profile() {
        let backend = FakeBackend::new().with_response(
            HttpMethod::Post,
            LOGIN,
            json!({ "_id": "a1", "name": "Root", "role": "admin", "token": "t0k" }),
        );
        let creds = Credentials { email: "root@hms.org".into(), password: "pw".into() };
        let response = backend.login(&creds).await.unwrap();
        assert_eq!(response.token, "t0k");
        assert_eq!(backend.calls()[0].body, Some(json!({ "email": "root@hms.org", "password": "pw" })));
    }
}
