// lib/src/views/appointments.rs
//! Booking (patient), schedule (doctor) and management (admin) of appointments.

use chrono::{DateTime, NaiveDate, Utc};
use models::medical::{Appointment, AppointmentStatus, Doctor, NewAppointment};
use models::session::Session;

use super::state::{load_list, Loaded, Notice};
use crate::api::HospitalApi;
use crate::ordering::{order_appointments, order_doctor_schedule};
use crate::refresh::{RefreshCoordinator, Resource};

pub async fn load_doctor_directory<B: HospitalApi + ?Sized>(api: &B) -> Loaded<Doctor> {
    load_list("doctors", api.doctors()).await
}

/// Doctors whose name or specialization contains `search`, ignoring case.
pub fn filter_doctors<'a>(doctors: &'a [Doctor], search: &str) -> Vec<&'a Doctor> {
    let needle = search.trim().to_lowercase();
    doctors
        .iter()
        .filter(|d| d.name.to_lowercase().contains(&needle) || d.specialization.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub slot: String,
    pub patient_phone: Option<String>,
}

/// Books on behalf of the logged-in patient; the patient name comes from the session.
pub async fn book_appointment(coordinator: &RefreshCoordinator, session: &Session, request: BookingRequest) -> Notice {
    if request.doctor_id.trim().is_empty() || request.slot.trim().is_empty() {
        return Notice::Failure("Choose a doctor and a time slot".into());
    }
    let body = NewAppointment {
        doctor_id: request.doctor_id,
        date: request.date,
        slot: request.slot.trim().to_string(),
        patient_name: session.display_name.clone(),
        patient_phone: request.patient_phone.filter(|p| !p.trim().is_empty()),
    };
    let result = coordinator.book_appointment(&body).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Appointments]).await;
    }
    Notice::from_result(&result, "Appointment Confirmed!", "Booking failed")
}

pub async fn update_appointment_status(
    coordinator: &RefreshCoordinator,
    id: &str,
    status: AppointmentStatus,
) -> Notice {
    let result = coordinator.update_appointment_status(id, status).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Appointments]).await;
    }
    Notice::from_result(&result, &format!("Appointment marked {}", status.as_str()), "Failed to update status")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleFilter {
    #[default]
    Today,
    Upcoming,
    History,
    All,
}

impl std::str::FromStr for ScheduleFilter {
    type Err = models::errors::HospitalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(ScheduleFilter::Today),
            "upcoming" => Ok(ScheduleFilter::Upcoming),
            "history" => Ok(ScheduleFilter::History),
            "all" => Ok(ScheduleFilter::All),
            other => Err(models::errors::HospitalError::InvalidData(format!("unknown schedule filter '{}'", other))),
        }
    }
}

impl ScheduleFilter {
    pub fn matches(&self, appointment: &Appointment, now: DateTime<Utc>) -> bool {
        let today = now.date_naive();
        match self {
            ScheduleFilter::Today => appointment.day() == today,
            ScheduleFilter::Upcoming => appointment.date > now,
            ScheduleFilter::History => appointment.date < now && appointment.day() != today,
            ScheduleFilter::All => true,
        }
    }
}

/// The doctor's own appointments (the backend scopes them), by date then slot.
pub async fn load_doctor_schedule<B: HospitalApi + ?Sized>(api: &B) -> Loaded<Appointment> {
    load_list("appointments", api.appointments()).await.map(order_doctor_schedule)
}

pub fn filter_schedule<'a>(
    schedule: &'a [Appointment],
    filter: ScheduleFilter,
    search: &str,
    now: DateTime<Utc>,
) -> Vec<&'a Appointment> {
    let needle = search.trim().to_lowercase();
    schedule
        .iter()
        .filter(|a| a.patient_name.to_lowercase().contains(&needle) && filter.matches(a, now))
        .collect()
}

/// Every appointment, pending requests first.
pub async fn load_all_appointments<B: HospitalApi + ?Sized>(api: &B) -> Loaded<Appointment> {
    load_list("appointments", api.appointments()).await.map(order_appointments)
}

/// Admin list filters. Empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub search: String,
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
}

impl AppointmentFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = appointment.patient_name.to_lowercase().contains(&needle)
            || appointment.doctor_name().to_lowercase().contains(&needle);
        let matches_status = self.status.map_or(true, |s| appointment.status == s);
        let matches_date = self.date.map_or(true, |d| appointment.day() == d);
        matches_search && matches_status && matches_date
    }

    pub fn apply<'a>(&self, appointments: &'a [Appointment]) -> Vec<&'a Appointment> {
        appointments.iter().filter(|a| self.matches(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::APPOINTMENTS;
    use crate::api::testing::FakeBackend;
    use crate::api::HttpMethod;
    use chrono::TimeZone;
    use models::errors::HospitalError;
    use models::session::{Role, UserProfile};
    use serde_json::json;
    use std::sync::Arc;

    fn appointments_json() -> serde_json::Value {
        json!([
            { "_id": "1", "patientName": "Ada", "doctor": { "name": "Dr. House" }, "date": "2024-03-03T00:00:00Z", "slot": "10:00", "status": "Confirmed" },
            { "_id": "2", "patientName": "Bob", "doctor": "d7", "date": "2024-03-02T00:00:00Z", "slot": "09:00", "status": "Pending" },
            { "_id": "3", "patientName": "Cyd", "date": "2024-03-01T00:00:00Z", "slot": "11:00", "status": "Completed" },
            { "_id": "4", "patientName": "Dee", "date": "2024-03-01T00:00:00Z", "slot": "08:30", "status": "Pending" }
        ])
    }

    fn patient() -> Session {
        Session::new("t", UserProfile::new("p1", "Ada Lovelace", Role::Patient))
    }

    #[tokio::test]
    async fn admin_list_puts_pending_first() {
        let fake = FakeBackend::new().with_response(HttpMethod::Get, APPOINTMENTS, appointments_json());
        let loaded = load_all_appointments(&fake).await;
        let ids: Vec<_> = loaded.items.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "2", "3", "1"]);
    }

    #[tokio::test]
    async fn doctor_schedule_is_by_date_then_slot() {
        let fake = FakeBackend::new().with_response(HttpMethod::Get, APPOINTMENTS, appointments_json());
        let loaded = load_doctor_schedule(&fake).await;
        let ids: Vec<_> = loaded.items.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2", "1"]);
    }

    #[tokio::test]
    async fn schedule_filters_split_today_upcoming_and_history() {
        let fake = FakeBackend::new().with_response(HttpMethod::Get, APPOINTMENTS, appointments_json());
        let schedule = load_doctor_schedule(&fake).await.items;
        let now = Utc.with_ymd_and_hms(2024, 3, 2, 12, 0, 0).unwrap();

        let ids = |f: ScheduleFilter, s: &str| -> Vec<String> {
            filter_schedule(&schedule, f, s, now).into_iter().map(|a| a.id.clone()).collect()
        };
        assert_eq!(ids(ScheduleFilter::Today, ""), vec!["2"]);
        assert_eq!(ids(ScheduleFilter::Upcoming, ""), vec!["1"]);
        assert_eq!(ids(ScheduleFilter::History, ""), vec!["4", "3"]);
        assert_eq!(ids(ScheduleFilter::All, "cy"), vec!["3"]);
    }

    #[test]
    fn admin_filter_combines_search_status_and_date() {
        let list: Vec<Appointment> = serde_json::from_value(appointments_json()).unwrap();
        let filter = AppointmentFilter { search: "house".into(), ..Default::default() };
        assert_eq!(filter.apply(&list).len(), 1);

        let filter = AppointmentFilter {
            status: Some(AppointmentStatus::Pending),
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..Default::default()
        };
        let hits: Vec<_> = filter.apply(&list).into_iter().map(|a| a.id.as_str()).collect();
        assert_eq!(hits, vec!["4"]);
    }

    #[tokio::test]
    async fn booking_uses_the_session_name_and_refetches() {
        let fake = Arc::new(FakeBackend::new());
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        load_all_appointments(&coordinator).await;

        let notice = book_appointment(
            &coordinator,
            &patient(),
            BookingRequest {
                doctor_id: "d7".into(),
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                slot: "10:30".into(),
                patient_phone: Some(" ".into()),
            },
        )
        .await;
        assert!(notice.is_success());

        let post = fake.calls().into_iter().find(|c| c.method == HttpMethod::Post).unwrap();
        assert_eq!(
            post.body,
            Some(json!({ "doctorId": "d7", "date": "2024-04-02", "slot": "10:30", "patientName": "Ada Lovelace" }))
        );
        assert!(!coordinator.is_cached(Resource::Appointments));
    }

    #[tokio::test]
    async fn incomplete_booking_is_rejected_locally() {
        let fake = Arc::new(FakeBackend::new());
        let coordinator = RefreshCoordinator::new(fake.clone(), 8);
        let notice = book_appointment(
            &coordinator,
            &patient(),
            BookingRequest {
                doctor_id: "d7".into(),
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                slot: "".into(),
                patient_phone: None,
            },
        )
        .await;
        assert!(!notice.is_success());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn rejected_booking_carries_backend_message() {
        let fake = Arc::new(FakeBackend::new().with_error(
            HttpMethod::Post,
            APPOINTMENTS,
            HospitalError::Backend { status: 400, message: "Slot already booked".into() },
        ));
        let coordinator = RefreshCoordinator::new(fake, 8);
        let notice = book_appointment(
            &coordinator,
            &patient(),
            BookingRequest {
                doctor_id: "d7".into(),
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                slot: "10:30".into(),
                patient_phone: None,
            },
        )
        .await;
        assert_eq!(notice, Notice::Failure("Slot already booked".into()));
    }

    #[test]
    fn doctor_search_matches_specialization() {
        let doctors: Vec<Doctor> = serde_json::from_value(json!([
            { "_id": "d1", "name": "Gregory House", "specialization": "Diagnostics" },
            { "_id": "d2", "name": "Lisa Cuddy", "specialization": "Endocrinology" }
        ]))
        .unwrap();
        assert_eq!(filter_doctors(&doctors, "endo")[0].id, "d2");
        assert_eq!(filter_doctors(&doctors, "").len(), 2);
    }
}
