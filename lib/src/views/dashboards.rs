// lib/src/views/dashboards.rs
//! The three `/dashboard` landing pages.

use chrono::NaiveDate;
use models::medical::{Appointment, BedStatus, FeedbackStatus, Prescription};
use models::session::Session;

use super::state::{load_list, LoadIssue};
use crate::api::HospitalApi;
use crate::ordering::{day_stats, order_prescriptions_newest_first, todays_schedule, upcoming_for_patient, DayStats};

const RECENT_PRESCRIPTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatientHome {
    pub first_name: String,
    pub upcoming: Vec<Appointment>,
    pub recent_prescriptions: Vec<Prescription>,
    pub issues: Vec<LoadIssue>,
}

impl PatientHome {
    pub fn next_appointment(&self) -> Option<&Appointment> {
        self.upcoming.first()
    }
}

pub async fn load_patient_home<B: HospitalApi + ?Sized>(api: &B, session: &Session, today: NaiveDate) -> PatientHome {
    let (appointments, prescriptions) = futures::join!(
        load_list("appointments", api.appointments()),
        load_list("prescriptions", api.my_prescriptions()),
    );
    let mut recent = order_prescriptions_newest_first(prescriptions.items);
    recent.truncate(RECENT_PRESCRIPTIONS);

    PatientHome {
        first_name: session.profile.first_name().to_string(),
        upcoming: upcoming_for_patient(&appointments.items, &session.display_name, today),
        recent_prescriptions: recent,
        issues: appointments.issue.into_iter().chain(prescriptions.issue).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoctorHome {
    pub today: Vec<Appointment>,
    pub stats: DayStats,
    /// All appointments the backend returned for this doctor.
    pub total: usize,
    pub issue: Option<LoadIssue>,
}

pub async fn load_doctor_home<B: HospitalApi + ?Sized>(api: &B, today: NaiveDate) -> DoctorHome {
    let loaded = load_list("appointments", api.appointments()).await;
    let todays = todays_schedule(&loaded.items, today);
    DoctorHome { stats: day_stats(&todays), total: loaded.items.len(), today: todays, issue: loaded.issue }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdminHome {
    pub staff_count: usize,
    pub total_beds: usize,
    pub occupied_beds: usize,
    pub revenue: f64,
    pub low_stock: usize,
    pub new_complaints: usize,
    pub issues: Vec<LoadIssue>,
}

/// Each source fails independently; a failed source counts as empty.
pub async fn load_admin_home<B: HospitalApi + ?Sized>(api: &B, low_stock_threshold: i64) -> AdminHome {
    let (staff, beds, inventory, invoices, feedback) = futures::join!(
        load_list("staff", api.doctor_accounts()),
        load_list("beds", api.beds()),
        load_list("inventory", api.inventory()),
        load_list("invoices", api.all_invoices()),
        load_list("feedback", api.feedback()),
    );

    AdminHome {
        staff_count: staff.items.len(),
        total_beds: beds.items.len(),
        occupied_beds: beds.items.iter().filter(|b| b.status == BedStatus::Occupied).count(),
        revenue: invoices.items.iter().filter(|i| i.is_paid()).map(|i| i.total_amount).sum(),
        low_stock: inventory.items.iter().filter(|i| i.is_low(low_stock_threshold)).count(),
        new_complaints: feedback.items.iter().filter(|f| f.status == FeedbackStatus::New).count(),
        issues: [staff.issue, beds.issue, inventory.issue, invoices.issue, feedback.issue]
            .into_iter()
            .flatten()
            .collect(),
    }
}
