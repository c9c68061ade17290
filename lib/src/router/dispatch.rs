// lib/src/router/dispatch.rs
//! Role × route → view.
//!
//! Every arm is written out. There is no fallback from one route to another:
//! a role without a view for a route gets a placeholder naming that role.

use std::fmt;

use models::session::Role;

use super::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    PatientHome,
    DoctorHome,
    AdminHome,
    PatientAppointments,
    DoctorAppointments,
    AdminAppointments,
    PatientBilling,
    AdminBilling,
    PatientFeedback,
    AdminFeedback,
    DoctorInventory,
    AdminInventory,
    PatientPrescriptions,
    DoctorPrescriptions,
    EmergencyBoard,
    Admissions,
    Maintenance,
    PatientDirectory,
    StaffDirectory,
    Placeholder { area: &'static str, role: Role },
}

impl View {
    pub fn title(&self) -> String {
        match self {
            View::Login => "Sign in".into(),
            View::PatientHome => "Health Portal".into(),
            View::DoctorHome => "Doctor Dashboard".into(),
            View::AdminHome => "Hospital Administration".into(),
            View::PatientAppointments => "Book an Appointment".into(),
            View::DoctorAppointments => "My Schedule".into(),
            View::AdminAppointments => "Appointment Management".into(),
            View::PatientBilling => "My Billing".into(),
            View::AdminBilling => "Billing & Invoices".into(),
            View::PatientFeedback => "Feedback".into(),
            View::AdminFeedback => "Patient Feedback".into(),
            View::DoctorInventory => "Pharmacy Stock".into(),
            View::AdminInventory => "Pharmacy Inventory".into(),
            View::PatientPrescriptions => "Medical Records".into(),
            View::DoctorPrescriptions => "Write Prescription".into(),
            View::EmergencyBoard => "Emergency Room".into(),
            View::Admissions => "Inpatient Admissions".into(),
            View::Maintenance => "Facility Management".into(),
            View::PatientDirectory => "Patient Directory".into(),
            View::StaffDirectory => "HR & Staff".into(),
            View::Placeholder { area, .. } => (*area).into(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, View::Placeholder { .. })
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Placeholder { area, role } => write!(f, "{} access for {}s coming soon...", area, role),
            other => f.write_str(&other.title()),
        }
    }
}

fn placeholder(area: &'static str, role: Role) -> View {
    View::Placeholder { area, role }
}

pub fn dispatch(role: Role, route: Route) -> View {
    use Role::*;
    match route {
        Route::Login => View::Login,
        Route::Dashboard => match role {
            Patient => View::PatientHome,
            Doctor => View::DoctorHome,
            Admin => View::AdminHome,
        },
        Route::Appointments => match role {
            Patient => View::PatientAppointments,
            Doctor => View::DoctorAppointments,
            Admin => View::AdminAppointments,
        },
        Route::Billing => match role {
            Patient => View::PatientBilling,
            Doctor => placeholder("Billing", role),
            Admin => View::AdminBilling,
        },
        Route::Feedback => match role {
            Patient => View::PatientFeedback,
            Doctor => placeholder("Feedback", role),
            Admin => View::AdminFeedback,
        },
        Route::Inventory => match role {
            Patient => placeholder("Inventory", role),
            Doctor => View::DoctorInventory,
            Admin => View::AdminInventory,
        },
        Route::Prescriptions => match role {
            Patient => View::PatientPrescriptions,
            Doctor => View::DoctorPrescriptions,
            Admin => placeholder("Prescriptions", role),
        },
        Route::Emergency => match role {
            Patient | Doctor | Admin => View::EmergencyBoard,
        },
        Route::Admissions => match role {
            Patient => placeholder("Admissions", role),
            Doctor | Admin => View::Admissions,
        },
        Route::Management => match role {
            Patient | Doctor => placeholder("Management", role),
            Admin => View::Maintenance,
        },
        Route::Patients => match role {
            Patient => placeholder("Patients", role),
            Doctor | Admin => View::PatientDirectory,
        },
        Route::Staff => match role {
            Patient | Doctor => placeholder("HR", role),
            Admin => View::StaffDirectory,
        },
        Route::Records => placeholder("Records", role),
    }
}
