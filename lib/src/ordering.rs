// lib/src/ordering.rs
//! List orderings and the small statistics computed from them.
//!
//! All sorts are stable, so records with equal keys keep the order the
//! backend returned them in. Applying any ordering twice gives the same list.

use std::cmp::Reverse;

use chrono::{NaiveDate, Utc};
use models::medical::{
    Appointment, AppointmentStatus, ErCase, ErStatus, InventoryItem, MaintenanceTicket, Prescription,
    TriageLevel,
};

/// Red before Yellow before Green; within a level the longest waiting first.
pub fn order_triage(mut cases: Vec<ErCase>) -> Vec<ErCase> {
    cases.sort_by_key(|c| (Reverse(c.triage_level.weight()), c.created_at));
    cases
}

/// High before Medium before Low.
pub fn order_maintenance(mut tickets: Vec<MaintenanceTicket>) -> Vec<MaintenanceTicket> {
    tickets.sort_by_key(|t| Reverse(t.priority.weight()));
    tickets
}

/// Pending requests first, then everything else, each group by date.
pub fn order_appointments(appointments: Vec<Appointment>) -> Vec<Appointment> {
    let (mut pending, mut rest): (Vec<_>, Vec<_>) =
        appointments.into_iter().partition(|a| a.status.is_pending());
    pending.sort_by_key(|a| a.date);
    rest.sort_by_key(|a| a.date);
    pending.extend(rest);
    pending
}

/// Date, then slot (lexical).
pub fn order_doctor_schedule(mut appointments: Vec<Appointment>) -> Vec<Appointment> {
    appointments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.slot.cmp(&b.slot)));
    appointments
}

/// Appointments falling on `today` (UTC calendar day), by slot.
pub fn todays_schedule(appointments: &[Appointment], today: NaiveDate) -> Vec<Appointment> {
    let mut todays: Vec<Appointment> = appointments.iter().filter(|a| a.day() == today).cloned().collect();
    todays.sort_by(|a, b| a.slot.cmp(&b.slot));
    todays
}

/// A patient's own appointments from the start of `today` onwards, soonest first.
/// Appointments are matched on the patient's display name.
pub fn upcoming_for_patient(appointments: &[Appointment], patient_name: &str, today: NaiveDate) -> Vec<Appointment> {
    let mut upcoming: Vec<Appointment> = appointments
        .iter()
        .filter(|a| a.patient_name == patient_name && a.day() >= today)
        .cloned()
        .collect();
    upcoming.sort_by_key(|a| a.date);
    upcoming
}

/// Lowest stock first.
pub fn order_inventory_by_quantity(mut items: Vec<InventoryItem>) -> Vec<InventoryItem> {
    items.sort_by_key(|i| i.quantity);
    items
}

pub fn order_prescriptions_newest_first(mut prescriptions: Vec<Prescription>) -> Vec<Prescription> {
    prescriptions.sort_by_key(|p| Reverse(p.created_at));
    prescriptions
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErStats {
    pub critical: usize,
    pub waiting: usize,
    pub total: usize,
}

pub fn er_stats(cases: &[ErCase]) -> ErStats {
    ErStats {
        critical: cases.iter().filter(|c| c.triage_level == TriageLevel::Red).count(),
        waiting: cases.iter().filter(|c| c.status == ErStatus::Waiting).count(),
        total: cases.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DayStats {
    pub total: usize,
    pub pending: usize,
    pub next_patient: Option<Appointment>,
}

/// Expects `todays` already in slot order.
pub fn day_stats(todays: &[Appointment]) -> DayStats {
    let open = |a: &&Appointment| a.status != AppointmentStatus::Completed;
    DayStats {
        total: todays.len(),
        pending: todays.iter().filter(open).count(),
        next_patient: todays.iter().find(open).cloned(),
    }
}
