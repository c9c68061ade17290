// models/src/medical/mod.rs
pub mod appointment;
pub mod billing;
pub mod directory;
pub mod er;
pub mod feedback;
pub mod inventory;
pub mod maintenance;
pub mod prescription;
pub mod ward;

use serde::{Deserialize, Deserializer};

/// Reads an absent or `null` field as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub use appointment::{Appointment, AppointmentStatus, AppointmentStatusUpdate, DoctorBrief, DoctorRef, NewAppointment};
pub use billing::{Invoice, InvoiceLine, InvoiceStatus, NewInvoice};
pub use directory::{AccountSummary, Doctor, DoctorForm, NewAccount};
pub use er::{ErCase, ErStatus, ErStatusUpdate, TriageLevel};
pub use feedback::{Feedback, FeedbackResolution, FeedbackStatus, NewFeedback};
pub use inventory::{AdjustmentKind, InventoryItem, NewInventoryItem, StockAdjustment};
pub use maintenance::{MaintenanceTicket, NewTicket, TicketPriority};
pub use prescription::{Medicine, NewPrescription, Prescription};
pub use ward::{Admission, AdmitRequest, Bed, BedStatus};
