// lib/src/views/billing.rs
use models::medical::{AccountSummary, Invoice, InvoiceLine, NewInvoice};

use super::state::{load_list, LoadIssue, Loaded, Notice};
use crate::api::HospitalApi;
use crate::refresh::{RefreshCoordinator, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BillingTotals {
    pub paid: f64,
    pub outstanding: f64,
}

pub fn billing_totals(invoices: &[Invoice]) -> BillingTotals {
    invoices.iter().fold(BillingTotals::default(), |mut acc, inv| {
        if inv.is_paid() {
            acc.paid += inv.total_amount;
        } else {
            acc.outstanding += inv.total_amount;
        }
        acc
    })
}

pub async fn load_my_invoices<B: HospitalApi + ?Sized>(api: &B) -> Loaded<Invoice> {
    load_list("invoices", api.my_invoices()).await
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BillingDesk {
    pub invoices: Vec<Invoice>,
    /// Patients the admin can bill.
    pub patients: Vec<AccountSummary>,
    pub issues: Vec<LoadIssue>,
}

pub async fn load_billing_desk<B: HospitalApi + ?Sized>(api: &B) -> BillingDesk {
    let (invoices, patients) = futures::join!(
        load_list("invoices", api.all_invoices()),
        load_list("patients", api.patient_accounts()),
    );
    BillingDesk {
        invoices: invoices.items,
        patients: patients.items,
        issues: invoices.issue.into_iter().chain(patients.issue).collect(),
    }
}

pub async fn create_invoice(coordinator: &RefreshCoordinator, patient_id: &str, lines: Vec<InvoiceLine>) -> Notice {
    if patient_id.trim().is_empty() {
        return Notice::Failure("Select a patient".into());
    }
    if lines.is_empty() || lines.iter().any(|l| l.description.trim().is_empty() || l.cost < 0.0) {
        return Notice::Failure("Every line needs a description and a non-negative cost".into());
    }
    let invoice = NewInvoice::new(patient_id.trim(), lines);
    let result = coordinator.create_invoice(&invoice).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::AllInvoices, Resource::MyInvoices]).await;
    }
    Notice::from_result(&result, "Invoice Generated!", "Failed to create invoice")
}

pub async fn pay_invoice(coordinator: &RefreshCoordinator, id: &str) -> Notice {
    let result = coordinator.pay_invoice(id).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::AllInvoices, Resource::MyInvoices]).await;
    }
    Notice::from_result(&result, "Payment successful!", "Payment failed")
}
