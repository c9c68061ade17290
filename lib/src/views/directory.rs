// lib/src/views/directory.rs
//! Patient accounts and the doctor (staff) directory.

use models::medical::{AccountSummary, Doctor, DoctorForm, NewAccount};
use models::session::Role;

use super::state::{load_list, Loaded, Notice};
use crate::api::HospitalApi;
use crate::refresh::{RefreshCoordinator, Resource};

pub async fn load_patient_directory<B: HospitalApi + ?Sized>(api: &B) -> Loaded<AccountSummary> {
    load_list("patients", api.patient_accounts()).await
}

pub fn filter_accounts<'a>(accounts: &'a [AccountSummary], search: &str) -> Vec<&'a AccountSummary> {
    let needle = search.trim().to_lowercase();
    accounts
        .iter()
        .filter(|a| {
            a.name.to_lowercase().contains(&needle)
                || a.email.as_deref().unwrap_or_default().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Creates a patient account. The role is always `patient`.
pub async fn register_patient(
    coordinator: &RefreshCoordinator,
    name: &str,
    email: &str,
    password: &str,
) -> Notice {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Notice::Failure("Name, email and password are required".into());
    }
    let account = NewAccount {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password: password.to_string(),
        role: Role::Patient,
    };
    let result = coordinator.register_account(&account).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::PatientAccounts]).await;
    }
    Notice::from_result(&result, "Patient Account Created Successfully", "Registration failed")
}

pub async fn load_staff<B: HospitalApi + ?Sized>(api: &B) -> Loaded<Doctor> {
    load_list("staff", api.doctors()).await
}

fn validate(form: &DoctorForm) -> Option<Notice> {
    if form.name.is_empty() || form.specialization.is_empty() {
        return Some(Notice::Failure("Name and specialization are required".into()));
    }
    None
}

pub async fn add_doctor(coordinator: &RefreshCoordinator, form: DoctorForm) -> Notice {
    if let Some(rejected) = validate(&form) {
        return rejected;
    }
    let result = coordinator.create_doctor(&form).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Doctors, Resource::DoctorAccounts]).await;
    }
    Notice::from_result(&result, "New Doctor added to directory", "Operation failed")
}

pub async fn update_doctor(coordinator: &RefreshCoordinator, id: &str, form: DoctorForm) -> Notice {
    if let Some(rejected) = validate(&form) {
        return rejected;
    }
    let result = coordinator.update_doctor(id, &form).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Doctors]).await;
    }
    Notice::from_result(&result, "Doctor updated successfully", "Operation failed")
}

pub async fn remove_doctor(coordinator: &RefreshCoordinator, id: &str) -> Notice {
    let result = coordinator.delete_doctor(id).await;
    if result.is_ok() {
        coordinator.invalidate(&[Resource::Doctors, Resource::DoctorAccounts]).await;
    }
    Notice::from_result(&result, "Doctor removed", "Failed to delete")
}
