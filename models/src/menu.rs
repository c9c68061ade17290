// models/src/menu.rs
//! Static navigation menus, one per role.

use log::debug;
use serde::Serialize;

use crate::session::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuIcon {
    Home,
    Users,
    UserPlus,
    Calendar,
    Package,
    AlertCircle,
    Activity,
    FileText,
}

impl MenuIcon {
    pub fn tag(&self) -> &'static str {
        match self {
            MenuIcon::Home => "home",
            MenuIcon::Users => "users",
            MenuIcon::UserPlus => "user-plus",
            MenuIcon::Calendar => "calendar",
            MenuIcon::Package => "package",
            MenuIcon::AlertCircle => "alert-circle",
            MenuIcon::Activity => "activity",
            MenuIcon::FileText => "file-text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: MenuIcon,
}

const fn item(label: &'static str, path: &'static str, icon: MenuIcon) -> MenuItem {
    MenuItem { label, path, icon }
}

pub const ADMIN_MENU: &[MenuItem] = &[
    item("Overview", "/dashboard", MenuIcon::Home),
    item("Patients", "/dashboard/patients", MenuIcon::UserPlus),
    item("Appointments", "/dashboard/appointments", MenuIcon::Calendar),
    item("Pharmacy", "/dashboard/inventory", MenuIcon::Package),
    item("Emergency", "/dashboard/er", MenuIcon::AlertCircle),
    item("HR & Staff", "/dashboard/hr", MenuIcon::Users),
    item("Admissions", "/dashboard/admissions", MenuIcon::Activity),
    item("Management", "/dashboard/management", MenuIcon::FileText),
];

pub const DOCTOR_MENU: &[MenuItem] = &[
    item("My Dashboard", "/dashboard", MenuIcon::Home),
    item("Appointments", "/dashboard/appointments", MenuIcon::Calendar),
    item("My Patients", "/dashboard/patients", MenuIcon::Users),
    item("Medical Records", "/dashboard/records", MenuIcon::FileText),
    item("Prescriptions", "/dashboard/prescriptions", MenuIcon::Package),
    item("Emergency Cases", "/dashboard/er", MenuIcon::AlertCircle),
    item("Inventory", "/dashboard/inventory", MenuIcon::Activity),
];

pub const PATIENT_MENU: &[MenuItem] = &[
    item("Home", "/dashboard", MenuIcon::Home),
    item("Book Appointment", "/dashboard/appointments", MenuIcon::Calendar),
    item("Prescription", "/dashboard/prescriptions", MenuIcon::Package),
    item("Billing", "/dashboard/billing", MenuIcon::Activity),
    item("Feedback", "/dashboard/feedback", MenuIcon::AlertCircle),
];

pub fn menu_for(role: Role) -> &'static [MenuItem] {
    match role {
        Role::Admin => ADMIN_MENU,
        Role::Doctor => DOCTOR_MENU,
        Role::Patient => PATIENT_MENU,
    }
}

/// Menu lookup by role name. Names outside the role set get the patient menu.
pub fn menu_for_role(name: &str) -> &'static [MenuItem] {
    match name.parse::<Role>() {
        Ok(role) => menu_for(role),
        Err(_) => {
            debug!("No menu for role '{}', falling back to patient menu", name);
            PATIENT_MENU
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_menu() {
        for role in Role::ALL {
            assert!(!menu_for(role).is_empty(), "{} menu is empty", role);
            assert_eq!(menu_for(role)[0].path, "/dashboard");
        }
    }

    #[test]
    fn unknown_role_names_get_patient_menu() {
        for name in ["nurse", "", "ADMIN", "root"] {
            assert_eq!(menu_for_role(name), PATIENT_MENU);
        }
        assert_eq!(menu_for_role("doctor"), DOCTOR_MENU);
    }

    #[test]
    fn admin_menu_keeps_sidebar_order() {
        let labels: Vec<_> = ADMIN_MENU.iter().map(|i| i.label).collect();
        assert_eq!(
            labels,
            ["Overview", "Patients", "Appointments", "Pharmacy", "Emergency", "HR & Staff", "Admissions", "Management"]
        );
        assert_eq!(ADMIN_MENU[3].icon.tag(), "package");
    }
}
