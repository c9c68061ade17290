// lib/src/router/routes.rs
use std::fmt;
use std::str::FromStr;

use models::errors::HospitalError;

/// Every page the console knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Appointments,
    Billing,
    Feedback,
    Inventory,
    Prescriptions,
    Patients,
    Emergency,
    Admissions,
    Management,
    Staff,
    Records,
}

impl Route {
    pub const ALL: [Route; 13] = [
        Route::Login,
        Route::Dashboard,
        Route::Appointments,
        Route::Billing,
        Route::Feedback,
        Route::Inventory,
        Route::Prescriptions,
        Route::Patients,
        Route::Emergency,
        Route::Admissions,
        Route::Management,
        Route::Staff,
        Route::Records,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/dashboard",
            Route::Appointments => "/dashboard/appointments",
            Route::Billing => "/dashboard/billing",
            Route::Feedback => "/dashboard/feedback",
            Route::Inventory => "/dashboard/inventory",
            Route::Prescriptions => "/dashboard/prescriptions",
            Route::Patients => "/dashboard/patients",
            Route::Emergency => "/dashboard/er",
            Route::Admissions => "/dashboard/admissions",
            Route::Management => "/dashboard/management",
            Route::Staff => "/dashboard/hr",
            Route::Records => "/dashboard/records",
        }
    }

    /// Everything under `/dashboard` requires a session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = HospitalError;

    /// Accepts full paths (`/dashboard/er`) and bare page names (`er`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.trim_end_matches('/');
        let normalized = if normalized.is_empty() && trimmed.starts_with('/') { "/" } else { normalized };

        if let Some(route) = Route::ALL.iter().find(|r| r.path() == normalized) {
            return Ok(*route);
        }
        let bare = normalized.trim_start_matches('/');
        match bare {
            "login" => Ok(Route::Login),
            "dashboard" | "home" => Ok(Route::Dashboard),
            _ => Route::ALL
                .iter()
                .find(|r| r.path().rsplit('/').next() == Some(bare) && r.is_protected())
                .copied()
                .ok_or_else(|| HospitalError::RouteNotFound(trimmed.to_string())),
        }
    }
}
