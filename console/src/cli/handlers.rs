// console/src/cli/handlers.rs

// Session, navigation and configuration commands, plus rendering of the
// view a route dispatches to.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use crossterm::style::Stylize;
use lib::config::{save_client_config, ClientConfig};
use lib::ordering::today_utc;
use lib::router::{Route, Screen, View};
use lib::session::login_failure_message;
use lib::views::{dashboards, AdminHome, DoctorHome, PatientHome};
use lib::AppContext;
use log::{debug, info};
use models::menu::{menu_for, menu_for_role};
use models::session::Session;

use crate::cli::commands::ConfigCommand;
use crate::cli::handlers_admin;
use crate::cli::handlers_clinical;
use crate::cli::handlers_utils::{
    money, print_empty, print_header, print_issues, print_menu, print_stat, print_subheader, print_table,
    prompt_password, short_date,
};

/// Runs the route guard for `route`. Returns the dispatched view and session
/// when there is something to render; otherwise explains why not.
pub fn enter(ctx: &AppContext, route: Route) -> Option<(View, Session)> {
    match ctx.open(route) {
        Screen::Render { view, session: Some(session) } if !view.is_placeholder() => Some((view, session)),
        Screen::Render { view, .. } if view.is_placeholder() => {
            println!("{}", view.to_string().dark_grey());
            None
        }
        Screen::Render { .. } | Screen::Nothing => {
            println!("{}", "You are not signed in. Run `medicare login <email>`.".yellow());
            None
        }
        Screen::Loading => {
            println!("Loading...");
            None
        }
    }
}

/// Fails unless the caller's role sees `expected` on the route.
pub fn ensure_view(actual: View, expected: View) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(anyhow!("'{}' is not available from the {} screen", expected.title(), actual.title()))
    }
}

pub async fn handle_login(ctx: &AppContext, email: &str, password: Option<String>) -> Result<()> {
    let password = prompt_password(password)?;
    match ctx.login(email, &password).await {
        Ok(session) => {
            println!("{} Signed in as {} ({})", "✔".green(), session.display_name.as_str().bold(), session.role);
            open_route(ctx, Route::Dashboard).await
        }
        Err(e) => {
            debug!("login error: {:?}", e);
            Err(anyhow!(login_failure_message(&e)))
        }
    }
}

pub fn handle_logout(ctx: &AppContext) {
    match ctx.session() {
        Some(session) => {
            ctx.logout();
            println!("Signed out {}.", session.display_name);
        }
        None => println!("No active session."),
    }
}

pub fn handle_whoami(ctx: &AppContext) {
    match ctx.session() {
        Some(session) => {
            print_stat("Name", &session.display_name);
            print_stat("Role", session.role);
            print_stat("User id", &session.user_id);
            if let Some(email) = &session.profile.email {
                print_stat("Email", email);
            }
        }
        None => println!("Not signed in."),
    }
}

/// The menu for the signed-in role, or for `role_name` when given.
pub fn handle_menu(ctx: &AppContext, role_name: Option<&str>) {
    let items = match (role_name, ctx.session()) {
        (Some(name), _) => menu_for_role(name),
        (None, Some(session)) => menu_for(session.role),
        (None, None) => {
            println!("Not signed in. Pass --role to preview a menu.");
            return;
        }
    };
    print_menu(items);
}

pub fn handle_config_command(ctx: &AppContext, action: ConfigCommand, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigCommand::Show => {
            let yaml = render_config(ctx.config())?;
            println!("{}", yaml);
        }
        ConfigCommand::Save => {
            let path = save_client_config(ctx.config(), config_path).context("Failed to save configuration")?;
            info!("Configuration written to {:?}", path);
            println!("Configuration saved to {}", path.display());
        }
    }
    Ok(())
}

fn render_config(config: &ClientConfig) -> Result<String> {
    serde_yaml2::to_string(config).map_err(|e| anyhow!("Failed to render configuration: {:?}", e))
}

pub async fn open_route(ctx: &AppContext, route: Route) -> Result<()> {
    let Some((view, session)) = enter(ctx, route) else {
        return Ok(());
    };
    render_view(ctx, view, &session).await
}

/// Loads and prints whatever `view` shows.
pub async fn render_view(ctx: &AppContext, view: View, session: &Session) -> Result<()> {
    let api = ctx.backend();
    match view {
        View::Login => println!("Already signed in as {}.", session.display_name),
        View::PatientHome => show_patient_home(&dashboards::load_patient_home(api.as_ref(), session, today_utc()).await),
        View::DoctorHome => show_doctor_home(&dashboards::load_doctor_home(api.as_ref(), today_utc()).await),
        View::AdminHome => {
            let home = dashboards::load_admin_home(api.as_ref(), ctx.config().low_stock_threshold).await;
            show_admin_home(&home);
        }
        View::PatientAppointments | View::DoctorAppointments | View::AdminAppointments => {
            handlers_clinical::list_appointments(ctx, view, &Default::default()).await
        }
        View::EmergencyBoard => handlers_clinical::show_er_once(ctx).await,
        View::Admissions => handlers_clinical::show_admissions(ctx).await,
        View::PatientPrescriptions | View::DoctorPrescriptions => handlers_clinical::show_prescriptions(ctx, view).await,
        View::PatientBilling | View::AdminBilling => handlers_admin::show_billing(ctx, view).await,
        View::PatientFeedback | View::AdminFeedback => handlers_admin::show_feedback(ctx, session).await,
        View::DoctorInventory | View::AdminInventory => handlers_admin::list_inventory(ctx, view, "", None).await,
        View::Maintenance => handlers_admin::show_maintenance(ctx).await,
        View::PatientDirectory => handlers_admin::list_patients(ctx, "").await,
        View::StaffDirectory => handlers_admin::show_staff(ctx).await,
        View::Placeholder { .. } => println!("{}", view.to_string().dark_grey()),
    }
    Ok(())
}

fn show_patient_home(home: &PatientHome) {
    print_header(&format!("Hello, {}", home.first_name));
    print_issues(&home.issues);
    match home.next_appointment() {
        Some(next) => println!(
            "Next appointment: {} at {} with {}",
            short_date(next.date).bold(),
            next.slot,
            next.doctor_name()
        ),
        None => println!("No upcoming appointments."),
    }
    print_subheader("Upcoming");
    if home.upcoming.is_empty() {
        print_empty("upcoming appointments");
    } else {
        let rows: Vec<Vec<String>> = home
            .upcoming
            .iter()
            .map(|a| vec![short_date(a.date), a.slot.clone(), a.doctor_name().to_string(), a.status.as_str().to_string()])
            .collect();
        print_table(&["Date", "Slot", "Doctor", "Status"], &rows);
    }
    print_subheader("Recent prescriptions");
    if home.recent_prescriptions.is_empty() {
        print_empty("prescriptions");
    }
    for p in &home.recent_prescriptions {
        let meds: Vec<&str> = p.medicines.iter().map(|m| m.name.as_str()).collect();
        println!("  {}  {}  {}", short_date(p.created_at), p.doctor_name(), meds.join(", "));
    }
}

fn show_doctor_home(home: &DoctorHome) {
    print_header("Doctor Dashboard");
    print_issues(&home.issue);
    print_stat("Today's appointments", home.stats.total);
    print_stat("Still to see", home.stats.pending);
    print_stat("All appointments", home.total);
    if let Some(next) = &home.stats.next_patient {
        print_stat("Next patient", format!("{} at {}", next.patient_name, next.slot));
    }
    print_subheader("Today");
    if home.today.is_empty() {
        print_empty("appointments today");
        return;
    }
    let rows: Vec<Vec<String>> = home
        .today
        .iter()
        .map(|a| vec![a.slot.clone(), a.patient_name.clone(), a.status.as_str().to_string(), a.id.clone()])
        .collect();
    print_table(&["Slot", "Patient", "Status", "Id"], &rows);
}

fn show_admin_home(home: &AdminHome) {
    print_header("Hospital Administration");
    print_issues(&home.issues);
    print_stat("Doctors on staff", home.staff_count);
    print_stat("Bed occupancy", format!("{}/{}", home.occupied_beds, home.total_beds));
    print_stat("Revenue collected", money(home.revenue));
    print_stat("Low stock items", home.low_stock);
    print_stat("New complaints", home.new_complaints);
}
