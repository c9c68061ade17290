// console/src/cli/handlers_clinical.rs

// Emergency room, appointments, admissions and prescriptions.

use std::io::stdout;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use lib::router::{Route, View};
use lib::views::appointments::{self, AppointmentFilter, BookingRequest, ScheduleFilter};
use lib::views::{admissions, er, prescriptions, ErBoard};
use lib::AppContext;
use log::{info, warn};
use models::medical::{Appointment, AppointmentStatus};
use models::session::Role;
use tokio::sync::mpsc;

use crate::cli::commands::{AdmissionCommand, AppointmentCommand, ErArgs, ErCommand, PrescriptionCommand};
use crate::cli::handlers::{ensure_view, enter};
use crate::cli::handlers_utils::{
    money, parse_medicine, print_empty, print_header, print_issues, print_notice, print_stat, print_subheader,
    print_table, short_date, shutdown_signal, triage_badge,
};

// ---------------------------------------------------------------------------
// Emergency room
// ---------------------------------------------------------------------------

pub async fn handle_er_command(ctx: &AppContext, args: ErArgs) -> Result<()> {
    let Some((view, _session)) = enter(ctx, Route::Emergency) else {
        return Ok(());
    };
    ensure_view(view, View::EmergencyBoard)?;
    match args.action {
        Some(ErCommand::Status { id, status }) => {
            ctx.require_role(&[Role::Doctor, Role::Admin])?;
            let notice = er::update_er_status(&ctx.backend(), &id, status).await;
            print_notice(&notice);
            Ok(())
        }
        None if args.watch => watch_er(ctx).await,
        None => {
            show_er_once(ctx).await;
            Ok(())
        }
    }
}

pub async fn show_er_once(ctx: &AppContext) {
    let board = er::refresh_er_board(&ctx.backend()).await;
    show_er_board(&board);
}

fn show_er_board(board: &ErBoard) {
    print_header("Emergency Room");
    print_issues(&board.issue);
    print_stat("Critical (Red)", board.stats.critical.to_string().red().bold());
    print_stat("Waiting", board.stats.waiting);
    print_stat("Active cases", board.stats.total);
    println!();
    if board.cases.is_empty() {
        print_empty("active ER cases");
        return;
    }
    for case in &board.cases {
        let next: Vec<&str> = case.status.next_steps().iter().map(|s| s.as_str()).collect();
        println!(
            "{}  {:<24} {:<14} {}  {}",
            triage_badge(case.triage_level),
            case.patient_name,
            case.status.as_str(),
            case.created_at.format("%H:%M"),
            case.id.as_str().dark_grey()
        );
        if let Some(symptoms) = &case.symptoms {
            println!("        {}", symptoms.as_str().italic());
        }
        if !next.is_empty() {
            println!("        {} {}", "next:".dark_grey(), next.join(" | "));
        }
    }
}

async fn watch_er(ctx: &AppContext) -> Result<()> {
    let every = ctx.config().er_poll_interval();
    let (tx, mut rx) = mpsc::channel::<ErBoard>(4);
    let poller = er::spawn_er_poller(ctx.backend(), every, tx);
    info!("Watching ER board every {:?}", every);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            update = rx.recv() => {
                let Some(board) = update else { break };
                if ctx.session().is_none() {
                    warn!("Session ended while watching the ER board");
                    println!("{}", "Your session has ended. Sign in again to keep watching.".yellow());
                    break;
                }
                if let Err(e) = execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
                    warn!("Failed to clear terminal: {}", e);
                }
                show_er_board(&board);
                println!();
                println!(
                    "{}",
                    format!("Refreshing every {}s. Press Ctrl+C to stop.", every.as_secs()).dark_grey()
                );
            }
        }
    }
    poller.stop().await;
    Ok(())
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

/// List filters. Which ones apply depends on the role's view.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub search: String,
    pub status: Option<AppointmentStatus>,
    pub date: Option<NaiveDate>,
    pub when: ScheduleFilter,
}

pub async fn handle_appointment_command(ctx: &AppContext, action: Option<AppointmentCommand>) -> Result<()> {
    let Some((view, session)) = enter(ctx, Route::Appointments) else {
        return Ok(());
    };
    let coordinator = ctx.backend();
    match action {
        None => list_appointments(ctx, view, &ListOptions::default()).await,
        Some(AppointmentCommand::List { search, status, date, when }) => {
            list_appointments(ctx, view, &ListOptions { search, status, date, when }).await
        }
        Some(AppointmentCommand::Book { doctor_id, date, slot, phone }) => {
            ensure_view(view, View::PatientAppointments)?;
            let request = BookingRequest { doctor_id, date, slot, patient_phone: phone };
            print_notice(&appointments::book_appointment(&coordinator, &session, request).await);
        }
        Some(AppointmentCommand::Update { id, status }) => {
            if view != View::DoctorAppointments {
                ensure_view(view, View::AdminAppointments)?;
            }
            print_notice(&appointments::update_appointment_status(&coordinator, &id, status).await);
        }
    }
    Ok(())
}

pub async fn list_appointments(ctx: &AppContext, view: View, options: &ListOptions) {
    let api = ctx.backend();
    match view {
        View::PatientAppointments => {
            let loaded = appointments::load_doctor_directory(api.as_ref()).await;
            print_header("Book an Appointment");
            print_issues(&loaded.issue);
            let doctors = appointments::filter_doctors(&loaded.items, &options.search);
            if doctors.is_empty() {
                print_empty("doctors");
                return;
            }
            let rows: Vec<Vec<String>> = doctors
                .iter()
                .map(|d| {
                    vec![
                        d.name.clone(),
                        d.specialization.clone(),
                        d.available_slots.join(", "),
                        d.fees.map(money).unwrap_or_else(|| "-".into()),
                        d.id.clone(),
                    ]
                })
                .collect();
            print_table(&["Doctor", "Specialization", "Slots", "Fee", "Id"], &rows);
        }
        View::DoctorAppointments => {
            let loaded = appointments::load_doctor_schedule(api.as_ref()).await;
            print_header("My Schedule");
            print_issues(&loaded.issue);
            let shown = appointments::filter_schedule(&loaded.items, options.when, &options.search, Utc::now());
            print_appointments(&shown);
        }
        View::AdminAppointments => {
            let loaded = appointments::load_all_appointments(api.as_ref()).await;
            print_header("Appointment Management");
            print_issues(&loaded.issue);
            let filter = AppointmentFilter {
                search: options.search.clone(),
                status: options.status,
                date: options.date,
            };
            print_appointments(&filter.apply(&loaded.items));
        }
        other => println!("{}", other),
    }
}

fn print_appointments(list: &[&Appointment]) {
    if list.is_empty() {
        print_empty("appointments");
        return;
    }
    let rows: Vec<Vec<String>> = list
        .iter()
        .map(|a| {
            vec![
                short_date(a.date),
                a.slot.clone(),
                a.patient_name.clone(),
                a.doctor_name().to_string(),
                a.status.as_str().to_string(),
                a.id.clone(),
            ]
        })
        .collect();
    print_table(&["Date", "Slot", "Patient", "Doctor", "Status", "Id"], &rows);
}

// ---------------------------------------------------------------------------
// Admissions
// ---------------------------------------------------------------------------

pub async fn handle_admission_command(ctx: &AppContext, action: Option<AdmissionCommand>) -> Result<()> {
    let Some((view, session)) = enter(ctx, Route::Admissions) else {
        return Ok(());
    };
    ensure_view(view, View::Admissions)?;
    let coordinator = ctx.backend();
    match action {
        None => show_admissions(ctx).await,
        Some(AdmissionCommand::Admit { bed_id, patient_id, reason }) => {
            let notice = admissions::admit_patient(&coordinator, &session, &bed_id, &patient_id, &reason).await;
            print_notice(&notice);
        }
        Some(AdmissionCommand::Discharge { bed_id }) => {
            let board = admissions::load_admissions_board(coordinator.as_ref()).await;
            print_issues(&board.issues);
            print_notice(&admissions::discharge_bed(&coordinator, &board, &bed_id).await);
        }
    }
    Ok(())
}

pub async fn show_admissions(ctx: &AppContext) {
    let board = admissions::load_admissions_board(ctx.backend().as_ref()).await;
    print_header("Inpatient Admissions");
    print_issues(&board.issues);
    if board.wards.is_empty() {
        print_empty("beds");
    }
    for ward in &board.wards {
        print_subheader(&format!("{} ({}/{} occupied)", ward.name, ward.occupied(), ward.beds.len()));
        let rows: Vec<Vec<String>> = ward
            .beds
            .iter()
            .map(|bed| {
                let occupant = board.admission_for_bed(&bed.id).map(|a| a.patient_name().to_string());
                vec![
                    bed.bed_number.clone(),
                    format!("{:?}", bed.status),
                    occupant.unwrap_or_default(),
                    bed.id.clone(),
                ]
            })
            .collect();
        print_table(&["Bed", "Status", "Patient", "Id"], &rows);
    }
    println!();
    print_stat("Patients available to admit", board.patients.len());
}

// ---------------------------------------------------------------------------
// Prescriptions
// ---------------------------------------------------------------------------

pub async fn handle_prescription_command(ctx: &AppContext, action: Option<PrescriptionCommand>) -> Result<()> {
    let Some((view, session)) = enter(ctx, Route::Prescriptions) else {
        return Ok(());
    };
    match action {
        None => show_prescriptions(ctx, view).await,
        Some(PrescriptionCommand::Write { patient_id, medicines, notes }) => {
            ensure_view(view, View::DoctorPrescriptions)?;
            let medicines = medicines.iter().map(|m| parse_medicine(m)).collect();
            let notice =
                prescriptions::write_prescription(&ctx.backend(), &session, &patient_id, medicines, &notes).await;
            print_notice(&notice);
        }
    }
    Ok(())
}

pub async fn show_prescriptions(ctx: &AppContext, view: View) {
    let api = ctx.backend();
    match view {
        View::PatientPrescriptions => {
            let loaded = prescriptions::load_prescription_history(api.as_ref()).await;
            print_header("Medical Records");
            print_issues(&loaded.issue);
            if loaded.items.is_empty() {
                print_empty("prescriptions");
            }
            for p in &loaded.items {
                print_subheader(&format!("{}  {}", short_date(p.created_at), p.doctor_name()));
                for m in &p.medicines {
                    println!("  {:<24} {:<10} {:<8} {}", m.name, m.dosage, m.frequency, m.duration);
                }
                if let Some(notes) = p.notes.as_deref().filter(|n| !n.is_empty()) {
                    println!("  {}", notes.italic());
                }
            }
        }
        View::DoctorPrescriptions => {
            let loaded = prescriptions::load_prescribable_patients(api.as_ref()).await;
            print_header("Write Prescription");
            print_issues(&loaded.issue);
            if loaded.items.is_empty() {
                print_empty("patients");
                return;
            }
            let rows: Vec<Vec<String>> = loaded
                .items
                .iter()
                .map(|p| vec![p.name.clone(), p.email.clone().unwrap_or_default(), p.id.clone()])
                .collect();
            print_table(&["Patient", "Email", "Id"], &rows);
            println!();
            println!("{}", "medicare prescriptions write <patient-id> <name[:dosage[:frequency[:duration]]]>...".dark_grey());
        }
        other => println!("{}", other),
    }
}
