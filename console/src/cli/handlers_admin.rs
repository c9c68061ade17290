// console/src/cli/handlers_admin.rs

// Facility, pharmacy, billing, feedback and directory commands.

use anyhow::Result;
use crossterm::style::Stylize;
use lib::router::{Route, View};
use lib::views::{billing, directory, feedback, inventory, maintenance};
use lib::AppContext;
use models::medical::{DoctorForm, InvoiceLine, NewFeedback, NewInventoryItem, NewTicket};
use models::session::Session;

use crate::cli::commands::{
    BillingCommand, FeedbackCommand, InventoryCommand, MaintenanceCommand, PatientCommand, StaffCommand,
};
use crate::cli::handlers::{ensure_view, enter};
use crate::cli::handlers_utils::{
    money, parse_invoice_line, print_empty, print_header, print_issues, print_notice, print_stat, print_table,
    prompt_password, short_date,
};

// ---------------------------------------------------------------------------
// Facility management
// ---------------------------------------------------------------------------

pub async fn handle_maintenance_command(ctx: &AppContext, action: Option<MaintenanceCommand>) -> Result<()> {
    let Some((view, _session)) = enter(ctx, Route::Management) else {
        return Ok(());
    };
    ensure_view(view, View::Maintenance)?;
    let coordinator = ctx.backend();
    match action {
        None => show_maintenance(ctx).await,
        Some(MaintenanceCommand::Create { item, department, issue_type, priority, description, bed }) => {
            let ticket = NewTicket { department, item, issue_type, priority, description, bed_id: bed };
            print_notice(&maintenance::create_ticket(&coordinator, ticket).await);
        }
        Some(MaintenanceCommand::Resolve { id }) => {
            print_notice(&maintenance::resolve_ticket(&coordinator, &id).await);
        }
    }
    Ok(())
}

pub async fn show_maintenance(ctx: &AppContext) {
    let board = maintenance::load_maintenance_board(ctx.backend().as_ref()).await;
    print_header("Facility Management");
    print_issues(&board.issues);
    print_stat("Open tickets", board.open_tickets().count());
    print_stat("Beds", board.beds.len());
    println!();
    if board.tickets.is_empty() {
        print_empty("maintenance tickets");
        return;
    }
    let rows: Vec<Vec<String>> = board
        .tickets
        .iter()
        .map(|t| {
            vec![
                t.priority.as_str().to_string(),
                t.item.clone(),
                t.issue_type.clone(),
                t.department.clone(),
                t.status.clone(),
                short_date(t.created_at),
                t.id.clone(),
            ]
        })
        .collect();
    print_table(&["Priority", "Item", "Type", "Department", "Status", "Opened", "Id"], &rows);
}

// ---------------------------------------------------------------------------
// Pharmacy
// ---------------------------------------------------------------------------

pub async fn handle_inventory_command(ctx: &AppContext, action: Option<InventoryCommand>) -> Result<()> {
    let Some((view, _session)) = enter(ctx, Route::Inventory) else {
        return Ok(());
    };
    let coordinator = ctx.backend();
    match action {
        None => list_inventory(ctx, view, "", None).await,
        Some(InventoryCommand::List { search, category }) => {
            list_inventory(ctx, view, &search, category.as_deref()).await
        }
        Some(InventoryCommand::Add { name, sku, category, quantity, unit_price, expiry }) => {
            ensure_view(view, View::AdminInventory)?;
            let item = NewInventoryItem { name, sku, category, quantity, unit_price, expiry_date: expiry };
            print_notice(&inventory::add_item(&coordinator, item).await);
        }
        Some(InventoryCommand::Adjust { id, amount, direction }) => {
            ensure_view(view, View::AdminInventory)?;
            print_notice(&inventory::adjust_stock(&coordinator, &id, amount, direction.into()).await);
        }
    }
    Ok(())
}

pub async fn list_inventory(ctx: &AppContext, view: View, search: &str, category: Option<&str>) {
    let api = ctx.backend();
    let threshold = ctx.config().low_stock_threshold;
    let loaded = match view {
        View::DoctorInventory => inventory::load_stock_check(api.as_ref()).await,
        View::AdminInventory => inventory::load_inventory(api.as_ref()).await,
        other => {
            println!("{}", other);
            return;
        }
    };
    print_header(&view.title());
    print_issues(&loaded.issue);
    if view == View::AdminInventory {
        let summary = inventory::stock_summary(&loaded.items, threshold);
        print_stat("Items", summary.total_items);
        print_stat("Low stock", summary.low_stock);
        print_stat("Stock value", money(summary.total_value));
        print_stat("Categories", inventory::categories(&loaded.items).join(", "));
        println!();
    }
    let shown = inventory::filter_inventory(&loaded.items, search, category);
    if shown.is_empty() {
        print_empty("inventory items");
        return;
    }
    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|i| {
            let quantity = if i.is_low(threshold) { format!("{} (low)", i.quantity) } else { i.quantity.to_string() };
            vec![
                i.name.clone(),
                i.sku.clone(),
                i.category.clone(),
                quantity,
                money(i.unit_price),
                i.expiry_date.map(short_date).unwrap_or_default(),
                i.id.clone(),
            ]
        })
        .collect();
    print_table(&["Name", "SKU", "Category", "Qty", "Price", "Expires", "Id"], &rows);
}

// ---------------------------------------------------------------------------
// Billing
// ---------------------------------------------------------------------------

pub async fn handle_billing_command(ctx: &AppContext, action: Option<BillingCommand>) -> Result<()> {
    let Some((view, _session)) = enter(ctx, Route::Billing) else {
        return Ok(());
    };
    let coordinator = ctx.backend();
    match action {
        None => show_billing(ctx, view).await,
        Some(BillingCommand::Create { patient_id, lines }) => {
            ensure_view(view, View::AdminBilling)?;
            let lines = lines.iter().map(|l| parse_invoice_line(l)).collect::<Result<Vec<InvoiceLine>>>()?;
            print_notice(&billing::create_invoice(&coordinator, &patient_id, lines).await);
        }
        Some(BillingCommand::Pay { id }) => {
            ensure_view(view, View::PatientBilling)?;
            print_notice(&billing::pay_invoice(&coordinator, &id).await);
        }
    }
    Ok(())
}

pub async fn show_billing(ctx: &AppContext, view: View) {
    let api = ctx.backend();
    let (invoices, issues) = match view {
        View::PatientBilling => {
            let loaded = billing::load_my_invoices(api.as_ref()).await;
            (loaded.items, loaded.issue.into_iter().collect::<Vec<_>>())
        }
        View::AdminBilling => {
            let desk = billing::load_billing_desk(api.as_ref()).await;
            (desk.invoices, desk.issues)
        }
        other => {
            println!("{}", other);
            return;
        }
    };
    print_header(&view.title());
    print_issues(&issues);
    let totals = billing::billing_totals(&invoices);
    print_stat("Paid", money(totals.paid));
    print_stat("Outstanding", money(totals.outstanding));
    println!();
    if invoices.is_empty() {
        print_empty("invoices");
        return;
    }
    let rows: Vec<Vec<String>> = invoices
        .iter()
        .map(|inv| {
            vec![
                format!("#{}", inv.short_id()),
                inv.patient_name().to_string(),
                inv.created_at.map(short_date).unwrap_or_default(),
                money(inv.total_amount),
                if inv.is_paid() { "Paid" } else { "Unpaid" }.to_string(),
                inv.id.clone(),
            ]
        })
        .collect();
    print_table(&["Invoice", "Patient", "Date", "Total", "Status", "Id"], &rows);
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

pub async fn handle_feedback_command(ctx: &AppContext, action: Option<FeedbackCommand>) -> Result<()> {
    let Some((view, session)) = enter(ctx, Route::Feedback) else {
        return Ok(());
    };
    let coordinator = ctx.backend();
    match action {
        None => show_feedback(ctx, &session).await,
        Some(FeedbackCommand::Submit { rating, message, kind, department }) => {
            ensure_view(view, View::PatientFeedback)?;
            let entry = NewFeedback { kind, department, message, rating };
            print_notice(&feedback::submit_feedback(&coordinator, entry).await);
        }
        Some(FeedbackCommand::Resolve { id, status, response }) => {
            ensure_view(view, View::AdminFeedback)?;
            print_notice(&feedback::resolve_feedback(&coordinator, &id, status, &response).await);
        }
    }
    Ok(())
}

pub async fn show_feedback(ctx: &AppContext, session: &Session) {
    let loaded = feedback::load_feedback(ctx.backend().as_ref(), session).await;
    print_header("Feedback");
    print_issues(&loaded.issue);
    if loaded.items.is_empty() {
        print_empty("feedback");
        return;
    }
    for entry in &loaded.items {
        let stars = "★".repeat(entry.rating.min(5) as usize);
        println!(
            "{} {:<11} {:<14} {:<13} {}",
            stars.as_str().yellow(),
            entry.kind,
            entry.department,
            format!("{:?}", entry.status),
            entry.id.as_str().dark_grey()
        );
        println!("    {}", entry.message);
        if let Some(response) = entry.admin_response.as_deref().filter(|r| !r.is_empty()) {
            println!("    {} {}", "Response:".dark_grey(), response);
        }
    }
}

// ---------------------------------------------------------------------------
// Staff and patient directories
// ---------------------------------------------------------------------------

pub async fn handle_staff_command(ctx: &AppContext, action: Option<StaffCommand>) -> Result<()> {
    let Some((view, _session)) = enter(ctx, Route::Staff) else {
        return Ok(());
    };
    ensure_view(view, View::StaffDirectory)?;
    let coordinator = ctx.backend();
    match action {
        None => show_staff(ctx).await,
        Some(StaffCommand::Add { name, specialization, slots }) => {
            let form = DoctorForm::with_slot_list(&name, &specialization, &slots);
            print_notice(&directory::add_doctor(&coordinator, form).await);
        }
        Some(StaffCommand::Update { id, name, specialization, slots }) => {
            let form = DoctorForm::with_slot_list(&name, &specialization, &slots);
            print_notice(&directory::update_doctor(&coordinator, &id, form).await);
        }
        Some(StaffCommand::Remove { id }) => {
            print_notice(&directory::remove_doctor(&coordinator, &id).await);
        }
    }
    Ok(())
}

pub async fn show_staff(ctx: &AppContext) {
    let loaded = directory::load_staff(ctx.backend().as_ref()).await;
    print_header("HR & Staff");
    print_issues(&loaded.issue);
    if loaded.items.is_empty() {
        print_empty("doctors");
        return;
    }
    let rows: Vec<Vec<String>> = loaded
        .items
        .iter()
        .map(|d| vec![d.name.clone(), d.specialization.clone(), d.available_slots.join(", "), d.id.clone()])
        .collect();
    print_table(&["Doctor", "Specialization", "Slots", "Id"], &rows);
}

pub async fn handle_patient_command(ctx: &AppContext, action: Option<PatientCommand>) -> Result<()> {
    let Some((view, _session)) = enter(ctx, Route::Patients) else {
        return Ok(());
    };
    ensure_view(view, View::PatientDirectory)?;
    match action {
        None => list_patients(ctx, "").await,
        Some(PatientCommand::List { search }) => list_patients(ctx, &search).await,
        Some(PatientCommand::Register { name, email, password }) => {
            ctx.require_role(&[models::session::Role::Admin])?;
            let password = prompt_password(password)?;
            let notice = directory::register_patient(&ctx.backend(), &name, &email, &password).await;
            print_notice(&notice);
        }
    }
    Ok(())
}

pub async fn list_patients(ctx: &AppContext, search: &str) {
    let loaded = directory::load_patient_directory(ctx.backend().as_ref()).await;
    print_header("Patient Directory");
    print_issues(&loaded.issue);
    let shown = directory::filter_accounts(&loaded.items, search);
    if shown.is_empty() {
        print_empty("patients");
        return;
    }
    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.email.clone().unwrap_or_default(),
                p.created_at.map(short_date).unwrap_or_default(),
                p.id.clone(),
            ]
        })
        .collect();
    print_table(&["Name", "Email", "Registered", "Id"], &rows);
}
