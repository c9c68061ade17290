// console/src/cli/handlers_utils.rs

// Terminal rendering shared by the handlers.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use crossterm::style::{self, Stylize};
use crossterm::terminal::size as terminal_size;
use lib::views::{LoadIssue, Notice};
use log::info;
use models::medical::{Medicine, TriageLevel};
use models::menu::MenuItem;

/// Heading line spanning the terminal width.
pub fn print_header(title: &str) {
    let (cols, _) = terminal_size().unwrap_or((80, 24));
    let width = (cols as usize).clamp(40, 100);
    let rule = "=".repeat(width);
    println!("{}", rule.as_str().with(style::Color::Cyan));
    println!("{}", title.with(style::Color::DarkCyan).bold());
    println!("{}", rule.as_str().with(style::Color::Cyan));
}

pub fn print_subheader(title: &str) {
    println!();
    println!("{}", title.with(style::Color::White).bold().underlined());
}

pub fn print_notice(notice: &Notice) {
    match notice {
        Notice::Success(message) => println!("{} {}", "✔".green(), message.as_str().green()),
        Notice::Failure(message) => println!("{} {}", "✘".red(), message.as_str().red()),
    }
}

pub fn print_issues<'a>(issues: impl IntoIterator<Item = &'a LoadIssue>) {
    for issue in issues {
        println!("{} {}", "!".yellow().bold(), issue.to_string().yellow());
    }
}

pub fn print_empty(what: &str) {
    println!("{}", format!("No {} found.", what).dark_grey());
}

pub fn print_stat(label: &str, value: impl std::fmt::Display) {
    println!("  {:<22} {}", format!("{}:", label).dark_grey(), value.to_string().bold());
}

/// Fixed-width table. Cells longer than their column are cut with an ellipsis.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count()).min(36);
            }
        }
    }
    let header_line: Vec<String> = headers.iter().zip(&widths).map(|(h, w)| pad(h, *w)).collect();
    println!("{}", header_line.join("  ").bold());
    println!("{}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ").dark_grey());
    for row in rows {
        let cells: Vec<String> = row.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        println!("{}", cells.join("  "));
    }
}

fn pad(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}

pub fn triage_badge(level: TriageLevel) -> String {
    let label = format!("{:<6}", level.as_str());
    match level {
        TriageLevel::Red => label.red().bold().to_string(),
        TriageLevel::Yellow => label.yellow().to_string(),
        TriageLevel::Green => label.green().to_string(),
        TriageLevel::Unknown => label.dark_grey().to_string(),
    }
}

pub fn print_menu(items: &[MenuItem]) {
    for item in items {
        println!("  {:<14} {:<26} {}", format!("[{}]", item.icon.tag()).dark_grey(), item.label.bold(), item.path);
    }
}

pub fn short_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Parses `description=cost`.
pub fn parse_invoice_line(raw: &str) -> Result<models::medical::InvoiceLine> {
    let (description, cost) = raw
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("Invoice line '{}' must look like description=cost", raw))?;
    let cost: f64 = cost.trim().parse().with_context(|| format!("Invalid cost in '{}'", raw))?;
    Ok(models::medical::InvoiceLine { description: description.trim().to_string(), cost })
}

/// Parses `name[:dosage[:frequency[:duration]]]`; missing parts keep the form defaults.
pub fn parse_medicine(raw: &str) -> Medicine {
    let mut medicine = lib::views::prescriptions::default_medicine();
    let mut parts = raw.split(':').map(str::trim);
    if let Some(name) = parts.next() {
        medicine.name = name.to_string();
    }
    if let Some(dosage) = parts.next().filter(|s| !s.is_empty()) {
        medicine.dosage = dosage.to_string();
    }
    if let Some(frequency) = parts.next().filter(|s| !s.is_empty()) {
        medicine.frequency = frequency.to_string();
    }
    if let Some(duration) = parts.next().filter(|s| !s.is_empty()) {
        medicine.duration = duration.to_string();
    }
    medicine
}

/// Reads a password from stdin when it was not given on the command line.
pub fn prompt_password(provided: Option<String>) -> Result<String> {
    if let Some(password) = provided {
        return Ok(password);
    }
    print!("Password: ");
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("Failed to read password")?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, stopping..."),
                    _ = tokio::signal::ctrl_c() => info!("Received SIGINT, stopping..."),
                }
            }
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                info!("Received SIGINT, stopping...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received interrupt, stopping...");
    }
}
