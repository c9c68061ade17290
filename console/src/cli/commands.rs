// console/src/cli/commands.rs

// Subcommands for each area of the console.

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use lib::views::appointments::ScheduleFilter;
use models::medical::{AdjustmentKind, AppointmentStatus, ErStatus, FeedbackStatus, TicketPriority};

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ErArgs {
    /// Keep the board on screen and refresh it on the poll interval
    #[arg(long, short = 'w')]
    pub watch: bool,
    #[command(subcommand)]
    pub action: Option<ErCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ErCommand {
    /// Move a case to a new status (Waiting, "In Treatment", Admitted, Discharged)
    Status { id: String, status: ErStatus },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum AppointmentCommand {
    /// List appointments the way your role sees them
    List {
        #[arg(long, short = 's', default_value = "")]
        search: String,
        /// Admin only: restrict to one status
        #[arg(long)]
        status: Option<AppointmentStatus>,
        /// Admin only: restrict to one day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Doctor only: today, upcoming, history or all
        #[arg(long, default_value = "today")]
        when: ScheduleFilter,
    },
    /// Book a slot with a doctor
    Book {
        doctor_id: String,
        date: NaiveDate,
        slot: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Change an appointment's status (Pending, Confirmed, Completed, Cancelled)
    Update { id: String, status: AppointmentStatus },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum MaintenanceCommand {
    Create {
        item: String,
        #[arg(long, default_value = "General")]
        department: String,
        #[arg(long = "type", default_value = "Repair")]
        issue_type: String,
        #[arg(long, default_value = "Medium")]
        priority: TicketPriority,
        #[arg(long, default_value = "")]
        description: String,
        /// Bed the ticket is about, if any
        #[arg(long, default_value = "")]
        bed: String,
    },
    Resolve { id: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDirection {
    Add,
    Remove,
}

impl From<StockDirection> for AdjustmentKind {
    fn from(direction: StockDirection) -> Self {
        match direction {
            StockDirection::Add => AdjustmentKind::Add,
            StockDirection::Remove => AdjustmentKind::Remove,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum InventoryCommand {
    List {
        #[arg(long, short = 's', default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
    },
    Add {
        name: String,
        sku: String,
        #[arg(long, default_value = "Medicine")]
        category: String,
        #[arg(long, default_value_t = 0)]
        quantity: i64,
        #[arg(long, default_value_t = 0.0)]
        unit_price: f64,
        /// YYYY-MM-DD
        #[arg(long)]
        expiry: Option<String>,
    },
    Adjust {
        id: String,
        amount: i64,
        #[arg(value_enum, default_value = "add")]
        direction: StockDirection,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum AdmissionCommand {
    Admit {
        bed_id: String,
        patient_id: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    Discharge { bed_id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum BillingCommand {
    /// Bill a patient. Lines are `description=cost`.
    Create {
        patient_id: String,
        #[arg(required = true)]
        lines: Vec<String>,
    },
    Pay { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum FeedbackCommand {
    Submit {
        /// 1 to 5 stars
        rating: u8,
        message: String,
        #[arg(long = "type", default_value = "Suggestion")]
        kind: String,
        #[arg(long, default_value = "General")]
        department: String,
    },
    Resolve {
        id: String,
        #[arg(long, default_value = "Resolved")]
        status: FeedbackStatus,
        #[arg(long, default_value = "")]
        response: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum PrescriptionCommand {
    /// Prescribe for a patient. Medicines are `name[:dosage[:frequency[:duration]]]`.
    Write {
        patient_id: String,
        #[arg(required = true)]
        medicines: Vec<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum StaffCommand {
    Add {
        name: String,
        specialization: String,
        /// Comma separated, e.g. "09:00 AM, 10:00 AM"
        #[arg(long, default_value = "")]
        slots: String,
    },
    Update {
        id: String,
        name: String,
        specialization: String,
        #[arg(long, default_value = "")]
        slots: String,
    },
    Remove { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum PatientCommand {
    List {
        #[arg(long, short = 's', default_value = "")]
        search: String,
    },
    Register {
        name: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write the effective configuration to the config file
    Save,
}
