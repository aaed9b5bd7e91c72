use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::metadata::{PKG_DESCRIPTION, PKG_NAME, PKG_VERSION};
use crate::types::{
    ActionPlanDifficulty, ActionPlanPriority, ActionPlanStatus, ActivityCategory,
    MilestoneCategory,
};

#[derive(Parser, Debug, Clone)]
#[command(name = PKG_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    /// Directory holding the tracker data file
    #[arg(long, env = "PECC_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in (prompts for missing credentials)
    Login {
        /// Login identifier
        #[arg(long)]
        user: Option<String>,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Log and list activities
    #[command(subcommand)]
    Activity(ActivityCommand),
    /// Track program milestones
    #[command(subcommand)]
    Milestone(MilestoneCommand),
    /// View and edit the readiness assessment
    #[command(subcommand)]
    Assessment(AssessmentCommand),
    /// Attach action plans to assessment questions
    #[command(subcommand)]
    Plan(PlanCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum ActivityCommand {
    /// Log a new activity
    Add(AddActivityArgs),
    /// List logged activities
    List,
}

#[derive(Args, Debug, Clone)]
pub struct AddActivityArgs {
    /// Activity title
    pub title: String,

    /// Activity category
    #[arg(long, value_enum, default_value = "general-admin")]
    pub category: ActivityCategory,

    /// Date (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub date: Option<chrono::NaiveDate>,

    /// Hours spent
    #[arg(long, default_value_t = 0.0)]
    pub hours: f64,

    /// Simulation type (for simulation activities)
    #[arg(long)]
    pub simulation_type: Option<String>,

    /// Number of simulation participants
    #[arg(long)]
    pub simulation_participants: Option<u32>,

    /// Whether simulation feedback was submitted
    #[arg(long)]
    pub feedback_submitted: Option<bool>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum MilestoneCommand {
    /// List milestones grouped by category
    List,
    /// Flip a milestone's completed flag
    Toggle {
        /// Milestone id
        id: u32,
    },
    /// Add a custom milestone
    Add {
        /// Milestone title
        title: String,
        /// Milestone description
        #[arg(long, default_value = "")]
        description: String,
        /// Milestone category
        #[arg(long, value_enum, default_value = "initial")]
        category: MilestoneCategory,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum AssessmentCommand {
    /// Print the stored assessment as JSON
    Show,
    /// Read one field by dotted path (e.g. facilityInfo.has24HourED)
    Get {
        /// Dotted field path
        path: String,
    },
    /// Answer a yes/no question; picking the stored answer again clears it
    Answer {
        /// Dotted field path of the question
        path: String,
        /// The answer to select
        #[arg(value_enum)]
        answer: Answer,
    },
    /// Set one field by dotted path; the value is JSON (true, false, null,
    /// "a string", ...), with bare words taken as strings
    Set {
        /// Dotted field path
        path: String,
        /// New value
        value: String,
    },
    /// Fetch a hosted assessment and store it (falls back to the default
    /// record when the fetch fails)
    Fetch {
        /// Base URL of the hosting service
        #[arg(long, env = "PECC_REMOTE_URL", default_value = "http://localhost:3000")]
        base_url: String,
    },
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum Answer {
    Yes,
    No,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlanCommand {
    /// Create or overwrite the action plan for a question
    Set(SetPlanArgs),
    /// Show the action plan for a question
    Show {
        /// Question identifier (dotted assessment path)
        question: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SetPlanArgs {
    /// Question identifier (dotted assessment path)
    pub question: String,

    /// Planned action
    #[arg(long, default_value = "")]
    pub action: String,

    /// Who owns the action
    #[arg(long, default_value = "")]
    pub owner: String,

    /// Plan status
    #[arg(long, value_enum, default_value = "need-to-develop")]
    pub status: ActionPlanStatus,

    /// Eisenhower priority bucket
    #[arg(long, value_enum, default_value = "do-now")]
    pub priority: ActionPlanPriority,

    /// Impact/effort bucket
    #[arg(long, value_enum, default_value = "quick-win")]
    pub difficulty: ActionPlanDifficulty,

    /// Due date
    #[arg(long, default_value = "")]
    pub due_date: String,

    /// Free-form notes
    #[arg(long, default_value = "")]
    pub notes: String,
}
