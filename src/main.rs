mod assessment;
mod catalog;
mod cli;
mod error;
mod metadata;
mod patch;
mod remote;
mod session;
mod store;
mod tracker;
mod types;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use dialoguer::{Input, Password};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::assessment::TriState;
use crate::cli::{ActivityCommand, AssessmentCommand, Cli, Command, MilestoneCommand, PlanCommand};
use crate::error::TrackerError;
use crate::store::FileStore;
use crate::tracker::{NewActivity, Tracker};
use crate::types::{ActionPlan, Milestone};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {e}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn data_file(data_dir: Option<PathBuf>) -> PathBuf {
    let dir = data_dir.unwrap_or_else(|| {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".pecc-tracker")
    });
    dir.join("data.json")
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let kv = FileStore::open(data_file(cli.data_dir))?;
    let mut tracker = Tracker::new(kv);

    match cli.command {
        Command::Login { user, password } => {
            let user = match user {
                Some(user) => user,
                None => Input::new().with_prompt("User").interact_text()?,
            };
            let password = match password {
                Some(password) => password,
                None => Password::new().with_prompt("Password").interact()?,
            };
            match tracker.login(&user, &password)? {
                Some(identity) => {
                    println!("{} signed in as {}", "ok:".green().bold(), identity.email)
                }
                None => {
                    eprintln!("{} invalid credentials", "error:".red().bold());
                    std::process::exit(1);
                }
            }
        }
        Command::Logout => {
            tracker.logout()?;
            println!("{} signed out", "ok:".green().bold());
        }
        Command::Whoami => match tracker.current_user() {
            Some(identity) => {
                println!("{} <{}> ({})", identity.name.bold(), identity.email, identity.role)
            }
            None => println!("not signed in"),
        },
        Command::Activity(command) => run_activity(&mut tracker, command)?,
        Command::Milestone(command) => run_milestone(&mut tracker, command)?,
        Command::Assessment(command) => run_assessment(&mut tracker, command)?,
        Command::Plan(command) => run_plan(&mut tracker, command)?,
    }

    Ok(())
}

fn run_activity(
    tracker: &mut Tracker<FileStore>,
    command: ActivityCommand,
) -> Result<(), TrackerError> {
    match command {
        ActivityCommand::Add(args) => {
            let activity = tracker.log_activity(NewActivity {
                date: args.date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                title: args.title,
                category: args.category,
                hours: args.hours,
                simulation_type: args.simulation_type,
                simulation_participants: args.simulation_participants,
                feedback_submitted: args.feedback_submitted,
                notes: args.notes,
            })?;
            println!(
                "{} logged #{} {} ({} h)",
                "ok:".green().bold(),
                activity.id,
                activity.title,
                activity.hours
            );
        }
        ActivityCommand::List => {
            let activities = tracker.activities()?;
            if activities.is_empty() {
                println!("no activities logged yet");
            }
            for activity in activities {
                println!(
                    "#{:<3} {}  {:<5} h  {:?}  {}",
                    activity.id,
                    activity.date,
                    activity.hours,
                    activity.category,
                    activity.title.bold()
                );
            }
        }
    }
    Ok(())
}

fn milestone_line(milestone: &Milestone) -> String {
    let mark = if milestone.completed {
        "[x]".green().to_string()
    } else {
        "[ ]".to_string()
    };
    format!("{mark} #{:<3} {}", milestone.id, milestone.title.bold())
}

fn run_milestone(
    tracker: &mut Tracker<FileStore>,
    command: MilestoneCommand,
) -> Result<(), TrackerError> {
    match command {
        MilestoneCommand::List => {
            for milestone in tracker.milestones()? {
                println!("{}", milestone_line(&milestone));
                if !milestone.description.is_empty() {
                    println!("      {}", milestone.description);
                }
                for item in milestone.sub_items.iter().flatten() {
                    println!("      - {item}");
                }
            }
        }
        MilestoneCommand::Toggle { id } => {
            let milestone = tracker.toggle_milestone(id)?;
            println!("{}", milestone_line(&milestone));
        }
        MilestoneCommand::Add {
            title,
            description,
            category,
        } => {
            let milestone = tracker.add_milestone(title, description, category)?;
            println!("{} added {}", "ok:".green().bold(), milestone_line(&milestone));
        }
    }
    Ok(())
}

/// Parses a CLI value as JSON, taking bare words as strings so that
/// `assessment set contactInfo.name Jane` works without quoting.
fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

fn run_assessment(
    tracker: &mut Tracker<FileStore>,
    command: AssessmentCommand,
) -> Result<(), TrackerError> {
    match command {
        AssessmentCommand::Show => {
            let assessment = tracker.assessment()?;
            println!(
                "{}",
                serde_json::to_string_pretty(&assessment).map_err(store::StoreError::Json)?
            );
        }
        AssessmentCommand::Get { path } => {
            println!("{}", tracker.assessment_field(&path)?);
        }
        AssessmentCommand::Answer { path, answer } => {
            let state = tracker.answer_question(&path, matches!(answer, cli::Answer::Yes))?;
            let shown = match state {
                TriState::Yes => "yes",
                TriState::No => "no",
                TriState::Unset => "unanswered",
            };
            println!("{} {path} is now {shown}", "ok:".green().bold());
        }
        AssessmentCommand::Set { path, value } => {
            tracker.set_assessment_field(&path, parse_value(&value))?;
            println!("{} {path} updated", "ok:".green().bold());
        }
        AssessmentCommand::Fetch { base_url } => {
            let assessment = remote::fetch_readiness_assessment(&base_url);
            tracker.replace_assessment(assessment)?;
            println!("{} assessment stored", "ok:".green().bold());
        }
    }
    Ok(())
}

fn run_plan(tracker: &mut Tracker<FileStore>, command: PlanCommand) -> Result<(), TrackerError> {
    match command {
        PlanCommand::Set(args) => {
            tracker.set_action_plan(
                &args.question,
                ActionPlan {
                    action: args.action,
                    owner: args.owner,
                    status: args.status,
                    priority: args.priority,
                    difficulty: args.difficulty,
                    due_date: args.due_date,
                    notes: args.notes,
                },
            )?;
            println!("{} plan saved for {}", "ok:".green().bold(), args.question);
        }
        PlanCommand::Show { question } => match tracker.action_plan(&question)? {
            Some(plan) => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&plan).map_err(store::StoreError::Json)?
                );
            }
            None => println!("no action plan for {question}"),
        },
    }
    Ok(())
}
