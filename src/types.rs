use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::assessment::ReadinessAssessment;
use crate::catalog::default_milestones;

/// The signed-in user. `email` is the partition key for all stored data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityCategory {
    GeneralAdmin,
    PeccEducation,
    MentorMeeting,
    SimPrep,
    SimFacilitation,
    HospitalEd,
    Policies,
    QiPi,
    Collaborative,
    Staffing,
    Disaster,
    InjuryPrevention,
    Equipment,
    SpecialNeeds,
}

/// A logged unit of PECC work (meeting, simulation, training, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: u32,
    pub date: NaiveDate,
    pub title: String,
    pub category: ActivityCategory,
    pub hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_participants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_submitted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MilestoneCategory {
    Initial,
    Ongoing,
    Prs,
    Equipment,
    PatientSafety,
    Staffing,
    Policies,
    Qi,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneLink {
    pub text: String,
    pub url: String,
}

/// A checklist item in the PECC program, optionally carrying reference links
/// and sub-tasks. Only `completed` is mutable after seeding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub category: MilestoneCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<MilestoneLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_items: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ActionPlanStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Needs Update")]
    NeedsUpdate,
    #[default]
    #[serde(rename = "Need to Develop")]
    NeedToDevelop,
    #[serde(rename = "Cannot Be Done at This Time")]
    CannotBeDone,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ActionPlanPriority {
    #[default]
    #[serde(rename = "High Importance & High Urgency (Do Now)")]
    DoNow,
    #[serde(rename = "High Importance & Low Urgency (Do Next)")]
    DoNext,
    #[serde(rename = "Low Importance & High Urgency (Do Later)")]
    DoLater,
    #[serde(rename = "Low Importance & Low Urgency (Do Last)")]
    DoLast,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ActionPlanDifficulty {
    #[serde(rename = "Low Impact & Low Effort (Filler Tasks)")]
    FillerTask,
    #[serde(rename = "Low Impact & High Effort (Hard Slogs)")]
    HardSlog,
    #[default]
    #[serde(rename = "High Impact & Low Effort (Quick Wins)")]
    QuickWin,
    #[serde(rename = "High Impact & High Effort (Big Projects)")]
    BigProject,
}

/// A remediation plan attached to a single assessment question.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionPlan {
    pub action: String,
    pub owner: String,
    pub status: ActionPlanStatus,
    pub priority: ActionPlanPriority,
    pub difficulty: ActionPlanDifficulty,
    pub due_date: String,
    pub notes: String,
}

/// The whole per-user document. One of these is stored per identity and
/// overwritten wholesale on every save.
///
/// Action plans are a persisted collection keyed by question identifier; the
/// original app kept them in transient UI state only, which lost user input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageData {
    pub activities: Vec<Activity>,
    pub milestones: Vec<Milestone>,
    pub readiness_assessment: ReadinessAssessment,
    pub action_plans: HashMap<String, ActionPlan>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            activities: Vec::new(),
            milestones: default_milestones(),
            readiness_assessment: ReadinessAssessment::default(),
            action_plans: HashMap::new(),
        }
    }
}

/// A partial document for `write_user_data`: a key that is present fully
/// replaces that collection, an absent key leaves the stored one alone.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoragePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<Activity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<Milestone>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readiness_assessment: Option<ReadinessAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_plans: Option<HashMap<String, ActionPlan>>,
}

impl StoragePatch {
    pub fn activities(activities: Vec<Activity>) -> Self {
        Self {
            activities: Some(activities),
            ..Self::default()
        }
    }

    pub fn milestones(milestones: Vec<Milestone>) -> Self {
        Self {
            milestones: Some(milestones),
            ..Self::default()
        }
    }

    pub fn readiness_assessment(assessment: ReadinessAssessment) -> Self {
        Self {
            readiness_assessment: Some(assessment),
            ..Self::default()
        }
    }

    pub fn action_plans(plans: HashMap<String, ActionPlan>) -> Self {
        Self {
            action_plans: Some(plans),
            ..Self::default()
        }
    }
}
