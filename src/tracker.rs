//! Service layer tying the session to the per-user document.
//!
//! Every operation resolves the signed-in identity first and fails with
//! `TrackerError::NotAuthenticated` when there is none; a save is never
//! silently dropped.

use serde_json::Value;

use crate::assessment::{ReadinessAssessment, TriState};
use crate::error::{TrackerError, TrackerResult};
use crate::patch::{self, PatchError};
use crate::session;
use crate::store::{self, KeyValueStore};
use crate::types::{
    ActionPlan, Activity, ActivityCategory, Identity, Milestone, MilestoneCategory, StorageData,
    StoragePatch,
};

/// Fields of an activity the user supplies; the id is allocated on insert.
#[derive(Clone, Debug)]
pub struct NewActivity {
    pub date: chrono::NaiveDate,
    pub title: String,
    pub category: ActivityCategory,
    pub hours: f64,
    pub simulation_type: Option<String>,
    pub simulation_participants: Option<u32>,
    pub feedback_submitted: Option<bool>,
    pub notes: Option<String>,
}

pub struct Tracker<S: KeyValueStore> {
    kv: S,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn login(&mut self, identifier: &str, secret: &str) -> TrackerResult<Option<Identity>> {
        Ok(session::login(&mut self.kv, identifier, secret)?)
    }

    pub fn logout(&mut self) -> TrackerResult<()> {
        Ok(session::logout(&mut self.kv)?)
    }

    pub fn current_user(&self) -> Option<Identity> {
        session::current_user(&self.kv)
    }

    fn require_user(&self) -> TrackerResult<Identity> {
        self.current_user().ok_or(TrackerError::NotAuthenticated)
    }

    /// The signed-in user's whole document.
    pub fn data(&self) -> TrackerResult<StorageData> {
        let user = self.require_user()?;
        Ok(store::read_user_data(&self.kv, &user))
    }

    fn save(&mut self, patch: StoragePatch) -> TrackerResult<()> {
        let user = self.require_user()?;
        store::write_user_data(&mut self.kv, &user, patch)?;
        Ok(())
    }

    /// Appends an activity. Ids are max(existing)+1; the store is
    /// single-writer so this cannot race.
    pub fn log_activity(&mut self, new: NewActivity) -> TrackerResult<Activity> {
        let mut activities = self.data()?.activities;
        let id = activities.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let activity = Activity {
            id,
            date: new.date,
            title: new.title,
            category: new.category,
            hours: new.hours,
            simulation_type: new.simulation_type,
            simulation_participants: new.simulation_participants,
            feedback_submitted: new.feedback_submitted,
            notes: new.notes,
        };
        activities.push(activity.clone());
        self.save(StoragePatch::activities(activities))?;
        Ok(activity)
    }

    pub fn activities(&self) -> TrackerResult<Vec<Activity>> {
        Ok(self.data()?.activities)
    }

    pub fn milestones(&self) -> TrackerResult<Vec<Milestone>> {
        Ok(self.data()?.milestones)
    }

    /// Flips the completed flag of one milestone.
    pub fn toggle_milestone(&mut self, id: u32) -> TrackerResult<Milestone> {
        let mut milestones = self.data()?.milestones;
        let milestone = milestones
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(TrackerError::MilestoneNotFound(id))?;
        milestone.completed = !milestone.completed;
        let toggled = milestone.clone();
        self.save(StoragePatch::milestones(milestones))?;
        Ok(toggled)
    }

    /// Adds a custom milestone with the category the caller chose.
    pub fn add_milestone(
        &mut self,
        title: String,
        description: String,
        category: MilestoneCategory,
    ) -> TrackerResult<Milestone> {
        let mut milestones = self.data()?.milestones;
        let id = milestones.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let milestone = Milestone {
            id,
            title,
            description,
            completed: false,
            category,
            links: None,
            sub_items: None,
        };
        milestones.push(milestone.clone());
        self.save(StoragePatch::milestones(milestones))?;
        Ok(milestone)
    }

    pub fn assessment(&self) -> TrackerResult<ReadinessAssessment> {
        Ok(self.data()?.readiness_assessment)
    }

    /// Patches one dotted-path field of the assessment and persists the
    /// updated record.
    pub fn set_assessment_field(
        &mut self,
        path: &str,
        value: Value,
    ) -> TrackerResult<ReadinessAssessment> {
        let current = self.assessment()?;
        let updated = patch::set_field(&current, path, value)?;
        self.save(StoragePatch::readiness_assessment(updated.clone()))?;
        Ok(updated)
    }

    pub fn assessment_field(&self, path: &str) -> TrackerResult<Value> {
        Ok(patch::get_field(&self.assessment()?, path)?)
    }

    /// Answers a yes/no question the way the form controls do: selecting the
    /// answer that is already stored clears it, switching sides is direct.
    pub fn answer_question(&mut self, path: &str, yes: bool) -> TrackerResult<TriState> {
        let current = self.assessment()?;
        let leaf = patch::get_field(&current, path)?;
        let state: TriState = serde_json::from_value::<Option<bool>>(leaf)
            .map_err(|source| PatchError::InvalidValue {
                path: path.to_string(),
                source,
            })?
            .into();
        let next = if yes {
            state.select_yes()
        } else {
            state.select_no()
        };
        let updated = patch::set_field(&current, path, serde_json::to_value(next).map_err(
            |source| PatchError::InvalidValue {
                path: path.to_string(),
                source,
            },
        )?)?;
        self.save(StoragePatch::readiness_assessment(updated))?;
        Ok(next)
    }

    /// Replaces the whole assessment (used after a remote fetch).
    pub fn replace_assessment(&mut self, assessment: ReadinessAssessment) -> TrackerResult<()> {
        self.save(StoragePatch::readiness_assessment(assessment))
    }

    /// Stores or overwrites the action plan for one question.
    pub fn set_action_plan(&mut self, question: &str, plan: ActionPlan) -> TrackerResult<()> {
        let mut plans = self.data()?.action_plans;
        plans.insert(question.to_string(), plan);
        self.save(StoragePatch::action_plans(plans))
    }

    pub fn action_plan(&self, question: &str) -> TrackerResult<Option<ActionPlan>> {
        Ok(self.data()?.action_plans.get(question).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::TriState;
    use crate::catalog::default_milestones;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use serde_json::json;

    fn signed_in_tracker() -> Tracker<MemoryStore> {
        let mut tracker = Tracker::new(MemoryStore::new());
        tracker.login("Admin", "test123").unwrap().unwrap();
        tracker
    }

    fn new_activity(title: &str) -> NewActivity {
        NewActivity {
            date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            title: title.to_string(),
            category: ActivityCategory::MentorMeeting,
            hours: 1.0,
            simulation_type: None,
            simulation_participants: None,
            feedback_submitted: None,
            notes: None,
        }
    }

    #[test]
    fn operations_without_a_session_are_rejected() {
        let tracker = Tracker::new(MemoryStore::new());
        assert!(matches!(
            tracker.activities(),
            Err(TrackerError::NotAuthenticated)
        ));

        let mut tracker = Tracker::new(MemoryStore::new());
        assert!(matches!(
            tracker.log_activity(new_activity("dropped")),
            Err(TrackerError::NotAuthenticated)
        ));
    }

    #[test]
    fn activity_ids_increase_from_max() {
        let mut tracker = signed_in_tracker();
        let first = tracker.log_activity(new_activity("First")).unwrap();
        let second = tracker.log_activity(new_activity("Second")).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(tracker.activities().unwrap().len(), 2);
    }

    #[test]
    fn milestone_toggle_flips_only_completed() {
        let mut tracker = signed_in_tracker();
        let toggled = tracker.toggle_milestone(3).unwrap();
        assert!(toggled.completed);

        let milestones = tracker.milestones().unwrap();
        let mut expected = default_milestones();
        expected[2].completed = true;
        assert_eq!(milestones, expected);

        let back = tracker.toggle_milestone(3).unwrap();
        assert!(!back.completed);
    }

    #[test]
    fn toggle_unknown_milestone_errors() {
        let mut tracker = signed_in_tracker();
        assert!(matches!(
            tracker.toggle_milestone(99),
            Err(TrackerError::MilestoneNotFound(99))
        ));
    }

    #[test]
    fn added_milestone_keeps_chosen_category() {
        let mut tracker = signed_in_tracker();
        let added = tracker
            .add_milestone(
                "Quarterly QI review".to_string(),
                "Review QI metrics with the ED committee".to_string(),
                MilestoneCategory::Qi,
            )
            .unwrap();
        assert_eq!(added.id, 12);
        assert_eq!(added.category, MilestoneCategory::Qi);

        let stored = tracker.milestones().unwrap();
        assert_eq!(stored.last().unwrap().category, MilestoneCategory::Qi);
    }

    #[test]
    fn assessment_patch_persists_and_leaves_milestones_alone() {
        let mut tracker = signed_in_tracker();
        tracker
            .set_assessment_field("facilityInfo.has24HourED", json!(true))
            .unwrap();

        let data = tracker.data().unwrap();
        assert_eq!(
            data.readiness_assessment.facility_info.has_24_hour_ed,
            TriState::Yes
        );
        assert_eq!(data.milestones, default_milestones());
        assert_eq!(
            tracker
                .assessment_field("facilityInfo.has24HourED")
                .unwrap(),
            json!(true)
        );
    }

    #[test]
    fn answering_follows_the_tristate_machine() {
        let mut tracker = signed_in_tracker();
        let path = "inpatientServices.picu";

        assert_eq!(tracker.answer_question(path, true).unwrap(), TriState::Yes);
        // Re-selecting "yes" clears the answer.
        assert_eq!(tracker.answer_question(path, true).unwrap(), TriState::Unset);
        // Yes to No is direct.
        assert_eq!(tracker.answer_question(path, true).unwrap(), TriState::Yes);
        assert_eq!(tracker.answer_question(path, false).unwrap(), TriState::No);
        // The outcome is persisted, not just returned.
        assert_eq!(
            tracker.data().unwrap().readiness_assessment.inpatient_services.picu,
            TriState::No
        );
    }

    #[test]
    fn answering_a_text_question_is_rejected() {
        let mut tracker = signed_in_tracker();
        assert!(matches!(
            tracker.answer_question("contactInfo.name", true),
            Err(TrackerError::Patch(PatchError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn invalid_assessment_path_is_surfaced() {
        let mut tracker = signed_in_tracker();
        assert!(matches!(
            tracker.set_assessment_field("facilityInfo.typoField", json!(true)),
            Err(TrackerError::Patch(_))
        ));
    }

    #[test]
    fn action_plans_survive_a_save_of_other_collections() {
        let mut tracker = signed_in_tracker();
        let plan = ActionPlan {
            action: "Draft a pediatric triage policy".to_string(),
            owner: "ED educator".to_string(),
            due_date: "2025-06-01".to_string(),
            ..ActionPlan::default()
        };
        tracker
            .set_action_plan("policies.triagePolicy", plan.clone())
            .unwrap();

        tracker.log_activity(new_activity("Unrelated")).unwrap();

        assert_eq!(
            tracker.action_plan("policies.triagePolicy").unwrap(),
            Some(plan)
        );
    }

    #[test]
    fn logout_then_read_is_not_authenticated() {
        let mut tracker = signed_in_tracker();
        tracker.logout().unwrap();
        assert!(matches!(
            tracker.data(),
            Err(TrackerError::NotAuthenticated)
        ));
    }
}
