//! The pediatric readiness assessment record.
//!
//! This is the canonical nested shape of the questionnaire. Every leaf is
//! addressable by a stable dotted path over the serialized field names
//! (e.g. `facilityInfo.has24HourED`), including leaves for questions the UI
//! only shows conditionally. Yes/no questions are tri-state: unanswered is a
//! real value, distinct from "no".

use serde::{Deserialize, Serialize};

/// Answer state of a yes/no question.
///
/// On the wire `Yes`/`No` are plain booleans and `Unset` is `null` (or an
/// absent key in documents written by older clients).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum TriState {
    #[default]
    Unset,
    Yes,
    No,
}

impl TriState {
    /// Selecting "yes" while already at `Yes` clears the answer.
    pub fn select_yes(self) -> TriState {
        match self {
            TriState::Yes => TriState::Unset,
            _ => TriState::Yes,
        }
    }

    /// Selecting "no" while already at `No` clears the answer.
    pub fn select_no(self) -> TriState {
        match self {
            TriState::No => TriState::Unset,
            _ => TriState::No,
        }
    }

    pub fn is_unset(self) -> bool {
        self == TriState::Unset
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => TriState::Yes,
            Some(false) => TriState::No,
            None => TriState::Unset,
        }
    }
}

impl From<TriState> for Option<bool> {
    fn from(value: TriState) -> Self {
        match value {
            TriState::Yes => Some(true),
            TriState::No => Some(false),
            TriState::Unset => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    pub name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub facility_name: String,
    pub facility_address: String,
    pub facility_city: String,
    pub facility_zip: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacilityInfo {
    #[serde(rename = "has24HourED")]
    pub has_24_hour_ed: TriState,
    pub hospital_type: String,
    pub other_hospital_type: String,
    pub ed_configuration: String,
    #[serde(rename = "otherEDConfig")]
    pub other_ed_config: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerificationBodies {
    pub acs: TriState,
    pub state_regional: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TraumaDesignation {
    pub is_trauma_center: TriState,
    pub verification_bodies: VerificationBodies,
    pub adult_level: String,
    pub pediatric_level: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InpatientServices {
    pub newborn_nursery: TriState,
    pub nicu: TriState,
    pub picu: TriState,
    pub pediatric_step_down: TriState,
    pub pediatric_ward: TriState,
    #[serde(rename = "adultICU")]
    pub adult_icu: TriState,
    pub adult_step_down: TriState,
    pub adult_ward: TriState,
    #[serde(rename = "childrenInAdultICU")]
    pub children_in_adult_icu: TriState,
    pub children_in_adult_step_down: TriState,
    pub children_in_adult_ward: TriState,
}

/// Physician or nurse PECC role questions. `kind` holds the staffing type
/// answer (serialized as `type`, matching the stored documents).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoordinatorRole {
    pub has_coordinator: TriState,
    #[serde(rename = "type")]
    pub kind: String,
    pub has_dedicated_time: TriState,
    pub scope: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Administration {
    pub physician_coordinator: CoordinatorRole,
    pub nurse_coordinator: CoordinatorRole,
    #[serde(rename = "hasPediatricED")]
    pub has_pediatric_ed: TriState,
    pub has_pediatric_inpatient: TriState,
    #[serde(rename = "hasPediatricICU")]
    pub has_pediatric_icu: TriState,
    pub has_pediatric_surgery: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personnel {
    #[serde(rename = "has24HourPhysician")]
    pub has_24_hour_physician: TriState,
    pub has_pediatrician: TriState,
    #[serde(rename = "hasPediatricEM")]
    pub has_pediatric_em: TriState,
    pub has_pediatric_nurse: TriState,
    #[serde(rename = "hasPediatricRT")]
    pub has_pediatric_rt: TriState,
    #[serde(rename = "hasPALS")]
    pub has_pals: TriState,
    #[serde(rename = "hasENPC")]
    pub has_enpc: TriState,
    #[serde(rename = "hasTNCC")]
    pub has_tncc: TriState,
    #[serde(rename = "hasATLS")]
    pub has_atls: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QiComponents {
    pub trauma: TriState,
    pub emergency: TriState,
    pub inpatient: TriState,
    pub outpatient: TriState,
    pub transport: TriState,
    pub rehabilitation: TriState,
    pub child_life: TriState,
    pub social_work: TriState,
    pub pastoral_care: TriState,
    pub family_support: TriState,
    pub quality: TriState,
    pub research: TriState,
    pub education: TriState,
    pub disaster: TriState,
    pub injury: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityImprovement {
    #[serde(rename = "hasQIPlan")]
    pub has_qi_plan: TriState,
    pub components: QiComponents,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientSafety {
    pub weight_in_kg: TriState,
    pub weight_recorded_in_kg: TriState,
    pub vitals_recorded: TriState,
    pub blood_pressure_monitoring: TriState,
    pub pulse_oximetry: TriState,
    #[serde(rename = "endTidalCO2")]
    pub end_tidal_co2: TriState,
    pub abnormal_vitals_notification: TriState,
    pub pre_calculated_dosing: TriState,
    pub interpreter_services: TriState,
    pub consciousness_assessment: TriState,
    pub pain_assessment: TriState,
    pub has_pediatric_safety: TriState,
    pub has_pediatric_medication: TriState,
    pub has_pediatric_equipment: TriState,
    pub has_pediatric_environment: TriState,
    pub has_pediatric_handoff: TriState,
    pub has_pediatric_transfer: TriState,
    pub has_pediatric_discharge: TriState,
    pub has_pediatric_followup: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policies {
    pub triage_policy: TriState,
    pub assessment_reassessment: TriState,
    pub immunization_assessment: TriState,
    pub child_maltreatment: TriState,
    #[serde(rename = "deathInED")]
    pub death_in_ed: TriState,
    pub radiation_reduction: TriState,
    pub behavioral_health: TriState,
    pub transfer_guidelines: TriState,
    pub has_pediatric_admission: TriState,
    pub has_pediatric_transfer: TriState,
    pub has_pediatric_consent: TriState,
    pub has_pediatric_restraint: TriState,
    pub has_pediatric_triage: TriState,
    pub has_pediatric_pain: TriState,
    pub has_pediatric_sedation: TriState,
    pub has_pediatric_imaging: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyCareComponents {
    pub decision_making: TriState,
    pub medication_safety: TriState,
    pub family_presence: TriState,
    pub education: TriState,
    pub bereavement: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyCenteredCare {
    pub has_policy: TriState,
    pub components: FamilyCareComponents,
    pub has_family_presence: TriState,
    pub has_family_support: TriState,
    pub has_family_education: TriState,
    pub has_family_feedback: TriState,
    pub has_cultural_competency: TriState,
    pub has_language_services: TriState,
    pub has_interpreter: TriState,
    pub has_translation: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisasterComponents {
    pub medications_supplies: TriState,
    pub decontamination: TriState,
    pub family_reunification: TriState,
    pub pediatric_drills: TriState,
    pub surge_capacity: TriState,
    pub behavioral_health: TriState,
    pub social_services: TriState,
    pub special_needs: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisasterPlanning {
    pub addresses_children: TriState,
    pub components: DisasterComponents,
    pub has_pediatric_disaster: TriState,
    pub has_pediatric_mass_casualty: TriState,
    pub has_pediatric_evacuation: TriState,
    pub has_pediatric_shelter: TriState,
    pub has_pediatric_supplies: TriState,
    pub has_pediatric_equipment: TriState,
    pub has_pediatric_medications: TriState,
    pub has_pediatric_staff: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentManagement {
    pub has_pediatric_inventory: TriState,
    pub has_pediatric_maintenance: TriState,
    pub has_pediatric_calibration: TriState,
    pub has_pediatric_replacement: TriState,
    pub has_pediatric_training: TriState,
    pub has_pediatric_competency: TriState,
    pub has_pediatric_documentation: TriState,
    pub has_pediatric_quality: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonitoringEquipment {
    pub has_pediatric_stethoscope: TriState,
    #[serde(rename = "hasPediatricBP")]
    pub has_pediatric_bp: TriState,
    pub has_pediatric_thermometer: TriState,
    pub has_pediatric_scale: TriState,
    #[serde(rename = "hasPediatricECG")]
    pub has_pediatric_ecg: TriState,
    pub has_pediatric_pulse: TriState,
    #[serde(rename = "hasPediatricETCO2")]
    pub has_pediatric_etco2: TriState,
    pub has_pediatric_glucose: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResuscitationEquipment {
    #[serde(rename = "gauge22")]
    pub gauge_22: TriState,
    #[serde(rename = "gauge24")]
    pub gauge_24: TriState,
    pub io_needles: TriState,
    pub iv_administration: TriState,
    pub has_pediatric_bag: TriState,
    pub has_pediatric_suction: TriState,
    pub has_pediatric_oxygen: TriState,
    pub has_pediatric_defibrillator: TriState,
    #[serde(rename = "hasPediatricETT")]
    pub has_pediatric_ett: TriState,
    #[serde(rename = "hasPediatricLMA")]
    pub has_pediatric_lma: TriState,
    #[serde(rename = "hasPediatricIO")]
    pub has_pediatric_io: TriState,
    pub has_pediatric_chest: TriState,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RespiratoryEquipment {
    pub has_pediatric_nebulizer: TriState,
    pub has_pediatric_spacer: TriState,
    pub has_pediatric_metered: TriState,
    #[serde(rename = "hasPediatricCPAP")]
    pub has_pediatric_cpap: TriState,
    pub has_pediatric_ventilator: TriState,
    pub has_pediatric_high_flow: TriState,
    pub has_pediatric_suction: TriState,
    pub has_pediatric_chest: TriState,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PediatricVolume {
    #[default]
    Low,
    Medium,
    MediumHigh,
    High,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientVolume {
    pub total_patients: String,
    pub pediatric_volume: PediatricVolume,
    #[serde(rename = "totalEDVisits")]
    pub total_ed_visits: String,
    #[serde(rename = "pediatricEDVisits")]
    pub pediatric_ed_visits: String,
    #[serde(rename = "pediatricICUAdmissions")]
    pub pediatric_icu_admissions: String,
    pub pediatric_trauma_admissions: String,
}

/// The full questionnaire. `Default` is the documented "empty" record: every
/// yes/no leaf `Unset`, every text leaf `""`, volume bracket `low`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadinessAssessment {
    pub contact_info: ContactInfo,
    pub facility_info: FacilityInfo,
    pub trauma_designation: TraumaDesignation,
    pub inpatient_services: InpatientServices,
    pub administration: Administration,
    pub personnel: Personnel,
    pub quality_improvement: QualityImprovement,
    pub patient_safety: PatientSafety,
    pub policies: Policies,
    pub family_centered_care: FamilyCenteredCare,
    pub disaster_planning: DisasterPlanning,
    pub equipment_management: EquipmentManagement,
    pub monitoring_equipment: MonitoringEquipment,
    pub resuscitation_equipment: ResuscitationEquipment,
    pub respiratory_equipment: RespiratoryEquipment,
    pub patient_volume: PatientVolume,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tristate_toggle_on_reselect() {
        assert_eq!(TriState::Unset.select_yes(), TriState::Yes);
        assert_eq!(TriState::Yes.select_yes(), TriState::Unset);
        assert_eq!(TriState::Unset.select_no(), TriState::No);
        assert_eq!(TriState::No.select_no(), TriState::Unset);
        // Switching sides is direct, no intermediate Unset.
        assert_eq!(TriState::Yes.select_no(), TriState::No);
        assert_eq!(TriState::No.select_yes(), TriState::Yes);
    }

    #[test]
    fn tristate_wire_format() {
        assert_eq!(serde_json::to_string(&TriState::Yes).unwrap(), "true");
        assert_eq!(serde_json::to_string(&TriState::No).unwrap(), "false");
        assert_eq!(serde_json::to_string(&TriState::Unset).unwrap(), "null");
        assert_eq!(
            serde_json::from_str::<TriState>("null").unwrap(),
            TriState::Unset
        );
    }

    #[test]
    fn absent_leaves_deserialize_as_unset() {
        // Documents written by older clients omit unanswered questions.
        let facility: FacilityInfo =
            serde_json::from_str(r#"{"hospitalType": "community"}"#).unwrap();
        assert_eq!(facility.has_24_hour_ed, TriState::Unset);
        assert_eq!(facility.hospital_type, "community");
    }

    #[test]
    fn serialized_names_match_stored_documents() {
        let json = serde_json::to_value(ReadinessAssessment::default()).unwrap();
        assert!(json["facilityInfo"].get("has24HourED").is_some());
        assert!(json["facilityInfo"].get("otherEDConfig").is_some());
        assert!(json["traumaDesignation"]["verificationBodies"]
            .get("stateRegional")
            .is_some());
        assert!(json["administration"]["physicianCoordinator"]
            .get("type")
            .is_some());
        assert!(json["personnel"].get("hasPALS").is_some());
        assert!(json["patientSafety"].get("endTidalCO2").is_some());
        assert!(json["resuscitationEquipment"].get("gauge22").is_some());
        assert!(json["resuscitationEquipment"].get("ioNeedles").is_some());
        assert!(json["monitoringEquipment"].get("hasPediatricETCO2").is_some());
        assert!(json["patientVolume"].get("pediatricICUAdmissions").is_some());
        assert_eq!(json["patientVolume"]["pediatricVolume"], "low");
    }

    #[test]
    fn default_record_round_trips() {
        let assessment = ReadinessAssessment::default();
        let json = serde_json::to_string(&assessment).unwrap();
        let back: ReadinessAssessment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, assessment);
    }
}
