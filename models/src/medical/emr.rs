// models/src/medical/emr.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::double_option;
use crate::errors::{ApiError, ApiResult};

/// Electronic medical record, one-to-one with an appointment. The
/// `objective_notes` and `prescription` columns hold structured JSON
/// objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emr {
    pub id: Uuid,
    pub subjective_notes: Option<String>,
    pub objective_notes: Option<Value>,
    pub assessment: String,
    pub plan: Option<String>,
    pub prescription: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub appointment_id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmrCreate {
    pub subjective_notes: Option<String>,
    pub objective_notes: Option<Value>,
    pub assessment: String,
    pub plan: Option<String>,
    pub prescription: Option<Value>,
    pub appointment_id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
}

fn require_object(value: &Option<Value>, field: &str) -> ApiResult<()> {
    match value {
        Some(v) if !v.is_object() => Err(ApiError::validation(format!(
            "{field} must be a JSON object"
        ))),
        _ => Ok(()),
    }
}

impl EmrCreate {
    pub fn into_emr(self, id: Uuid, now: DateTime<Utc>) -> ApiResult<Emr> {
        if self.assessment.trim().is_empty() {
            return Err(ApiError::validation("assessment must not be empty"));
        }
        require_object(&self.objective_notes, "objective_notes")?;
        require_object(&self.prescription, "prescription")?;
        Ok(Emr {
            id,
            subjective_notes: self.subjective_notes,
            objective_notes: self.objective_notes,
            assessment: self.assessment,
            plan: self.plan,
            prescription: self.prescription,
            created_at: now,
            appointment_id: self.appointment_id,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
        })
    }
}

/// Partial update. Foreign keys are immutable after creation; only the
/// clinical fields can change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmrPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub subjective_notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub objective_notes: Option<Option<Value>>,
    pub assessment: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub plan: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub prescription: Option<Option<Value>>,
}

impl EmrPatch {
    pub fn apply(&self, emr: &mut Emr) -> ApiResult<()> {
        if let Some(assessment) = &self.assessment {
            if assessment.trim().is_empty() {
                return Err(ApiError::validation("assessment must not be empty"));
            }
            emr.assessment = assessment.clone();
        }
        if let Some(subjective_notes) = &self.subjective_notes {
            emr.subjective_notes = subjective_notes.clone();
        }
        if let Some(objective_notes) = &self.objective_notes {
            require_object(objective_notes, "objective_notes")?;
            emr.objective_notes = objective_notes.clone();
        }
        if let Some(plan) = &self.plan {
            emr.plan = plan.clone();
        }
        if let Some(prescription) = &self.prescription {
            require_object(prescription, "prescription")?;
            emr.prescription = prescription.clone();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmrFilter {
    pub appointment_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
    pub doctor_id: Option<Uuid>,
}

impl EmrFilter {
    pub fn matches(&self, emr: &Emr) -> bool {
        self.appointment_id
            .is_none_or(|id| emr.appointment_id == id)
            && self.patient_id.is_none_or(|id| emr.patient_id == id)
            && self.doctor_id.is_none_or(|id| emr.doctor_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create() -> EmrCreate {
        EmrCreate {
            subjective_notes: Some("patient reports chest pain".into()),
            objective_notes: Some(json!({"bp": "120/80"})),
            assessment: "stable angina".into(),
            plan: Some("stress test".into()),
            prescription: Some(json!({"aspirin": "75mg"})),
            appointment_id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn blank_assessment_is_rejected() {
        let mut input = create();
        input.assessment = "  ".into();
        assert!(matches!(
            input.into_emr(Uuid::new_v4(), Utc::now()),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn structured_fields_must_be_objects() {
        let mut input = create();
        input.prescription = Some(json!("aspirin"));
        assert!(matches!(
            input.into_emr(Uuid::new_v4(), Utc::now()),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn patch_clears_plan_on_explicit_null() {
        let mut emr = create().into_emr(Uuid::new_v4(), Utc::now()).unwrap();
        let patch: EmrPatch = serde_json::from_str(r#"{"plan": null}"#).unwrap();
        patch.apply(&mut emr).unwrap();
        assert_eq!(emr.plan, None);
        assert_eq!(emr.assessment, "stable angina");
    }
}
