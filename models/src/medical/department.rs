// models/src/medical/department.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{contains_ci, double_option};

/// Hospital department. `name` is globally unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentCreate {
    pub name: String,
    pub description: Option<String>,
}

impl DepartmentCreate {
    pub fn into_department(self, id: Uuid) -> Department {
        Department {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

/// Partial update. `description` is nullable, so it distinguishes an absent
/// key (keep) from an explicit `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

impl DepartmentPatch {
    pub fn apply(&self, department: &mut Department) {
        if let Some(name) = &self.name {
            department.name = name.clone();
        }
        if let Some(description) = &self.description {
            department.description = description.clone();
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentFilter {
    pub name: Option<String>,
}

impl DepartmentFilter {
    pub fn matches(&self, department: &Department) -> bool {
        self.name
            .as_deref()
            .is_none_or(|name| contains_ci(&department.name, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cardiology() -> Department {
        Department {
            id: Uuid::new_v4(),
            name: "Cardiology".into(),
            description: Some("Heart".into()),
        }
    }

    #[test]
    fn absent_description_is_kept() {
        let mut d = cardiology();
        let patch: DepartmentPatch = serde_json::from_str(r#"{"name": "Cardio"}"#).unwrap();
        patch.apply(&mut d);
        assert_eq!(d.name, "Cardio");
        assert_eq!(d.description.as_deref(), Some("Heart"));
    }

    #[test]
    fn explicit_null_clears_description() {
        let mut d = cardiology();
        let patch: DepartmentPatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        patch.apply(&mut d);
        assert_eq!(d.description, None);
        assert_eq!(d.name, "Cardiology");
    }
}
