#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Proficiency labels offered by the skill form. The level is stored as a
/// free string and is never validated against this set.
pub const SKILL_LEVELS: &[&str] = &["Basic", "Intermediate", "Advanced", "Expert"];

/// Level assigned to a skill when the input does not carry one.
pub const DEFAULT_SKILL_LEVEL: &str = "Intermediate";

/// The personal-info block. Every field is a plain string defaulting to
/// empty; none of them is ever null or missing in a canonical document.
///
/// The serde renames are the legacy wire keys of the saved-document format,
/// kept so existing exports remain importable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(rename = "nombreCompleto")]
    pub full_name: String,
    #[serde(rename = "ciudadEstado")]
    pub city_state: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub github: String,
    #[serde(rename = "web")]
    pub website: String,
    pub linkedin: String,
}

/// One skill row. The id is opaque, unique within a document, and exists
/// only to give list items a stable identity during edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nivel")]
    pub level: String,
}

impl Default for Skill {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            level: DEFAULT_SKILL_LEVEL.to_owned(),
        }
    }
}

/// One work-experience entry. Dates are opaque `YYYY-MM` strings and are not
/// format-validated. `achievements` is never empty: emptying it floors the
/// list back to a single blank line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde(rename = "puesto")]
    pub position: String,
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "fechaInicio")]
    pub start_date: String,
    #[serde(rename = "fechaFin")]
    pub end_date: String,
    #[serde(rename = "actualmente")]
    pub currently_employed: bool,
    #[serde(rename = "logros")]
    pub achievements: Vec<String>,
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self {
            position: String::new(),
            company: String::new(),
            city: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            currently_employed: false,
            achievements: vec![String::new()],
        }
    }
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(rename = "grado")]
    pub degree: String,
    #[serde(rename = "institucion")]
    pub institution: String,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "fechaInicio")]
    pub start_date: String,
    #[serde(rename = "fechaFin")]
    pub end_date: String,
    #[serde(rename = "detalles")]
    pub details: String,
}

/// The root document value.
///
/// `extra` carries any non-canonical top-level key found in an imported
/// object straight through to the serialized output. Unknown keys inside
/// `personal` or list entries are dropped; the typed shapes win there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default)]
    pub personal: PersonalInfo,
    #[serde(rename = "resumen", default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(rename = "experiencia", default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(rename = "educacion", default)]
    pub education: Vec<EducationEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResumeDocument {
    /// The hardcoded default document: first-run state and the fallback
    /// source during normalization. One blank experience entry, one blank
    /// education entry, and two starter skills.
    pub fn template() -> Self {
        Self {
            personal: PersonalInfo::default(),
            summary: String::new(),
            skills: vec![
                Skill {
                    id: "s1".to_owned(),
                    name: "React".to_owned(),
                    level: DEFAULT_SKILL_LEVEL.to_owned(),
                },
                Skill {
                    id: "s2".to_owned(),
                    name: "Django".to_owned(),
                    level: DEFAULT_SKILL_LEVEL.to_owned(),
                },
            ],
            experience: vec![ExperienceEntry::default()],
            education: vec![EducationEntry::default()],
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_satisfies_invariants() {
        let doc = ResumeDocument::template();
        assert!(!doc.experience.is_empty());
        assert!(!doc.education.is_empty());
        assert_eq!(doc.experience[0].achievements, vec![String::new()]);
        assert!(doc.skills.iter().all(|s| !s.id.is_empty()));
    }

    #[test]
    fn test_default_level_is_canonical() {
        assert!(SKILL_LEVELS.contains(&DEFAULT_SKILL_LEVEL));
    }

    #[test]
    fn test_wire_format_uses_legacy_keys() {
        let value = serde_json::to_value(ResumeDocument::template()).unwrap();
        assert!(value.get("experiencia").is_some());
        assert!(value.get("educacion").is_some());
        assert!(value["personal"].get("nombreCompleto").is_some());
        assert_eq!(value["skills"][0]["nombre"], "React");
        assert_eq!(value["experiencia"][0]["logros"], serde_json::json!([""]));
    }
}
