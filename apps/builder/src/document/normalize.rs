//! Schema normalization: reconciles arbitrary JSON against the canonical
//! document shape, defaulting whatever is missing or malformed.

use serde_json::{Map, Value};

use crate::document::IdGenerator;
use crate::models::resume::{
    EducationEntry, ExperienceEntry, PersonalInfo, ResumeDocument, Skill, DEFAULT_SKILL_LEVEL,
};

/// Top-level keys owned by the canonical schema. Anything else found in an
/// imported object is carried through untouched in `ResumeDocument::extra`.
const CANONICAL_KEYS: &[&str] = &["personal", "resumen", "skills", "experiencia", "educacion"];

/// Coerces an arbitrary JSON value into a document satisfying every schema
/// invariant. Never fails: non-objects are treated as an empty object, and
/// the template supplies the fallback experience/education sequences.
///
/// The generator is only invoked for skills that arrive without an id.
pub fn normalize(
    raw: &Value,
    template: &ResumeDocument,
    ids: &mut dyn IdGenerator,
) -> ResumeDocument {
    let empty = Map::new();
    let src = raw.as_object().unwrap_or(&empty);

    let skills: Vec<Skill> = match src.get("skills").and_then(Value::as_array) {
        Some(items) => items.iter().map(|item| skill_from(item, ids)).collect(),
        None => Vec::new(),
    };

    let experience = match src.get("experiencia").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items.iter().map(experience_from).collect(),
        _ => template.experience.clone(),
    };

    let education = match src.get("educacion").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items.iter().map(education_from).collect(),
        _ => template.education.clone(),
    };

    let personal = match src.get("personal").and_then(Value::as_object) {
        Some(fields) => merge_personal(&template.personal, fields),
        None => template.personal.clone(),
    };

    let extra: Map<String, Value> = src
        .iter()
        .filter(|(key, _)| !CANONICAL_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    ResumeDocument {
        personal,
        summary: coerce_string(src.get("resumen")),
        skills,
        experience,
        education,
        extra,
    }
}

fn skill_from(value: &Value, ids: &mut dyn IdGenerator) -> Skill {
    Skill {
        // An existing id is kept as-is, whatever its type; only absent or
        // null ids get a freshly minted one.
        id: match value.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => ids.next_id(),
            Some(other) => other.to_string(),
        },
        name: coerce_string(value.get("nombre")),
        level: match value.get("nivel").and_then(Value::as_str) {
            Some(level) => level.to_owned(),
            None => DEFAULT_SKILL_LEVEL.to_owned(),
        },
    }
}

fn experience_from(value: &Value) -> ExperienceEntry {
    ExperienceEntry {
        position: coerce_string(value.get("puesto")),
        company: coerce_string(value.get("empresa")),
        city: coerce_string(value.get("ciudad")),
        start_date: coerce_string(value.get("fechaInicio")),
        end_date: coerce_string(value.get("fechaFin")),
        currently_employed: coerce_bool(value.get("actualmente")),
        achievements: coerce_achievements(value.get("logros")),
    }
}

fn education_from(value: &Value) -> EducationEntry {
    EducationEntry {
        degree: coerce_string(value.get("grado")),
        institution: coerce_string(value.get("institucion")),
        city: coerce_string(value.get("ciudad")),
        start_date: coerce_string(value.get("fechaInicio")),
        end_date: coerce_string(value.get("fechaFin")),
        details: coerce_string(value.get("detalles")),
    }
}

/// Shallow merge for the personal block: a key present in the input wins,
/// an absent key keeps the template's value.
fn merge_personal(defaults: &PersonalInfo, src: &Map<String, Value>) -> PersonalInfo {
    PersonalInfo {
        full_name: merged_field(src, "nombreCompleto", &defaults.full_name),
        city_state: merged_field(src, "ciudadEstado", &defaults.city_state),
        email: merged_field(src, "correo", &defaults.email),
        phone: merged_field(src, "telefono", &defaults.phone),
        github: merged_field(src, "github", &defaults.github),
        website: merged_field(src, "web", &defaults.website),
        linkedin: merged_field(src, "linkedin", &defaults.linkedin),
    }
}

fn merged_field(src: &Map<String, Value>, key: &str, fallback: &str) -> String {
    match src.get(key) {
        Some(value) => coerce_string(Some(value)),
        None => fallback.to_owned(),
    }
}

/// The defaulting rule for free-text fields: the value if it is a JSON
/// string, empty string otherwise.
fn coerce_string(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_owned()
}

/// Truthiness coercion for the currently-employed flag: `false`, `0`, `""`,
/// null and absent are false; any other value is true.
fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Achievement lists: each entry stringified, with a missing or empty list
/// floored to a single blank line.
fn coerce_achievements(value: Option<&Value>) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items.iter().map(stringify).collect(),
        _ => vec![String::new()],
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
