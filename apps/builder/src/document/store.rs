#![allow(dead_code)]
//! The document store: owns the current résumé value, applies typed
//! mutations, and autosaves the whole serialized document after every
//! change. There is exactly one logical writer, so no locking is involved.

use serde_json::Value;
use tracing::{error, warn};

use crate::document::normalize::normalize;
use crate::document::{IdGenerator, UuidIds};
use crate::errors::AppError;
use crate::models::resume::{EducationEntry, ExperienceEntry, ResumeDocument, Skill};
use crate::storage::DocumentStorage;

/// One field of the personal-info block.
#[derive(Debug, Clone)]
pub enum PersonalField {
    FullName(String),
    CityState(String),
    Email(String),
    Phone(String),
    Github(String),
    Website(String),
    Linkedin(String),
}

#[derive(Debug, Clone)]
pub enum SkillField {
    Name(String),
    Level(String),
}

#[derive(Debug, Clone)]
pub enum ExperienceField {
    Position(String),
    Company(String),
    City(String),
    StartDate(String),
    EndDate(String),
    CurrentlyEmployed(bool),
}

#[derive(Debug, Clone)]
pub enum EducationField {
    Degree(String),
    Institution(String),
    City(String),
    StartDate(String),
    EndDate(String),
    Details(String),
}

/// Owns one `ResumeDocument` and the collaborators behind it.
///
/// Every mutation computes the next document value and then writes the full
/// serialization to storage. A failed write is logged and swallowed; the
/// in-memory document stays authoritative. Out-of-range indexes are ignored
/// rather than panicking.
pub struct DocumentStore<S: DocumentStorage> {
    doc: ResumeDocument,
    storage: S,
    ids: Box<dyn IdGenerator>,
}

impl<S: DocumentStorage> DocumentStore<S> {
    /// Opens the store with the default UUID id generator.
    pub fn open(storage: S) -> Self {
        Self::with_id_generator(storage, Box::new(UuidIds))
    }

    /// Loads the previously saved document, normalizing it against the
    /// canonical template. A missing, unreadable, or unparseable payload
    /// falls back silently to the template; that is not a user-facing error.
    pub fn with_id_generator(storage: S, mut ids: Box<dyn IdGenerator>) -> Self {
        let template = ResumeDocument::template();
        let doc = match storage.load() {
            Ok(Some(text)) => match serde_json::from_str::<Value>(&text) {
                Ok(raw) => normalize(&raw, &template, ids.as_mut()),
                Err(e) => {
                    warn!("Stored document is not valid JSON, starting fresh: {e}");
                    template
                }
            },
            Ok(None) => template,
            Err(e) => {
                warn!("Could not read stored document, starting fresh: {e:#}");
                template
            }
        };
        Self { doc, storage, ids }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.doc
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn set_personal(&mut self, field: PersonalField) {
        let personal = &mut self.doc.personal;
        match field {
            PersonalField::FullName(v) => personal.full_name = v,
            PersonalField::CityState(v) => personal.city_state = v,
            PersonalField::Email(v) => personal.email = v,
            PersonalField::Phone(v) => personal.phone = v,
            PersonalField::Github(v) => personal.github = v,
            PersonalField::Website(v) => personal.website = v,
            PersonalField::Linkedin(v) => personal.linkedin = v,
        }
        self.persist();
    }

    pub fn set_summary(&mut self, value: impl Into<String>) {
        self.doc.summary = value.into();
        self.persist();
    }

    /// Adds a skill with a freshly minted id and returns the id. The name is
    /// trimmed first; a blank name is a no-op, matching the form behavior.
    pub fn add_skill(&mut self, name: &str, level: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = self.ids.next_id();
        self.doc.skills.push(Skill {
            id: id.clone(),
            name: name.to_owned(),
            level: level.to_owned(),
        });
        self.persist();
        Some(id)
    }

    /// Skills are addressed by id, not index; an unknown id is a no-op.
    pub fn update_skill(&mut self, id: &str, field: SkillField) {
        let skill = match self.doc.skills.iter_mut().find(|s| s.id == id) {
            Some(skill) => skill,
            None => return,
        };
        match field {
            SkillField::Name(v) => skill.name = v,
            SkillField::Level(v) => skill.level = v,
        }
        self.persist();
    }

    /// Removes the skill with the given id. Skills have no non-empty floor;
    /// the list may legitimately end up empty.
    pub fn remove_skill(&mut self, id: &str) {
        let before = self.doc.skills.len();
        self.doc.skills.retain(|s| s.id != id);
        if self.doc.skills.len() != before {
            self.persist();
        }
    }

    pub fn add_experience(&mut self) {
        self.doc.experience.push(ExperienceEntry::default());
        self.persist();
    }

    pub fn update_experience(&mut self, index: usize, field: ExperienceField) {
        let entry = match self.doc.experience.get_mut(index) {
            Some(entry) => entry,
            None => return,
        };
        match field {
            ExperienceField::Position(v) => entry.position = v,
            ExperienceField::Company(v) => entry.company = v,
            ExperienceField::City(v) => entry.city = v,
            ExperienceField::StartDate(v) => entry.start_date = v,
            ExperienceField::EndDate(v) => entry.end_date = v,
            ExperienceField::CurrentlyEmployed(v) => entry.currently_employed = v,
        }
        self.persist();
    }

    /// Removes an entry. Emptying the list floors it back to a single blank
    /// entry; the sequence is never empty.
    pub fn remove_experience(&mut self, index: usize) {
        if index >= self.doc.experience.len() {
            return;
        }
        self.doc.experience.remove(index);
        if self.doc.experience.is_empty() {
            self.doc.experience.push(ExperienceEntry::default());
        }
        self.persist();
    }

    pub fn add_education(&mut self) {
        self.doc.education.push(EducationEntry::default());
        self.persist();
    }

    pub fn update_education(&mut self, index: usize, field: EducationField) {
        let entry = match self.doc.education.get_mut(index) {
            Some(entry) => entry,
            None => return,
        };
        match field {
            EducationField::Degree(v) => entry.degree = v,
            EducationField::Institution(v) => entry.institution = v,
            EducationField::City(v) => entry.city = v,
            EducationField::StartDate(v) => entry.start_date = v,
            EducationField::EndDate(v) => entry.end_date = v,
            EducationField::Details(v) => entry.details = v,
        }
        self.persist();
    }

    /// Same non-empty floor as `remove_experience`.
    pub fn remove_education(&mut self, index: usize) {
        if index >= self.doc.education.len() {
            return;
        }
        self.doc.education.remove(index);
        if self.doc.education.is_empty() {
            self.doc.education.push(EducationEntry::default());
        }
        self.persist();
    }

    pub fn add_achievement(&mut self, experience_index: usize) {
        let entry = match self.doc.experience.get_mut(experience_index) {
            Some(entry) => entry,
            None => return,
        };
        entry.achievements.push(String::new());
        self.persist();
    }

    pub fn update_achievement(
        &mut self,
        experience_index: usize,
        achievement_index: usize,
        value: impl Into<String>,
    ) {
        let slot = match self
            .doc
            .experience
            .get_mut(experience_index)
            .and_then(|e| e.achievements.get_mut(achievement_index))
        {
            Some(slot) => slot,
            None => return,
        };
        *slot = value.into();
        self.persist();
    }

    /// Removes one achievement line. An emptied list becomes a single blank
    /// line, never an empty sequence.
    pub fn remove_achievement(&mut self, experience_index: usize, achievement_index: usize) {
        let entry = match self.doc.experience.get_mut(experience_index) {
            Some(entry) => entry,
            None => return,
        };
        if achievement_index >= entry.achievements.len() {
            return;
        }
        entry.achievements.remove(achievement_index);
        if entry.achievements.is_empty() {
            entry.achievements.push(String::new());
        }
        self.persist();
    }

    /// Restores the canonical template and clears persisted storage. A
    /// failed clear is logged and swallowed; the next mutation autosaves
    /// as usual.
    pub fn reset(&mut self) {
        self.doc = ResumeDocument::template();
        if let Err(e) = self.storage.clear() {
            warn!("Failed to clear stored document: {e:#}");
        }
    }

    /// Parses `text` as JSON, normalizes it, and replaces the whole document,
    /// persisting before returning so import and autosave cannot race. On
    /// parse failure the current document is untouched.
    pub fn import_json(&mut self, text: &str) -> Result<(), AppError> {
        let raw: Value = serde_json::from_str(text).map_err(AppError::MalformedImport)?;
        self.doc = normalize(&raw, &ResumeDocument::template(), self.ids.as_mut());
        self.persist();
        Ok(())
    }

    /// Pretty-printed serialization of the current document, in the same
    /// wire format autosave writes.
    pub fn export_json(&self) -> String {
        match serde_json::to_string_pretty(&self.doc) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to serialize document for export: {e}");
                String::new()
            }
        }
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.doc) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialize document for autosave: {e}");
                return;
            }
        };
        if let Err(e) = self.storage.save(&payload) {
            warn!("Autosave failed, keeping in-memory document: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn seq_ids() -> Box<dyn IdGenerator> {
        let mut n = 0;
        Box::new(move || {
            n += 1;
            format!("id-{n}")
        })
    }

    fn fresh_store() -> DocumentStore<MemoryStorage> {
        DocumentStore::with_id_generator(MemoryStorage::new(), seq_ids())
    }

    /// Storage that accepts nothing, for exercising the swallow-and-log path.
    struct FailingStorage;

    impl DocumentStorage for FailingStorage {
        fn load(&self) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
        fn save(&mut self, _payload: &str) -> anyhow::Result<()> {
            anyhow::bail!("quota exceeded")
        }
        fn clear(&mut self) -> anyhow::Result<()> {
            anyhow::bail!("quota exceeded")
        }
    }

    #[test]
    fn test_open_empty_storage_starts_from_template() {
        let store = fresh_store();
        assert_eq!(*store.document(), ResumeDocument::template());
    }

    #[test]
    fn test_open_normalizes_stored_payload() {
        let storage = MemoryStorage::with_payload(r#"{"personal":{"correo":"a@b.com"}}"#);
        let store = DocumentStore::with_id_generator(storage, seq_ids());
        assert_eq!(store.document().personal.email, "a@b.com");
        assert_eq!(
            store.document().experience,
            ResumeDocument::template().experience
        );
    }

    #[test]
    fn test_open_corrupt_payload_falls_back_to_template() {
        let storage = MemoryStorage::with_payload("{not json");
        let store = DocumentStore::with_id_generator(storage, seq_ids());
        assert_eq!(*store.document(), ResumeDocument::template());
    }

    #[test]
    fn test_every_mutation_autosaves() {
        let mut store = fresh_store();
        assert!(store.storage().payload().is_none());
        store.set_summary("full-stack");
        let saved = store.storage().payload().unwrap().to_owned();
        assert!(saved.contains(r#""resumen":"full-stack""#));
        store.set_personal(PersonalField::Email("a@b.com".into()));
        assert_ne!(store.storage().payload().unwrap(), saved);
    }

    #[test]
    fn test_add_skill_mints_unique_ids() {
        let mut store = fresh_store();
        store.import_json("{}").unwrap();
        assert!(store.document().skills.is_empty());

        let id = store.add_skill("React", "Intermediate").unwrap();
        assert!(!id.is_empty());
        let skills = &store.document().skills;
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].name, "React");
        assert_eq!(skills[0].level, "Intermediate");

        let other = store.add_skill("Rust", "Expert").unwrap();
        assert_ne!(id, other);
    }

    #[test]
    fn test_add_skill_blank_name_is_ignored() {
        let mut store = fresh_store();
        assert!(store.add_skill("   ", "Expert").is_none());
        assert_eq!(store.document().skills, ResumeDocument::template().skills);
    }

    #[test]
    fn test_update_and_remove_skill_by_id() {
        let mut store = fresh_store();
        store.update_skill("s1", SkillField::Level("Expert".into()));
        assert_eq!(store.document().skills[0].level, "Expert");

        store.remove_skill("s1");
        store.remove_skill("s2");
        assert!(store.document().skills.is_empty());
    }

    #[test]
    fn test_remove_last_experience_restores_blank_entry() {
        let mut store = fresh_store();
        store.update_experience(0, ExperienceField::Position("Dev".into()));
        store.remove_experience(0);
        assert_eq!(
            store.document().experience,
            ResumeDocument::template().experience
        );
    }

    #[test]
    fn test_remove_last_education_restores_blank_entry() {
        let mut store = fresh_store();
        store.update_education(0, EducationField::Degree("BSc".into()));
        store.remove_education(0);
        assert_eq!(
            store.document().education,
            ResumeDocument::template().education
        );
    }

    #[test]
    fn test_achievement_removal_cascade() {
        let mut store = fresh_store();
        store.update_achievement(0, 0, "x");
        assert_eq!(store.document().experience[0].achievements, vec!["x"]);

        store.remove_achievement(0, 0);
        assert_eq!(
            store.document().experience[0].achievements,
            vec![String::new()]
        );

        store.remove_experience(0);
        assert_eq!(
            store.document().experience,
            ResumeDocument::template().experience
        );
        assert_eq!(
            store.document().experience[0].achievements,
            vec![String::new()]
        );
    }

    #[test]
    fn test_achievement_add_and_update() {
        let mut store = fresh_store();
        store.add_achievement(0);
        store.update_achievement(0, 1, "cut build time by 40%");
        assert_eq!(
            store.document().experience[0].achievements,
            vec!["".to_owned(), "cut build time by 40%".to_owned()]
        );
    }

    #[test]
    fn test_out_of_range_indexes_are_ignored() {
        let mut store = fresh_store();
        let before = store.document().clone();
        store.update_experience(9, ExperienceField::Position("Dev".into()));
        store.update_education(9, EducationField::Degree("BSc".into()));
        store.remove_experience(9);
        store.remove_education(9);
        store.add_achievement(9);
        store.update_achievement(0, 9, "x");
        store.remove_achievement(0, 9);
        assert_eq!(*store.document(), before);
    }

    #[test]
    fn test_import_malformed_leaves_document_unchanged() {
        let mut store = fresh_store();
        store.set_summary("keep me");
        let before = store.document().clone();
        let saved = store.storage().payload().unwrap().to_owned();

        let err = store.import_json("{not json").unwrap_err();
        assert!(matches!(err, AppError::MalformedImport(_)));
        assert_eq!(*store.document(), before);
        assert_eq!(store.storage().payload().unwrap(), saved);
    }

    #[test]
    fn test_import_replaces_wholesale_and_persists() {
        let mut store = fresh_store();
        store.set_summary("old");
        store
            .import_json(r#"{"resumen": "new", "personal": {"correo": "a@b.com"}}"#)
            .unwrap();
        assert_eq!(store.document().summary, "new");
        assert_eq!(store.document().personal.email, "a@b.com");
        assert!(store
            .storage()
            .payload()
            .unwrap()
            .contains(r#""resumen":"new""#));
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = fresh_store();
        store.set_personal(PersonalField::FullName("Ada Lovelace".into()));
        store.set_summary("Analyst");
        store.add_skill("Rust", "Expert");
        store.update_experience(0, ExperienceField::Position("Engineer".into()));
        store.update_achievement(0, 0, "wrote the first program");
        let exported = store.export_json();

        let mut other = fresh_store();
        other.import_json(&exported).unwrap();
        assert_eq!(other.document(), store.document());
    }

    #[test]
    fn test_reset_restores_template_and_clears_storage() {
        let mut store = fresh_store();
        store.set_summary("about to vanish");
        assert!(store.storage().payload().is_some());

        store.reset();
        assert_eq!(*store.document(), ResumeDocument::template());
        assert!(store.storage().payload().is_none());
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let mut store = DocumentStore::with_id_generator(FailingStorage, seq_ids());
        store.set_summary("survives");
        assert_eq!(store.document().summary, "survives");
        store.reset();
        assert_eq!(*store.document(), ResumeDocument::template());
    }
}
