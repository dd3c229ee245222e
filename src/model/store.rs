use chrono::Utc;
use uuid::Uuid;

use crate::model::entry::{EntryDraft, EntryField, LocEntry};

// Coleção de entradas da sessão, mais recente primeiro. Sem persistência:
// morre junto com o processo.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: Vec<LocEntry>,
}

impl EntryStore {
    pub fn create(&mut self, draft: EntryDraft) -> &LocEntry {
        let mut entry = LocEntry {
            entry_id: Uuid::new_v4().to_string(),
            key1: draft.key1,
            key2: draft.key2,
            translations: draft.translations,
            created_ms: Utc::now().timestamp_millis(),
        };
        entry.ensure_english();

        self.entries.insert(0, entry);
        &self.entries[0]
    }

    // Troca um campo da entrada com esse id. Id desconhecido é no-op
    // silencioso; nenhuma outra entrada ou campo muda.
    pub fn update(&mut self, id: &str, field: &EntryField, value: &str) -> bool {
        let entry = match self.entries.iter_mut().find(|e| e.entry_id == id) {
            Some(e) => e,
            None => return false,
        };

        match field {
            EntryField::Key1 => entry.key1 = value.to_string(),
            EntryField::Key2 => entry.key2 = value.to_string(),
            EntryField::Translation(lang) => {
                entry.translations.insert(lang.clone(), value.to_string());
            }
        }

        true
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.entry_id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: &str) -> Option<&LocEntry> {
        self.entries.iter().find(|e| e.entry_id == id)
    }

    pub fn entries(&self) -> &[LocEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
