use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocEntry {
    pub entry_id: String,

    #[serde(default)]
    pub key1: String,

    #[serde(default)]
    pub key2: String,

    // BTreeMap garante ordem de iteração estável ao serializar.
    // Invariante: a chave "en" sempre existe (pode ser vazia).
    #[serde(default)]
    pub translations: BTreeMap<String, String>,

    #[serde(default)]
    pub created_ms: i64,
}

impl LocEntry {
    pub fn english(&self) -> &str {
        self.translation("en")
    }

    pub fn translation(&self, lang: &str) -> &str {
        self.translations.get(lang).map(String::as_str).unwrap_or("")
    }

    pub fn ensure_english(&mut self) {
        self.translations.entry("en".to_string()).or_default();
    }
}

// Entrada recém-gerada, ainda sem identidade: é o que o provider devolve
// e o que o store transforma em LocEntry.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct EntryDraft {
    #[serde(default)]
    pub key1: String,

    #[serde(default)]
    pub key2: String,

    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryField {
    Key1,
    Key2,
    Translation(String),
}

impl EntryField {
    // Converte o caminho de campo do protocolo ("key1", "key2",
    // "translations.<lang>") no campo tipado. Retorna None para
    // qualquer outro nome.
    pub fn parse(field: &str) -> Option<EntryField> {
        match field {
            "key1" => Some(EntryField::Key1),
            "key2" => Some(EntryField::Key2),
            _ => {
                let lang = field.strip_prefix("translations.")?;
                if lang.is_empty() {
                    return None;
                }
                Some(EntryField::Translation(lang.to_string()))
            }
        }
    }
}
