use serde::{Deserialize, Serialize};

use crate::model::language::LanguageSet;
use crate::model::template::SqlTemplate;

// Tokens que resolvem para campos da entrada, não para idiomas.
const FIELD_TOKENS: &[&str] = &["key1", "key2", "empty", "guid"];

#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateIssue {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TemplateReport {
    pub header_columns: usize,
    pub mapping_tokens: usize,
    pub issues: Vec<TemplateIssue>,
}

// Checagem consultiva do template: aponta problemas prováveis sem nunca
// bloquear a renderização. O render continua aceitando qualquer coisa.
pub fn run(template: &SqlTemplate, labels: &LanguageSet) -> TemplateReport {
    let header_columns = template.header_column_count();
    let mapping_tokens = template.token_count();

    let mut issues: Vec<TemplateIssue> = Vec::new();

    if mapping_tokens == 0 {
        issues.push(TemplateIssue {
            code: "EMPTY_MAPPING".to_string(),
            message: "mapping has no usable tokens".to_string(),
        });
    }

    // Mismatch só faz sentido quando existe mapping para comparar
    if mapping_tokens != 0 && header_columns != mapping_tokens {
        issues.push(TemplateIssue {
            code: "COLUMN_COUNT_MISMATCH".to_string(),
            message: format!(
                "header declares {header_columns} columns but mapping has {mapping_tokens} tokens"
            ),
        });
    }

    for token in template.tokens() {
        if token.is_empty() {
            continue;
        }
        if FIELD_TOKENS.contains(&token.as_str()) {
            continue;
        }
        if labels.contains(&token) {
            continue;
        }
        issues.push(TemplateIssue {
            code: "UNKNOWN_TOKEN".to_string(),
            message: format!("mapping token \"{token}\" is not a field or a known language"),
        });
    }

    TemplateReport { header_columns, mapping_tokens, issues }
}
