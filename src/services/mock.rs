use std::collections::BTreeMap;

use rand::{thread_rng, Rng};

use crate::error::CoreError;
use crate::model::entry::EntryDraft;
use crate::services::ai_types::{AiProvider, GenerateRequest, RefineRequest};
use crate::services::glossary;

// Provider offline: dicionário embutido + heurísticas de categoria.
// Útil para desenvolvimento e para os testes de protocolo sem rede.
pub struct MockProvider;

const FALLBACK_ENGLISH: &str = "Untitled Action";

// Variações prontas para os idiomas mais pedidos no refino.
const REFINE_POOLS: &[(&str, &[&str])] = &[
    ("cn", &["确 认", "确定提交", "立即执行"]),
    ("vn", &["Xác nhận", "Đồng ý", "Hoàn tất ngay"]),
    ("th", &["ยืนยันการทำรายการ", "ตกลง", "ดำเนินการต่อ"]),
];

// Tag do placeholder quando não há tradução: código em maiúsculas,
// exceto "cn" que vira "ZH" (convenção herdada do BackOffice).
fn placeholder_tag(lang: &str) -> String {
    if lang == "cn" {
        "ZH".to_string()
    } else {
        lang.to_uppercase()
    }
}

// Código curto legível: prefixo da categoria + duas primeiras palavras
// alfanuméricas + sufixo aleatório de três dígitos.
fn short_code(category: &str, text: &str) -> String {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();

    let words: Vec<String> = cleaned
        .split_whitespace()
        .take(2)
        .map(str::to_uppercase)
        .collect();
    let base = if words.is_empty() {
        "ACTION".to_string()
    } else {
        words.join("_")
    };

    let prefix: String = if category == "GAMES" {
        "GME".to_string()
    } else {
        category.chars().take(3).collect()
    };

    let suffix: u32 = thread_rng().gen_range(100..=999);
    format!("{prefix}_{base}_{suffix}")
}

impl AiProvider for MockProvider {
    fn generate(&self, req: &GenerateRequest) -> Result<EntryDraft, CoreError> {
        let text = req.text.trim();
        let category = glossary::category_for(text);
        let hit = glossary::lookup(text);

        let mut translations: BTreeMap<String, String> = BTreeMap::new();
        let english = if text.is_empty() {
            FALLBACK_ENGLISH.to_string()
        } else {
            text.to_string()
        };
        translations.insert("en".to_string(), english);

        for lang in &req.languages {
            if lang == "en" {
                continue;
            }
            let value = hit
                .and_then(|term| term.translation(lang))
                .map(str::to_string)
                .unwrap_or_else(|| format!("[{}] {}", placeholder_tag(lang), text));
            translations.insert(lang.clone(), value);
        }

        Ok(EntryDraft {
            key1: category.to_string(),
            key2: short_code(category, text),
            translations,
        })
    }

    fn refine(&self, req: &RefineRequest) -> Result<String, CoreError> {
        let base = if req.current.trim().is_empty() {
            req.english.as_str()
        } else {
            req.current.as_str()
        };

        let mut rng = thread_rng();

        if let Some((_, pool)) = REFINE_POOLS.iter().find(|(lang, _)| *lang == req.language) {
            return Ok(pool[rng.gen_range(0..pool.len())].to_string());
        }

        let variants = [format!("{base} (Official)"), format!("{base} (System)")];
        Ok(variants[rng.gen_range(0..variants.len())].clone())
    }
}
