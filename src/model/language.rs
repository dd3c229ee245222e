use std::cmp::Ordering;
use std::collections::BTreeMap;

// Conjunto padrão de idiomas do BackOffice. Cresce em runtime via define(),
// nunca encolhe.
pub const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("en", "English"),
    ("cn", "Simplified Chinese"),
    ("kh", "Khmer"),
    ("id", "Indonesian"),
    ("vn", "Vietnamese"),
    ("th", "Thai"),
    ("my", "Malay"),
    ("lo", "Lao"),
    ("hk", "Trad. Chinese (HK)"),
    ("ar", "Arabic"),
    ("fr", "French"),
    ("ja", "Japanese"),
    ("es", "Spanish"),
    ("pt", "Portuguese"),
    ("tr", "Turkish"),
    ("ru", "Russian"),
    ("kr", "Korean"),
    ("mm", "Burmese"),
    ("hi", "Hindi"),
    ("mn", "Mongolian"),
    ("ph", "Filipino"),
    ("bd", "Bengali"),
    ("ne", "Nepali"),
    ("pk", "Urdu"),
];

#[derive(Debug, Clone)]
pub struct LanguageSet {
    labels: BTreeMap<String, String>,
}

impl Default for LanguageSet {
    fn default() -> Self {
        let labels = DEFAULT_LABELS
            .iter()
            .map(|(code, label)| (code.to_string(), label.to_string()))
            .collect();
        LanguageSet { labels }
    }
}

impl LanguageSet {
    pub fn define(&mut self, code: &str, label: &str) {
        let code = code.trim().to_lowercase();
        if code.is_empty() {
            return;
        }
        self.labels.insert(code, label.to_string());
    }

    pub fn label(&self, code: &str) -> Option<&str> {
        self.labels.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.labels.contains_key(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    // Ordem de exibição dos idiomas: "en" primeiro, depois a posição no
    // mapping ativo, por último ordem alfabética. O mapping pode vir com
    // maiúsculas; a posição compara em minúsculas.
    pub fn display_order(&self, sort_order: &[String]) -> Vec<String> {
        let order: Vec<String> = sort_order.iter().map(|t| t.to_lowercase()).collect();

        let mut codes: Vec<String> = self.labels.keys().cloned().collect();
        codes.sort_by(|a, b| {
            if a == "en" {
                return Ordering::Less;
            }
            if b == "en" {
                return Ordering::Greater;
            }
            let idx_a = order.iter().position(|t| t == a);
            let idx_b = order.iter().position(|t| t == b);
            match (idx_a, idx_b) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.cmp(b),
            }
        });
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_seeded() {
        let set = LanguageSet::default();
        assert_eq!(set.len(), 24);
        assert_eq!(set.label("en"), Some("English"));
        assert_eq!(set.label("cn"), Some("Simplified Chinese"));
        assert_eq!(set.label("pk"), Some("Urdu"));
        assert!(!set.contains("de"));
    }

    #[test]
    fn test_define_normalizes_code() {
        let mut set = LanguageSet::default();
        set.define("  DE ", "German");
        assert_eq!(set.label("de"), Some("German"));

        set.define("", "nope");
        assert!(!set.contains(""));

        // redefinição sobrescreve o label
        set.define("de", "Deutsch");
        assert_eq!(set.label("de"), Some("Deutsch"));
    }

    #[test]
    fn test_display_order_en_first_then_mapping() {
        let mut set = LanguageSet::default();
        set.define("zz", "Custom");

        let order = vec!["key1".to_string(), "th".to_string(), "cn".to_string()];
        let sorted = set.display_order(&order);

        assert_eq!(sorted[0], "en");
        assert_eq!(sorted[1], "th");
        assert_eq!(sorted[2], "cn");
        // "zz" não está no mapping: cai para a cauda alfabética
        assert_eq!(sorted.last().map(String::as_str), Some("zz"));
        assert_eq!(sorted.len(), 25);

        // cauda alfabética de fato ordenada
        let tail = &sorted[3..];
        let mut expected = tail.to_vec();
        expected.sort();
        assert_eq!(tail, expected.as_slice());
    }

    #[test]
    fn test_display_order_ignores_mapping_case() {
        let set = LanguageSet::default();

        let order = vec!["key1".to_string(), "TH".to_string(), "CN".to_string()];
        let sorted = set.display_order(&order);

        assert_eq!(sorted[0], "en");
        assert_eq!(sorted[1], "th");
        assert_eq!(sorted[2], "cn");
    }
}
