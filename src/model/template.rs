use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HEADER: &str = "INSERT INTO [dbo].[BackOffice]([key1],[key2],[Translated],[en],[cn],[kh],[id],[vn],[th],[my],[lo],[hk],[ar],[fr],[ja],[es],[pt],[tr],[ru],[kr],[mm],[hi],[mn],[ph],[bd],[ne],[pk]) VALUES";

pub const DEFAULT_MAPPING: &str = "key1, key2, empty, en, cn, kh, id, vn, th, my, lo, hk, ar, fr, ja, es, pt, tr, ru, kr, mm, hi, mn, ph, bd, ne, pk";

static BRACKET_COLUMN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());

// Insere a nova coluna imediatamente antes do ") VALUES" final.
static VALUES_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\)(\s*VALUES)").unwrap());

fn default_header() -> String {
    DEFAULT_HEADER.to_string()
}

fn default_mapping() -> String {
    DEFAULT_MAPPING.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SqlTemplate {
    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_mapping")]
    pub mapping: String,
}

impl Default for SqlTemplate {
    fn default() -> Self {
        SqlTemplate {
            header: default_header(),
            mapping: default_mapping(),
        }
    }
}

impl SqlTemplate {
    // Tokens do mapping na ordem declarada: split por vírgula com trim.
    // Tokens vazios são preservados; o renderer resolve cada um como
    // qualquer outro token desconhecido.
    pub fn tokens(&self) -> Vec<String> {
        self.mapping.split(',').map(|s| s.trim().to_string()).collect()
    }

    pub fn token_count(&self) -> usize {
        self.mapping.split(',').filter(|s| !s.trim().is_empty()).count()
    }

    /// Conta os grupos [coluna] do header, só dentro da lista de colunas
    /// (depois do primeiro parêntese). Sem isso, [dbo].[BackOffice]
    /// entraria na conta.
    pub fn header_column_count(&self) -> usize {
        let list = match self.header.find('(') {
            Some(pos) => &self.header[pos..],
            None => self.header.as_str(),
        };
        BRACKET_COLUMN.find_iter(list).count()
    }

    pub fn contains_token(&self, code: &str) -> bool {
        self.mapping.split(',').any(|s| s.trim() == code)
    }

    pub fn append_token(&mut self, code: &str) {
        if self.contains_token(code) {
            return;
        }
        let trimmed = self.mapping.trim();
        self.mapping = if trimmed.is_empty() {
            code.to_string()
        } else {
            format!("{trimmed}, {code}")
        };
    }

    // Acrescenta ",[code]" antes do ") VALUES" do header. No-op se a
    // coluna já existe ou se o header não tem a cauda esperada.
    pub fn add_header_column(&mut self, code: &str) {
        if self.header.to_lowercase().contains(&format!("[{code}]")) {
            return;
        }
        if !VALUES_TAIL.is_match(&self.header) {
            return;
        }
        self.header = VALUES_TAIL
            .replace(&self.header, format!(",[{code}])${{1}}"))
            .into_owned();
    }

    pub fn reset(&mut self) {
        *self = SqlTemplate::default();
    }
}
