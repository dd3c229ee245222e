use crate::error::CoreError;
use crate::model::language::{LanguageSet, DEFAULT_LABELS};
use crate::model::store::EntryStore;
use crate::model::template::SqlTemplate;

// Estado que o processo carrega entre comandos: entradas geradas, idiomas
// conhecidos, template SQL e os alvos de geração. Nada disso vai para
// disco; fechar o processo descarta a sessão.
pub struct Session {
    pub store: EntryStore,
    pub labels: LanguageSet,
    pub template: SqlTemplate,
    pub targets: Vec<String>,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            store: EntryStore::default(),
            labels: LanguageSet::default(),
            template: SqlTemplate::default(),
            // por padrão gera todos os idiomas conhecidos
            targets: DEFAULT_LABELS.iter().map(|(code, _)| code.to_string()).collect(),
        }
    }
}

impl Session {
    // Liga/desliga um idioma como alvo de geração. "en" é fixo e nunca
    // sai da lista. Retorna se o código terminou ligado.
    pub fn toggle_target(&mut self, code: &str) -> bool {
        let code = code.trim().to_lowercase();
        if code == "en" {
            return true;
        }

        if let Some(pos) = self.targets.iter().position(|c| *c == code) {
            self.targets.remove(pos);
            false
        } else {
            self.targets.push(code);
            true
        }
    }

    pub fn set_all_targets(&mut self, enable: bool) {
        if enable {
            self.targets = self.labels.codes().map(str::to_string).collect();
        } else {
            self.targets = vec!["en".to_string()];
        }
    }

    // Registra um idioma novo de ponta a ponta: label, alvo de geração,
    // token no mapping e coluna no header.
    pub fn add_language(&mut self, code: &str, label: &str) -> Result<(), CoreError> {
        let code = code.trim().to_lowercase();
        let label = label.trim();
        if code.is_empty() || label.is_empty() {
            return Err(CoreError::InvalidRequest(
                "payload.code and payload.label are required".to_string(),
            ));
        }

        self.labels.define(&code, label);
        if !self.targets.iter().any(|c| *c == code) {
            self.targets.push(code.clone());
        }
        self.template.append_token(&code);
        self.template.add_header_column(&code);

        Ok(())
    }

    // Idiomas pedidos ao provider: os alvos atuais com "en" garantido.
    pub fn target_languages(&self) -> Vec<String> {
        let mut langs = self.targets.clone();
        if !langs.iter().any(|c| c == "en") {
            langs.push("en".to_string());
        }
        langs
    }
}
