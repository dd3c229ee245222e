#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    EntryGenerate,
    EntryRefine,
    EntryUpdate,
    EntryDelete,
    EntryClear,
    EntryList,
    LanguageList,
    LanguageDefine,
    LanguageToggle,
    LanguageSetAll,
    TemplateGet,
    TemplateSet,
    TemplateReset,
    TemplateCheck,
    SqlRender,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "entry.generate" => Command::EntryGenerate,
            "entry.refine" => Command::EntryRefine,
            "entry.update" => Command::EntryUpdate,
            "entry.delete" => Command::EntryDelete,
            "entry.clear" => Command::EntryClear,
            "entry.list" => Command::EntryList,
            "language.list" => Command::LanguageList,
            "language.define" => Command::LanguageDefine,
            "language.toggle" => Command::LanguageToggle,
            "language.set_all" => Command::LanguageSetAll,
            "template.get" => Command::TemplateGet,
            "template.set" => Command::TemplateSet,
            "template.reset" => Command::TemplateReset,
            "template.check" => Command::TemplateCheck,
            "sql.render" => Command::SqlRender,
            _ => Command::Unknown,
        }
    }
}

impl Command {
    // Comandos de configuração atendidos pelo handler agrupado em settings.rs.
    pub fn is_settings(&self) -> bool {
        matches!(
            self,
            Command::LanguageList
                | Command::LanguageDefine
                | Command::LanguageToggle
                | Command::LanguageSetAll
                | Command::TemplateGet
                | Command::TemplateSet
                | Command::TemplateReset
                | Command::TemplateCheck
        )
    }
}
