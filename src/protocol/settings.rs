use serde_json::{json, Value};

use crate::model::session::Session;
use crate::services::check;

use super::command::Command;

// Comandos de configuração (idiomas e template). Erros voltam na chave
// "__error"; o dispatcher converte para o envelope de erro.
pub fn handle(session: &mut Session, cmd: Command, payload: &Value) -> Option<Value> {
    match cmd {
        Command::LanguageList => {
            let order = session.template.tokens();
            let codes = session.labels.display_order(&order);

            let languages: Vec<Value> = codes
                .iter()
                .map(|code| {
                    json!({
                        "code": code,
                        "label": session.labels.label(code).unwrap_or(""),
                        "target": session.targets.iter().any(|t| t == code),
                    })
                })
                .collect();

            Some(json!({ "languages": languages }))
        }

        Command::LanguageDefine => {
            let code = payload.get("code").and_then(|v| v.as_str()).unwrap_or("");
            let label = payload.get("label").and_then(|v| v.as_str()).unwrap_or("");

            match session.add_language(code, label) {
                Ok(()) => Some(json!({
                    "code": code.trim().to_lowercase(),
                    "label": label.trim(),
                })),
                Err(e) => Some(json!({ "__error": e.to_string() })),
            }
        }

        Command::LanguageToggle => {
            let code = payload.get("code").and_then(|v| v.as_str()).unwrap_or("");
            if code.trim().is_empty() {
                return Some(json!({ "__error": "payload.code is required" }));
            }

            let target = session.toggle_target(code);
            Some(json!({
                "code": code.trim().to_lowercase(),
                "target": target,
            }))
        }

        Command::LanguageSetAll => {
            let enabled = payload.get("enabled").and_then(|v| v.as_bool()).unwrap_or(true);
            session.set_all_targets(enabled);
            Some(json!({ "targets": session.targets }))
        }

        Command::TemplateGet => Some(json!({
            "header": session.template.header,
            "mapping": session.template.mapping,
        })),

        Command::TemplateSet => {
            // atualização parcial: só mexe no que veio no payload
            if let Some(header) = payload.get("header").and_then(|v| v.as_str()) {
                session.template.header = header.to_string();
            }
            if let Some(mapping) = payload.get("mapping").and_then(|v| v.as_str()) {
                session.template.mapping = mapping.to_string();
            }

            Some(json!({
                "header": session.template.header,
                "mapping": session.template.mapping,
            }))
        }

        Command::TemplateReset => {
            session.template.reset();
            Some(json!({
                "header": session.template.header,
                "mapping": session.template.mapping,
            }))
        }

        Command::TemplateCheck => {
            let report = check::run(&session.template, &session.labels);
            Some(serde_json::to_value(report).unwrap_or(json!({})))
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::template::{DEFAULT_HEADER, DEFAULT_MAPPING};

    #[test]
    fn test_non_settings_command_is_ignored() {
        let mut session = Session::default();
        assert!(handle(&mut session, Command::Ping, &json!({})).is_none());
        assert!(handle(&mut session, Command::SqlRender, &json!({})).is_none());
    }

    #[test]
    fn test_language_list_shape_and_order() {
        let mut session = Session::default();
        session.toggle_target("th");

        let out = handle(&mut session, Command::LanguageList, &json!({})).unwrap();
        let languages = out["languages"].as_array().unwrap();

        assert_eq!(languages.len(), 24);
        // "en" primeiro na ordem de exibição
        assert_eq!(languages[0]["code"], "en");
        assert_eq!(languages[0]["label"], "English");
        assert_eq!(languages[0]["target"], true);

        let th = languages.iter().find(|l| l["code"] == "th").unwrap();
        assert_eq!(th["target"], false);
    }

    #[test]
    fn test_language_list_follows_uppercase_mapping() {
        let mut session = Session::default();
        handle(
            &mut session,
            Command::TemplateSet,
            &json!({ "mapping": "key1, TH, CN" }),
        )
        .unwrap();

        let out = handle(&mut session, Command::LanguageList, &json!({})).unwrap();
        let languages = out["languages"].as_array().unwrap();

        // a posição no mapping vale mesmo com tokens em maiúsculas
        assert_eq!(languages[0]["code"], "en");
        assert_eq!(languages[1]["code"], "th");
        assert_eq!(languages[2]["code"], "cn");
    }

    #[test]
    fn test_language_define_wires_session() {
        let mut session = Session::default();
        let out = handle(
            &mut session,
            Command::LanguageDefine,
            &json!({ "code": " DE ", "label": "German" }),
        )
        .unwrap();

        assert_eq!(out["code"], "de");
        assert_eq!(out["label"], "German");
        assert_eq!(session.labels.label("de"), Some("German"));
        assert!(session.template.contains_token("de"));
        assert!(session.template.header.contains("[de]"));
    }

    #[test]
    fn test_language_define_requires_both_fields() {
        let mut session = Session::default();
        let out = handle(&mut session, Command::LanguageDefine, &json!({ "code": "de" })).unwrap();
        assert!(out.get("__error").is_some());
    }

    #[test]
    fn test_language_toggle_and_set_all() {
        let mut session = Session::default();

        let out = handle(&mut session, Command::LanguageToggle, &json!({ "code": "th" })).unwrap();
        assert_eq!(out["target"], false);

        let out = handle(&mut session, Command::LanguageToggle, &json!({ "code": "th" })).unwrap();
        assert_eq!(out["target"], true);

        // "en" nunca desliga
        let out = handle(&mut session, Command::LanguageToggle, &json!({ "code": "en" })).unwrap();
        assert_eq!(out["target"], true);

        let out = handle(&mut session, Command::LanguageToggle, &json!({})).unwrap();
        assert!(out.get("__error").is_some());

        let out = handle(
            &mut session,
            Command::LanguageSetAll,
            &json!({ "enabled": false }),
        )
        .unwrap();
        assert_eq!(out["targets"], json!(["en"]));
    }

    #[test]
    fn test_template_set_is_partial() {
        let mut session = Session::default();

        let out = handle(
            &mut session,
            Command::TemplateSet,
            &json!({ "mapping": "key1, en" }),
        )
        .unwrap();

        assert_eq!(out["header"], DEFAULT_HEADER);
        assert_eq!(out["mapping"], "key1, en");

        let out = handle(&mut session, Command::TemplateReset, &json!({})).unwrap();
        assert_eq!(out["mapping"], DEFAULT_MAPPING);
    }

    #[test]
    fn test_template_check_reports_counts() {
        let mut session = Session::default();
        let out = handle(&mut session, Command::TemplateCheck, &json!({})).unwrap();

        assert_eq!(out["header_columns"], 27);
        assert_eq!(out["mapping_tokens"], 27);
        assert_eq!(out["issues"], json!([]));
    }
}
