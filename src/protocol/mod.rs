use serde_json::{json, Value};
use tracing::warn;

use crate::error::CoreError;
use crate::model::entry::EntryField;
use crate::model::session::Session;
use crate::services::ai;
use crate::services::ai_types::{AiProvider, GenerateRequest, RefineRequest};
use crate::services::sql::{self, SqlView};

mod command;
mod settings;

use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload<'a>(req: &'a Value) -> &'a Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn fail(id: Value, cmd: &str, error: &CoreError) -> String {
    warn!(cmd, error = %error, "command failed");
    err(id, error.to_string())
}

// Provider/credencial podem vir no payload; o resto é resolvido por
// variável de ambiente dentro de provider_for.
fn provider_from(payload: &Value) -> Result<Box<dyn AiProvider>, CoreError> {
    let cfg = ai::ProviderConfig {
        provider: payload.get("provider").and_then(|v| v.as_str()).unwrap_or(""),
        api_key: payload.get("api_key").and_then(|v| v.as_str()).unwrap_or(""),
        model: payload.get("model").and_then(|v| v.as_str()).unwrap_or(""),
    };
    ai::provider_for(&cfg)
}

pub fn handle(session: &mut Session, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    match Command::from(cmd_str) {
        Command::Ping => ok(id, json!({ "message": "locsql-core alive" })),

        Command::EntryGenerate => {
            let text = payload.get("text").and_then(|v| v.as_str()).unwrap_or("");
            let image = payload
                .get("image")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string);

            if text.trim().is_empty() && image.is_none() {
                return err(id, "payload.text or payload.image is required");
            }

            let provider = match provider_from(payload) {
                Ok(p) => p,
                Err(e) => return fail(id, cmd_str, &e),
            };

            let request = GenerateRequest {
                text: text.to_string(),
                image_base64: image,
                languages: session.target_languages(),
            };

            match provider.generate(&request) {
                Ok(draft) => {
                    let entry = session.store.create(draft);
                    ok(id, json!({ "entry": entry }))
                }
                Err(e) => fail(id, cmd_str, &e),
            }
        }

        Command::EntryRefine => {
            let entry_id = payload.get("id").and_then(|v| v.as_str()).unwrap_or("");
            let lang = payload.get("lang").and_then(|v| v.as_str()).unwrap_or("");

            if entry_id.is_empty() {
                return err(id, "payload.id is required");
            }
            if lang.is_empty() {
                return err(id, "payload.lang is required");
            }

            let (current, english) = match session.store.get(entry_id) {
                Some(e) => (e.translation(lang).to_string(), e.english().to_string()),
                None => return fail(id, cmd_str, &CoreError::EntryNotFound(entry_id.to_string())),
            };

            let provider = match provider_from(payload) {
                Ok(p) => p,
                Err(e) => return fail(id, cmd_str, &e),
            };

            let request = RefineRequest {
                language: lang.to_string(),
                current,
                english,
            };

            match provider.refine(&request) {
                Ok(text) => {
                    session
                        .store
                        .update(entry_id, &EntryField::Translation(lang.to_string()), &text);
                    ok(id, json!({ "id": entry_id, "lang": lang, "text": text }))
                }
                Err(e) => fail(id, cmd_str, &e),
            }
        }

        Command::EntryUpdate => {
            let entry_id = payload.get("id").and_then(|v| v.as_str()).unwrap_or("");
            let field_str = payload.get("field").and_then(|v| v.as_str()).unwrap_or("");
            let value = payload.get("value").and_then(|v| v.as_str()).unwrap_or("");

            if entry_id.is_empty() {
                return err(id, "payload.id is required");
            }

            let field = match EntryField::parse(field_str) {
                Some(f) => f,
                None => {
                    return err(id, "payload.field must be key1, key2 or translations.<lang>")
                }
            };

            // chaves sempre maiúsculas, como o BackOffice espera
            let value = match field {
                EntryField::Key1 | EntryField::Key2 => value.to_uppercase(),
                EntryField::Translation(_) => value.to_string(),
            };

            let updated = session.store.update(entry_id, &field, &value);
            ok(id, json!({ "updated": updated }))
        }

        Command::EntryDelete => {
            let entry_id = payload.get("id").and_then(|v| v.as_str()).unwrap_or("");
            if entry_id.is_empty() {
                return err(id, "payload.id is required");
            }

            let deleted = session.store.delete(entry_id);
            ok(id, json!({ "deleted": deleted }))
        }

        Command::EntryClear => {
            session.store.clear();
            ok(id, json!({ "cleared": true }))
        }

        Command::EntryList => ok(id, json!({ "entries": session.store.entries() })),

        Command::SqlRender => {
            let view_name = payload.get("view").and_then(|v| v.as_str()).unwrap_or("");
            let view = SqlView::from_name(view_name);
            let rendered = sql::render(&session.template, session.store.entries(), view);
            ok(id, json!({ "view": view, "sql": rendered }))
        }

        cmd if cmd.is_settings() => match settings::handle(session, cmd, payload) {
            Some(v) => match v.get("__error").and_then(Value::as_str) {
                Some(msg) => {
                    let msg = msg.to_string();
                    warn!(cmd = cmd_str, error = %msg, "command failed");
                    err(id, msg)
                }
                None => ok(id, v),
            },
            None => err(id, "unknown command"),
        },

        _ => err(id, "unknown command"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::sql::EMPTY_PLACEHOLDER;

    fn call(session: &mut Session, line: &str) -> Value {
        serde_json::from_str(&handle(session, line)).unwrap()
    }

    fn generate(session: &mut Session, text: &str) -> Value {
        let line = json!({
            "id": 1,
            "cmd": "entry.generate",
            "payload": { "text": text, "provider": "mock" }
        })
        .to_string();
        call(session, &line)
    }

    #[test]
    fn test_invalid_json_keeps_envelope() {
        let mut session = Session::default();
        let resp = call(&mut session, "{nope");
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "invalid json");
    }

    #[test]
    fn test_ping_and_unknown_command() {
        let mut session = Session::default();

        let resp = call(&mut session, &json!({ "id": 9, "cmd": "ping" }).to_string());
        assert_eq!(resp["id"], 9);
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["message"], "locsql-core alive");

        let resp = call(&mut session, &json!({ "id": 10, "cmd": "nope" }).to_string());
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "unknown command");
    }

    #[test]
    fn test_generate_requires_text_or_image() {
        let mut session = Session::default();
        let line = json!({
            "id": 1,
            "cmd": "entry.generate",
            "payload": { "provider": "mock" }
        })
        .to_string();
        let resp = call(&mut session, &line);
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "payload.text or payload.image is required");
    }

    #[test]
    fn test_generate_stores_entry() {
        let mut session = Session::default();
        let resp = generate(&mut session, "Deposit");

        assert_eq!(resp["status"], "ok");
        let entry = &resp["payload"]["entry"];
        assert_eq!(entry["key1"], "BANKING");
        assert_eq!(entry["translations"]["en"], "Deposit");
        assert_eq!(entry["translations"]["cn"], "充值");
        assert!(entry["entry_id"].as_str().is_some());

        assert_eq!(session.store.len(), 1);
    }

    #[test]
    fn test_generate_respects_targets() {
        let mut session = Session::default();
        let line = json!({
            "id": 1,
            "cmd": "language.set_all",
            "payload": { "enabled": false }
        })
        .to_string();
        call(&mut session, &line);

        let resp = generate(&mut session, "Deposit");
        let translations = resp["payload"]["entry"]["translations"].as_object().unwrap();
        assert_eq!(translations.len(), 1);
        assert!(translations.contains_key("en"));
    }

    #[test]
    fn test_refine_writes_back() {
        let mut session = Session::default();
        let resp = generate(&mut session, "Deposit");
        let entry_id = resp["payload"]["entry"]["entry_id"].as_str().unwrap().to_string();

        let line = json!({
            "id": 2,
            "cmd": "entry.refine",
            "payload": { "id": entry_id, "lang": "vn", "provider": "mock" }
        })
        .to_string();
        let resp = call(&mut session, &line);

        assert_eq!(resp["status"], "ok");
        let text = resp["payload"]["text"].as_str().unwrap();
        assert!(["Xác nhận", "Đồng ý", "Hoàn tất ngay"].contains(&text));

        let stored = session.store.get(&entry_id).unwrap();
        assert_eq!(stored.translation("vn"), text);
    }

    #[test]
    fn test_refine_unknown_entry_is_error() {
        let mut session = Session::default();
        let line = json!({
            "id": 2,
            "cmd": "entry.refine",
            "payload": { "id": "missing", "lang": "cn", "provider": "mock" }
        })
        .to_string();
        let resp = call(&mut session, &line);

        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "entry not found: missing");
    }

    #[test]
    fn test_update_uppercases_keys_and_validates_field() {
        let mut session = Session::default();
        let resp = generate(&mut session, "Deposit");
        let entry_id = resp["payload"]["entry"]["entry_id"].as_str().unwrap().to_string();

        let line = json!({
            "id": 3,
            "cmd": "entry.update",
            "payload": { "id": entry_id, "field": "key1", "value": "promo" }
        })
        .to_string();
        let resp = call(&mut session, &line);
        assert_eq!(resp["payload"]["updated"], true);
        assert_eq!(session.store.get(&entry_id).unwrap().key1, "PROMO");

        // tradução não sofre uppercase
        let line = json!({
            "id": 4,
            "cmd": "entry.update",
            "payload": { "id": entry_id, "field": "translations.en", "value": "deposit now" }
        })
        .to_string();
        call(&mut session, &line);
        assert_eq!(session.store.get(&entry_id).unwrap().english(), "deposit now");

        let line = json!({
            "id": 5,
            "cmd": "entry.update",
            "payload": { "id": entry_id, "field": "timestamp", "value": "x" }
        })
        .to_string();
        let resp = call(&mut session, &line);
        assert_eq!(resp["status"], "error");

        let line = json!({
            "id": 6,
            "cmd": "entry.update",
            "payload": { "id": "missing", "field": "key1", "value": "X" }
        })
        .to_string();
        let resp = call(&mut session, &line);
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["payload"]["updated"], false);
    }

    #[test]
    fn test_delete_clear_list_roundtrip() {
        let mut session = Session::default();
        let resp = generate(&mut session, "Deposit");
        let entry_id = resp["payload"]["entry"]["entry_id"].as_str().unwrap().to_string();
        generate(&mut session, "Withdraw");

        let resp = call(
            &mut session,
            &json!({ "id": 1, "cmd": "entry.list" }).to_string(),
        );
        let entries = resp["payload"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        // mais recente primeiro
        assert_eq!(entries[0]["translations"]["en"], "Withdraw");

        let line = json!({
            "id": 2,
            "cmd": "entry.delete",
            "payload": { "id": entry_id }
        })
        .to_string();
        let resp = call(&mut session, &line);
        assert_eq!(resp["payload"]["deleted"], true);
        assert_eq!(session.store.len(), 1);

        let resp = call(
            &mut session,
            &json!({ "id": 3, "cmd": "entry.clear" }).to_string(),
        );
        assert_eq!(resp["payload"]["cleared"], true);
        assert!(session.store.is_empty());
    }

    #[test]
    fn test_sql_render_placeholder_and_content() {
        let mut session = Session::default();

        let resp = call(
            &mut session,
            &json!({ "id": 1, "cmd": "sql.render" }).to_string(),
        );
        assert_eq!(resp["payload"]["view"], "compact");
        assert_eq!(resp["payload"]["sql"], EMPTY_PLACEHOLDER);

        generate(&mut session, "Deposit");

        let resp = call(
            &mut session,
            &json!({ "id": 2, "cmd": "sql.render", "payload": { "view": "pretty" } }).to_string(),
        );
        assert_eq!(resp["payload"]["view"], "annotated");
        let sql = resp["payload"]["sql"].as_str().unwrap();
        assert!(sql.contains("-- SQL Generated by LocSQL"));
        assert!(sql.contains("INSERT INTO [dbo].[BackOffice]"));
        assert!(sql.trim_end().ends_with(";"));
    }

    #[test]
    fn test_settings_error_becomes_envelope() {
        let mut session = Session::default();
        let line = json!({
            "id": 1,
            "cmd": "language.define",
            "payload": { "code": "de" }
        })
        .to_string();
        let resp = call(&mut session, &line);

        assert_eq!(resp["status"], "error");
        assert!(resp["message"].as_str().unwrap().contains("required"));
    }
}
