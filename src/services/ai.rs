use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::entry::EntryDraft;
use crate::services::ai_types::{AiProvider, GenerateRequest, RefineRequest};
use crate::services::mock::MockProvider;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const GENERATE_INSTRUCTION: &str = "\
You are an expert iGaming CMS Localization Tool.

TASK:
Generate unique SQL keys and translations for a gambling/casino platform.
Key 1 is the Category (uppercase, short).
Key 2 is the Descriptive Code (uppercase, short).

CONTEXT:
The input might be an image of a game UI or a text description.
Ensure translations are professional and context-aware (e.g., 'Bet' vs 'Wager').";

// Instrução usada quando só veio imagem, sem texto.
const IMAGE_ONLY_PROMPT: &str = "Extract meaning from image and translate.";

pub struct ProviderConfig<'a> {
    pub provider: &'a str,
    pub api_key: &'a str,
    pub model: &'a str,
}

// Resolve o provider pedido no payload (ou via ambiente) para um cliente
// concreto. "gemini" exige chave; "mock" funciona sem rede.
pub fn provider_for(cfg: &ProviderConfig) -> Result<Box<dyn AiProvider>, CoreError> {
    let name = if cfg.provider.is_empty() {
        std::env::var("LOCSQL_PROVIDER").unwrap_or_default()
    } else {
        cfg.provider.to_string()
    };
    let name = if name.is_empty() { "gemini".to_string() } else { name };

    match name.as_str() {
        "gemini" => {
            let api_key = resolve_api_key(cfg.api_key)?;
            let model = if cfg.model.is_empty() {
                DEFAULT_MODEL.to_string()
            } else {
                cfg.model.to_string()
            };
            Ok(Box::new(GeminiClient::new(api_key, model)?))
        }
        "mock" => Ok(Box::new(MockProvider)),
        _ => Err(CoreError::UnsupportedProvider(name)),
    }
}

fn resolve_api_key(from_payload: &str) -> Result<String, CoreError> {
    if !from_payload.is_empty() {
        return Ok(from_payload.to_string());
    }
    for var in ["GEMINI_API_KEY", "API_KEY"] {
        if let Ok(key) = std::env::var(var) {
            if !key.is_empty() {
                return Ok(key);
            }
        }
    }
    Err(CoreError::MissingApiKey)
}

pub struct GeminiClient {
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<GeminiClient, CoreError> {
        // Sem timeout de aplicação: a chamada dura o que a rede durar e
        // não há retry; quem repete é o usuário.
        let client = Client::builder().timeout(None).build()?;
        Ok(GeminiClient { api_key, model, client })
    }

    fn endpoint(&self) -> String {
        format!("{API_BASE}/{}:generateContent", self.model)
    }

    fn call(&self, body: &Value) -> Result<String, CoreError> {
        debug!(model = %self.model, "calling generateContent");

        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()?;

        let status = resp.status();
        // Lê como texto primeiro: isso evita perder mensagem de erro quando JSON falha
        let text = resp.text()?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "provider returned http error");
            return Err(CoreError::Api(extract_error_message(status, &text)));
        }

        candidate_text(&text)
    }
}

impl AiProvider for GeminiClient {
    fn generate(&self, req: &GenerateRequest) -> Result<EntryDraft, CoreError> {
        let mut parts: Vec<Value> = Vec::new();
        if let Some(image) = &req.image_base64 {
            parts.push(json!({
                "inlineData": { "mimeType": "image/png", "data": image }
            }));
        }
        let prompt = if req.text.is_empty() {
            IMAGE_ONLY_PROMPT
        } else {
            req.text.as_str()
        };
        parts.push(json!({ "text": prompt }));

        let body = json!({
            "systemInstruction": { "parts": [ { "text": GENERATE_INSTRUCTION } ] },
            "contents": [ { "parts": parts } ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(&req.languages),
            }
        });

        let text = self.call(&body)?;
        parse_draft(&text)
    }

    fn refine(&self, req: &RefineRequest) -> Result<String, CoreError> {
        let instruction = format!(
            "Refine this iGaming text for language: {}.\nContext: {}\nReturn ONLY the corrected/refined text.",
            req.language, req.english
        );
        let content = if req.current.is_empty() {
            req.english.as_str()
        } else {
            req.current.as_str()
        };

        let body = json!({
            "systemInstruction": { "parts": [ { "text": instruction } ] },
            "contents": [ { "parts": [ { "text": content } ] } ]
        });

        let text = self.call(&body)?;
        let refined = text.trim();
        if refined.is_empty() {
            // resposta vazia não apaga o que o usuário já tinha
            return Ok(req.current.clone());
        }
        Ok(refined.to_string())
    }
}

// Schema de saída estruturada: obriga key1/key2 e uma tradução por idioma
// pedido. Tipos em maiúsculas como a API REST espera.
fn response_schema(languages: &[String]) -> Value {
    let mut props = serde_json::Map::new();
    for lang in languages {
        props.insert(
            lang.clone(),
            json!({
                "type": "STRING",
                "description": format!("iGaming localized string for: {lang}"),
            }),
        );
    }

    json!({
        "type": "OBJECT",
        "properties": {
            "key1": {
                "type": "STRING",
                "description": "Category code (e.g. BANK, GAME, PROMO). Max 6 chars.",
            },
            "key2": {
                "type": "STRING",
                "description": "Action or content code (e.g. DEPOSIT, SPIN). Max 8 chars.",
            },
            "translations": {
                "type": "OBJECT",
                "properties": props,
                "required": languages,
            },
        },
        "required": ["key1", "key2", "translations"],
    })
}

fn candidate_text(body: &str) -> Result<String, CoreError> {
    let v: Value = serde_json::from_str(body)
        .map_err(|_| CoreError::InvalidAiResponse("provider returned invalid json".to_string()))?;

    v.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(|t| t.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CoreError::InvalidAiResponse(
                "missing candidates[0].content.parts[0].text".to_string(),
            )
        })
}

// Saída estruturada do modelo → draft normalizado. Qualquer desvio do
// schema vira InvalidAiResponse, nunca um erro de serde cru.
fn parse_draft(text: &str) -> Result<EntryDraft, CoreError> {
    let draft: EntryDraft = serde_json::from_str(text).map_err(|e| {
        CoreError::InvalidAiResponse(format!("structured output did not parse: {e}"))
    })?;
    Ok(normalize_draft(draft))
}

// Chaves vêm normalizadas em maiúsculas; modelo às vezes devolve vazio,
// daí os fallbacks fixos. O "en" é garantido antes de chegar ao store.
fn normalize_draft(mut draft: EntryDraft) -> EntryDraft {
    draft.key1 = normalized_key(&draft.key1, "NEW");
    draft.key2 = normalized_key(&draft.key2, "KEY");
    draft.translations.entry("en".to_string()).or_default();
    draft
}

fn normalized_key(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

fn extract_error_message(status: StatusCode, body_text: &str) -> String {
    // Tenta padrão comum: { "error": { "message": "..." } } ou { "message": "..." }
    if let Ok(v) = serde_json::from_str::<Value>(body_text) {
        if let Some(msg) = v
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return format!("HTTP {}: {}", status.as_u16(), msg);
        }
        if let Some(msg) = v.get("message").and_then(|m| m.as_str()) {
            return format!("HTTP {}: {}", status.as_u16(), msg);
        }
    }

    // Fallback: corpo bruto (limitado)
    let trimmed = body_text.trim();
    let snippet = if trimmed.chars().count() > 400 {
        let cut: String = trimmed.chars().take(400).collect();
        format!("{cut}...")
    } else {
        trimmed.to_string()
    };

    format!("HTTP {}: {}", status.as_u16(), snippet)
}
