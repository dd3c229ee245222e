use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::model::entry::LocEntry;
use crate::model::template::SqlTemplate;

// Saída fixa quando não há entradas, independente de template ou view.
pub const EMPTY_PLACEHOLDER: &str =
    "-- Enter text or upload an image to generate SQL INSERT statements.";

pub const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlView {
    Compact,
    Annotated,
}

impl SqlView {
    // Nome vindo do payload. "pretty" é alias legado de "annotated";
    // qualquer outra coisa cai no compacto.
    pub fn from_name(name: &str) -> SqlView {
        match name.trim().to_lowercase().as_str() {
            "annotated" | "pretty" => SqlView::Annotated,
            _ => SqlView::Compact,
        }
    }
}

pub fn render(template: &SqlTemplate, entries: &[LocEntry], view: SqlView) -> String {
    render_at(template, entries, view, Local::now())
}

// Núcleo determinístico: todo o resto do módulo é formatação pura.
// Nunca falha; token desconhecido vira literal vazio, nunca erro.
pub fn render_at(
    template: &SqlTemplate,
    entries: &[LocEntry],
    view: SqlView,
    generated_at: DateTime<Local>,
) -> String {
    if entries.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }

    let tokens = template.tokens();

    match view {
        SqlView::Compact => {
            let rows: Vec<String> = entries
                .iter()
                .map(|e| {
                    let values: Vec<String> =
                        tokens.iter().map(|t| value_for(e, t)).collect();
                    format!("({})", values.join(","))
                })
                .collect();

            format!("{}\n{};", template.header, rows.join(",\n"))
        }

        SqlView::Annotated => {
            let rule = format!("-- {}", "-".repeat(80));

            // banner: três linhas de régua, MAPPING entre a segunda e a
            // terceira, linha em branco antes do header
            let mut out = String::new();
            out.push_str(&rule);
            out.push('\n');
            out.push_str("-- SQL Generated by LocSQL\n");
            out.push_str(&format!(
                "-- Generated: {}\n",
                generated_at.format("%Y-%m-%d %H:%M:%S")
            ));
            out.push_str(&rule);
            out.push('\n');
            out.push_str(&format!("-- MAPPING: {}\n", tokens.join(", ")));
            out.push_str(&rule);
            out.push_str("\n\n");
            out.push_str(&template.header);
            out.push('\n');

            let last = entries.len() - 1;
            let rows: Vec<String> = entries
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    let values: Vec<String> =
                        tokens.iter().map(|t| value_for(e, t)).collect();
                    let tail = if i == last { ";" } else { "," };
                    format!(
                        "\t-- Row {}: [{}][{}] \"{}\"\n\t({}){}",
                        i + 1,
                        e.key1,
                        e.key2,
                        preview(e.english()),
                        values.join(", "),
                        tail
                    )
                })
                .collect();

            out.push_str(&rows.join("\n\n"));
            out
        }
    }
}

// Resolve um token do mapping para o literal SQL daquela entrada.
// Regra fixa do prefixo N: toda coluna de idioma exceto "en" leva N;
// key1/key2/empty/guid nunca levam.
fn value_for(entry: &LocEntry, token: &str) -> String {
    match token {
        "key1" => quoted(&entry.key1, false),
        "key2" => quoted(&entry.key2, false),
        "empty" => "''".to_string(),
        "guid" => quoted(&entry.entry_id, false),
        "en" => quoted(entry.english(), false),
        lang => quoted(entry.translation(lang), true),
    }
}

// Única sanitização do módulo: aspas simples dobradas antes de citar.
fn quoted(text: &str, wide: bool) -> String {
    let escaped = text.replace('\'', "''");
    if wide {
        format!("N'{escaped}'")
    } else {
        format!("'{escaped}'")
    }
}

// Prévia de uma linha para o comentário: corta em PREVIEW_CHARS e achata
// quebras de linha em espaço. O "..." é incondicional.
fn preview(text: &str) -> String {
    let cut: String = text
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    format!("{cut}...")
}
