use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("api key is not configured")]
    MissingApiKey,

    #[error("entry not found: {0}")]
    EntryNotFound(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Mensagem já vem formatada como "HTTP <status>: <detalhe>"
    #[error("{0}")]
    Api(String),

    #[error("invalid ai response: {0}")]
    InvalidAiResponse(String),
}
