use crate::error::CoreError;
use crate::model::entry::EntryDraft;

// Pedido de geração: texto livre e/ou imagem (base64, PNG) mais os idiomas
// alvo. Quem monta a lista de idiomas é a sessão, não o provider.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub text: String,
    pub image_base64: Option<String>,
    pub languages: Vec<String>,
}

// Refino de um idioma de uma entrada existente; o texto em inglês vai
// junto como contexto.
#[derive(Debug, Clone)]
pub struct RefineRequest {
    pub language: String,
    pub current: String,
    pub english: String,
}

// Fronteira com o serviço de geração de texto. O core só conhece este
// contrato; Gemini e mock são implementações intercambiáveis.
pub trait AiProvider {
    fn generate(&self, req: &GenerateRequest) -> Result<EntryDraft, CoreError>;

    fn refine(&self, req: &RefineRequest) -> Result<String, CoreError>;
}
