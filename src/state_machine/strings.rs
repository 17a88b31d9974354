//! User-facing text shown by the conversation flow

pub const STARTING_STATUS: &str = "Iniciando o GuIA Carreiras IBMEC...";
pub const START_FAILED_STATUS: &str = "Falha ao iniciar. Tente recarregar a página.";

pub const DEFAULT_PLACEHOLDER: &str = "Digite sua resposta aqui...";
pub const SESSION_RESTARTED_PLACEHOLDER: &str = "Sua sessão foi reiniciada. Como posso ajudar?";
pub const CHAT_RETRY_PLACEHOLDER: &str = "Ocorreu um erro. Tente novamente ou recarregue.";

pub const AFFIRM_LABEL: &str = "Sim, gerar meu perfil!";
pub const DEFER_LABEL: &str = "Ainda não, conversar mais";
pub const AFFIRM_MESSAGE: &str = "Sim, por favor!";
pub const DEFER_MESSAGE: &str = "Ainda não, gostaria de conversar um pouco mais.";

pub const GENERATING_STATUS: &str = "Gerando seu perfil personalizado, aguarde um momento...";
pub const PROFILE_READY_FALLBACK: &str = "Seu perfil personalizado foi gerado com sucesso!";
pub const PROFILE_INCOMPLETE_FALLBACK: &str = "Houve um problema inesperado ao gerar seu perfil.";
pub const PROFILE_INCOMPLETE_PLACEHOLDER: &str =
    "Houve um problema ao gerar. Tentar novamente ou conversar mais?";
pub const PROFILE_HTTP_PLACEHOLDER: &str =
    "Houve um problema. Tentar gerar o perfil novamente ou conversar mais?";
pub const PROFILE_TRANSPORT_PLACEHOLDER: &str =
    "Houve um erro crítico. Tente recarregar ou contate o suporte.";

pub fn start_failed(detail: &str) -> String {
    format!("Não consegui iniciar nossa conversa: {detail}.")
}

pub fn http_status(status: u16) -> String {
    format!("Erro HTTP: {status}")
}

pub fn chat_transport_failed(message: &str) -> String {
    format!("Erro na comunicação com o servidor: {message}. Tente recarregar a página.")
}

pub fn profile_http_failed(status: u16) -> String {
    format!("Falha ao gerar perfil (HTTP {status})")
}

pub fn profile_transport_failed(message: &str) -> String {
    format!("Erro crítico ao gerar seu perfil: {message}.")
}
