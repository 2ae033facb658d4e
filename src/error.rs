// src/error.rs
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // Falha de transporte ou de descodificação na chamada ao backend
    #[error("Erro ao comunicar com o backend: {0}")]
    HttpError(#[from] reqwest::Error),

    // O backend respondeu, mas com um status de erro
    #[error("O backend respondeu com status {status}: {message}")]
    ApiStatus { status: u16, message: String },

    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro ao renderizar template: {0}")]
    TemplateError(#[from] askama::Error),
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(e: tower_sessions::session::Error) -> Self {
        AppError::SessionError(e.to_string())
    }
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Loga o erro detalhado no servidor
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match self {
            AppError::HttpError(_) | AppError::ApiStatus { .. } => {
                (StatusCode::BAD_GATEWAY, "Falha ao comunicar com o servidor de alunos.")
            }
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração."),
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.")
            }
            AppError::TemplateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="/alunos">Voltar</a></body></html>
         "#, status_code=status.as_u16(), message=user_message))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
