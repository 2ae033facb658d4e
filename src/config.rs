// src/config.rs
use crate::error::{AppError, AppResult};
use std::net::SocketAddr;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Configuração lida do ambiente (o `.env` já foi carregado pelo main).
#[derive(Debug, Clone)]
pub struct Config {
    /// URL base do backend REST (sem a barra final), ex: http://localhost:8080
    pub api_base_url: String,
    /// Endereço onde o servidor da página escuta
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let api_base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Self::from_values(&api_base_url, &bind_addr)
    }

    /// Valida e normaliza os valores crus (separado de `from_env` para os testes).
    pub fn from_values(api_base_url: &str, bind_addr: &str) -> AppResult<Self> {
        let api_base_url = api_base_url.trim().trim_end_matches('/').to_string();
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "API_BASE_URL deve começar por http:// ou https:// (recebido '{}')",
                api_base_url
            )));
        }

        let bind_addr = bind_addr.trim().parse::<SocketAddr>().map_err(|e| {
            AppError::Config(format!("BIND_ADDR inválido '{}': {}", bind_addr, e))
        })?;

        tracing::debug!("Configuração: backend={}, escuta={}", api_base_url, bind_addr);
        Ok(Self {
            api_base_url,
            bind_addr,
        })
    }
}
