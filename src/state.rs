// src/state.rs
use crate::{
    config::Config,
    services::{aluno_client::AlunoClient, aluno_store::AlunoStore},
};

// Estado partilhado por todos os handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    // Lista de alunos (fotografia do backend) e comandos sobre ela
    pub store: AlunoStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = AlunoStore::new(AlunoClient::new(config.api_base_url.clone()));
        Self { config, store }
    }
}

