// src/services/mod.rs
pub mod aluno_client;
pub mod aluno_store;
pub mod form_session;
pub mod validation;
