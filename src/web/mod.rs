// src/web/mod.rs
pub mod aluno_handlers;
pub mod routes;
