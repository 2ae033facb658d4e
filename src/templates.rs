// src/templates.rs
use askama::Template; // Trait necessário para Askama
use crate::{
    models::aluno::{Aluno, Field},
    services::form_session::{EditTarget, FormSession},
};

/// Um campo do formulário já pronto para o template
#[derive(Debug, Clone)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    // Só presente se o campo foi tocado e é inválido
    pub error: Option<String>,
}

// Página única: formulário + lista de alunos (templates/alunos.html)
#[derive(Template)]
#[template(path = "alunos.html")]
pub struct AlunosPage<'a> {
    pub fields: Vec<FieldView>,
    pub editing_id: Option<i64>,
    pub submit_label: &'static str,
    pub alunos: &'a [Aluno],
    // Mensagens de feedback opcionais
    pub success_message: Option<String>,
    pub error_message: Option<String>,
}

impl<'a> AlunosPage<'a> {
    pub fn new(form: &FormSession, alunos: &'a [Aluno]) -> Self {
        let fields = Field::ALL
            .iter()
            .map(|&field| FieldView {
                name: field.name(),
                label: field.label(),
                input_type: field.input_type(),
                placeholder: field.placeholder(),
                value: form.draft().get(field).to_string(),
                error: form.visible_error(field).map(str::to_string),
            })
            .collect();

        let (editing_id, submit_label) = match form.edit_target() {
            EditTarget::Create => (None, "Adicionar"),
            EditTarget::Editing(id) => (Some(id), "Atualizar"),
        };

        Self {
            fields,
            editing_id,
            submit_label,
            alunos,
            success_message: None,
            error_message: None,
        }
    }
}
