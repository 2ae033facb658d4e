// src/services/form_session.rs
use crate::{
    error::AppResult,
    models::aluno::{Aluno, AlunoDraft, Field},
    services::{
        aluno_store::AlunoStore,
        validation::{self, FieldErrors},
    },
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// O que a próxima submissão vai fazer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditTarget {
    /// Estado inicial: a submissão cria um aluno novo
    #[default]
    Create,
    /// A submissão atualiza o aluno com este id
    Editing(i64),
}

/// Resultado de uma submissão que chegou (ou não) ao backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validação falhou; nenhuma chamada foi feita
    Blocked(FieldErrors),
    Created(Aluno),
    Updated(Aluno),
}

/// Estado do formulário de um utilizador: rascunho, campos tocados,
/// erros de validação e alvo da edição. Vive na sessão do browser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSession {
    draft: AlunoDraft,
    touched: BTreeSet<Field>,
    errors: FieldErrors,
    edit_target: EditTarget,
}

impl FormSession {
    pub fn new() -> Self {
        let mut session = Self::default();
        session.revalidate();
        session
    }

    pub fn draft(&self) -> &AlunoDraft {
        &self.draft
    }

    pub fn edit_target(&self) -> EditTarget {
        self.edit_target
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Mensagem a mostrar junto ao campo: só depois de o campo ter sido tocado
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if self.is_touched(field) {
            self.errors.get(&field).map(String::as_str)
        } else {
            None
        }
    }

    /// Muda um campo (equivalente ao onChange + onBlur)
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        self.touched.insert(field);
        self.revalidate();
    }

    /// Substitui o rascunho inteiro pelos valores vindos do formulário HTML
    pub fn replace_draft(&mut self, draft: AlunoDraft) {
        for field in Field::ALL {
            self.set_field(field, draft.get(field));
        }
    }

    /// Entra em modo de edição para `aluno`, mesmo que já esteja a editar outro.
    pub fn begin_edit(&mut self, aluno: &Aluno) {
        tracing::debug!("Formulário: a editar aluno {}", aluno.id);
        self.draft = AlunoDraft::from_aluno(aluno);
        self.touched.clear();
        self.edit_target = EditTarget::Editing(aluno.id);
        self.revalidate();
    }

    /// Volta ao modo de criação com o rascunho vazio
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Marca tudo como tocado e valida. Se passar, devolve o corpo a enviar,
    /// já com a data normalizada para `YYYY-MM-DD`.
    pub fn prepare_submission(&mut self) -> Result<AlunoDraft, FieldErrors> {
        self.touched.extend(Field::ALL);
        self.revalidate();
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }

        let mut payload = self.draft.clone();
        // Já validada, logo normalize_date devolve Some
        if let Some(date) = validation::normalize_date(&payload.dt_nascimento) {
            payload.dt_nascimento = date;
        }
        for field in [Field::Nome, Field::Cpf, Field::Email, Field::Celular, Field::Matricula] {
            let trimmed = payload.get(field).trim().to_string();
            payload.set(field, trimmed);
        }
        Ok(payload)
    }

    /// Submete o formulário: cria ou atualiza conforme o alvo da edição.
    ///
    /// Em caso de sucesso o formulário volta a `Create` vazio. Se o backend
    /// falhar, o erro é devolvido e o rascunho fica intacto para nova tentativa.
    pub async fn submit(&mut self, store: &AlunoStore) -> AppResult<SubmitOutcome> {
        let payload = match self.prepare_submission() {
            Ok(payload) => payload,
            Err(errors) => {
                tracing::debug!("Submissão bloqueada: {} campos inválidos", errors.len());
                return Ok(SubmitOutcome::Blocked(errors));
            }
        };

        let outcome = match self.edit_target {
            EditTarget::Create => SubmitOutcome::Created(store.create(&payload).await?),
            EditTarget::Editing(id) => SubmitOutcome::Updated(store.update(id, &payload).await?),
        };
        self.reset();
        Ok(outcome)
    }

    // Os erros são sempre derivados do rascunho atual
    fn revalidate(&mut self) {
        self.errors = validation::validate(&self.draft);
    }
}
