// src/web/aluno_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::aluno::AlunoDraft,
    services::form_session::{EditTarget, FormSession, SubmitOutcome},
    state::AppState,
    templates::AlunosPage,
};
use askama::Template; // Para render()
use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

// Chave da sessão onde fica o estado do formulário
const FORM_SESSION_KEY: &str = "form_session";

#[derive(Deserialize, Debug)]
pub struct FeedbackParams {
    success: Option<String>,
    error: Option<String>,
}

async fn load_form(session: &Session) -> AppResult<Option<FormSession>> {
    Ok(session.get::<FormSession>(FORM_SESSION_KEY).await?)
}

async fn save_form(session: &Session, form: &FormSession) -> AppResult<()> {
    session.insert(FORM_SESSION_KEY, form).await?;
    Ok(())
}

// Padrão Post/Redirect/Get: o feedback vai na query string
fn redirect_success(message: &str) -> Redirect {
    Redirect::to(&format!("/alunos?success={}", urlencoding::encode(message)))
}

fn redirect_error(message: &str) -> Redirect {
    Redirect::to(&format!("/alunos?error={}", urlencoding::encode(message)))
}

/// Handler para GET /alunos - Mostra o formulário e a lista
pub async fn show_alunos_page(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<FeedbackParams>,
) -> AppResult<impl IntoResponse> {
    let mut error_message = params.error;

    // Primeira visita desta sessão: formulário vazio e busca a lista.
    // Também volta a buscar enquanto nenhum carregamento tiver dado certo.
    let (form, needs_load) = match load_form(&session).await? {
        Some(form) => (form, !state.store.has_loaded()),
        None => {
            let form = FormSession::new();
            save_form(&session, &form).await?;
            (form, true)
        }
    };

    if needs_load {
        tracing::debug!("GET /alunos: buscando alunos em {}", state.config.api_base_url);
        if state.store.load_all().await.is_err() {
            // Já logado pelo store; a lista antiga (se houver) continua visível
            error_message.get_or_insert_with(|| "Falha ao carregar lista de alunos.".to_string());
        }
    }

    let alunos = state.store.snapshot();
    let mut template = AlunosPage::new(&form, &alunos);
    template.success_message = params.success;
    template.error_message = error_message;

    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template AlunosPage: {}", e);
            Err(AppError::TemplateError(e))
        }
    }
}

/// Handler para POST /alunos - Submete o formulário (cria ou atualiza)
pub async fn handle_submit(
    State(state): State<AppState>,
    session: Session,
    Form(draft): Form<AlunoDraft>,
) -> AppResult<Redirect> {
    let mut form = load_form(&session).await?.unwrap_or_else(FormSession::new);
    let target = form.edit_target();
    tracing::info!("POST /alunos: submissão em modo {:?}", target);

    form.replace_draft(draft);
    let result = form.submit(&state.store).await;
    // Guarda sempre: campos tocados, erros, ou o reset após sucesso
    save_form(&session, &form).await?;

    match result {
        Ok(SubmitOutcome::Blocked(errors)) => {
            tracing::warn!("Submissão bloqueada: {:?}", errors.keys().collect::<Vec<_>>());
            Ok(Redirect::to("/alunos"))
        }
        Ok(SubmitOutcome::Created(aluno)) => {
            Ok(redirect_success(&format!("Aluno '{}' adicionado com sucesso.", aluno.nome)))
        }
        Ok(SubmitOutcome::Updated(aluno)) => {
            Ok(redirect_success(&format!("Aluno '{}' atualizado com sucesso.", aluno.nome)))
        }
        Err(e) => {
            // O store já logou; o rascunho continua lá para tentar de novo
            tracing::debug!("Submissão falhou no backend: {}", e);
            let message = match target {
                EditTarget::Create => "Erro ao criar aluno. Tente novamente.",
                EditTarget::Editing(_) => "Erro ao atualizar aluno. Tente novamente.",
            };
            Ok(redirect_error(message))
        }
    }
}

/// Handler para GET /alunos/{id}/editar - Carrega o aluno no formulário
pub async fn handle_edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    tracing::debug!("GET /alunos/{}/editar", id);

    let Some(aluno) = state.store.find(id) else {
        tracing::warn!("Tentativa de editar aluno inexistente: {}", id);
        return Ok(redirect_error(&format!("Aluno {} não encontrado.", id)));
    };

    let mut form = load_form(&session).await?.unwrap_or_else(FormSession::new);
    form.begin_edit(&aluno);
    save_form(&session, &form).await?;
    Ok(Redirect::to("/alunos"))
}

/// Handler para POST /alunos/{id}/excluir
pub async fn handle_delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    tracing::info!("POST /alunos/{}/excluir", id);

    if state.store.delete(id).await.is_err() {
        return Ok(redirect_error("Erro ao excluir aluno. Tente novamente."));
    }

    // Se estava a editar o aluno apagado, volta ao modo de criação
    if let Some(mut form) = load_form(&session).await? {
        if form.edit_target() == EditTarget::Editing(id) {
            form.reset();
            save_form(&session, &form).await?;
        }
    }
    Ok(redirect_success("Aluno excluído com sucesso."))
}

/// Handler para POST /alunos/cancelar - Sai do modo de edição
pub async fn handle_cancel(session: Session) -> AppResult<Redirect> {
    let mut form = load_form(&session).await?.unwrap_or_else(FormSession::new);
    form.reset();
    save_form(&session, &form).await?;
    Ok(Redirect::to("/alunos"))
}

/// Handler para POST /alunos/recarregar - Busca a lista de novo
pub async fn handle_reload(State(state): State<AppState>) -> AppResult<Redirect> {
    match state.store.load_all().await {
        Ok(alunos) => Ok(redirect_success(&format!("{} alunos carregados.", alunos.len()))),
        Err(_) => Ok(redirect_error("Falha ao carregar lista de alunos.")),
    }
}
