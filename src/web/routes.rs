// src/web/routes.rs
use crate::{state::AppState, web::aluno_handlers};
use axum::{
    routing::{get, post},
    Router,
};
use time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub fn create_router(app_state: AppState) -> Router {
    let aluno_routes = Router::new()
        .route("/", get(aluno_handlers::show_alunos_page).post(aluno_handlers::handle_submit))
        .route("/{id}/editar", get(aluno_handlers::handle_edit))
        .route("/{id}/excluir", post(aluno_handlers::handle_delete))
        .route("/cancelar", post(aluno_handlers::handle_cancel))
        .route("/recarregar", post(aluno_handlers::handle_reload));

    Router::new()
        .route("/", get(|| async { axum::response::Redirect::permanent("/alunos") }))
        .nest("/alunos", aluno_routes)
        .with_state(app_state)
}

/// Router com as camadas (trace + sessões em memória).
/// O estado do formulário nunca sobrevive a um reinício do processo.
pub fn create_app(app_state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)));

    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(session_layer),
    )
}
