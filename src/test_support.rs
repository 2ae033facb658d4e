// src/test_support.rs
// Backend REST falso (axum numa porta efémera) e dados de exemplo para os testes.
use crate::models::aluno::{Aluno, AlunoDraft, ApiEnvelope};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub fn aluno(id: i64, nome: &str) -> Aluno {
    Aluno {
        id,
        nome: nome.to_string(),
        cpf: "123.456.789-09".to_string(),
        email: format!("{}@escola.com", nome.to_lowercase()),
        dt_nascimento: "2000-01-15".to_string(),
        celular: "(11) 91234-5678".to_string(),
        apelido: None,
        matricula: format!("M{}", id),
    }
}

pub fn valid_draft() -> AlunoDraft {
    AlunoDraft {
        nome: "Ana".into(),
        cpf: "123.456.789-09".into(),
        email: "a@x.com".into(),
        dt_nascimento: "2000-01-15".into(),
        celular: "(11) 91234-5678".into(),
        apelido: "".into(),
        matricula: "E1".into(),
    }
}

#[derive(Debug, Default)]
struct MockState {
    alunos: Vec<Aluno>,
    next_id: i64,
    failing: bool,
    bodies: Vec<Value>,
    list_calls: usize,
    create_calls: usize,
    update_calls: Vec<i64>,
    delete_calls: Vec<i64>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
}

impl MockBackend {
    pub async fn start(alunos: Vec<Aluno>) -> Self {
        let next_id = alunos.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let state: Shared = Arc::new(Mutex::new(MockState {
            alunos,
            next_id,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/aluno", get(list).post(create))
            .route("/aluno/{id}", put(update).delete(remove))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Enquanto ativo, todas as rotas respondem 500
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().failing = failing;
    }

    pub fn received_bodies(&self) -> Vec<Value> {
        self.state.lock().unwrap().bodies.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn update_calls(&self) -> Vec<i64> {
        self.state.lock().unwrap().update_calls.clone()
    }

    pub fn delete_calls(&self) -> Vec<i64> {
        self.state.lock().unwrap().delete_calls.clone()
    }
}

fn failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "falha simulada").into_response()
}

fn from_body(id: i64, body: &Value) -> Aluno {
    let draft: AlunoDraft = serde_json::from_value(body.clone()).unwrap_or_default();
    Aluno {
        id,
        nome: draft.nome,
        cpf: draft.cpf,
        email: draft.email,
        dt_nascimento: draft.dt_nascimento,
        celular: draft.celular,
        apelido: Some(draft.apelido),
        matricula: draft.matricula,
    }
}

async fn list(State(state): State<Shared>) -> Response {
    let mut s = state.lock().unwrap();
    s.list_calls += 1;
    if s.failing {
        return failure();
    }
    Json(ApiEnvelope { data: s.alunos.clone() }).into_response()
}

async fn create(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut s = state.lock().unwrap();
    s.create_calls += 1;
    if s.failing {
        return failure();
    }
    let aluno = from_body(s.next_id, &body);
    s.next_id += 1;
    s.bodies.push(body);
    s.alunos.push(aluno.clone());
    (StatusCode::CREATED, Json(ApiEnvelope { data: aluno })).into_response()
}

async fn update(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.update_calls.push(id);
    if s.failing {
        return failure();
    }
    let aluno = from_body(id, &body);
    s.bodies.push(body);
    match s.alunos.iter_mut().find(|a| a.id == id) {
        Some(slot) => {
            *slot = aluno.clone();
            Json(ApiEnvelope { data: aluno }).into_response()
        }
        None => (StatusCode::NOT_FOUND, "aluno não encontrado").into_response(),
    }
}

async fn remove(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut s = state.lock().unwrap();
    s.delete_calls.push(id);
    if s.failing {
        return failure();
    }
    s.alunos.retain(|a| a.id != id);
    StatusCode::NO_CONTENT.into_response()
}
