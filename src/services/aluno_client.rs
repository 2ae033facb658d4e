// src/services/aluno_client.rs
use crate::{
    error::{AppError, AppResult},
    models::aluno::{Aluno, AlunoDraft, ApiEnvelope},
};
use reqwest::{Client, Response};

/// Cliente fino para o endpoint de coleção `/aluno` do backend REST.
/// Não guarda estado; quem reconcilia a lista local é o `AlunoStore`.
#[derive(Debug, Clone)]
pub struct AlunoClient {
    http: Client,
    base_url: String,
}

impl AlunoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/aluno", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/aluno/{}", self.base_url, id)
    }

    /// GET /aluno
    pub async fn list(&self) -> AppResult<Vec<Aluno>> {
        tracing::debug!("GET {}", self.collection_url());
        let response = self.http.get(self.collection_url()).send().await?;
        let envelope: ApiEnvelope<Vec<Aluno>> = check_status(response).await?.json().await?;
        Ok(envelope.data)
    }

    /// POST /aluno (rascunho sem id)
    pub async fn create(&self, draft: &AlunoDraft) -> AppResult<Aluno> {
        tracing::debug!("POST {}", self.collection_url());
        let response = self
            .http
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;
        let envelope: ApiEnvelope<Aluno> = check_status(response).await?.json().await?;
        Ok(envelope.data)
    }

    /// PUT /aluno/{id}
    pub async fn update(&self, id: i64, draft: &AlunoDraft) -> AppResult<Aluno> {
        tracing::debug!("PUT {}", self.item_url(id));
        let response = self.http.put(self.item_url(id)).json(draft).send().await?;
        let envelope: ApiEnvelope<Aluno> = check_status(response).await?.json().await?;
        Ok(envelope.data)
    }

    /// DELETE /aluno/{id} (o corpo da resposta é ignorado)
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        tracing::debug!("DELETE {}", self.item_url(id));
        let response = self.http.delete(self.item_url(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

// Transforma status de erro em AppError::ApiStatus, guardando o corpo para o log
async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(AppError::ApiStatus {
        status: status.as_u16(),
        message,
    })
}
