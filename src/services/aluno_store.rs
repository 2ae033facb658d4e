// src/services/aluno_store.rs
use crate::{
    error::AppResult,
    models::aluno::{Aluno, AlunoDraft},
    services::aluno_client::AlunoClient,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::watch;

/// Fotografia imutável da lista de alunos, tal como estava no servidor
/// após o último comando bem-sucedido.
pub type AlunoSnapshot = Arc<Vec<Aluno>>;

/// Contentor de estado da lista de alunos.
///
/// Os comandos (`load_all`, `create`, `update`, `delete`) falam com o backend e,
/// só em caso de sucesso, publicam uma nova fotografia. Em caso de falha o erro
/// é logado e devolvido, e a lista fica como estava.
///
/// Duas chamadas sobrepostas são ambas enviadas; cada resposta é aplicada
/// sobre a fotografia mais recente, pela ordem de chegada.
#[derive(Debug, Clone)]
pub struct AlunoStore {
    client: AlunoClient,
    snapshot: Arc<watch::Sender<AlunoSnapshot>>,
    loaded: Arc<AtomicBool>,
}

impl AlunoStore {
    pub fn new(client: AlunoClient) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Vec::new()));
        Self {
            client,
            snapshot: Arc::new(tx),
            loaded: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Fotografia atual (barata de clonar)
    pub fn snapshot(&self) -> AlunoSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Recebe uma nova fotografia a cada comando bem-sucedido
    pub fn subscribe(&self) -> watch::Receiver<AlunoSnapshot> {
        self.snapshot.subscribe()
    }

    /// Já houve pelo menos um `load_all` bem-sucedido?
    pub fn has_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn find(&self, id: i64) -> Option<Aluno> {
        self.snapshot.borrow().iter().find(|a| a.id == id).cloned()
    }

    /// Busca a coleção inteira e substitui a lista local.
    pub async fn load_all(&self) -> AppResult<AlunoSnapshot> {
        match self.client.list().await {
            Ok(alunos) => {
                tracing::info!("📋 {} alunos carregados do backend.", alunos.len());
                let snapshot = Arc::new(alunos);
                self.snapshot.send_replace(snapshot.clone());
                self.loaded.store(true, Ordering::Release);
                Ok(snapshot)
            }
            Err(e) => {
                tracing::error!("Erro ao buscar alunos: {:?}", e);
                Err(e)
            }
        }
    }

    /// Cria no backend e acrescenta o aluno devolvido (já com id) ao fim da lista.
    pub async fn create(&self, draft: &AlunoDraft) -> AppResult<Aluno> {
        match self.client.create(draft).await {
            Ok(aluno) => {
                tracing::info!("✅ Aluno {} criado (id {}).", aluno.nome, aluno.id);
                let created = aluno.clone();
                self.publish(move |alunos| alunos.push(created));
                Ok(aluno)
            }
            Err(e) => {
                tracing::error!("Erro ao criar aluno: {:?}", e);
                Err(e)
            }
        }
    }

    /// Atualiza no backend e substitui a entrada com o mesmo id pela versão devolvida.
    pub async fn update(&self, id: i64, draft: &AlunoDraft) -> AppResult<Aluno> {
        match self.client.update(id, draft).await {
            Ok(aluno) => {
                tracing::info!("✅ Aluno {} atualizado.", id);
                let updated = aluno.clone();
                self.publish(move |alunos| {
                    // Nenhuma entrada com esse id na fotografia: acrescenta
                    match alunos.iter_mut().find(|a| a.id == id) {
                        Some(slot) => *slot = updated,
                        None => alunos.push(updated),
                    }
                });
                Ok(aluno)
            }
            Err(e) => {
                tracing::error!("Erro ao atualizar aluno {}: {:?}", id, e);
                Err(e)
            }
        }
    }

    /// Remove no backend e tira da lista local a entrada com esse id.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        match self.client.delete(id).await {
            Ok(()) => {
                tracing::info!("🗑️ Aluno {} excluído.", id);
                self.publish(move |alunos| alunos.retain(|a| a.id != id));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Erro ao excluir aluno {}: {:?}", id, e);
                Err(e)
            }
        }
    }

    // Aplica a mudança sobre a fotografia mais recente e publica uma nova
    fn publish(&self, change: impl FnOnce(&mut Vec<Aluno>)) {
        self.snapshot.send_modify(|current| {
            let mut alunos = current.as_ref().clone();
            change(&mut alunos);
            *current = Arc::new(alunos);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{aluno, valid_draft, MockBackend};

    async fn loaded_store(backend: &MockBackend) -> AlunoStore {
        let store = AlunoStore::new(AlunoClient::new(backend.base_url()));
        store.load_all().await.unwrap();
        store
    }

    #[tokio::test]
    async fn load_all_replaces_local_list() {
        let backend = MockBackend::start(vec![aluno(1, "Ana"), aluno(2, "Bia")]).await;
        let store = AlunoStore::new(AlunoClient::new(backend.base_url()));
        assert!(!store.has_loaded());
        assert!(store.snapshot().is_empty());

        store.load_all().await.unwrap();
        assert!(store.has_loaded());
        let ids: Vec<i64> = store.snapshot().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn failed_load_keeps_stale_list() {
        let backend = MockBackend::start(vec![aluno(1, "Ana")]).await;
        let store = loaded_store(&backend).await;

        backend.set_failing(true);
        assert!(store.load_all().await.is_err());
        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(store.snapshot()[0].nome, "Ana");
    }

    #[tokio::test]
    async fn create_appends_server_record() {
        let backend = MockBackend::start(vec![aluno(1, "Ana")]).await;
        let store = loaded_store(&backend).await;

        let created = store.create(&valid_draft()).await.unwrap();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.last(), Some(&created));
        assert_ne!(created.id, 1);
    }

    #[tokio::test]
    async fn failed_create_leaves_list_unchanged() {
        let backend = MockBackend::start(vec![aluno(1, "Ana")]).await;
        let store = loaded_store(&backend).await;
        let before = store.snapshot();

        backend.set_failing(true);
        assert!(store.create(&valid_draft()).await.is_err());
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn update_replaces_exactly_one_entry_with_server_value() {
        let backend = MockBackend::start(vec![aluno(1, "Ana"), aluno(2, "Bia")]).await;
        let store = loaded_store(&backend).await;

        let mut draft = AlunoDraft::from_aluno(&aluno(2, "Bia"));
        draft.nome = "Beatriz".into();
        let updated = store.update(2, &draft).await.unwrap();

        let snapshot = store.snapshot();
        let matches: Vec<&Aluno> = snapshot.iter().filter(|a| a.id == 2).collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0], &updated);
        assert_eq!(matches[0].nome, "Beatriz");
        // A ordem da lista é preservada
        assert_eq!(snapshot[0].id, 1);
        assert_eq!(snapshot[1].id, 2);
    }

    #[tokio::test]
    async fn failed_update_leaves_list_unchanged() {
        let backend = MockBackend::start(vec![aluno(1, "Ana")]).await;
        let store = loaded_store(&backend).await;
        let before = store.snapshot();

        // id inexistente: o mock responde 404
        assert!(store.update(42, &valid_draft()).await.is_err());
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn delete_removes_entry_by_id() {
        let backend = MockBackend::start(vec![aluno(1, "Ana"), aluno(2, "Bia")]).await;
        let store = loaded_store(&backend).await;

        store.delete(1).await.unwrap();
        assert!(store.snapshot().iter().all(|a| a.id != 1));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn failed_delete_leaves_list_unchanged() {
        let backend = MockBackend::start(vec![aluno(1, "Ana")]).await;
        let store = loaded_store(&backend).await;

        backend.set_failing(true);
        assert!(store.delete(1).await.is_err());
        assert!(store.find(1).is_some());
    }

    #[tokio::test]
    async fn subscribers_see_new_snapshot_after_each_command() {
        let backend = MockBackend::start(vec![]).await;
        let store = AlunoStore::new(AlunoClient::new(backend.base_url()));
        let mut rx = store.subscribe();

        store.create(&valid_draft()).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        // Falha: nada é publicado
        backend.set_failing(true);
        let _ = store.create(&valid_draft()).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn overlapping_creates_are_both_applied() {
        let backend = MockBackend::start(vec![]).await;
        let store = AlunoStore::new(AlunoClient::new(backend.base_url()));

        let draft = valid_draft();
        let (a, b) = tokio::join!(store.create(&draft), store.create(&draft));
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.id, b.id);
        assert_eq!(store.snapshot().len(), 2);
        assert_eq!(backend.create_calls(), 2);
    }
}
