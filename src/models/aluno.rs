// src/models/aluno.rs
use serde::{Deserialize, Deserializer, Serialize};

/// Um aluno tal como o backend o devolve (já com `id` atribuído).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aluno {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nome: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cpf: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dt_nascimento: String, // YYYY-MM-DD (ou datetime ISO vindo do backend)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub celular: String,
    #[serde(default)]
    pub apelido: Option<String>, // Único campo opcional
    #[serde(default, deserialize_with = "null_as_empty")]
    pub matricula: String,
}

// O backend pode mandar `null` em vez de omitir o campo
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Valores do formulário (rascunho). Pode estar incompleto ou inválido;
/// também é o corpo enviado em POST /aluno e PUT /aluno/{id}.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlunoDraft {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub dt_nascimento: String,
    #[serde(default)]
    pub celular: String,
    #[serde(default)]
    pub apelido: String,
    #[serde(default)]
    pub matricula: String,
}

impl AlunoDraft {
    /// Preenche um rascunho a partir de um aluno do servidor.
    /// Campos ausentes viram texto vazio, nunca ficam indefinidos.
    pub fn from_aluno(aluno: &Aluno) -> Self {
        Self {
            nome: aluno.nome.clone(),
            cpf: aluno.cpf.clone(),
            email: aluno.email.clone(),
            // Datas do backend podem vir como "2000-01-15T00:00:00.000Z"
            dt_nascimento: aluno
                .dt_nascimento
                .split('T')
                .next()
                .unwrap_or_default()
                .to_string(),
            celular: aluno.celular.clone(),
            apelido: aluno.apelido.clone().unwrap_or_default(),
            matricula: aluno.matricula.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Nome => &self.nome,
            Field::Cpf => &self.cpf,
            Field::Email => &self.email,
            Field::DtNascimento => &self.dt_nascimento,
            Field::Celular => &self.celular,
            Field::Apelido => &self.apelido,
            Field::Matricula => &self.matricula,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Nome => self.nome = value,
            Field::Cpf => self.cpf = value,
            Field::Email => self.email = value,
            Field::DtNascimento => self.dt_nascimento = value,
            Field::Celular => self.celular = value,
            Field::Apelido => self.apelido = value,
            Field::Matricula => self.matricula = value,
        }
    }
}

/// Campos do formulário, na ordem em que aparecem na página.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Nome,
    Cpf,
    Email,
    DtNascimento,
    Celular,
    Apelido,
    Matricula,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Nome,
        Field::Cpf,
        Field::Email,
        Field::DtNascimento,
        Field::Celular,
        Field::Apelido,
        Field::Matricula,
    ];

    /// Nome do campo no HTML e no JSON do backend
    pub fn name(&self) -> &'static str {
        match self {
            Field::Nome => "nome",
            Field::Cpf => "cpf",
            Field::Email => "email",
            Field::DtNascimento => "dt_nascimento",
            Field::Celular => "celular",
            Field::Apelido => "apelido",
            Field::Matricula => "matricula",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Nome => "Nome",
            Field::Cpf => "CPF",
            Field::Email => "Email",
            Field::DtNascimento => "Data de Nascimento",
            Field::Celular => "Celular",
            Field::Apelido => "Apelido",
            Field::Matricula => "Matrícula",
        }
    }

    /// Tipo do <input> correspondente
    pub fn input_type(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::DtNascimento => "date",
            _ => "text",
        }
    }

    /// Máscara exibida como placeholder (a máscara em si é do widget, fora do âmbito)
    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Cpf => "999.999.999-99",
            Field::Celular => "(99) 99999-9999",
            _ => "",
        }
    }
}

/// Envelope usado pelo backend: `{ "data": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}
