// src/services/validation.rs
use crate::models::aluno::{AlunoDraft, Field};
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Erros por campo. Um mapa vazio significa rascunho válido.
pub type FieldErrors = BTreeMap<Field, String>;

fn cpf_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2}$").expect("regex do CPF"))
}

// Sem âncoras: aceita o padrão em qualquer ponto do texto
fn celular_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\([0-9]{2}\) [0-9]{5}-[0-9]{4}").expect("regex do celular"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
            .expect("regex do email")
    })
}

/// Interpreta uma data vinda do widget, digitada em pt-BR ou devolvida pelo backend.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%d/%m/%Y") {
        return Some(d);
    }
    // Datetime completo: converte para UTC antes de cortar a data
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// Normaliza a data para `YYYY-MM-DD`. Devolve `None` se não for uma data.
pub fn normalize_date(input: &str) -> Option<String> {
    parse_date(input).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Valida um único campo. Cada regra é independente das outras.
pub fn validate_field(draft: &AlunoDraft, field: Field) -> Option<String> {
    let value = draft.get(field).trim();

    let message = match field {
        Field::Nome if value.is_empty() => "Nome é obrigatório",
        Field::Cpf if value.is_empty() => "CPF é obrigatório",
        Field::Cpf if !cpf_regex().is_match(value) => "CPF inválido",
        Field::Email if value.is_empty() => "Email é obrigatório",
        Field::Email if !email_regex().is_match(value) => "Email inválido",
        Field::DtNascimento if value.is_empty() => "Data de Nascimento é obrigatória",
        Field::DtNascimento if parse_date(value).is_none() => "Data de Nascimento inválida",
        Field::Celular if value.is_empty() => "Celular é obrigatório",
        Field::Celular if !celular_regex().is_match(value) => "Celular inválido",
        Field::Matricula if value.is_empty() => "Matrícula é obrigatória",
        // Apelido não tem restrição
        _ => return None,
    };
    Some(message.to_string())
}

/// Valida o formulário inteiro.
pub fn validate(draft: &AlunoDraft) -> FieldErrors {
    Field::ALL
        .iter()
        .filter_map(|&field| validate_field(draft, field).map(|msg| (field, msg)))
        .collect()
}
