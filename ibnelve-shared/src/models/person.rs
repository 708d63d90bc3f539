use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Postal address embedded in a person record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Address {
    /// Street and number.
    #[serde(rename = "rua", default)]
    pub street: String,

    /// Brazilian postal code (CEP).
    #[serde(rename = "cep", default)]
    pub postal_code: String,

    /// District (bairro).
    #[serde(rename = "bairro", default)]
    pub district: String,

    /// City name.
    #[serde(rename = "cidade", default)]
    pub city: String,

    /// Two-letter state code (UF).
    #[serde(rename = "uf", default)]
    pub state_code: String,
}

/// Person record as returned by `api/pessoa`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    /// Server-assigned identifier.
    pub id: i32,

    /// Full name.
    #[serde(rename = "nome", default)]
    pub name: String,

    /// National id (CPF).
    #[serde(rename = "cpf", default)]
    pub national_id: String,

    /// Contact phone.
    #[serde(rename = "telefone", default)]
    pub phone: String,

    /// Postal address.
    #[serde(rename = "endereco", default)]
    pub address: Address,

    /// Owning tenant.
    #[serde(rename = "tenantId", default)]
    pub tenant_id: String,

    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,

    /// Last update time, absent until the first edit.
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<Timestamp>,
}

/// Body of `POST api/pessoa`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatePerson {
    /// Full name.
    #[serde(rename = "nome")]
    pub name: String,

    /// National id (CPF).
    #[serde(rename = "cpf")]
    pub national_id: String,

    /// Contact phone.
    #[serde(rename = "telefone")]
    pub phone: String,

    /// Postal address.
    #[serde(rename = "endereco")]
    pub address: Address,
}

/// Body of `PUT api/pessoa/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdatePerson {
    /// Full name.
    #[serde(rename = "nome")]
    pub name: String,

    /// National id (CPF).
    #[serde(rename = "cpf")]
    pub national_id: String,

    /// Contact phone.
    #[serde(rename = "telefone")]
    pub phone: String,

    /// Postal address.
    #[serde(rename = "endereco")]
    pub address: Address,
}

impl From<Person> for UpdatePerson {
    fn from(person: Person) -> Self {
        Self {
            name: person.name,
            national_id: person.national_id,
            phone: person.phone,
            address: person.address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Envelope, from_str_case_insensitive};

    const PERSON_JSON: &str = r#"{
        "Id": 12,
        "Nome": "Maria da Silva",
        "CPF": "123.456.789-09",
        "Telefone": "(11) 99999-0000",
        "Endereco": {"Rua": "Rua A, 10", "CEP": "01001-000", "Bairro": "Sé", "Cidade": "São Paulo", "UF": "SP"},
        "TenantId": "igreja-central",
        "CreatedAt": "2024-05-01T12:00:00",
        "UpdatedAt": null
    }"#;

    #[test]
    fn test_person_decoding_any_case() {
        let person: Person = from_str_case_insensitive(PERSON_JSON).unwrap();
        assert_eq!(person.id, 12);
        assert_eq!(person.name, "Maria da Silva");
        assert_eq!(person.national_id, "123.456.789-09");
        assert_eq!(person.address.postal_code, "01001-000");
        assert_eq!(person.address.state_code, "SP");
        assert_eq!(person.tenant_id, "igreja-central");
        assert!(person.updated_at.is_none());
    }

    #[test]
    fn test_person_list_envelope() {
        let json = format!(r#"{{"Success":true,"Message":"","Data":[{PERSON_JSON}],"Errors":[]}}"#);
        let envelope: Envelope<Vec<Person>> = from_str_case_insensitive(&json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap().len(), 1);
    }

    /// Create bodies carry only the editable fields under their wire names
    #[test]
    fn test_create_person_wire_names() {
        let body = CreatePerson {
            name: "João".to_string(),
            national_id: "98765432100".to_string(),
            phone: "1133334444".to_string(),
            address: Address {
                city: "Recife".to_string(),
                state_code: "PE".to_string(),
                ..Address::default()
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["nome"], "João");
        assert_eq!(json["cpf"], "98765432100");
        assert_eq!(json["endereco"]["cidade"], "Recife");
        assert_eq!(json["endereco"]["uf"], "PE");
        assert!(json.get("id").is_none());
        assert!(json.get("tenantId").is_none());
    }

    #[test]
    fn test_update_from_person() {
        let person: Person = from_str_case_insensitive(PERSON_JSON).unwrap();
        let update = UpdatePerson::from(person.clone());
        assert_eq!(update.name, person.name);
        assert_eq!(update.address, person.address);
    }
}
