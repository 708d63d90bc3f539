use shared::models::{CreatePerson, Envelope, NoContent, Person, UpdatePerson};

use super::client::{ApiClient, with_include_deleted};

const PEOPLE_PATH: &str = "api/pessoa";

/// Client for `api/pessoa`.
#[derive(Clone, Debug)]
pub struct PeopleClient {
    api: ApiClient,
}

impl PeopleClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Retrieve every person of the current tenant.
    pub async fn list(&self, include_deleted: bool) -> Envelope<Vec<Person>> {
        self.api
            .get(&with_include_deleted(PEOPLE_PATH, include_deleted))
            .await
    }

    /// Retrieve one person.
    pub async fn get_by_id(&self, id: i32) -> Envelope<Person> {
        self.api.get(&format!("{PEOPLE_PATH}/{id}")).await
    }

    /// Retrieve the person registered under a CPF.
    pub async fn get_by_national_id(&self, national_id: &str) -> Envelope<Person> {
        self.api
            .get(&format!(
                "{PEOPLE_PATH}/cpf/{}",
                urlencoding::encode(national_id)
            ))
            .await
    }

    /// Search people by (partial) name.
    pub async fn search_by_name(&self, name: &str) -> Envelope<Vec<Person>> {
        self.api
            .get(&format!("{PEOPLE_PATH}/nome/{}", urlencoding::encode(name)))
            .await
    }

    pub async fn create(&self, person: &CreatePerson) -> Envelope<Person> {
        self.api.post(PEOPLE_PATH, person).await
    }

    /// Replace every editable field of a person.
    pub async fn update(&self, id: i32, person: &UpdatePerson) -> Envelope<Person> {
        self.api.put(&format!("{PEOPLE_PATH}/{id}"), person).await
    }

    pub async fn delete(&self, id: i32) -> Envelope<NoContent> {
        self.api.delete(&format!("{PEOPLE_PATH}/{id}")).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::test_support::{FakeTransport, api_harness};
    use reqwest::Method;
    use shared::models::{Address, CONNECTION_ERROR_MESSAGE, INVALID_RESPONSE_MESSAGE};
    use std::rc::Rc;

    const PERSON: &str = r#"{
        "id": 3,
        "nome": "Maria da Silva",
        "cpf": "12345678909",
        "telefone": "11999990000",
        "endereco": {"rua": "Rua A, 10", "cep": "01001-000", "bairro": "Centro", "cidade": "São Paulo", "uf": "SP"},
        "tenantId": "t1",
        "createdAt": "2024-05-01T12:00:00Z"
    }"#;

    fn client() -> (Rc<FakeTransport>, PeopleClient) {
        let (transport, api) = api_harness();
        (transport, PeopleClient::new(api))
    }

    fn new_person() -> CreatePerson {
        CreatePerson {
            name: "Maria da Silva".to_string(),
            national_id: "12345678909".to_string(),
            phone: "11999990000".to_string(),
            address: Address::default(),
        }
    }

    #[tokio::test]
    async fn test_list_renders_include_deleted() {
        let (transport, people) = client();
        transport.reply(200, &format!(r#"{{"success":true,"data":[{PERSON}]}}"#));
        transport.reply(200, r#"{"success":true,"data":[]}"#);

        let envelope = people.list(false).await;
        assert_eq!(envelope.data.unwrap()[0].name, "Maria da Silva");
        assert_eq!(transport.last_request().path, "api/pessoa?includeDeleted=false");

        people.list(true).await;
        let request = transport.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "api/pessoa?includeDeleted=true");
    }

    #[tokio::test]
    async fn test_get_by_id_and_cpf_paths() {
        let (transport, people) = client();
        transport.reply(200, &format!(r#"{{"success":true,"data":{PERSON}}}"#));
        transport.reply(404, r#"{"success":false,"message":"Pessoa não encontrada"}"#);

        let found = people.get_by_id(3).await;
        assert_eq!(found.data.unwrap().id, 3);
        assert_eq!(transport.last_request().path, "api/pessoa/3");

        let missing = people.get_by_national_id("123.456.789-09").await;
        assert!(!missing.success);
        assert_eq!(missing.message, "Pessoa não encontrada");
        assert_eq!(transport.last_request().path, "api/pessoa/cpf/123.456.789-09");
    }

    /// Names are percent-encoded as a single path segment
    #[tokio::test]
    async fn test_search_by_name_encodes_segment() {
        let (transport, people) = client();
        transport.reply(200, r#"{"success":true,"data":[]}"#);

        let envelope = people.search_by_name("Maria da Silva/Jr").await;
        assert!(envelope.success);
        assert_eq!(
            transport.last_request().path,
            "api/pessoa/nome/Maria%20da%20Silva%2FJr"
        );
    }

    #[tokio::test]
    async fn test_create_update_delete_verbs() {
        let (transport, people) = client();
        transport.reply(201, &format!(r#"{{"success":true,"data":{PERSON}}}"#));
        transport.reply(200, &format!(r#"{{"success":true,"data":{PERSON}}}"#));
        transport.reply(200, r#"{"success":true,"message":"Pessoa removida"}"#);

        let created = people.create(&new_person()).await;
        assert!(created.success);
        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "api/pessoa");
        assert_eq!(request.body.unwrap()["nome"], "Maria da Silva");

        let updated = people.update(3, &UpdatePerson::from(created.data.unwrap())).await;
        assert!(updated.success);
        let request = transport.last_request();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "api/pessoa/3");
        assert_eq!(request.body.unwrap()["cpf"], "12345678909");

        let deleted = people.delete(3).await;
        assert!(deleted.success);
        let request = transport.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "api/pessoa/3");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_fallbacks() {
        let (transport, people) = client();
        transport.fail("connection refused");
        transport.reply(502, "<html>Bad Gateway</html>");

        let envelope = people.create(&new_person()).await;
        assert_eq!(envelope.message, CONNECTION_ERROR_MESSAGE);
        assert_eq!(envelope.errors, vec!["connection refused".to_string()]);

        let envelope = people.list(false).await;
        assert_eq!(envelope.message, INVALID_RESPONSE_MESSAGE);
        assert!(envelope.data.is_none());
    }
}
