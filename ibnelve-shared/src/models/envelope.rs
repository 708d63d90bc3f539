use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Message carried by envelopes synthesized after a transport failure.
pub const CONNECTION_ERROR_MESSAGE: &str = "Erro de conexão";

/// Message carried by envelopes synthesized when a body cannot be decoded.
pub const INVALID_RESPONSE_MESSAGE: &str = "Resposta inválida";

/// Message carried when a rejected login returns an undecodable body.
pub const AUTHENTICATION_ERROR_MESSAGE: &str = "Erro na autenticação";

/// Uniform wrapper around every API response.
///
/// Missing members decode to their empty values, so a bare `{}` is a valid
/// (failed) envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Whether the server accepted the operation.
    #[serde(default)]
    pub success: bool,

    /// Human readable outcome, shown as-is by the UI.
    #[serde(default)]
    pub message: String,

    /// Payload, present on successful reads and writes.
    pub data: Option<T>,

    /// Field or validation errors in server order.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl<T> Envelope<T> {
    /// Creates a successful envelope around `data`.
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Creates a failed envelope with the given message and error entries.
    #[must_use]
    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
        }
    }

    /// Envelope reported when the request never produced a response.
    ///
    /// `detail` is the underlying fault text and becomes the single error entry.
    #[must_use]
    pub fn connection_error(detail: impl Into<String>) -> Self {
        Self::failure(CONNECTION_ERROR_MESSAGE, vec![detail.into()])
    }

    /// Envelope reported when a response body holds no decodable envelope.
    #[must_use]
    pub fn invalid_response() -> Self {
        Self::failure(INVALID_RESPONSE_MESSAGE, Vec::new())
    }

    /// Returns `true` when the server reported success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Consumes the envelope and returns its payload, if any.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Payload marker for endpoints that return no data.
///
/// Whatever the server places in `data` is accepted and discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoContent;

impl Serialize for NoContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit()
    }
}

impl<'de> Deserialize<'de> for NoContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_ignored_any(IgnoredAny)?;
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test envelope decoding with every member present
    #[test]
    fn test_envelope_deserialization() {
        let json = r#"{"success":true,"message":"ok","data":7,"errors":[]}"#;
        let envelope: Envelope<i32> = serde_json::from_str(json).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.message, "ok");
        assert_eq!(envelope.data, Some(7));
        assert!(envelope.errors.is_empty());
    }

    /// Test missing members fall back to empty values
    #[test]
    fn test_envelope_missing_members() {
        let envelope: Envelope<i32> = serde_json::from_str("{}").unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.message, "");
        assert_eq!(envelope.data, None);
        assert!(envelope.errors.is_empty());
    }

    #[test]
    fn test_connection_error_envelope() {
        let envelope: Envelope<i32> = Envelope::connection_error("dns failure");
        assert!(!envelope.success);
        assert_eq!(envelope.message, CONNECTION_ERROR_MESSAGE);
        assert_eq!(envelope.errors, vec!["dns failure".to_string()]);
        assert_eq!(envelope.data, None);
    }

    #[test]
    fn test_invalid_response_envelope() {
        let envelope: Envelope<NoContent> = Envelope::invalid_response();
        assert!(!envelope.success);
        assert_eq!(envelope.message, INVALID_RESPONSE_MESSAGE);
        assert!(envelope.errors.is_empty());
    }

    /// Void envelopes swallow any data the server attaches
    #[test]
    fn test_no_content_ignores_payload() {
        let json = r#"{"success":true,"message":"removido","data":{"id":4,"tags":[1,2]}}"#;
        let envelope: Envelope<NoContent> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data, Some(NoContent));

        let json = r#"{"success":true,"data":null}"#;
        let envelope: Envelope<NoContent> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data, None);
    }

    #[test]
    fn test_envelope_serialization_uses_camel_case() {
        let envelope = Envelope::failure("Titulo obrigatório", vec!["Titulo".to_string()]);
        let value: serde_json::Value =
            serde_json::to_value(&envelope as &Envelope<NoContent>).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "Titulo obrigatório");
        assert_eq!(value["errors"][0], "Titulo");
        assert!(value["data"].is_null());
    }

    #[test]
    fn test_into_data() {
        assert_eq!(Envelope::ok("x").into_data(), Some("x"));
        assert_eq!(Envelope::<&str>::invalid_response().into_data(), None);
    }
}
