use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::TokenPayload;

    #[test]
    fn token_payload_decodes_camel_case() {
        let payload: TokenPayload = serde_json::from_str(r#"{"accessToken":"abc123"}"#).unwrap();
        assert_eq!(payload.access_token, "abc123");
    }

    #[test]
    fn token_payload_ignores_extra_fields() {
        let payload: TokenPayload =
            serde_json::from_str(r#"{"accessToken":"abc123","expiresIn":300}"#).unwrap();
        assert_eq!(payload.access_token, "abc123");
    }

    #[test]
    fn token_payload_requires_access_token() {
        let result = serde_json::from_str::<TokenPayload>(r#"{"token":"abc123"}"#);
        assert!(result.is_err());
    }
}
