use serde::Deserialize;

use crate::error::ApiError;

/// Parse a path or query identifier into a row id
pub fn parse_id(raw: &str, field: &str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request(format!("Invalid '{}': {}", field, raw))),
    }
}

/// `?id=` for the restore endpoints
#[derive(Debug, Default, Deserialize)]
pub struct RestoreQuery {
    pub id: Option<String>,
}

impl RestoreQuery {
    pub fn require_id(&self) -> Result<i32, ApiError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Err(ApiError::bad_request("Missing 'id' in query params")),
            Some(raw) => parse_id(raw, "id"),
        }
    }
}

/// `?include=&limit=&offset=` for user reads
#[derive(Debug, Default, Deserialize)]
pub struct UserReadQuery {
    pub include: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("42", "id").unwrap(), 42);
        assert_eq!(parse_id(" 7 ", "id").unwrap(), 7);
        for bad in ["", "0", "-3", "abc", "1.5", "99999999999"] {
            assert_eq!(parse_id(bad, "id").unwrap_err().status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn restore_requires_an_id() {
        let err = RestoreQuery::default().require_id().unwrap_err();
        assert_eq!(err.message(), "Missing 'id' in query params");

        let blank = RestoreQuery { id: Some("  ".to_string()) };
        assert_eq!(blank.require_id().unwrap_err().message(), "Missing 'id' in query params");

        let ok = RestoreQuery { id: Some("5".to_string()) };
        assert_eq!(ok.require_id().unwrap(), 5);
    }
}
