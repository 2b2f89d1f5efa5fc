//! Shared response envelope types for API handlers.
//!
//! Success responses are `{ "success": true, "data": ..., "meta"?, "message"? }`.
//! Use [`ApiResponse`] instead of ad-hoc `json!` bodies.

use serde::Serialize;

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ListMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Standard success envelope.
///
/// ```ignore
/// Ok(Json(ApiResponse::list(items, ListMeta { total, limit, offset })))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
            message: None,
        }
    }

    pub fn list(data: T, meta: ListMeta) -> Self {
        Self {
            meta: Some(meta),
            ..Self::ok(data)
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_omits_meta_and_message() {
        let value = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(value, serde_json::json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn list_carries_meta() {
        let meta = ListMeta { total: 7, limit: 5, offset: 5 };
        let value = serde_json::to_value(ApiResponse::list(vec!["a"], meta)).unwrap();
        assert_eq!(value["meta"], serde_json::json!({"total": 7, "limit": 5, "offset": 5}));
    }
}
