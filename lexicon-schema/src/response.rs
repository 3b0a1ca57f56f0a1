use serde::{Deserialize, Serialize};

/// `{ "success": true }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Failure payload. `error` is only filled for rejected requests; server-side
/// failures never carry detail.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FailureBody {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FailureBody {
    pub fn new(error: Option<String>) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

/// Plain table dump used by `/dictionary` and `/language`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TableBody<T> {
    pub data: Vec<T>,
}

impl<T> TableBody<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// `{ "success": true, "data": [...] }`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataBody<T> {
    pub success: bool,
    pub data: Vec<T>,
}

impl<T> DataBody<T> {
    pub fn ok(data: Vec<T>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DefinitionBody {
    pub success: bool,
    pub definition: String,
}

impl DefinitionBody {
    pub fn ok(definition: String) -> Self {
        Self {
            success: true,
            definition,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WordsBody<T> {
    pub success: bool,
    pub words: Vec<T>,
}

impl<T> WordsBody<T> {
    pub fn ok(words: Vec<T>) -> Self {
        Self {
            success: true,
            words,
        }
    }
}

/// Result of running the seed script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeedBody {
    pub success: bool,
    /// Statements attempted.
    pub statements: usize,
    /// Statements that failed and were skipped.
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_omits_missing_error() {
        let body = serde_json::to_string(&FailureBody::new(None)).unwrap();
        assert_eq!(body, r#"{"success":false}"#);
    }

    #[test]
    fn data_body_keeps_row_shape() {
        let body = serde_json::to_string(&DataBody::ok(vec![("English", 5)])).unwrap();
        assert_eq!(body, r#"{"success":true,"data":[["English",5]]}"#);
    }
}
