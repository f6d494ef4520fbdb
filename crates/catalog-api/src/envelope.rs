use catalog_core::Page;
use serde::Deserialize;

/// Top-level response body of every successful call.
#[derive(Debug, Deserialize)]
pub struct DataWrapper<T> {
    #[serde(default)]
    pub code: serde_json::Value,
    #[serde(default)]
    pub status: Option<String>,
    pub data: DataContainer<T>,
}

#[derive(Debug, Deserialize)]
pub struct DataContainer<T> {
    pub offset: u32,
    pub limit: u32,
    pub total: u32,
    pub count: u32,
    pub results: Vec<T>,
}

impl<T> From<DataContainer<T>> for Page<T> {
    fn from(container: DataContainer<T>) -> Self {
        Page {
            offset: container.offset,
            limit: container.limit,
            total: container.total,
            count: container.count,
            results: container.results,
        }
    }
}

/// Error bodies come in two shapes: `{code, status}` from the API layer and
/// `{code, message}` from the gateway.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: serde_json::Value,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn describe(&self) -> String {
        let detail = self
            .status
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("no details");
        match &self.code {
            serde_json::Value::Null => detail.to_string(),
            serde_json::Value::String(code) => format!("{}: {}", code, detail),
            code => format!("{}: {}", code, detail),
        }
    }
}
