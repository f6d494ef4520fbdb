//! Request signing for the Marvel public API.
//!
//! Server-side clients send `ts`, `apikey` and `hash = md5(ts + private + public)`
//! on every request.

use catalog_core::{AppConfig, CatalogResult};
use md5::{Digest, Md5};

#[derive(Clone)]
pub struct Credentials {
    public_key: String,
    private_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> CatalogResult<Self> {
        let (public_key, private_key) = config.credentials()?;
        Ok(Self::new(public_key, private_key))
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn hash(&self, ts: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(ts.as_bytes());
        hasher.update(self.private_key.as_bytes());
        hasher.update(self.public_key.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Auth query parameters for a request made at `ts`.
    pub fn query(&self, ts: &str) -> [(&'static str, String); 3] {
        [
            ("ts", ts.to_string()),
            ("apikey", self.public_key.clone()),
            ("hash", self.hash(ts)),
        ]
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

pub fn timestamp() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}
