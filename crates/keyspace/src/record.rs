/// Opaque, ordered key/value payload attached to a record.
///
/// The pipeline never inspects it; sinks decide how (or whether) to render
/// it.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A generated password and whatever a decorator attached to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PasswordRecord {
    pub password: String,
    pub metadata: Option<Metadata>,
}

impl PasswordRecord {
    #[inline]
    pub const fn new(password: String) -> Self {
        Self {
            password,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl From<String> for PasswordRecord {
    fn from(password: String) -> Self {
        Self::new(password)
    }
}

impl From<&str> for PasswordRecord {
    fn from(password: &str) -> Self {
        Self::new(password.to_string())
    }
}
