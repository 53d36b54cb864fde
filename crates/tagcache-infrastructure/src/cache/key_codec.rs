//! Cache key prefixing

use tagcache_domain::constants::TAG_KEY_MARKER;

/// Maps caller keys to the fully-qualified keys stored in the backend
///
/// The prefix is fixed for the lifetime of a provider, so prefixed and
/// unprefixed callers never collide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCodec {
    prefix: String,
}

impl KeyCodec {
    /// Create a codec for the given prefix
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The prefix prepended to every key
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `prefix + key`
    pub fn encode(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    /// Strip the prefix; `None` if the key does not belong to this codec
    pub fn decode<'a>(&self, fq_key: &'a str) -> Option<&'a str> {
        fq_key.strip_prefix(self.prefix.as_str())
    }

    /// Reserved key holding a tag's key list: `prefix + "_tag:" + tag`
    pub fn tag_key(&self, tag: &str) -> String {
        format!("{}{TAG_KEY_MARKER}{tag}", self.prefix)
    }
}
