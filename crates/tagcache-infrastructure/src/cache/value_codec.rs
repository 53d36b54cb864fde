//! Cache value encoding

use serde::Serialize;
use serde::de::DeserializeOwned;
use tagcache_domain::error::Result;
use tagcache_domain::value_objects::CachedValue;

/// Serializes values to JSON text and parses them back, best effort
pub struct ValueCodec;

impl ValueCodec {
    /// Serialize a value to JSON text
    ///
    /// Fails for values serde_json cannot represent, such as maps with
    /// non-string keys.
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    /// Parse stored text; anything that is not JSON comes back as raw text
    pub fn deserialize(text: &str) -> CachedValue {
        serde_json::from_str(text).map_or_else(
            |_| CachedValue::Raw(text.to_string()),
            CachedValue::Json,
        )
    }

    /// Convert a parsed value into `T`
    ///
    /// Raw text is offered to `T` as a JSON string, so `String` targets get
    /// the exact stored text. Returns `None` when the value has another shape.
    pub fn decode<T: DeserializeOwned>(value: CachedValue) -> Option<T> {
        let raw = value.is_raw();
        match serde_json::from_value(value.into_json()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(
                    raw,
                    target_type = std::any::type_name::<T>(),
                    error = %e,
                    "Cached value does not match requested type; treating as miss"
                );
                None
            }
        }
    }
}
