//! Value serialization boundary.
//!
//! Every value written to a store passes through a [`Codec`], which turns it
//! into the text stored in the `value` column and back. The store does not
//! care what the text looks like as long as decoding what was encoded yields
//! an equal value.
//!
//! [`JsonCodec`] is the default. Other formats plug in by implementing
//! [`Codec`]:
//!
//! ```ignore
//! use simple_kv::codec::{Codec, CodecError};
//!
//! #[derive(Default)]
//! struct TomlCodec;
//!
//! impl Codec for TomlCodec {
//!     fn name(&self) -> &'static str {
//!         "toml"
//!     }
//!
//!     fn encode<V: Serialize + ?Sized>(&self, value: &V) -> Result<String, CodecError> {
//!         toml::to_string(value).map_err(|e| CodecError::encode(self.name(), e))
//!     }
//!
//!     fn decode<V: DeserializeOwned>(&self, text: &str) -> Result<V, CodecError> {
//!         toml::from_str(text).map_err(|e| CodecError::decode(self.name(), e))
//!     }
//! }
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Boxed error produced by a codec implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A value could not be converted to or from its stored text.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("{codec} encoding failed: {source}")]
    Encode {
        codec: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("{codec} decoding failed: {source}")]
    Decode {
        codec: &'static str,
        #[source]
        source: BoxError,
    },
}

impl CodecError {
    pub fn encode(codec: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Encode {
            codec,
            source: source.into(),
        }
    }

    pub fn decode(codec: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Decode {
            codec,
            source: source.into(),
        }
    }

    /// Returns `true` if the failure happened while reading a stored value.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// Converts values to stored text and back.
///
/// Implementations must be total over the values they accept and invertible:
/// `decode(encode(v)) == v`.
pub trait Codec {
    /// Short format name used in error messages.
    fn name(&self) -> &'static str;

    fn encode<V: Serialize + ?Sized>(&self, value: &V) -> Result<String, CodecError>;

    fn decode<V: DeserializeOwned>(&self, text: &str) -> Result<V, CodecError>;
}

/// JSON text via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode<V: Serialize + ?Sized>(&self, value: &V) -> Result<String, CodecError> {
        serde_json::to_string(value).map_err(|e| CodecError::encode(self.name(), e))
    }

    fn decode<V: DeserializeOwned>(&self, text: &str) -> Result<V, CodecError> {
        serde_json::from_str(text).map_err(|e| CodecError::decode(self.name(), e))
    }
}
