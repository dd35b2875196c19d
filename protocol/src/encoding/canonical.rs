//! Canonical msgpack maps.
//!
//! Two independent clients must produce byte-identical encodings of the
//! same transaction, otherwise transaction ids and signatures diverge. The
//! rules are:
//!
//! - keys are written in ascending byte order;
//! - fields holding their zero value (0, false, "", empty bytes, all-zero
//!   32-byte arrays, empty maps, empty lists) are omitted entirely;
//! - unsigned integers use the smallest msgpack representation;
//! - text uses msgpack `str`, byte strings and fixed arrays use `bin`.
//!
//! [`CanonicalMap`] enforces all four: every value is pre-encoded into its
//! own buffer, zero values are dropped at insertion time, and a `BTreeMap`
//! keeps the keys sorted until [`CanonicalMap::into_bytes`] writes them out.

use std::collections::BTreeMap;

use rmp::encode;
use thiserror::Error;

use crate::identity::Address;

/// Errors raised while writing canonical msgpack.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("msgpack write failed: {0}")]
    Write(#[from] encode::ValueWriteError),

    #[error("msgpack write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("collection of {0} elements exceeds msgpack length limit")]
    TooLong(usize),
}

/// Types with a canonical msgpack map form.
pub trait CanonicalEncode {
    /// Build the canonical map for this value.
    fn to_canonical_map(&self) -> Result<CanonicalMap, EncodeError>;

    /// Encode this value to canonical msgpack bytes.
    fn to_canonical_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        self.to_canonical_map()?.into_bytes()
    }
}

/// A msgpack map under construction, with zero values already elided.
#[derive(Debug, Default, Clone)]
pub struct CanonicalMap {
    entries: BTreeMap<&'static str, Vec<u8>>,
}

fn length(len: usize) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::TooLong(len))
}

impl CanonicalMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields that survived zero-value elision.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` was written (i.e. held a non-zero value).
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn insert(&mut self, key: &'static str, value: Vec<u8>) -> &mut Self {
        self.entries.insert(key, value);
        self
    }

    pub fn uint(&mut self, key: &'static str, value: u64) -> Result<&mut Self, EncodeError> {
        if value == 0 {
            return Ok(self);
        }
        let mut buf = Vec::with_capacity(9);
        encode::write_uint(&mut buf, value)?;
        Ok(self.insert(key, buf))
    }

    pub fn flag(&mut self, key: &'static str, value: bool) -> Result<&mut Self, EncodeError> {
        if !value {
            return Ok(self);
        }
        let mut buf = Vec::with_capacity(1);
        encode::write_bool(&mut buf, value)?;
        Ok(self.insert(key, buf))
    }

    pub fn text(&mut self, key: &'static str, value: &str) -> Result<&mut Self, EncodeError> {
        if value.is_empty() {
            return Ok(self);
        }
        let mut buf = Vec::with_capacity(value.len() + 5);
        encode::write_str(&mut buf, value)?;
        Ok(self.insert(key, buf))
    }

    pub fn bytes(&mut self, key: &'static str, value: &[u8]) -> Result<&mut Self, EncodeError> {
        if value.is_empty() {
            return Ok(self);
        }
        let mut buf = Vec::with_capacity(value.len() + 5);
        encode::write_bin(&mut buf, value)?;
        Ok(self.insert(key, buf))
    }

    /// A fixed-width byte array; omitted when every byte is zero.
    pub fn fixed(&mut self, key: &'static str, value: &[u8]) -> Result<&mut Self, EncodeError> {
        if value.iter().all(|b| *b == 0) {
            return Ok(self);
        }
        let mut buf = Vec::with_capacity(value.len() + 2);
        encode::write_bin(&mut buf, value)?;
        Ok(self.insert(key, buf))
    }

    pub fn address(&mut self, key: &'static str, value: &Address) -> Result<&mut Self, EncodeError> {
        self.fixed(key, value.as_bytes())
    }

    /// A nested map; omitted when every field of it was elided.
    pub fn map(&mut self, key: &'static str, value: CanonicalMap) -> Result<&mut Self, EncodeError> {
        if value.is_empty() {
            return Ok(self);
        }
        let buf = value.into_bytes()?;
        Ok(self.insert(key, buf))
    }

    /// A list of byte strings. Elements are written as-is, including empty
    /// ones; only an empty list is omitted.
    pub fn bytes_list(&mut self, key: &'static str, values: &[Vec<u8>]) -> Result<&mut Self, EncodeError> {
        if values.is_empty() {
            return Ok(self);
        }
        let mut buf = Vec::new();
        encode::write_array_len(&mut buf, length(values.len())?)?;
        for value in values {
            encode::write_bin(&mut buf, value)?;
        }
        Ok(self.insert(key, buf))
    }

    pub fn address_list(&mut self, key: &'static str, values: &[Address]) -> Result<&mut Self, EncodeError> {
        if values.is_empty() {
            return Ok(self);
        }
        let mut buf = Vec::with_capacity(values.len() * 34 + 5);
        encode::write_array_len(&mut buf, length(values.len())?)?;
        for value in values {
            encode::write_bin(&mut buf, value.as_bytes())?;
        }
        Ok(self.insert(key, buf))
    }

    pub fn uint_list(&mut self, key: &'static str, values: &[u64]) -> Result<&mut Self, EncodeError> {
        if values.is_empty() {
            return Ok(self);
        }
        let mut buf = Vec::new();
        encode::write_array_len(&mut buf, length(values.len())?)?;
        for value in values {
            encode::write_uint(&mut buf, *value)?;
        }
        Ok(self.insert(key, buf))
    }

    /// A list of nested maps. Empty elements are written as empty maps so
    /// that positions are preserved.
    pub fn map_list(&mut self, key: &'static str, values: Vec<CanonicalMap>) -> Result<&mut Self, EncodeError> {
        if values.is_empty() {
            return Ok(self);
        }
        let mut buf = Vec::new();
        encode::write_array_len(&mut buf, length(values.len())?)?;
        for value in values {
            buf.extend_from_slice(&value.into_bytes()?);
        }
        Ok(self.insert(key, buf))
    }

    /// Write the map header followed by the sorted key/value pairs.
    pub fn into_bytes(self) -> Result<Vec<u8>, EncodeError> {
        let body: usize = self.entries.iter().map(|(k, v)| k.len() + 1 + v.len()).sum();
        let mut out = Vec::with_capacity(body + 5);
        encode::write_map_len(&mut out, length(self.entries.len())?)?;
        for (key, value) in self.entries {
            encode::write_str(&mut out, key)?;
            out.extend_from_slice(&value);
        }
        Ok(out)
    }
}
