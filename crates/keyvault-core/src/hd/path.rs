//! BIP32 derivation path parsing.
//!
//! Parsing is kept apart from derivation: a [`DerivationPath`] is a plain
//! list of [`ChildIndex`] values, and syntax errors surface here as
//! `KeyvaultError::InvalidPath` before any key material is touched.

use std::fmt;
use std::str::FromStr;

use crate::error::{KeyvaultError, Result};

/// Offset added to an index to mark it hardened (2^31).
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// One step of a derivation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildIndex {
    /// Derived from the parent public key; index < 2^31
    Normal(u32),
    /// Derived from the parent private key; index < 2^31 (offset not applied)
    Hardened(u32),
}

impl ChildIndex {
    pub fn normal(index: u32) -> Result<Self> {
        check_range(index)?;
        Ok(ChildIndex::Normal(index))
    }

    pub fn hardened(index: u32) -> Result<Self> {
        check_range(index)?;
        Ok(ChildIndex::Hardened(index))
    }

    /// Interpret a raw 32-bit BIP32 index, where values ≥ 2^31 are hardened.
    pub fn from_raw(raw: u32) -> Self {
        if raw >= HARDENED_OFFSET {
            ChildIndex::Hardened(raw - HARDENED_OFFSET)
        } else {
            ChildIndex::Normal(raw)
        }
    }

    /// The 32-bit value fed to CKD (`i`, with the hardened offset applied).
    pub fn to_raw(self) -> u32 {
        match self {
            ChildIndex::Normal(i) => i,
            ChildIndex::Hardened(i) => i | HARDENED_OFFSET,
        }
    }

    pub fn is_hardened(self) -> bool {
        matches!(self, ChildIndex::Hardened(_))
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildIndex::Normal(i) => write!(f, "{}", i),
            ChildIndex::Hardened(i) => write!(f, "{}'", i),
        }
    }
}

impl FromStr for ChildIndex {
    type Err = KeyvaultError;

    fn from_str(segment: &str) -> Result<Self> {
        let (digits, hardened) = match segment.strip_suffix(['\'', 'h', 'H']) {
            Some(rest) => (rest, true),
            None => (segment, false),
        };

        if digits.is_empty() {
            return Err(KeyvaultError::InvalidPath(format!(
                "Missing index in segment '{}'",
                segment
            )));
        }
        // u32::from_str accepts a leading '+', which BIP32 paths do not.
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(KeyvaultError::InvalidPath(format!(
                "Segment '{}' is not a decimal index",
                segment
            )));
        }

        let index: u32 = digits.parse().map_err(|_| {
            KeyvaultError::InvalidPath(format!("Index '{}' is out of range", digits))
        })?;

        if hardened {
            ChildIndex::hardened(index)
        } else {
            ChildIndex::normal(index)
        }
    }
}

fn check_range(index: u32) -> Result<()> {
    if index >= HARDENED_OFFSET {
        return Err(KeyvaultError::InvalidPath(format!(
            "Index {} exceeds maximum ({})",
            index,
            HARDENED_OFFSET - 1
        )));
    }
    Ok(())
}

/// An ordered list of child indices, e.g. `m/44'/60'/0'/0/0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// The empty path `m`, which derives to the master key itself.
    pub fn master() -> Self {
        Self::default()
    }

    pub fn indices(&self) -> &[ChildIndex] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// A new path with `index` appended.
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self { indices }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChildIndex> {
        self.indices.iter()
    }
}

impl From<Vec<ChildIndex>> for DerivationPath {
    fn from(indices: Vec<ChildIndex>) -> Self {
        Self { indices }
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildIndex;
    type IntoIter = std::slice::Iter<'a, ChildIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}

impl FromStr for DerivationPath {
    type Err = KeyvaultError;

    /// Parse `m` followed by zero or more `/`-separated segments.
    fn from_str(path: &str) -> Result<Self> {
        let mut segments = path.split('/');

        let first = segments.next().unwrap_or_default();
        if first != "m" {
            return Err(KeyvaultError::InvalidPath(format!(
                "Path must start with 'm', got '{}'",
                first
            )));
        }

        let indices = segments
            .enumerate()
            .map(|(position, segment)| {
                if segment.is_empty() {
                    return Err(KeyvaultError::InvalidPath(format!(
                        "Empty segment at position {}",
                        position + 1
                    )));
                }
                segment.parse::<ChildIndex>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { indices })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}
