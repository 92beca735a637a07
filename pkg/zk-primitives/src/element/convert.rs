use crate::Element;
use curve25519_dalek::scalar::Scalar;
use std::str::FromStr;

macro_rules! from_int_impls {
    ($t:ty) => {
        impl From<$t> for Element {
            #[inline]
            fn from(value: $t) -> Self {
                Element(Scalar::from(value))
            }
        }
    };
}

from_int_impls!(u8);
from_int_impls!(u16);
from_int_impls!(u32);
from_int_impls!(u64);
from_int_impls!(u128);

impl From<bool> for Element {
    #[inline]
    fn from(value: bool) -> Self {
        match value {
            false => Self::ZERO,
            true => Self::ONE,
        }
    }
}

/// An error returned when parsing an [`Element`] from a hex string
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseElementError {
    /// The string was not valid hex
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// The decoded value was more than 32 bytes long
    #[error("value is longer than 32 bytes")]
    TooLong,
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        // allow odd-length strings, i.e. "1" rather than "01"
        let padded = match s.len() % 2 {
            0 => s.to_string(),
            _ => format!("0{s}"),
        };
        let vec = hex::decode(padded)?;
        if vec.len() > 32 {
            return Err(ParseElementError::TooLong);
        }

        let mut bytes = [0u8; 32];
        bytes[32 - vec.len()..].copy_from_slice(&vec);
        Ok(Self::from_be_bytes_mod_order(bytes))
    }
}

impl Element {
    /// Convert the [`Element`] to its canonical bytes in big-endian format
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let element = Element::ZERO;
    /// assert_eq!(element.to_be_bytes(), [0; 32]);
    ///
    /// let element = Element::ONE;
    /// assert_eq!(element.to_be_bytes(), {
    ///     let mut temp = [0; 32];
    ///     temp[31] = 1;
    ///     temp
    /// });
    /// ```
    #[inline]
    #[must_use]
    pub fn to_be_bytes(self) -> [u8; 32] {
        let mut bytes = self.0.to_bytes();
        bytes.reverse();
        bytes
    }

    /// Convert the [`Element`] to its canonical bytes in little-endian format
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let element = Element::ONE;
    /// assert_eq!(element.to_le_bytes(), {
    ///     let mut temp = [0; 32];
    ///     temp[0] = 1;
    ///     temp
    /// });
    /// ```
    #[inline]
    #[must_use]
    pub fn to_le_bytes(self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Convert canonical little-endian bytes into an [`Element`]
    ///
    /// Returns `None` if the bytes encode an integer `>= ℓ`
    #[inline]
    #[must_use]
    pub fn from_le_bytes(bytes: [u8; 32]) -> Option<Self> {
        Option::<Scalar>::from(Scalar::from_canonical_bytes(bytes)).map(Self)
    }

    /// Convert little-endian bytes into an [`Element`], reducing mod `ℓ`
    #[inline]
    #[must_use]
    pub fn from_le_bytes_mod_order(bytes: [u8; 32]) -> Self {
        Self(Scalar::from_bytes_mod_order(bytes))
    }

    /// Convert big-endian bytes into an [`Element`], reducing mod `ℓ`
    #[inline]
    #[must_use]
    pub fn from_be_bytes_mod_order(mut bytes: [u8; 32]) -> Self {
        bytes.reverse();
        Self(Scalar::from_bytes_mod_order(bytes))
    }

    /// Convert 64 little-endian bytes into an [`Element`], reducing mod `ℓ`
    ///
    /// The wide reduction keeps the output statistically uniform, which is
    /// what hash-derived scalars need
    #[inline]
    #[must_use]
    pub fn from_bytes_mod_order_wide(bytes: &[u8; 64]) -> Self {
        Self(Scalar::from_bytes_mod_order_wide(bytes))
    }
}
