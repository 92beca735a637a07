use curve25519_dalek::scalar::Scalar;

mod arith;
mod convert;
mod fmt;

#[cfg(feature = "borsh")]
mod borsh_impls;

#[cfg(feature = "rand")]
mod rand_impls;

#[cfg(feature = "serde")]
mod serde;

pub use convert::ParseElementError;

/// An element of the Ristretto scalar field
///
/// This type is a wrapper around a [`Scalar`], i.e. an integer modulo the
/// group order `ℓ = 2^252 + 27742317777372353535851937790883648493`.
/// Every value that flows through a commitment - note fields, merkle hashes,
/// nullifiers, signature responses - is an [`Element`]
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Element(#[cfg_attr(feature = "serde", serde(with = "serde"))] pub(crate) Scalar);

impl Element {
    /// The zero element of the field (the additive identity)
    pub const ZERO: Self = Self(Scalar::ZERO);

    /// The one element of the field (the multiplicative identity)
    pub const ONE: Self = Self(Scalar::ONE);

    /// Create a new [`Element`] from a u64
    ///
    /// This is largely provided to help type inference in simple cases
    #[inline]
    #[must_use]
    pub fn new(i: u64) -> Self {
        Self(Scalar::from(i))
    }

    /// Attempt to convert this [`Element`] to a bool
    ///
    /// If this value is not 0 or 1, `None` is returned
    #[inline]
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        if self == Self::ZERO {
            Some(false)
        } else if self == Self::ONE {
            Some(true)
        } else {
            None
        }
    }

    /// Convert this [`Element`] to a hex string of its canonical big-endian bytes
    #[inline]
    #[must_use]
    pub fn to_hex(self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// If this element is zero, returns true
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// View this [`Element`] as the underlying [`Scalar`]
    #[inline]
    #[must_use]
    pub fn to_scalar(self) -> Scalar {
        self.0
    }
}

impl Default for Element {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Scalar> for Element {
    #[inline]
    fn from(scalar: Scalar) -> Self {
        Self(scalar)
    }
}

// `Scalar` deliberately doesn't implement `Ord`/`Hash`; for map keys and
// deterministic test ordering we compare the canonical little-endian bytes
// starting from the most significant limb
impl PartialOrd for Element {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Element {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.to_be_bytes().cmp(&other.to_be_bytes())
    }
}

impl core::hash::Hash for Element {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.0.as_bytes().hash(state);
    }
}

macro_rules! partial_eq_impl {
    ($int:ty) => {
        impl PartialEq<$int> for Element {
            fn eq(&self, other: &$int) -> bool {
                *self == Element::from(*other)
            }
        }
    };
}

partial_eq_impl!(bool);
partial_eq_impl!(u8);
partial_eq_impl!(u16);
partial_eq_impl!(u32);
partial_eq_impl!(u64);
partial_eq_impl!(u128);

#[cfg(any(test, feature = "proptest"))]
pub mod proptest {
    //! [`Arbitrary`] support for [`Element`]

    use super::Element;
    use ::proptest::{arbitrary::StrategyFor, prelude::*, strategy::Map};

    impl Arbitrary for Element {
        type Strategy = Map<StrategyFor<[u8; 32]>, fn([u8; 32]) -> Self>;
        type Parameters = ();

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            // reduce mod ℓ so every generated element is canonical
            any::<[u8; 32]>().prop_map(Element::from_le_bytes_mod_order)
        }
    }
}
