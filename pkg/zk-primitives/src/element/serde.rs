use curve25519_dalek::scalar::Scalar;
use serde::{Deserialize, Deserializer, Serializer};

use crate::Element;

pub(super) fn serialize<S>(scalar: &Scalar, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    hex::serde::serialize(Element(*scalar).to_be_bytes(), serializer)
}

pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Scalar, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let vec = hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)?;
    let bytes =
        <[u8; 32]>::try_from(vec).map_err(|_| serde::de::Error::custom("Invalid length"))?;
    Ok(Element::from_be_bytes_mod_order(bytes).0)
}
