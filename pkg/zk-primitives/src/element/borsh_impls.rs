use borsh::{BorshDeserialize, BorshSerialize};

use super::Element;

impl BorshSerialize for Element {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.to_be_bytes().serialize(writer)
    }
}

impl BorshDeserialize for Element {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut bytes = <[u8; 32]>::deserialize_reader(reader)?;
        bytes.reverse();
        // reject non-canonical encodings so the byte representation stays a bijection
        Element::from_le_bytes(bytes).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "non-canonical scalar encoding",
            )
        })
    }
}
