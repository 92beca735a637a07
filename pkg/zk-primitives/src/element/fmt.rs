use std::fmt::{Debug, Display, Formatter, LowerHex, Result, UpperHex};

use crate::Element;

fn trimmed_hex(element: &Element) -> String {
    let hex = hex::encode(element.to_be_bytes());
    let trimmed = hex.trim_start_matches('0');
    match trimmed.is_empty() {
        true => "0".to_string(),
        false => trimmed.to_string(),
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&trimmed_hex(self))
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&trimmed_hex(self))
    }
}

impl LowerHex for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&trimmed_hex(self))
    }
}

impl UpperHex for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&trimmed_hex(self).to_uppercase())
    }
}
