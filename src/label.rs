//! Field-tag label text on termination symbols.
//!
//! A field tag reads `{junction}-TB{table}({terminal})`, e.g. `IJB-810-TB1(12)`.
//! Terminal numbers run down the strip but skip the slots the terminal block
//! hardware reserves, so the `n`th conductor of a cable does not always land
//! on terminal `first + n - 1`.

use crate::{cable::CableType, error::LabelError};

mod lexer;

use lexer::{TokenIter, TokenKind};

/// Attribute tag of the `slot`th field tag, counted from 1.
pub fn slot_attribute(slot: u32) -> String {
    format!("FLDTAG{slot}")
}

/// Arrangement of conductor slots on a termination symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLayout {
    /// Nine slots, a spare terminal after slots 5 and 7.
    Standard,
    /// Seven slots, a spare terminal after slots 2, 4 and 6.
    SevenWire,
}

impl SlotLayout {
    pub fn slots(self) -> u32 {
        match self {
            Self::Standard => 9,
            Self::SevenWire => 7,
        }
    }

    fn gaps_before(self, slot: u32) -> u32 {
        let after: &[u32] = match self {
            Self::Standard => &[5, 7],
            Self::SevenWire => &[2, 4, 6],
        };
        after.iter().filter(|&&gap| slot > gap).count() as u32
    }

    /// Terminal of `slot` (1-based) when the first slot lands on `first`.
    pub fn terminal(self, first: i64, slot: u32) -> i64 {
        first + i64::from(slot - 1 + self.gaps_before(slot))
    }
}

impl From<CableType> for SlotLayout {
    fn from(cable_type: CableType) -> Self {
        match cable_type {
            CableType::Wire7 => Self::SevenWire,
            _ => Self::Standard,
        }
    }
}

pub fn field_tag(junction_tag: &str, table: u32, terminal: i64) -> String {
    format!("{junction_tag}-TB{table}({terminal})")
}

/// Everything before the first `(` of an existing label.
pub fn prefix(label: &str) -> Result<&str, LabelError> {
    TokenIter::new(label)
        .find(|token| token.kind == TokenKind::LParen)
        .map(|token| &label[..token.span.start])
        .ok_or_else(|| LabelError::Malformed(label.to_owned()))
}

/// Replace the `(n)` suffix of `label` with `(terminal)`, keeping the prefix.
pub fn renumber(label: &str, terminal: i64) -> Result<String, LabelError> {
    Ok(format!("{}({terminal})", prefix(label)?))
}
