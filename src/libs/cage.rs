//! Cage numbering.
//!
//! A cage number is a prefix letter followed by four hex digits. The prefix
//! `К` marks a quarantine cage and `О` a regular one (both Cyrillic, as the
//! shelter labels its cages). Latin look-alikes are accepted on input and the
//! canonical form always uses the Cyrillic prefix and uppercase hex digits.

use super::validation::ValidationError;
use crate::libs::messages::Message;
use crate::msg_warning;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub const QUARANTINE_PREFIX: char = 'К';
pub const REGULAR_PREFIX: char = 'О';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CageKind {
    Quarantine,
    Regular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CageNumber {
    pub kind: CageKind,
    pub number: u16,
}

impl CageNumber {
    pub fn quarantine(number: u16) -> Self {
        Self {
            kind: CageKind::Quarantine,
            number,
        }
    }

    pub fn regular(number: u16) -> Self {
        Self {
            kind: CageKind::Regular,
            number,
        }
    }

    pub fn is_quarantine(&self) -> bool {
        self.kind == CageKind::Quarantine
    }
}

impl fmt::Display for CageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            CageKind::Quarantine => QUARANTINE_PREFIX,
            CageKind::Regular => REGULAR_PREFIX,
        };
        write!(f, "{}{:04X}", prefix, self.number)
    }
}

fn prefix_kind(c: char) -> Option<CageKind> {
    match c {
        'К' | 'к' | 'K' | 'k' => Some(CageKind::Quarantine),
        'О' | 'о' | 'O' | 'o' => Some(CageKind::Regular),
        _ => None,
    }
}

/// Cyrillic letters that look like hex digits, as typed on a Russian layout.
fn latin_hex_digit(c: char) -> char {
    match c {
        'А' | 'а' => 'A',
        'В' | 'в' => 'B',
        'С' | 'с' => 'C',
        'Е' | 'е' => 'E',
        other => other,
    }
}

impl FromStr for CageNumber {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ValidationError::InvalidCageNumber(trimmed.to_string());

        let mut chars = trimmed.chars();
        let kind = chars.next().and_then(prefix_kind).ok_or_else(invalid)?;

        let digits: String = chars.map(latin_hex_digit).collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let number = u16::from_str_radix(&digits, 16).map_err(|_| invalid())?;

        Ok(Self { kind, number })
    }
}

/// Returns the canonical spelling of a cage number, validating it.
pub fn normalize(cage: &str) -> Result<String, ValidationError> {
    cage.parse::<CageNumber>().map(|c| c.to_string())
}

/// Whether a stored cage value names a quarantine cage.
///
/// Only the prefix is inspected so that malformed legacy values still count.
pub fn is_quarantine_cage(cage: &str) -> bool {
    matches!(cage.trim().chars().next().and_then(prefix_kind), Some(CageKind::Quarantine))
}

/// Whether `cage` is already present in `taken`, comparing canonical forms
/// where both sides parse.
pub fn is_occupied(cage: &str, taken: &[String]) -> bool {
    let wanted = cage.parse::<CageNumber>().ok();
    taken.iter().any(|t| match (wanted, t.parse::<CageNumber>().ok()) {
        (Some(a), Some(b)) => a == b,
        _ => t.trim() == cage.trim(),
    })
}

/// Picks the lowest-numbered quarantine cage not present in `taken`.
pub fn next_free_quarantine_cage(taken: &[String]) -> Result<CageNumber, ValidationError> {
    let mut used = HashSet::new();
    for cage in taken.iter().filter(|c| is_quarantine_cage(c)) {
        match cage.parse::<CageNumber>() {
            Ok(parsed) => {
                used.insert(parsed.number);
            }
            Err(_) => msg_warning!(Message::InvalidCageSkipped(cage.clone())),
        }
    }

    (0..=u16::MAX)
        .find(|n| !used.contains(n))
        .map(CageNumber::quarantine)
        .ok_or(ValidationError::NoFreeQuarantineCage)
}
