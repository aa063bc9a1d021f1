use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::topology::{row_for_number, FIRST_SECTION, LAST_SECTION};

/// Which side of the hallway a slot sits on within its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Row {
    Top,
    Bottom,
}

impl Row {
    pub fn as_str(&self) -> &'static str {
        match self {
            Row::Top => "top",
            Row::Bottom => "bottom",
        }
    }
}

/// Identifier of a single booth slot, e.g. `J-bottom-25`.
///
/// The row is part of the identity internally but is dropped in the compact
/// interchange form (`J25`), since no section reuses a number across rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    pub section: char,
    pub row: Row,
    pub number: u8,
}

impl SlotId {
    pub fn new(section: char, row: Row, number: u8) -> Self {
        SlotId { section, row, number }
    }

    /// Compact interchange form, e.g. `J25`.
    pub fn compact(&self) -> String {
        format!("{}{}", self.section, self.number)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.section, self.row.as_str(), self.number)
    }
}

impl FromStr for SlotId {
    type Err = ();

    /// Parses the internal form `<Section>-<top|bottom>-<Number>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let section_part = parts.next().ok_or(())?;
        let row_part = parts.next().ok_or(())?;
        let number_part = parts.next().ok_or(())?;
        if parts.next().is_some() {
            return Err(());
        }

        let mut section_chars = section_part.chars();
        let section = section_chars.next().ok_or(())?;
        if section_chars.next().is_some() || !(FIRST_SECTION..=LAST_SECTION).contains(&section) {
            return Err(());
        }

        let row = match row_part {
            "top" => Row::Top,
            "bottom" => Row::Bottom,
            _ => return Err(()),
        };

        let number: u8 = number_part.parse().map_err(|_| ())?;
        // The row must agree with the numbering scheme of the floor plan.
        if row_for_number(number) != Some(row) {
            return Err(());
        }

        Ok(SlotId { section, row, number })
    }
}

impl Serialize for SlotId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| D::Error::custom(format!("invalid slot id: {}", s)))
    }
}

/// Converts an internal-form slot id string to the compact interchange form.
/// Input that does not parse as an internal id is passed through unchanged.
pub fn to_compact(internal: &str) -> String {
    match internal.parse::<SlotId>() {
        Ok(id) => id.compact(),
        Err(()) => internal.to_string(),
    }
}

/// Converts a compact-form slot id string (`J25`) to the internal form
/// (`J-bottom-25`), deriving the row from the number. Input that does not
/// parse as a compact id is passed through unchanged.
pub fn to_internal(compact: &str) -> String {
    match parse_compact(compact) {
        Some(id) => id.to_string(),
        None => compact.to_string(),
    }
}

/// Parses the compact form `<Section><Number>` into a typed id.
pub fn parse_compact(compact: &str) -> Option<SlotId> {
    let mut chars = compact.chars();
    let section = chars.next()?;
    if !(FIRST_SECTION..=LAST_SECTION).contains(&section) {
        return None;
    }
    let number_part = chars.as_str();
    if number_part.is_empty() || !number_part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let number: u8 = number_part.parse().ok()?;
    let row = row_for_number(number)?;
    Some(SlotId { section, row, number })
}
