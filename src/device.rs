use std::{cmp::Ordering, fmt::Display};

use crate::error::ScheduleError;

/// A field instrument landed on a cable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    tag: String,
    number: String,
    footprint: u32,
}

impl Device {
    /// Split `"SDV 60A"` into tag `SDV` and number `60A` at the first space.
    pub fn new(combined_tag: &str, footprint: u32) -> Result<Self, ScheduleError> {
        debug_assert!(footprint > 0);
        let (tag, number) = combined_tag
            .split_once(' ')
            .ok_or_else(|| ScheduleError::MalformedDeviceTag(combined_tag.to_owned()))?;
        Ok(Self {
            tag: tag.to_owned(),
            number: number.to_owned(),
            footprint,
        })
    }

    /// Build a device with the footprint looked up from its instrument spec.
    pub fn from_spec(combined_tag: &str, instrument_spec: &str) -> Result<Self, ScheduleError> {
        Self::new(combined_tag, footprint_from_spec(combined_tag, instrument_spec))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn combined_tag(&self) -> String {
        format!("{} {}", self.tag, self.number)
    }

    pub fn footprint(&self) -> u32 {
        self.footprint
    }

    fn combined_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.tag
            .bytes()
            .chain(std::iter::once(b' '))
            .chain(self.number.bytes())
    }
}

impl Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.tag, self.number)
    }
}

impl Ord for Device {
    fn cmp(&self, other: &Self) -> Ordering {
        self.combined_bytes()
            .cmp(other.combined_bytes())
            .then(self.footprint.cmp(&other.footprint))
    }
}

impl PartialOrd for Device {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Number of terminals a device occupies, from its tag and instrument spec.
///
/// Ultrasonic switches and ultrasonic/coriolis flow transmitters are
/// four-wire powered devices, RTD temperature transmitters carry a third
/// reference conductor, everything else lands as a pair plus shield.
pub fn footprint_from_spec(combined_tag: &str, instrument_spec: &str) -> u32 {
    let tag = combined_tag
        .split_once(' ')
        .map_or(combined_tag, |(tag, _)| tag);
    match (tag, instrument_spec) {
        ("LSLL" | "LSHH" | "LS", "ULTRASONIC SW") => 6,
        ("FT", "ULTRASONIC FLOW" | "CORIOLIS FLOW") => 6,
        ("TT", "RTD") => 4,
        _ => 3,
    }
}
