use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::device::Device;

/// Wire configuration of a cable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CableType {
    Pair1,
    Pair2,
    Pair4,
    Triad1,
    Wire7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SystemType {
    Control,
    Safety,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IoType {
    Analog,
    Digital,
}

impl CableType {
    /// Type given to quantity cells that match no known wire configuration.
    pub const UNCLASSIFIED: Self = Self::Pair1;

    /// Exact match of a schedule quantity cell, `None` when unrecognised.
    pub fn classify(cell: &str) -> Option<Self> {
        match cell {
            "1 Pair" => Some(Self::Pair1),
            "2 Pair" => Some(Self::Pair2),
            "4 Pair" => Some(Self::Pair4),
            "1 Triad" => Some(Self::Triad1),
            "1-7/C" => Some(Self::Wire7),
            _ => None,
        }
    }

    pub fn from_cell(cell: &str) -> Self {
        Self::classify(cell).unwrap_or_else(|| {
            debug!("unclassified cable type {cell:?}, using {:?}", Self::UNCLASSIFIED);
            Self::UNCLASSIFIED
        })
    }

    /// Number of FLDTAG slots on the termination symbols for this cable.
    pub fn field_tag_slots(self) -> u32 {
        match self {
            Self::Wire7 => 7,
            _ => 9,
        }
    }
}

impl SystemType {
    pub const UNCLASSIFIED: Self = Self::Control;

    pub fn classify(cell: &str) -> Option<Self> {
        match cell {
            "Safety" => Some(Self::Safety),
            "Control" => Some(Self::Control),
            _ => None,
        }
    }

    pub fn from_cell(cell: &str) -> Self {
        Self::classify(cell).unwrap_or_else(|| {
            debug!("unclassified system type {cell:?}, using {:?}", Self::UNCLASSIFIED);
            Self::UNCLASSIFIED
        })
    }
}

impl IoType {
    /// IO type codes starting with `D` are digital (`DI`, `DO`), all others analog.
    pub fn from_cell(cell: &str) -> Self {
        if cell.starts_with('D') {
            Self::Digital
        } else {
            Self::Analog
        }
    }
}

/// Visibility state selected on the termination symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualState {
    Show6,
    ShowAll,
    Triad,
    Pair1,
    Pair2,
    Pair3,
    Pair4,
}

impl VisualState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Show6 => "Show 6",
            Self::ShowAll => "Show All",
            Self::Triad => "Triad",
            Self::Pair1 => "1 Pair",
            Self::Pair2 => "2 Pair",
            Self::Pair3 => "3 Pair",
            Self::Pair4 => "4 Pair",
        }
    }
}

/// A cable and the devices wired to it, in wiring order.
///
/// A cable always carries at least one device; it is created together with
/// the device on the row that starts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cable {
    cable_type: CableType,
    system_type: SystemType,
    io_type: IoType,
    devices: Vec<Device>,
}

impl Cable {
    pub fn new(
        cable_type: CableType,
        system_type: SystemType,
        io_type: IoType,
        first_device: Device,
    ) -> Self {
        Self {
            cable_type,
            system_type,
            io_type,
            devices: vec![first_device],
        }
    }

    pub fn add_device(&mut self, device: Device) {
        self.devices.push(device);
    }

    pub fn cable_type(&self) -> CableType {
        self.cable_type
    }

    pub fn system_type(&self) -> SystemType {
        self.system_type
    }

    pub fn io_type(&self) -> IoType {
        self.io_type
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn first_device(&self) -> &Device {
        &self.devices[0]
    }

    pub fn terminal_footprint(&self) -> u32 {
        self.devices.iter().map(Device::footprint).sum()
    }

    pub fn visual_state(&self) -> VisualState {
        let footprint = self.terminal_footprint();
        match self.cable_type {
            CableType::Wire7 if footprint <= 9 => VisualState::Show6,
            CableType::Wire7 => VisualState::ShowAll,
            CableType::Triad1 => VisualState::Triad,
            CableType::Pair1 => VisualState::Pair1,
            CableType::Pair2 => VisualState::Pair2,
            CableType::Pair4 if footprint <= 9 => VisualState::Pair3,
            CableType::Pair4 => VisualState::Pair4,
        }
    }

    /// Cable label, e.g. `C-SDV-60A` for a digital cable whose first device is `SDV 60A`.
    pub fn label(&self) -> String {
        let prefix = match self.io_type {
            IoType::Digital => "C",
            IoType::Analog => "I",
        };
        let first = self.first_device();
        format!("{prefix}-{}-{}", first.tag(), first.number())
    }
}

/// Control before safety, analog before digital, then by first device.
impl Ord for Cable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.system_type
            .cmp(&other.system_type)
            .then(self.io_type.cmp(&other.io_type))
            .then_with(|| self.first_device().cmp(other.first_device()))
    }
}

impl PartialOrd for Cable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
