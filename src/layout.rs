//! Terminal and table assignment for a sorted list of cables.
//!
//! Cables fill a terminal strip top to bottom. The 24x24x8 enclosure carries
//! a second strip; a cable moves there when the first strip would overflow
//! or when it is the first safety cable after the control cables, provided
//! everything still left to place fits on the second strip.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    cable::{Cable, SystemType},
    cad::Point,
    config::DrawingConfig,
};

/// Enclosure size the drawing template was made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Enclosure {
    /// 24" x 24" x 8", two strips of 72 terminals.
    Large,
    /// 16" x 16" x 6", one strip of 42 terminals.
    Medium,
    /// 12" x 12" x 6", one strip of 24 terminals.
    Small,
    /// No capacity checks, one strip that never splits.
    Custom,
}

impl Enclosure {
    /// Sizes offered for selection, largest first.
    pub const STANDARD: [Self; 3] = [Self::Large, Self::Medium, Self::Small];

    pub fn name(self) -> &'static str {
        match self {
            Self::Large => "24x24x8",
            Self::Medium => "16x16x6",
            Self::Small => "12x12x6",
            Self::Custom => "Custom",
        }
    }

    /// Capacity of each terminal strip, empty when unchecked.
    pub fn tables(self) -> &'static [u32] {
        match self {
            Self::Large => &[72, 72],
            Self::Medium => &[42],
            Self::Small => &[24],
            Self::Custom => &[],
        }
    }

    pub fn capacity(self) -> Option<u32> {
        match self.tables() {
            [] => None,
            tables => Some(tables.iter().sum()),
        }
    }
}

/// First terminal and table (both 1-based) of a cable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub terminal: u32,
    pub table: u32,
}

/// Where and how a cable is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub origin: Point,
    pub terminal: u32,
    pub table: u32,
    pub flip: bool,
}

/// Spare terminals an enclosure would have left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spare {
    Terminals(u32),
    DoesNotFit,
    Unchecked,
}

impl Spare {
    pub fn fits(self) -> bool {
        !matches!(self, Spare::DoesNotFit)
    }
}

fn starts_new_table(enclosure: Enclosure, cables: &[Cable], index: usize, at: Assignment) -> bool {
    let [first, second] = enclosure.tables() else {
        return false;
    };
    if index == 0 || at.table != 1 {
        return false;
    }
    let remaining: u32 = cables[index..].iter().map(Cable::terminal_footprint).sum();
    if remaining > *second {
        return false;
    }
    let cable = &cables[index];
    let safety_boundary = cable.system_type() == SystemType::Safety
        && cables[index - 1].system_type() == SystemType::Control;
    let overflows = at.terminal - 1 + cable.terminal_footprint() > *first;
    safety_boundary || overflows
}

/// First terminal and table of every cable, in order.
pub fn assign_terminals(cables: &[Cable], enclosure: Enclosure) -> Vec<Assignment> {
    let mut at = Assignment {
        terminal: 1,
        table: 1,
    };
    let mut assignments = Vec::with_capacity(cables.len());
    for (index, cable) in cables.iter().enumerate() {
        if starts_new_table(enclosure, cables, index, at) {
            debug!(
                "{}: moving to table {} at terminal {}",
                cable.label(),
                at.table + 1,
                at.terminal
            );
            at = Assignment {
                terminal: 1,
                table: at.table + 1,
            };
        }
        assignments.push(at);
        at.terminal += cable.terminal_footprint();
    }
    assignments
}

/// Terminals the cables occupy in `enclosure`, `None` when some strip overflows.
pub fn used_terminals(cables: &[Cable], enclosure: Enclosure) -> Option<u32> {
    let total = cables.iter().map(Cable::terminal_footprint).sum();
    let tables = enclosure.tables();
    if tables.is_empty() {
        return Some(total);
    }

    let mut ends = vec![0; tables.len()];
    for (cable, at) in cables.iter().zip(assign_terminals(cables, enclosure)) {
        let slot = ends.get_mut(at.table as usize - 1)?;
        *slot = at.terminal - 1 + cable.terminal_footprint();
    }
    if ends.iter().zip(tables).any(|(end, capacity)| end > capacity) {
        return None;
    }
    Some(total)
}

pub fn spare(cables: &[Cable], enclosure: Enclosure) -> Spare {
    match (enclosure.capacity(), used_terminals(cables, enclosure)) {
        (None, _) => Spare::Unchecked,
        (Some(_), None) => Spare::DoesNotFit,
        (Some(capacity), Some(used)) => Spare::Terminals(capacity - used),
    }
}

/// Origins and orientation of every cable of the `box_index`th junction box.
pub fn place(
    cables: &[Cable],
    enclosure: Enclosure,
    config: &DrawingConfig,
    box_index: u32,
) -> Vec<Placement> {
    let base = config
        .origin
        .offset(config.box_spacing * f64::from(box_index), 0.0);
    assign_terminals(cables, enclosure)
        .into_iter()
        .map(|Assignment { terminal, table }| {
            let second_strip = table > 1;
            let dx = if second_strip {
                config.second_table_offset
            } else {
                0.0
            };
            let dy = -config.terminal_pitch * f64::from(terminal - 1);
            Placement {
                origin: base.offset(dx, dy),
                terminal,
                table,
                flip: second_strip,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cable::{CableType, IoType},
        device::Device,
    };
    use rstest::*;

    fn cable(system_type: SystemType, footprint: u32) -> Cable {
        Cable::new(
            CableType::Pair1,
            system_type,
            IoType::Analog,
            Device::new("XV 1", footprint).unwrap(),
        )
    }

    fn control(footprints: &[u32]) -> Vec<Cable> {
        footprints.iter().map(|&fp| cable(SystemType::Control, fp)).collect()
    }

    fn at(terminal: u32, table: u32) -> Assignment {
        Assignment { terminal, table }
    }

    #[test]
    fn overflow_moves_to_second_table_once() {
        let cables = control(&[50, 30, 40]);
        let assignments = assign_terminals(&cables, Enclosure::Large);
        assert_eq!(assignments, [at(1, 1), at(1, 2), at(31, 2)]);
    }

    #[test]
    fn safety_after_control_starts_second_table() {
        let cables = vec![
            cable(SystemType::Control, 9),
            cable(SystemType::Control, 6),
            cable(SystemType::Safety, 9),
            cable(SystemType::Safety, 3),
        ];
        assert_eq!(
            assign_terminals(&cables, Enclosure::Large),
            [at(1, 1), at(10, 1), at(1, 2), at(10, 2)]
        );
        assert_eq!(
            assign_terminals(&cables, Enclosure::Medium),
            [at(1, 1), at(10, 1), at(16, 1), at(25, 1)]
        );
    }

    #[test]
    fn split_waits_until_remainder_fits_second_table() {
        let cables = vec![
            cable(SystemType::Control, 10),
            cable(SystemType::Safety, 40),
            cable(SystemType::Safety, 40),
        ];
        assert_eq!(
            assign_terminals(&cables, Enclosure::Large),
            [at(1, 1), at(11, 1), at(1, 2)]
        );
    }

    #[test]
    fn first_cable_never_splits() {
        let cables = vec![cable(SystemType::Safety, 9)];
        assert_eq!(assign_terminals(&cables, Enclosure::Large), [at(1, 1)]);
    }

    #[test]
    fn custom_never_splits() {
        let cables = vec![cable(SystemType::Control, 60), cable(SystemType::Safety, 60)];
        assert_eq!(
            assign_terminals(&cables, Enclosure::Custom),
            [at(1, 1), at(61, 1)]
        );
        assert_eq!(spare(&cables, Enclosure::Custom), Spare::Unchecked);
        assert_eq!(used_terminals(&cables, Enclosure::Custom), Some(120));
    }

    #[rstest]
    #[case(&[50, 30, 40], Enclosure::Large, Spare::Terminals(24))]
    #[case(&[50, 30, 40], Enclosure::Medium, Spare::DoesNotFit)]
    #[case(&[9, 9, 6], Enclosure::Small, Spare::Terminals(0))]
    #[case(&[9, 9, 9], Enclosure::Small, Spare::DoesNotFit)]
    #[case(&[9, 9, 9], Enclosure::Medium, Spare::Terminals(15))]
    #[case(&[9, 9, 9], Enclosure::Large, Spare::Terminals(117))]
    #[case(&[80, 80], Enclosure::Large, Spare::DoesNotFit)]
    #[case(&[], Enclosure::Small, Spare::Terminals(24))]
    fn spare_terminals(#[case] footprints: &[u32], #[case] enclosure: Enclosure, #[case] expected: Spare) {
        assert_eq!(spare(&control(footprints), enclosure), expected);
    }

    #[test]
    fn unused_tail_of_first_table_stays_spare() {
        let cables = vec![cable(SystemType::Control, 9), cable(SystemType::Safety, 9)];
        assert_eq!(
            assign_terminals(&cables, Enclosure::Large),
            [at(1, 1), at(1, 2)]
        );
        assert_eq!(used_terminals(&cables, Enclosure::Large), Some(18));
        assert_eq!(spare(&cables, Enclosure::Large), Spare::Terminals(126));
    }

    #[test]
    fn overflowing_single_table_is_infeasible() {
        let cables = control(&[12, 12, 3]);
        assert_eq!(used_terminals(&cables, Enclosure::Small), None);
        assert!(!spare(&cables, Enclosure::Small).fits());
    }

    #[test]
    fn placements_step_down_and_mirror_on_second_strip() {
        let config = DrawingConfig::default();
        let cables = vec![
            cable(SystemType::Control, 9),
            cable(SystemType::Control, 3),
            cable(SystemType::Safety, 6),
        ];
        let placements = place(&cables, Enclosure::Large, &config, 0);

        assert_eq!(placements[0].origin, Point::new(50.0, 0.0));
        assert!(!placements[0].flip);
        assert_eq!(placements[1].origin, Point::new(50.0, -2.25));
        assert_eq!(placements[1].terminal, 10);

        assert_eq!(placements[2].table, 2);
        assert_eq!(placements[2].terminal, 1);
        assert!(placements[2].flip);
        assert_eq!(placements[2].origin, Point::new(50.0 + config.second_table_offset, 0.0));
    }

    #[test]
    fn batch_boxes_are_spaced_horizontally() {
        let config = DrawingConfig::default();
        let cables = control(&[3]);
        let placements = place(&cables, Enclosure::Medium, &config, 2);
        assert_eq!(
            placements[0].origin,
            Point::new(50.0 + 2.0 * config.box_spacing, 0.0)
        );
    }

    #[rstest]
    #[case(Enclosure::Large, Some(144))]
    #[case(Enclosure::Medium, Some(42))]
    #[case(Enclosure::Small, Some(24))]
    #[case(Enclosure::Custom, None)]
    fn capacities(#[case] enclosure: Enclosure, #[case] expected: Option<u32>) {
        assert_eq!(enclosure.capacity(), expected);
    }
}
