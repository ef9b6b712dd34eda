//! Grouping cable schedule rows into cables for one junction box.

use log::debug;

use crate::{
    cable::{Cable, CableType, IoType, SystemType},
    device::Device,
    error::ScheduleError,
    sheet::{Workbook, Worksheet, CABLE_SCHEDULE, IO_LIST},
};

const SCHEDULE_FIRST_ROW: u32 = 3;
const SCHEDULE_QUANTITY: u32 = 1;
const SCHEDULE_JUNCTION: u32 = 3;
const SCHEDULE_DESTINATION: u32 = 4;

const IO_FIRST_ROW: u32 = 7;
const IO_TAG: u32 = 2;
const IO_INSTRUMENT_SPEC: u32 = 5;
const IO_TYPE: u32 = 7;
const IO_SYSTEM: u32 = 8;

/// Junction tag used on schedule rows that land nowhere.
const NO_JUNCTION: &str = "N/A";

/// The IO-list fields a cable schedule row is matched against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoEntry {
    pub system_type: SystemType,
    pub io_type: IoType,
    pub instrument_spec: String,
}

fn find_io_entry(io_list: &impl Worksheet, combined_tag: &str) -> Option<IoEntry> {
    (IO_FIRST_ROW..)
        .take_while(|&row| !io_list.cell(row, IO_TAG).is_empty())
        .find(|&row| io_list.cell(row, IO_TAG).text() == combined_tag)
        .map(|row| IoEntry {
            system_type: SystemType::from_cell(&io_list.cell(row, IO_SYSTEM).text()),
            io_type: IoType::from_cell(&io_list.cell(row, IO_TYPE).text()),
            instrument_spec: io_list.cell(row, IO_INSTRUMENT_SPEC).text(),
        })
}

fn schedule_rows(schedule: &impl Worksheet) -> impl Iterator<Item = u32> + '_ {
    (SCHEDULE_FIRST_ROW..).take_while(|&row| !schedule.cell(row, SCHEDULE_DESTINATION).is_empty())
}

/// Cables terminating in `junction_tag`, in sheet order.
///
/// A row with text in its quantity cell starts a new cable; following rows
/// without one add devices to it.
pub fn cables_for_junction(
    schedule: &impl Worksheet,
    io_list: &impl Worksheet,
    junction_tag: &str,
) -> Result<Vec<Cable>, ScheduleError> {
    let mut cables: Vec<Cable> = Vec::new();

    for row in schedule_rows(schedule) {
        if schedule.cell(row, SCHEDULE_JUNCTION).text() != junction_tag {
            continue;
        }
        let combined_tag = schedule.cell(row, SCHEDULE_DESTINATION).text();
        let entry = find_io_entry(io_list, &combined_tag)
            .ok_or_else(|| ScheduleError::UnknownDevice(combined_tag.clone()))?;
        let device = Device::from_spec(&combined_tag, &entry.instrument_spec)?;

        match schedule.cell(row, SCHEDULE_QUANTITY).as_text() {
            Some(quantity) => {
                let cable_type = CableType::from_cell(quantity);
                debug!("row {row}: new {cable_type:?} cable starting at {device}");
                cables.push(Cable::new(
                    cable_type,
                    entry.system_type,
                    entry.io_type,
                    device,
                ));
            }
            None => match cables.last_mut() {
                Some(cable) => cable.add_device(device),
                None => {
                    return Err(ScheduleError::OrphanDevice {
                        row,
                        tag: combined_tag,
                    })
                }
            },
        }
    }

    Ok(cables)
}

/// Read the schedule and IO list out of `workbook` and extract one junction.
pub fn read_cables(
    workbook: &impl Workbook,
    junction_tag: &str,
) -> Result<Vec<Cable>, ScheduleError> {
    let schedule = workbook.worksheet(CABLE_SCHEDULE)?;
    let io_list = workbook.worksheet(IO_LIST)?;
    cables_for_junction(schedule, io_list, junction_tag)
}

/// Distinct junction tags of the schedule, in order of first appearance.
pub fn junction_tags(schedule: &impl Worksheet) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for row in schedule_rows(schedule) {
        let tag = schedule.cell(row, SCHEDULE_JUNCTION).text();
        if tag == NO_JUNCTION || tags.contains(&tag) {
            continue;
        }
        tags.push(tag);
    }
    tags
}

pub fn read_junction_tags(workbook: &impl Workbook) -> Result<Vec<String>, ScheduleError> {
    Ok(junction_tags(workbook.worksheet(CABLE_SCHEDULE)?))
}
