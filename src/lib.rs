pub mod cable;
pub mod cad;
pub mod command;
pub mod config;
pub mod device;
pub mod draw;
pub mod error;
pub mod flip;
pub mod label;
pub mod layout;
pub mod reindex;
pub mod schedule;
pub mod session;
pub mod sheet;

pub use cable::{Cable, CableType, IoType, SystemType, VisualState};
pub use cad::{Drawing, Handle, MemoryDrawing, Point};
pub use command::{build_junction_box, flip_selection, present, reindex_selection, Outcome, Prompt};
pub use config::DrawingConfig;
pub use device::Device;
pub use layout::{Enclosure, Placement, Spare};
pub use session::{BuildRequest, BuildSession, SizeOption, TagChoice};
pub use sheet::{Cell, MemoryWorkbook, Workbook, Worksheet};
