//! Row/column access to the cable workbook.
//!
//! Rows and columns are 1-based, as in the workbook itself.

use std::collections::HashMap;

use crate::error::SheetError;

pub const CABLE_SCHEDULE: &str = "Cable Schedule Data";
pub const IO_LIST: &str = "IO List";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) => false,
        }
    }

    /// Text content; numbers render without a trailing `.0` when integral.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 => format!("{n:.0}"),
            Cell::Number(n) => n.to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_owned())
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

pub trait Worksheet {
    fn cell(&self, row: u32, col: u32) -> Cell;
}

pub trait Workbook {
    type Sheet: Worksheet;

    fn worksheet(&self, name: &str) -> Result<&Self::Sheet, SheetError>;
}

/// A worksheet held in memory
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: HashMap<(u32, u32), Cell>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, row: u32, col: u32, cell: impl Into<Cell>) -> &mut Self {
        self.cells.insert((row, col), cell.into());
        self
    }

    /// Fill a row from column 1 onwards; empty strings leave cells empty.
    pub fn set_row(&mut self, row: u32, values: &[&str]) -> &mut Self {
        for (col, value) in (1..).zip(values) {
            self.set(row, col, *value);
        }
        self
    }
}

impl Worksheet for Grid {
    fn cell(&self, row: u32, col: u32) -> Cell {
        self.cells.get(&(row, col)).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: HashMap<String, Grid>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, sheet: Grid) -> &mut Self {
        self.sheets.insert(name.to_owned(), sheet);
        self
    }
}

impl Workbook for MemoryWorkbook {
    type Sheet = Grid;

    fn worksheet(&self, name: &str) -> Result<&Grid, SheetError> {
        self.sheets
            .get(name)
            .ok_or_else(|| SheetError::MissingWorksheet(name.to_owned()))
    }
}
