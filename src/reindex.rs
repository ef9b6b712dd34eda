//! Renumbering field tags of an edited diagram from where its terminations sit.
//!
//! The highest junction termination in the selection marks the top of the
//! strip. Every termination below it is `round(dy / pitch)` terminals further
//! down, so its first slot lands on that offset plus the starting terminal.

use log::{debug, warn};

use crate::{
    cad::{block_name, Drawing, Handle},
    config::DrawingConfig,
    error::ReindexError,
    label::{self, SlotLayout},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReindexSummary {
    pub relabeled: usize,
    pub skipped: usize,
}

struct Termination {
    handle: Handle,
    layout: SlotLayout,
    junction_side: bool,
    y: f64,
}

fn termination(
    drawing: &impl Drawing,
    config: &DrawingConfig,
    handle: Handle,
) -> Result<Option<Termination>, ReindexError> {
    let name = block_name(drawing, handle)?;
    if !config.is_termination(&name) {
        return Ok(None);
    }
    let layout = if config.is_seven_wire(&name) {
        SlotLayout::SevenWire
    } else {
        SlotLayout::Standard
    };
    Ok(Some(Termination {
        handle,
        layout,
        junction_side: config.is_junction_termination(&name),
        y: drawing.position(handle)?.y,
    }))
}

/// Terminal offset of a termination at `y` below the reference top.
pub fn terminal_offset(top: f64, y: f64, pitch: f64) -> i64 {
    ((top - y) / pitch).round() as i64
}

fn relabel(
    drawing: &mut impl Drawing,
    termination: &Termination,
    first: i64,
) -> Result<(), ReindexError> {
    let mut labels = Vec::with_capacity(termination.layout.slots() as usize);
    for slot in 1..=termination.layout.slots() {
        let attribute = label::slot_attribute(slot);
        let current = drawing.label(termination.handle, &attribute)?;
        let renumbered = label::renumber(&current, termination.layout.terminal(first, slot))?;
        labels.push((attribute, renumbered));
    }
    for (attribute, text) in labels {
        drawing.set_label(termination.handle, &attribute, &text)?;
    }
    Ok(())
}

/// Rewrite the field tags of every termination in `selection`.
///
/// Entities that cannot be resolved or relabelled are skipped with a warning.
pub fn reindex(
    drawing: &mut impl Drawing,
    config: &DrawingConfig,
    selection: &[Handle],
    starting_terminal: i64,
) -> Result<ReindexSummary, ReindexError> {
    let mut summary = ReindexSummary::default();
    let mut terminations = Vec::new();
    for &handle in selection {
        match termination(drawing, config, handle) {
            Ok(Some(t)) => terminations.push(t),
            Ok(None) => {}
            Err(e) => {
                warn!("skipping {handle:?}: {e}");
                summary.skipped += 1;
            }
        }
    }

    let top = terminations
        .iter()
        .filter(|t| t.junction_side)
        .map(|t| t.y)
        .reduce(f64::max)
        .ok_or(ReindexError::NoReference)?;

    for t in &terminations {
        let first = terminal_offset(top, t.y, config.terminal_pitch) + starting_terminal;
        debug!("{:?}: first terminal {first}", t.handle);
        match relabel(drawing, t, first) {
            Ok(()) => summary.relabeled += 1,
            Err(e) => {
                warn!("skipping {:?}: {e}", t.handle);
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}
