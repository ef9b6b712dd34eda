//! Mirroring a selected diagram about its topmost junction termination.

use log::warn;

use crate::{
    cad::{block_name, Drawing, Handle, Point, PropertyValue},
    config::DrawingConfig,
    error::{CadError, FlipError},
};

const FLIP: &str = "Flip state1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlipSummary {
    pub mirrored: usize,
    pub skipped: usize,
}

struct Selected {
    handle: Handle,
    position: Point,
    name: Option<String>,
}

fn select(drawing: &impl Drawing, handle: Handle) -> Result<Selected, CadError> {
    let kind = drawing.entity_kind(handle)?;
    let position = drawing.position(handle)?;
    let name = if kind.has_scale() {
        Some(block_name(drawing, handle)?)
    } else {
        None
    };
    Ok(Selected {
        handle,
        position,
        name,
    })
}

fn toggle_flip(drawing: &mut impl Drawing, handle: Handle) -> Result<(), CadError> {
    let flipped = match drawing.property(handle, FLIP)? {
        PropertyValue::Short(state) => state != 0,
        PropertyValue::Real(state) => state != 0.0,
        PropertyValue::Text(state) => state != "0",
    };
    drawing.set_property(handle, FLIP, (!flipped).into())
}

fn mirror(
    drawing: &mut impl Drawing,
    config: &DrawingConfig,
    selected: &Selected,
    axis: f64,
) -> Result<(), CadError> {
    if selected
        .name
        .as_deref()
        .is_some_and(|name| config.is_termination(name))
    {
        toggle_flip(drawing, selected.handle)?;
    }
    let Point { x, y } = selected.position;
    drawing.set_position(selected.handle, Point::new(2.0 * axis - x, y))
}

/// Mirror `selection` horizontally and toggle the flip state of its terminations.
pub fn flip(
    drawing: &mut impl Drawing,
    config: &DrawingConfig,
    selection: &[Handle],
) -> Result<FlipSummary, FlipError> {
    let mut summary = FlipSummary::default();
    let mut selected = Vec::with_capacity(selection.len());
    for &handle in selection {
        match select(drawing, handle) {
            Ok(s) => selected.push(s),
            Err(e) => {
                warn!("skipping {handle:?}: {e}");
                summary.skipped += 1;
            }
        }
    }

    let axis = selected
        .iter()
        .filter(|s| {
            s.name
                .as_deref()
                .is_some_and(|name| config.is_junction_termination(name))
        })
        .map(|s| s.position)
        .reduce(|top, p| if p.y > top.y { p } else { top })
        .ok_or(FlipError::NoReference)?
        .x;

    for s in &selected {
        match mirror(drawing, config, s, axis) {
            Ok(()) => summary.mirrored += 1,
            Err(e) => {
                warn!("skipping {:?}: {e}", s.handle);
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cable::{Cable, CableType, IoType, SystemType},
        cad::{EntityKind, MemoryDrawing},
        device::Device,
        draw::draw_cable,
        layout::Placement,
    };

    fn cable() -> Cable {
        let mut cable = Cable::new(
            CableType::Pair2,
            SystemType::Control,
            IoType::Analog,
            Device::new("TT 1", 4).unwrap(),
        );
        cable.add_device(Device::new("FT 2", 6).unwrap());
        cable
    }

    fn drawn(flip: bool) -> MemoryDrawing {
        let config = DrawingConfig::default();
        let mut drawing = MemoryDrawing::with_junction_symbols(&config);
        let placement = Placement {
            origin: Point::new(50.0, 0.0),
            terminal: 1,
            table: 1,
            flip,
        };
        draw_cable(&mut drawing, &config, &cable(), &placement, "JB").unwrap();
        drawing
    }

    #[test]
    fn flipping_matches_drawing_flipped() {
        let config = DrawingConfig::default();
        let mut drawing = drawn(false);
        let expected = drawn(true);

        let handles = drawing.handles();
        let summary = flip(&mut drawing, &config, &handles).unwrap();
        assert_eq!(summary, FlipSummary { mirrored: handles.len(), skipped: 0 });

        for handle in handles {
            let got = drawing.position(handle).unwrap();
            let want = expected.position(handle).unwrap();
            assert!((got.x - want.x).abs() < 1e-9, "{handle:?}: {got:?} != {want:?}");
            assert_eq!(got.y, want.y);
            if let Ok(state) = expected.property(handle, FLIP) {
                assert_eq!(drawing.property(handle, FLIP).unwrap(), state);
            }
        }
    }

    #[test]
    fn flipping_twice_restores_the_diagram() {
        let config = DrawingConfig::default();
        let mut drawing = drawn(false);
        let original = drawing.clone();
        let handles = drawing.handles();
        flip(&mut drawing, &config, &handles).unwrap();
        flip(&mut drawing, &config, &handles).unwrap();
        for handle in handles {
            let got = drawing.position(handle).unwrap();
            assert!((got.x - original.position(handle).unwrap().x).abs() < 1e-9);
        }
        let junction = drawing.instances_of("Junction Termination")[0];
        assert_eq!(drawing.property(junction, FLIP).unwrap(), PropertyValue::Short(0));
    }

    #[test]
    fn entities_without_position_are_skipped() {
        let config = DrawingConfig::default();
        let mut drawing = drawn(false);
        let line = drawing.add_entity(EntityKind::Other("line".to_owned()), Point::default());
        let text = drawing.add_entity(EntityKind::Text, Point::new(45.0, 1.0));
        let handles = drawing.handles();
        assert!(handles.contains(&line));

        let summary = flip(&mut drawing, &config, &handles).unwrap();
        assert_eq!(summary.skipped, 1);
        assert_eq!(drawing.position(text).unwrap(), Point::new(55.0, 1.0));
    }

    #[test]
    fn selection_needs_a_junction_termination() {
        let config = DrawingConfig::default();
        let mut drawing = MemoryDrawing::new();
        let point = drawing.add_entity(EntityKind::Point, Point::default());
        assert!(matches!(
            flip(&mut drawing, &config, &[point]),
            Err(FlipError::NoReference)
        ));
    }
}
