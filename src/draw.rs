//! Drawing placed cables through the host's [`Drawing`] interface.

use crate::{
    cable::{Cable, CableType},
    cad::{Drawing, EntityProperty, Point, PropertyValue},
    config::DrawingConfig,
    device::Device,
    error::CadError,
    label::{self, SlotLayout},
    layout::Placement,
};

const FLIP: &str = "Flip state1";
const VISIBILITY: &str = "Visibility1";
const DISTANCE: &str = "Distance1";
const CABLE_LABEL: &str = "CL";

/// Offset of a device's first terminal from the device origin.
const TERMINAL_OFFSET: (f64, f64) = (-0.3438, 0.125);
/// Offset of the instrument bubble from the device origin.
const INSTRUMENT_OFFSET: (f64, f64) = (-0.9375, -0.125);

fn mirror(flip: bool) -> f64 {
    if flip {
        -1.0
    } else {
        1.0
    }
}

/// Terminal rows used by a device and the text on each, top to bottom.
fn device_terminals(footprint: u32) -> &'static [(u32, &'static str)] {
    match footprint {
        4 => &[(0, "+"), (1, "-"), (2, "REF")],
        6 => &[(0, "L"), (1, "N"), (3, "5"), (4, "6")],
        _ => &[(0, "+"), (1, "-")],
    }
}

fn instrument_drop(footprint: u32) -> f64 {
    match footprint {
        4 => -0.25,
        6 => -0.5,
        _ => INSTRUMENT_OFFSET.1,
    }
}

pub fn draw_device(
    drawing: &mut impl Drawing,
    config: &DrawingConfig,
    device: &Device,
    origin: Point,
    flip: bool,
) -> Result<(), CadError> {
    let sign = mirror(flip);
    let first = origin.offset(TERMINAL_OFFSET.0 * sign, TERMINAL_OFFSET.1);
    for &(row, text) in device_terminals(device.footprint()) {
        let position = first.offset(0.0, -config.terminal_pitch * f64::from(row));
        let terminal = drawing.insert_symbol(&config.symbols.terminal, position)?;
        drawing.set_label(terminal, "#", text)?;
        drawing.set_entity_property(terminal, EntityProperty::Layer, &config.device_layer)?;
    }

    let bubble = origin.offset(
        INSTRUMENT_OFFSET.0 * sign,
        instrument_drop(device.footprint()),
    );
    let instrument = drawing.insert_symbol(&config.symbols.instrument, bubble)?;
    drawing.set_label(instrument, "TAG", device.tag())?;
    drawing.set_label(instrument, "NUMBER", device.number())?;
    Ok(())
}

/// Draw both termination symbols of `cable`, its field tags and its devices.
pub fn draw_cable(
    drawing: &mut impl Drawing,
    config: &DrawingConfig,
    cable: &Cable,
    placement: &Placement,
    junction_tag: &str,
) -> Result<(), CadError> {
    let symbols = &config.symbols;
    let (junction_symbol, field_symbol) = match cable.cable_type() {
        CableType::Wire7 => (
            &symbols.junction_termination_7_wire,
            &symbols.field_device_termination_7_wire,
        ),
        _ => (
            &symbols.junction_termination,
            &symbols.field_device_termination,
        ),
    };
    let field_origin = placement
        .origin
        .offset(-config.field_device_offset * mirror(placement.flip), 0.0);

    let junction = drawing.insert_symbol(junction_symbol, placement.origin)?;
    let field = drawing.insert_symbol(field_symbol, field_origin)?;

    let visibility = cable.visual_state().as_str();
    for handle in [junction, field] {
        drawing.set_property(handle, FLIP, placement.flip.into())?;
        drawing.set_property(handle, VISIBILITY, visibility.into())?;
        drawing.set_entity_property(handle, EntityProperty::Layer, &config.wire_layer)?;
    }
    drawing.set_property(
        field,
        DISTANCE,
        PropertyValue::Real(config.field_device_distance),
    )?;
    drawing.set_label(field, CABLE_LABEL, &cable.label())?;

    let slots = SlotLayout::from(cable.cable_type());
    for slot in 1..=slots.slots() {
        let terminal = slots.terminal(i64::from(placement.terminal), slot);
        let text = label::field_tag(junction_tag, placement.table, terminal);
        let attribute = label::slot_attribute(slot);
        drawing.set_label(junction, &attribute, &text)?;
        drawing.set_label(field, &attribute, &text)?;
    }

    let mut rows = 0;
    for device in cable.devices() {
        let origin = field_origin.offset(0.0, -config.terminal_pitch * f64::from(rows));
        draw_device(drawing, config, device, origin, placement.flip)?;
        rows += device.footprint();
    }
    Ok(())
}
