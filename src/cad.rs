//! What the layout engine needs from the CAD host.
//!
//! The host owns the drawing database; every call here is a discrete,
//! immediately committed operation.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::CadError;

mod memory;

pub use memory::MemoryDrawing;

/// Names of anonymous symbol definitions start with this character.
pub const ANONYMOUS_PREFIX: char = '*';

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }
}

/// Opaque reference to an entity in the host drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u64);

/// Value of a dynamic symbol property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Short(i16),
    Real(f64),
    Text(String),
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Short(i16::from(value))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Real(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_owned())
    }
}

/// General entity properties, keyed like their DXF group codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityProperty {
    Layer,
    Linetype,
    LinetypeScale,
    Color,
}

impl EntityProperty {
    pub fn group_code(self) -> i16 {
        match self {
            Self::Layer => 8,
            Self::Linetype => 6,
            Self::LinetypeScale => 48,
            Self::Color => 62,
        }
    }
}

impl TryFrom<i16> for EntityProperty {
    type Error = CadError;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            8 => Ok(Self::Layer),
            6 => Ok(Self::Linetype),
            48 => Ok(Self::LinetypeScale),
            62 => Ok(Self::Color),
            code => Err(CadError::Unsupported(code)),
        }
    }
}

/// Kinds of entity a selection can contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    SymbolInstance,
    Point,
    Text,
    MText,
    Circle,
    Other(String),
}

impl EntityKind {
    pub fn has_position(&self) -> bool {
        !matches!(self, EntityKind::Other(_))
    }

    pub fn has_scale(&self) -> bool {
        matches!(self, EntityKind::SymbolInstance)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::SymbolInstance => write!(f, "symbol instance"),
            EntityKind::Point => write!(f, "point"),
            EntityKind::Text => write!(f, "text"),
            EntityKind::MText => write!(f, "multiline text"),
            EntityKind::Circle => write!(f, "circle"),
            EntityKind::Other(name) => write!(f, "{name}"),
        }
    }
}

pub trait Drawing {
    /// Insert an instance of the symbol definition `name` at `origin`.
    fn insert_symbol(&mut self, name: &str, origin: Point) -> Result<Handle, CadError>;

    fn set_property(
        &mut self,
        handle: Handle,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), CadError>;

    fn property(&self, handle: Handle, name: &str) -> Result<PropertyValue, CadError>;

    fn set_label(&mut self, handle: Handle, tag: &str, text: &str) -> Result<(), CadError>;

    fn label(&self, handle: Handle, tag: &str) -> Result<String, CadError>;

    fn set_entity_property(
        &mut self,
        handle: Handle,
        property: EntityProperty,
        value: &str,
    ) -> Result<(), CadError>;

    fn entity_kind(&self, handle: Handle) -> Result<EntityKind, CadError>;

    fn position(&self, handle: Handle) -> Result<Point, CadError>;

    fn set_position(&mut self, handle: Handle, position: Point) -> Result<(), CadError>;

    fn scale(&self, handle: Handle) -> Result<Scale, CadError>;

    fn set_scale(&mut self, handle: Handle, scale: Scale) -> Result<(), CadError>;

    /// Name of the definition `handle` immediately references, possibly anonymous.
    fn symbol_name(&self, handle: Handle) -> Result<String, CadError>;

    /// Name of the dynamic definition an anonymous instance was generated from.
    fn dynamic_symbol_name(&self, handle: Handle) -> Result<String, CadError>;
}

/// Symbol definition name of `handle`, looking through anonymous definitions.
pub fn block_name(drawing: &impl Drawing, handle: Handle) -> Result<String, CadError> {
    let name = drawing.symbol_name(handle)?;
    if name.starts_with(ANONYMOUS_PREFIX) {
        drawing.dynamic_symbol_name(handle)
    } else {
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(8, Ok(EntityProperty::Layer))]
    #[case(6, Ok(EntityProperty::Linetype))]
    #[case(48, Ok(EntityProperty::LinetypeScale))]
    #[case(62, Ok(EntityProperty::Color))]
    #[case(10, Err(CadError::Unsupported(10)))]
    fn property_from_group_code(#[case] code: i16, #[case] expected: Result<EntityProperty, CadError>) {
        let property = EntityProperty::try_from(code);
        assert_eq!(property, expected);
        if let Ok(property) = property {
            assert_eq!(property.group_code(), code);
        }
    }

    #[rstest]
    #[case(EntityKind::SymbolInstance, true, true)]
    #[case(EntityKind::Point, true, false)]
    #[case(EntityKind::Text, true, false)]
    #[case(EntityKind::MText, true, false)]
    #[case(EntityKind::Circle, true, false)]
    #[case(EntityKind::Other("line".to_owned()), false, false)]
    fn entity_capabilities(#[case] kind: EntityKind, #[case] position: bool, #[case] scale: bool) {
        assert_eq!(kind.has_position(), position);
        assert_eq!(kind.has_scale(), scale);
    }

    #[test]
    fn resolves_anonymous_block_names() {
        let mut drawing = MemoryDrawing::new();
        drawing.define_symbol("Junction Termination", &["FLDTAG1"], &[]);
        let plain = drawing
            .insert_symbol("Junction Termination", Point::default())
            .unwrap();
        let anon = drawing
            .insert_anonymous("Junction Termination", "*U12", Point::default())
            .unwrap();
        assert_eq!(drawing.symbol_name(anon).unwrap(), "*U12");
        assert_eq!(block_name(&drawing, anon).unwrap(), "Junction Termination");
        assert_eq!(block_name(&drawing, plain).unwrap(), "Junction Termination");
    }
}
