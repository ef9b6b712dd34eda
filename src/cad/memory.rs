use std::collections::{BTreeMap, HashMap};

use super::{Drawing, EntityKind, EntityProperty, Handle, Point, PropertyValue, Scale};
use crate::{config::DrawingConfig, error::CadError};

#[derive(Debug, Clone, Default)]
struct SymbolDef {
    labels: Vec<String>,
    properties: Vec<(String, PropertyValue)>,
}

#[derive(Debug, Clone)]
struct Entity {
    kind: EntityKind,
    symbol: Option<String>,
    dynamic_symbol: Option<String>,
    position: Point,
    scale: Scale,
    labels: Vec<(String, String)>,
    properties: Vec<(String, PropertyValue)>,
    layer: String,
    linetype: String,
    linetype_scale: f64,
    color: i16,
}

impl Entity {
    fn new(kind: EntityKind, position: Point) -> Self {
        Self {
            kind,
            symbol: None,
            dynamic_symbol: None,
            position,
            scale: Scale::default(),
            labels: Vec::new(),
            properties: Vec::new(),
            layer: "0".to_owned(),
            linetype: "ByLayer".to_owned(),
            linetype_scale: 1.0,
            color: 256,
        }
    }

    fn label_mut(&mut self, tag: &str) -> Option<&mut String> {
        self.labels
            .iter_mut()
            .find(|(t, _)| t.eq_ignore_ascii_case(tag))
            .map(|(_, text)| text)
    }

    fn property_mut(&mut self, name: &str) -> Option<&mut PropertyValue> {
        self.properties
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }
}

/// A drawing database held in memory.
///
/// Symbol definitions must be registered with [`MemoryDrawing::define_symbol`]
/// before they can be inserted; instances start with the definition's labels
/// empty and its dynamic properties at their defaults.
#[derive(Debug, Clone, Default)]
pub struct MemoryDrawing {
    definitions: HashMap<String, SymbolDef>,
    entities: BTreeMap<Handle, Entity>,
    next_handle: u64,
}

impl MemoryDrawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drawing with every symbol a junction diagram uses.
    pub fn with_junction_symbols(config: &DrawingConfig) -> Self {
        let mut drawing = Self::new();
        let flip_and_visibility = [
            ("Flip state1", PropertyValue::Short(0)),
            ("Visibility1", PropertyValue::from("1 Pair")),
        ];
        let mut field_device = flip_and_visibility.to_vec();
        field_device.push(("Distance1", PropertyValue::Real(0.0)));

        let symbols = &config.symbols;
        for (name, slots, properties) in [
            (&symbols.junction_termination, 9, &flip_and_visibility[..]),
            (&symbols.junction_termination_7_wire, 7, &flip_and_visibility[..]),
            (&symbols.field_device_termination, 9, &field_device[..]),
            (&symbols.field_device_termination_7_wire, 7, &field_device[..]),
        ] {
            let mut labels: Vec<String> = (1..=slots).map(crate::label::slot_attribute).collect();
            labels.push("CL".to_owned());
            let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
            drawing.define_symbol(name, &labels, properties);
        }
        drawing.define_symbol(&symbols.terminal, &["#"], &[]);
        drawing.define_symbol(&symbols.instrument, &["TAG", "NUMBER"], &[]);
        drawing
    }

    pub fn define_symbol(
        &mut self,
        name: &str,
        labels: &[&str],
        properties: &[(&str, PropertyValue)],
    ) -> &mut Self {
        let def = SymbolDef {
            labels: labels.iter().map(|l| (*l).to_owned()).collect(),
            properties: properties
                .iter()
                .map(|(n, v)| ((*n).to_owned(), v.clone()))
                .collect(),
        };
        self.definitions.insert(name.to_owned(), def);
        self
    }

    fn push(&mut self, entity: Entity) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        self.entities.insert(handle, entity);
        handle
    }

    fn instantiate(&mut self, name: &str, origin: Point) -> Result<Entity, CadError> {
        let def = self
            .definitions
            .get(name)
            .ok_or_else(|| CadError::NotFound("symbol", name.to_owned()))?;
        let mut entity = Entity::new(EntityKind::SymbolInstance, origin);
        entity.labels = def.labels.iter().map(|l| (l.clone(), String::new())).collect();
        entity.properties = def.properties.clone();
        Ok(entity)
    }

    /// Insert an instance of dynamic symbol `name` through anonymous definition `anonymous`.
    pub fn insert_anonymous(
        &mut self,
        name: &str,
        anonymous: &str,
        origin: Point,
    ) -> Result<Handle, CadError> {
        let mut entity = self.instantiate(name, origin)?;
        entity.symbol = Some(anonymous.to_owned());
        entity.dynamic_symbol = Some(name.to_owned());
        Ok(self.push(entity))
    }

    /// Add a non-symbol entity such as a point or a piece of text.
    pub fn add_entity(&mut self, kind: EntityKind, position: Point) -> Handle {
        self.push(Entity::new(kind, position))
    }

    pub fn handles(&self) -> Vec<Handle> {
        self.entities.keys().copied().collect()
    }

    /// Handles of every instance of `name`, in insertion order.
    pub fn instances_of(&self, name: &str) -> Vec<Handle> {
        self.entities
            .iter()
            .filter(|(_, e)| e.dynamic_symbol.as_deref().or(e.symbol.as_deref()) == Some(name))
            .map(|(h, _)| *h)
            .collect()
    }

    pub fn layer(&self, handle: Handle) -> Result<&str, CadError> {
        Ok(&self.entity(handle)?.layer)
    }

    pub fn linetype(&self, handle: Handle) -> Result<&str, CadError> {
        Ok(&self.entity(handle)?.linetype)
    }

    pub fn linetype_scale(&self, handle: Handle) -> Result<f64, CadError> {
        Ok(self.entity(handle)?.linetype_scale)
    }

    pub fn color(&self, handle: Handle) -> Result<i16, CadError> {
        Ok(self.entity(handle)?.color)
    }

    fn entity(&self, handle: Handle) -> Result<&Entity, CadError> {
        self.entities.get(&handle).ok_or(CadError::UnknownHandle)
    }

    fn entity_mut(&mut self, handle: Handle) -> Result<&mut Entity, CadError> {
        self.entities.get_mut(&handle).ok_or(CadError::UnknownHandle)
    }

    fn symbol_mut(&mut self, handle: Handle) -> Result<&mut Entity, CadError> {
        let entity = self.entity_mut(handle)?;
        if entity.kind == EntityKind::SymbolInstance {
            Ok(entity)
        } else {
            Err(CadError::UnsupportedEntity(entity.kind.to_string()))
        }
    }
}

impl Drawing for MemoryDrawing {
    fn insert_symbol(&mut self, name: &str, origin: Point) -> Result<Handle, CadError> {
        let mut entity = self.instantiate(name, origin)?;
        entity.symbol = Some(name.to_owned());
        Ok(self.push(entity))
    }

    fn set_property(
        &mut self,
        handle: Handle,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), CadError> {
        let property = self
            .symbol_mut(handle)?
            .property_mut(name)
            .ok_or_else(|| CadError::NotFound("property", name.to_owned()))?;
        *property = value;
        Ok(())
    }

    fn property(&self, handle: Handle, name: &str) -> Result<PropertyValue, CadError> {
        self.entity(handle)?
            .properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| CadError::NotFound("property", name.to_owned()))
    }

    fn set_label(&mut self, handle: Handle, tag: &str, text: &str) -> Result<(), CadError> {
        let label = self
            .symbol_mut(handle)?
            .label_mut(tag)
            .ok_or_else(|| CadError::NotFound("label", tag.to_owned()))?;
        *label = text.to_owned();
        Ok(())
    }

    fn label(&self, handle: Handle, tag: &str) -> Result<String, CadError> {
        self.entity(handle)?
            .labels
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(tag))
            .map(|(_, text)| text.clone())
            .ok_or_else(|| CadError::NotFound("label", tag.to_owned()))
    }

    fn set_entity_property(
        &mut self,
        handle: Handle,
        property: EntityProperty,
        value: &str,
    ) -> Result<(), CadError> {
        let entity = self.entity_mut(handle)?;
        match property {
            EntityProperty::Layer => entity.layer = value.to_owned(),
            EntityProperty::Linetype => entity.linetype = value.to_owned(),
            EntityProperty::LinetypeScale => {
                entity.linetype_scale = value
                    .parse()
                    .map_err(|_| CadError::InvalidValue(property.group_code(), value.to_owned()))?
            }
            EntityProperty::Color => {
                entity.color = value
                    .parse()
                    .map_err(|_| CadError::InvalidValue(property.group_code(), value.to_owned()))?
            }
        }
        Ok(())
    }

    fn entity_kind(&self, handle: Handle) -> Result<EntityKind, CadError> {
        Ok(self.entity(handle)?.kind.clone())
    }

    fn position(&self, handle: Handle) -> Result<Point, CadError> {
        let entity = self.entity(handle)?;
        if entity.kind.has_position() {
            Ok(entity.position)
        } else {
            Err(CadError::UnsupportedEntity(entity.kind.to_string()))
        }
    }

    fn set_position(&mut self, handle: Handle, position: Point) -> Result<(), CadError> {
        let entity = self.entity_mut(handle)?;
        if !entity.kind.has_position() {
            return Err(CadError::UnsupportedEntity(entity.kind.to_string()));
        }
        entity.position = position;
        Ok(())
    }

    fn scale(&self, handle: Handle) -> Result<Scale, CadError> {
        let entity = self.entity(handle)?;
        if entity.kind.has_scale() {
            Ok(entity.scale)
        } else {
            Err(CadError::UnsupportedEntity(entity.kind.to_string()))
        }
    }

    fn set_scale(&mut self, handle: Handle, scale: Scale) -> Result<(), CadError> {
        self.symbol_mut(handle)?.scale = scale;
        Ok(())
    }

    fn symbol_name(&self, handle: Handle) -> Result<String, CadError> {
        let entity = self.entity(handle)?;
        entity
            .symbol
            .clone()
            .ok_or_else(|| CadError::UnsupportedEntity(entity.kind.to_string()))
    }

    fn dynamic_symbol_name(&self, handle: Handle) -> Result<String, CadError> {
        let entity = self.entity(handle)?;
        entity
            .dynamic_symbol
            .clone()
            .ok_or_else(|| CadError::NotFound("dynamic symbol for", format!("{handle:?}")))
    }
}
