use std::any::{type_name, Any, TypeId};

use bevy::prelude::*;
use bevy::reflect::{GetField, ReflectMut, ReflectRef, TypeRegistry};

use super::catalog::ScriptCatalog;
use super::error::{Result, ScriptError};

/// A script value built through reflection, not yet attached to an entity.
pub struct ScriptInstance {
    type_name: &'static str,
    type_id: TypeId,
    value: Box<dyn Reflect>,
}

impl std::fmt::Debug for ScriptInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptInstance")
            .field("type_name", &self.type_name)
            .field("value", &self.value)
            .finish()
    }
}

/// Build the default value of the script type called `name`.
pub fn construct(
    catalog: &ScriptCatalog,
    registry: &TypeRegistry,
    name: &str,
) -> Result<ScriptInstance> {
    let entry = catalog
        .resolve(name)
        .ok_or_else(|| ScriptError::UnknownType(name.to_string()))?;
    let registration = registry
        .get(entry.type_id)
        .ok_or_else(|| ScriptError::UnknownType(name.to_string()))?;
    let default = registration
        .data::<ReflectDefault>()
        .ok_or_else(|| ScriptError::NotConstructible(entry.ident.to_string()))?;
    Ok(ScriptInstance {
        type_name: entry.ident,
        type_id: entry.type_id,
        value: default.default(),
    })
}

/// [`construct`] then [`ScriptInstance::spawn`], using the world's catalog and registry.
pub fn spawn_by_name(world: &mut World, name: &str) -> Result<Entity> {
    let instance = {
        let registry = world.resource::<AppTypeRegistry>().read();
        let catalog = world.resource::<ScriptCatalog>();
        construct(catalog, &registry, name)?
    };
    instance.spawn(world)
}

impl ScriptInstance {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub(crate) fn value_mut(&mut self) -> &mut (dyn Reflect + 'static) {
        self.value.as_mut()
    }

    /// Read a public field by name.
    pub fn field<T: Reflect>(&self, name: &str) -> Result<&T> {
        let ReflectRef::Struct(s) = self.value.reflect_ref() else {
            return Err(ScriptError::NotAStruct(self.type_name.to_string()));
        };
        if s.field(name).is_none() {
            return Err(self.unknown_field(name));
        }
        s.get_field::<T>(name)
            .ok_or_else(|| self.mismatch::<T>(name))
    }

    /// Overwrite a public field by name. The value's type must match exactly.
    pub fn set_field<T: Reflect>(&mut self, name: &str, value: T) -> Result<()> {
        let unknown = self.unknown_field(name);
        let mismatch = self.mismatch::<T>(name);
        let ReflectMut::Struct(s) = self.value.reflect_mut() else {
            return Err(ScriptError::NotAStruct(self.type_name.to_string()));
        };
        if s.field(name).is_none() {
            return Err(unknown);
        }
        let slot = s.get_field_mut::<T>(name).ok_or(mismatch)?;
        *slot = value;
        Ok(())
    }

    fn unknown_field(&self, field: &str) -> ScriptError {
        ScriptError::UnknownField {
            type_name: self.type_name.to_string(),
            field: field.to_string(),
        }
    }

    fn mismatch<T>(&self, field: &str) -> ScriptError {
        ScriptError::FieldTypeMismatch {
            type_name: self.type_name.to_string(),
            field: field.to_string(),
            expected: type_name::<T>(),
        }
    }

    /// Attach the value to a new entity as a component.
    pub fn spawn(self, world: &mut World) -> Result<Entity> {
        let registry = world.resource::<AppTypeRegistry>().clone();
        let registry = registry.read();
        let reflect_component = registry
            .get_type_data::<ReflectComponent>(self.type_id)
            .ok_or_else(|| ScriptError::NotAComponent(self.type_name.to_string()))?;
        let mut entity = world.spawn_empty();
        reflect_component.insert(&mut entity, self.value.as_partial_reflect(), &registry);
        Ok(entity.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::components::{AlphaMarker, NumericEntity};

    fn setup() -> (ScriptCatalog, TypeRegistry) {
        let mut catalog = ScriptCatalog::default();
        catalog.insert::<NumericEntity>();
        catalog.insert::<AlphaMarker>();
        let mut registry = TypeRegistry::default();
        registry.register::<NumericEntity>();
        registry.register::<AlphaMarker>();
        (catalog, registry)
    }

    #[test]
    fn constructs_default_by_name() {
        let (catalog, registry) = setup();
        let inst = construct(&catalog, &registry, "NumericEntity").unwrap();
        assert_eq!(inst.type_name(), "NumericEntity");
        assert_eq!(inst.downcast_ref::<NumericEntity>(), Some(&NumericEntity::default()));
    }

    #[test]
    fn unknown_name_is_reported() {
        let (catalog, registry) = setup();
        let err = construct(&catalog, &registry, "Nope").unwrap_err();
        assert_eq!(err, ScriptError::UnknownType("Nope".into()));
    }

    #[test]
    fn registered_only_in_catalog_is_unknown() {
        let (mut catalog, registry) = setup();
        catalog.insert::<crate::core::components::BetaMarker>();
        let err = construct(&catalog, &registry, "BetaMarker").unwrap_err();
        assert_eq!(err, ScriptError::UnknownType("BetaMarker".into()));
    }

    #[test]
    fn field_access_by_name() {
        let (catalog, registry) = setup();
        let mut inst = construct(&catalog, &registry, "NumericEntity").unwrap();
        assert_eq!(*inst.field::<f32>("value").unwrap(), 5.0);

        inst.set_field("value", 12.25f32).unwrap();
        assert_eq!(inst.downcast_ref::<NumericEntity>().unwrap().render_line(), "MyPublicFloatVar = 12.25");

        assert!(matches!(
            inst.field::<f64>("value"),
            Err(ScriptError::FieldTypeMismatch { .. })
        ));
        assert!(matches!(
            inst.set_field("missing", 1.0f32),
            Err(ScriptError::UnknownField { .. })
        ));
    }

    #[test]
    fn marker_has_no_fields() {
        let (catalog, registry) = setup();
        let inst = construct(&catalog, &registry, "AlphaMarker").unwrap();
        assert!(inst.field::<f32>("value").is_err());
        assert!(inst.downcast_ref::<AlphaMarker>().is_some());
    }
}
