use std::any::TypeId;

use bevy::prelude::*;

use super::error::{Result, ScriptError};
use super::instance::ScriptInstance;
use crate::core::components::NumericEntity;

/// Native method callable on a script value. `args` has already been checked
/// against the registered arity.
pub type ScriptMethodFn = fn(&mut DynScript, &[f32]) -> Result<()>;

/// Reflected script value as seen by a native method.
pub type DynScript = dyn Reflect + 'static;

#[derive(Clone, Copy)]
struct MethodEntry {
    type_id: TypeId,
    name: &'static str,
    arity: usize,
    call: ScriptMethodFn,
}

/// Name-keyed table of native calls, one namespace per script type.
#[derive(Resource, Default, Clone)]
pub struct ScriptMethods {
    entries: Vec<MethodEntry>,
}

impl std::fmt::Debug for ScriptMethods {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.name, e.arity)))
            .finish()
    }
}

impl ScriptMethods {
    /// Re-registering the same (type, name) pair replaces the earlier entry.
    pub fn register<T: 'static>(&mut self, name: &'static str, arity: usize, call: ScriptMethodFn) {
        let type_id = TypeId::of::<T>();
        let entry = MethodEntry {
            type_id,
            name,
            arity,
            call,
        };
        match self
            .entries
            .iter_mut()
            .find(|e| e.type_id == type_id && e.name == name)
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn has(&self, type_id: TypeId, name: &str) -> bool {
        self.lookup(type_id, name).is_some()
    }

    pub fn methods_of(&self, type_id: TypeId) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.type_id == type_id)
            .map(|e| e.name)
    }

    pub fn invoke(&self, instance: &mut ScriptInstance, method: &str, args: &[f32]) -> Result<()> {
        let entry = self
            .lookup(instance.type_id(), method)
            .ok_or_else(|| ScriptError::UnknownMethod {
                type_name: instance.type_name().to_string(),
                method: method.to_string(),
            })?;
        if args.len() != entry.arity {
            return Err(ScriptError::ArgumentCount {
                method: method.to_string(),
                expected: entry.arity,
                got: args.len(),
            });
        }
        (entry.call)(instance.value_mut(), args)
    }

    fn lookup(&self, type_id: TypeId, name: &str) -> Option<&MethodEntry> {
        self.entries
            .iter()
            .find(|e| e.type_id == type_id && e.name == name)
    }
}

fn numeric<'a>(target: &'a mut DynScript, method: &'static str) -> Result<&'a mut NumericEntity> {
    target
        .downcast_mut::<NumericEntity>()
        .ok_or(ScriptError::MethodTargetMismatch {
            method,
            expected: "NumericEntity",
        })
}

fn increment_value(target: &mut DynScript, args: &[f32]) -> Result<()> {
    let entity = numeric(target, "IncrementValue")?;
    for delta in args {
        entity.increment(*delta);
    }
    Ok(())
}

fn render(target: &mut DynScript, _args: &[f32]) -> Result<()> {
    numeric(target, "Render")?.render();
    Ok(())
}

/// The native calls every host exposes on [`NumericEntity`].
pub fn register_builtin(methods: &mut ScriptMethods) {
    methods.register::<NumericEntity>("IncrementValue", 1, increment_value);
    methods.register::<NumericEntity>("Render", 0, render);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::components::AlphaMarker;
    use crate::scripting::catalog::ScriptCatalog;
    use crate::scripting::instance::construct;
    use bevy::reflect::TypeRegistry;

    fn instance(name: &str) -> ScriptInstance {
        let mut catalog = ScriptCatalog::default();
        catalog.insert::<NumericEntity>();
        catalog.insert::<AlphaMarker>();
        let mut registry = TypeRegistry::default();
        registry.register::<NumericEntity>();
        registry.register::<AlphaMarker>();
        construct(&catalog, &registry, name).unwrap()
    }

    fn builtin() -> ScriptMethods {
        let mut methods = ScriptMethods::default();
        register_builtin(&mut methods);
        methods
    }

    #[test]
    fn increment_through_table() {
        let methods = builtin();
        let mut inst = instance("NumericEntity");
        methods.invoke(&mut inst, "IncrementValue", &[2.5]).unwrap();
        assert_eq!(
            inst.downcast_ref::<NumericEntity>().unwrap().render_line(),
            "MyPublicFloatVar = 7.50"
        );
    }

    #[test]
    fn arity_is_checked() {
        let methods = builtin();
        let mut inst = instance("NumericEntity");
        assert!(methods.has(TypeId::of::<NumericEntity>(), "IncrementValue"));
        let err = methods.invoke(&mut inst, "IncrementValue", &[]).unwrap_err();
        assert_eq!(
            err,
            ScriptError::ArgumentCount {
                method: "IncrementValue".into(),
                expected: 1,
                got: 0
            }
        );
        assert_eq!(*inst.field::<f32>("value").unwrap(), 5.0);
    }

    #[test]
    fn markers_expose_no_methods() {
        let methods = builtin();
        let mut inst = instance("AlphaMarker");
        assert!(methods.methods_of(TypeId::of::<AlphaMarker>()).next().is_none());
        assert!(matches!(
            methods.invoke(&mut inst, "Render", &[]),
            Err(ScriptError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn method_bound_to_wrong_type_reports_mismatch() {
        let mut methods = builtin();
        methods.register::<AlphaMarker>("IncrementValue", 1, increment_value);
        let mut inst = instance("AlphaMarker");
        let err = methods.invoke(&mut inst, "IncrementValue", &[1.0]).unwrap_err();
        assert_eq!(
            err,
            ScriptError::MethodTargetMismatch {
                method: "IncrementValue",
                expected: "NumericEntity",
            }
        );
    }

    #[test]
    fn register_replaces_same_name() {
        fn noop(_: &mut DynScript, _: &[f32]) -> Result<()> {
            Ok(())
        }
        let mut methods = builtin();
        methods.register::<NumericEntity>("IncrementValue", 0, noop);
        let mut inst = instance("NumericEntity");
        methods.invoke(&mut inst, "IncrementValue", &[]).unwrap();
        assert_eq!(*inst.field::<f32>("value").unwrap(), 5.0);
        assert_eq!(methods.methods_of(TypeId::of::<NumericEntity>()).count(), 2);
    }
}
