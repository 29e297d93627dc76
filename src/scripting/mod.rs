//! Reflection-backed scripting host: script types are discovered, constructed
//! and driven by name through Bevy's type registry.

use bevy::prelude::*;
use bevy::reflect::{GetTypeRegistration, TypePath};

pub mod catalog;
pub mod error;
pub mod instance;
pub mod methods;
pub mod systems;

pub use catalog::{ScriptCatalog, ScriptTypeEntry};
pub use error::{Result, ScriptError};
pub use instance::{construct, spawn_by_name, ScriptInstance};
pub use methods::{register_builtin, DynScript, ScriptMethodFn, ScriptMethods};
pub use systems::{IncrementValue, RenderRequest, ScriptSet, StartupScripts};

use crate::core::components::{AlphaMarker, BetaMarker, GammaMarker, NumericEntity};
use crate::core::config::HostConfig;

/// Register `T` for reflection and list it in the [`ScriptCatalog`].
pub fn register_script<T>(app: &mut App)
where
    T: Reflect + TypePath + GetTypeRegistration,
{
    app.register_type::<T>();
    app.world_mut()
        .get_resource_or_insert_with(ScriptCatalog::default)
        .insert::<T>();
}

pub struct ScriptingPlugin;

impl Plugin for ScriptingPlugin {
    fn build(&self, app: &mut App) {
        register_script::<NumericEntity>(app);
        register_script::<AlphaMarker>(app);
        register_script::<BetaMarker>(app);
        register_script::<GammaMarker>(app);

        let mut methods = ScriptMethods::default();
        register_builtin(&mut methods);

        app.init_resource::<HostConfig>()
            .init_resource::<StartupScripts>()
            .insert_resource(methods)
            .add_event::<IncrementValue>()
            .add_event::<RenderRequest>()
            .configure_sets(Update, (ScriptSet::Mutate, ScriptSet::Render).chain())
            .add_systems(
                Startup,
                (
                    systems::log_script_types.run_if(systems::list_types_enabled),
                    systems::spawn_startup_scripts,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    systems::apply_increments.in_set(ScriptSet::Mutate),
                    systems::render_requested.in_set(ScriptSet::Render),
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_registers_all_script_types() {
        let mut app = App::new();
        app.add_plugins(ScriptingPlugin);
        let catalog = app.world().resource::<ScriptCatalog>();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(
            names,
            vec!["NumericEntity", "AlphaMarker", "BetaMarker", "GammaMarker"]
        );

        let registry = app.world().resource::<AppTypeRegistry>().read();
        for entry in catalog.entries() {
            let reg = registry.get(entry.type_id).unwrap();
            assert!(reg.data::<ReflectComponent>().is_some(), "{} not a component", entry.ident);
            assert!(reg.data::<ReflectDefault>().is_some(), "{} has no default", entry.ident);
        }
    }
}
