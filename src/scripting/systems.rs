use bevy::prelude::*;

use super::catalog::ScriptCatalog;
use super::instance::spawn_by_name;
use crate::core::components::NumericEntity;
use crate::core::config::HostConfig;

/// Add `delta` to the [`NumericEntity`] on `target`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct IncrementValue {
    pub target: Entity,
    pub delta: f32,
}

/// Print the current value of the [`NumericEntity`] on `target`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    pub target: Entity,
}

/// Increments run before renders within a frame, so a render requested in the
/// same frame as an increment sees the new value.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum ScriptSet {
    Mutate,
    Render,
}

/// Entities created from `HostConfig::startup_scripts`, in config order.
#[derive(Resource, Debug, Default, Clone)]
pub struct StartupScripts(pub Vec<(String, Entity)>);

pub fn apply_increments(
    mut events: EventReader<IncrementValue>,
    mut q: Query<&mut NumericEntity>,
) {
    for ev in events.read() {
        match q.get_mut(ev.target) {
            Ok(mut entity) => {
                entity.increment(ev.delta);
                debug!(target: "scripting", "{:?} += {} -> {}", ev.target, ev.delta, entity.value);
            }
            Err(_) => warn!(
                target: "scripting",
                "IncrementValue for {:?} ignored: no NumericEntity", ev.target
            ),
        }
    }
}

pub fn render_requested(mut events: EventReader<RenderRequest>, q: Query<&NumericEntity>) {
    for ev in events.read() {
        match q.get(ev.target) {
            Ok(entity) => entity.render(),
            Err(_) => warn!(
                target: "scripting",
                "RenderRequest for {:?} ignored: no NumericEntity", ev.target
            ),
        }
    }
}

pub fn log_script_types(catalog: Res<ScriptCatalog>, cfg: Res<HostConfig>) {
    info!(target: "scripting", "{} script type(s) registered", catalog.len());
    for line in catalog.qualified(&cfg.script_namespace) {
        info!(target: "scripting", "{line}");
    }
}

pub fn list_types_enabled(cfg: Res<HostConfig>) -> bool {
    cfg.list_types_on_startup
}

/// Exclusive: construction by name needs the registry and world at once.
pub fn spawn_startup_scripts(world: &mut World) {
    let names = world.resource::<HostConfig>().startup_scripts.clone();
    let mut spawned = Vec::with_capacity(names.len());
    for name in names {
        match spawn_by_name(world, &name) {
            Ok(entity) => {
                info!(target: "scripting", "spawned startup script {name} as {entity:?}");
                spawned.push((name, entity));
            }
            Err(e) => warn!(target: "scripting", "skipping startup script: {e}"),
        }
    }
    world.resource_mut::<StartupScripts>().0.extend(spawned);
}
