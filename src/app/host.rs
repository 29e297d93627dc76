use bevy::ecs::schedule::{ExecutorKind, ScheduleLabel};
use bevy::prelude::*;

use crate::core::config::HostConfig;
use crate::scripting::ScriptingPlugin;

/// Top-level plugin: config checks plus the scripting host.
pub struct HostPlugin;

impl Plugin for HostPlugin {
    fn build(&self, app: &mut App) {
        for label in [PreStartup.intern(), Startup.intern(), Update.intern()] {
            app.edit_schedule(label, |schedule| {
                schedule.set_executor_kind(ExecutorKind::SingleThreaded);
            });
        }
        app.init_resource::<HostConfig>()
            .add_systems(PreStartup, report_config_warnings)
            .add_plugins(ScriptingPlugin);
    }
}

fn report_config_warnings(cfg: Res<HostConfig>) {
    for w in cfg.validate() {
        warn!(target: "config", "{w}");
    }
}

/// Windowless app with `cfg` installed. Logging is left to the caller since
/// the global subscriber can only be set once per process.
pub fn headless_app(cfg: HostConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(cfg)
        .add_plugins(HostPlugin);
    app
}
