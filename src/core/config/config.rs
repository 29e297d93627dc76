use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, io, path::Path};

/// Base config shipped with the host.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/host.ron";
/// Optional per-machine overlay, merged over the base file when present.
pub const LOCAL_CONFIG_PATH: &str = "assets/config/host.local.ron";

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    /// `EnvFilter` string handed to `LogPlugin`.
    pub log_filter: String,
    pub list_types_on_startup: bool,
    /// Script types constructed (and spawned) once at startup, by name.
    pub startup_scripts: Vec<String>,
    /// Prefix used when listing discovered types (`<namespace>.<Type>`).
    pub script_namespace: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
            list_types_on_startup: true,
            startup_scripts: Vec::new(),
            script_namespace: "Tests".into(),
        }
    }
}

impl HostConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    /// Merge RON maps from `paths` in order (later keys win), then deserialize.
    ///
    /// Returns the config, the files that contributed, and any errors. Missing
    /// files are skipped without an error so overlays can be optional.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();

        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }

        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }

        match merged {
            Some(val) => match val.into_rust::<HostConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (HostConfig::default(), used, errors)
                }
            },
            None => (HostConfig::default(), used, errors),
        }
    }

    /// Non-fatal problems worth a warning at startup.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.log_filter.trim().is_empty() {
            w.push("log_filter is empty; logging falls back to Bevy's default".into());
        }
        if self.script_namespace.trim().is_empty() {
            w.push("script_namespace is empty; type listing will start with '.'".into());
        }
        let mut seen: Vec<&str> = Vec::new();
        for name in &self.startup_scripts {
            if seen.contains(&name.as_str()) {
                w.push(format!("startup_scripts lists '{name}' more than once"));
            } else {
                seen.push(name);
            }
        }
        w
    }
}
