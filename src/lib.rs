pub mod app;
pub mod core;
pub mod scripting;

// Curated re-exports
pub use app::{headless_app, HostPlugin};
pub use core::components::{AlphaMarker, BetaMarker, GammaMarker, NumericEntity};
pub use core::config::HostConfig;
pub use scripting::{ScriptCatalog, ScriptError, ScriptInstance, ScriptMethods, ScriptingPlugin};
