pub mod host;

pub use host::{headless_app, HostPlugin};
