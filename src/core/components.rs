use std::fmt;
use std::io::{self, Write};

use bevy::prelude::*;

/// Label printed in front of the value by [`NumericEntity::render`].
pub const VALUE_LABEL: &str = "MyPublicFloatVar";

/// Value a freshly constructed [`NumericEntity`] starts from.
pub const DEFAULT_VALUE: f32 = 5.0;

/// Script component holding a single float.
///
/// `value` is public so the host can read and write it by name through
/// reflection. The only mutator with script semantics is the crate-private
/// [`NumericEntity::increment`], reached through the scripting host's method
/// table or the [`IncrementValue`](crate::scripting::IncrementValue) event.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default, Debug)]
pub struct NumericEntity {
    pub value: f32,
}

impl Default for NumericEntity {
    fn default() -> Self {
        Self {
            value: DEFAULT_VALUE,
        }
    }
}

impl NumericEntity {
    /// Print `MyPublicFloatVar = <value>` (two decimals) to stdout.
    pub fn render(&self) {
        println!("{self}");
    }

    /// The line [`render`](Self::render) prints, without the newline.
    pub fn render_line(&self) -> String {
        self.to_string()
    }

    /// Same line as [`render`](Self::render), written to an arbitrary sink.
    pub fn render_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{self}")
    }

    /// Overflow to inf/NaN is allowed and not reported.
    pub(crate) fn increment(&mut self, delta: f32) {
        self.value += delta;
    }
}

impl fmt::Display for NumericEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{VALUE_LABEL} = {:.2}", self.value)
    }
}

/// Zero-field script type. Exists only to be discovered and constructed by name.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default, Debug)]
pub struct AlphaMarker;

#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default, Debug)]
pub struct BetaMarker;

#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default, Debug)]
pub struct GammaMarker;
