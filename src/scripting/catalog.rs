use std::any::TypeId;

use bevy::prelude::*;
use bevy::reflect::TypePath;

/// One type the host exposes to scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptTypeEntry {
    pub ident: &'static str,
    pub type_path: &'static str,
    pub type_id: TypeId,
}

/// Script types in registration order. Filled by [`register_script`](super::register_script).
///
/// The reflection registry knows every reflected type in the app; the catalog
/// narrows that down to the ones scripts may discover and construct.
#[derive(Resource, Debug, Default, Clone)]
pub struct ScriptCatalog {
    entries: Vec<ScriptTypeEntry>,
}

impl ScriptCatalog {
    pub fn insert<T: TypePath + 'static>(&mut self) {
        let type_id = TypeId::of::<T>();
        if self.entries.iter().any(|e| e.type_id == type_id) {
            return;
        }
        self.entries.push(ScriptTypeEntry {
            ident: T::short_type_path(),
            type_path: T::type_path(),
            type_id,
        });
    }

    /// Look up by short name (`NumericEntity`) or full type path.
    pub fn resolve(&self, name: &str) -> Option<&ScriptTypeEntry> {
        self.entries
            .iter()
            .find(|e| e.ident == name || e.type_path == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.ident)
    }

    pub fn entries(&self) -> &[ScriptTypeEntry] {
        &self.entries
    }

    /// `<namespace>.<Type>` for every entry, in registration order.
    pub fn qualified(&self, namespace: &str) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{namespace}.{}", e.ident))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
