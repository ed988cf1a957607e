use std::collections::HashMap;

use log::debug;

use super::Blueprint;
use crate::FilterError;
use crate::rule::Rule;
use crate::value::FilterValue;

/// Blueprints keyed by field, in registration order.
///
/// Registration order is the order a field picker shows them in.
#[derive(Debug)]
pub struct BlueprintRegistry<E> {
    blueprints: Vec<Blueprint<E>>,
    index: HashMap<String, usize>,
}

impl<E> Default for BlueprintRegistry<E> {
    fn default() -> Self {
        Self {
            blueprints: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<E> BlueprintRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blueprints(blueprints: Vec<Blueprint<E>>) -> Result<Self, FilterError> {
        let mut registry = Self::new();
        for blueprint in blueprints {
            registry.register(blueprint)?;
        }
        Ok(registry)
    }

    /// Add a blueprint. Each key may be registered once.
    pub fn register(&mut self, blueprint: Blueprint<E>) -> Result<(), FilterError> {
        let key = blueprint.key().to_string();
        if self.index.contains_key(&key) {
            return Err(FilterError::DuplicateField { field: key });
        }

        debug!("Registered {} blueprint '{}'", blueprint.category(), key);
        self.index.insert(key, self.blueprints.len());
        self.blueprints.push(blueprint);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Blueprint<E>> {
        self.index.get(key).map(|&i| &self.blueprints[i])
    }

    /// Like [`get`](Self::get), but an unknown key is an error.
    pub fn resolve(&self, key: &str) -> Result<&Blueprint<E>, FilterError> {
        self.get(key).ok_or_else(|| FilterError::UnknownField {
            field: key.to_string(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Look up the field's blueprint and build a rule with it.
    pub fn create_rule(
        &self,
        key: &str,
        relation: &str,
        value: Option<FilterValue>,
    ) -> Result<Rule<E>, FilterError> {
        self.resolve(key)?.create_rule(relation, value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.blueprints.iter().map(|b| b.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Blueprint<E>> {
        self.blueprints.iter()
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}
