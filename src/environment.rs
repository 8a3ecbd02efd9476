use crate::checker::Type;
use crate::value::Value;
use std::collections::HashMap;

/// Flat name-to-binding map. Bindings are only ever added or overwritten,
/// never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment<T> {
    values: HashMap<String, T>,
}

pub type ValueEnv = Environment<Value>;
pub type TypeEnv = Environment<Type>;

impl<T> Default for Environment<T> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
        }
    }
}

impl<T> Environment<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a binding.
    pub fn declare(&mut self, name: &str, value: T) {
        self.values.insert(name.to_string(), value);
    }

    /// Overwrite an existing binding. Returns false, leaving the environment
    /// untouched, when `name` was never declared.
    pub fn assign(&mut self, name: &str, value: T) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bindings sorted by name.
    pub fn sorted(&self) -> Vec<(&str, &T)> {
        let mut bindings: Vec<_> = self
            .values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        bindings.sort_by_key(|(name, _)| *name);
        bindings
    }
}
