use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

use crate::value::CapturedValue;

/// Name of the synthetic variable holding a method's return value.
pub const RETURN_VARIABLE: &str = "__return";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: CapturedValue,
}

/// Ordered name -> value mapping of captured variables.
///
/// Order is discovery order as reported by the host engine. Pushing a name
/// that is already present replaces its value and keeps its original
/// position, so a set never holds two entries with the same name.
/// Serialized as the plain list of variables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<Variable>")]
pub struct VariableSet {
    variables: Vec<Variable>,
    positions: HashMap<String, usize>,
}

impl VariableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_variable(&mut self, name: impl Into<String>, value: CapturedValue) {
        let name = name.into();
        if let Some(&index) = self.positions.get(&name) {
            self.variables[index].value = value;
        } else {
            self.positions.insert(name.clone(), self.variables.len());
            self.variables.push(Variable { name, value });
        }
    }

    pub fn get(&self, name: &str) -> Option<&CapturedValue> {
        self.positions
            .get(name)
            .and_then(|&index| self.variables.get(index))
            .map(|v| &v.value)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }
}

impl PartialEq for VariableSet {
    fn eq(&self, other: &Self) -> bool {
        self.variables == other.variables
    }
}

impl Serialize for VariableSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.variables.serialize(serializer)
    }
}

impl From<Vec<Variable>> for VariableSet {
    fn from(variables: Vec<Variable>) -> Self {
        variables
            .into_iter()
            .map(|v| (v.name, v.value))
            .collect()
    }
}

impl<N: Into<String>> FromIterator<(N, CapturedValue)> for VariableSet {
    fn from_iter<I: IntoIterator<Item = (N, CapturedValue)>>(iter: I) -> Self {
        let mut set = VariableSet::new();
        for (name, value) in iter {
            set.push_variable(name, value);
        }
        set
    }
}

impl<'a> IntoIterator for &'a VariableSet {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.iter()
    }
}
