//! Hyperparameter grids.

use std::fmt;

use ledger_spi::{ParamValue, Params};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered list of hyperparameter names with candidate values
///
/// [`expand`](HyperparameterGrid::expand) enumerates the full Cartesian
/// product in key order with the last key varying fastest. Duplicate
/// candidates are kept as distinct points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HyperparameterGrid {
    entries: Vec<(String, Vec<ParamValue>)>,
}

impl HyperparameterGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hyperparameter, or replace its candidates if already present.
    pub fn with<V: Into<ParamValue>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.set(name, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, values: Vec<ParamValue>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = values,
            None => self.entries.push((name, values)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self, name: &str) -> Option<&[ParamValue]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Number of points. An empty grid has one point, the empty one.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn expand(&self) -> Vec<Params> {
        let mut points = vec![Params::new()];
        for (name, values) in &self.entries {
            let mut next = Vec::with_capacity(points.len() * values.len());
            for point in &points {
                for value in values {
                    next.push(point.clone().with(name.clone(), value.clone()));
                }
            }
            points = next;
        }
        points
    }
}

impl Serialize for HyperparameterGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

struct GridVisitor;

impl<'de> Visitor<'de> for GridVisitor {
    type Value = HyperparameterGrid;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of hyperparameter names to arrays of candidate values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut grid = HyperparameterGrid::new();
        while let Some((name, values)) = access.next_entry::<String, Vec<ParamValue>>()? {
            grid.set(name, values);
        }
        Ok(grid)
    }
}

impl<'de> Deserialize<'de> for HyperparameterGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(GridVisitor)
    }
}
