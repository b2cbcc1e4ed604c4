//! Feature normalizer: raw client record → canonical feature vector.

use super::coerce::{Coercion, RawValue};
use super::table::{Encoding, FeatureTable};
use super::{Feature, FeatureVector, FEATURE_COUNT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::trace;

static NULL: Value = Value::Null;

/// Client-supplied attributes keyed by field name. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputRecord(HashMap<String, Value>);

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Value for `field`, or `Null` when absent.
    pub fn get(&self, field: &str) -> &Value {
        self.0.get(field).unwrap_or(&NULL)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, Value>> for InputRecord {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for InputRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A normalized value together with the strategy that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    pub value: f64,
    pub via: Coercion,
}

#[derive(Debug, Clone, Default)]
pub struct FeatureNormalizer {
    table: FeatureTable,
}

impl FeatureNormalizer {
    pub fn new(table: FeatureTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FeatureTable {
        &self.table
    }

    /// Normalize `value` for the field named `field`. Never fails; names outside
    /// the canonical set are treated as boolean pass-through fields.
    pub fn normalize(&self, value: &Value, field: &str) -> f64 {
        let encoding = match field.parse::<Feature>() {
            Ok(feature) => self.table.encoding(feature),
            Err(_) => &Encoding::BooleanPass,
        };
        resolve(encoding, value).value
    }

    pub fn normalize_traced(&self, value: &Value, feature: Feature) -> Normalized {
        let out = resolve(self.table.encoding(feature), value);
        trace!(feature = %feature, raw = %value, value = out.value, via = ?out.via, "normalized");
        out
    }

    /// Build the model input vector, fetching each canonical feature in order.
    pub fn assemble(&self, input: &InputRecord) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            values[feature.index()] = self.normalize_traced(input.get(feature.as_str()), feature).value;
        }
        FeatureVector::new(values)
    }
}

fn resolve(encoding: &Encoding, value: &Value) -> Normalized {
    let raw = RawValue::new(value);
    encoding
        .plan()
        .iter()
        .find_map(|step| step.apply(encoding, &raw).map(|value| Normalized { value, via: *step }))
        .unwrap_or(Normalized {
            value: 0.0,
            via: Coercion::Fallback,
        })
}
