//! Canonical feature set, per-feature encodings and client-value normalization.

mod coerce;
mod normalizer;
mod table;

pub use coerce::{Coercion, RawValue};
pub use normalizer::{FeatureNormalizer, InputRecord, Normalized};
pub use table::{Encoding, FeatureSpec, FeatureTable};

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of features the trained model consumes.
pub const FEATURE_COUNT: usize = 18;

/// One of the 18 model inputs, declared in the order the model was fit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    GeneralHealth,
    Checkup,
    Exercise,
    SkinCancer,
    OtherCancer,
    Depression,
    Diabetes,
    Arthritis,
    Sex,
    Age,
    Height,
    Weight,
    Bmi,
    Smoking,
    Alcohol,
    Fruit,
    GreenVegetables,
    FriedPotato,
}

impl Feature {
    /// Canonical model order. Permuting this corrupts every prediction.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::GeneralHealth,
        Feature::Checkup,
        Feature::Exercise,
        Feature::SkinCancer,
        Feature::OtherCancer,
        Feature::Depression,
        Feature::Diabetes,
        Feature::Arthritis,
        Feature::Sex,
        Feature::Age,
        Feature::Height,
        Feature::Weight,
        Feature::Bmi,
        Feature::Smoking,
        Feature::Alcohol,
        Feature::Fruit,
        Feature::GreenVegetables,
        Feature::FriedPotato,
    ];

    /// Field name as sent by clients and as stored in the model's feature names.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::GeneralHealth => "General_Health",
            Feature::Checkup => "Checkup",
            Feature::Exercise => "Exercise",
            Feature::SkinCancer => "Skin_Cancer",
            Feature::OtherCancer => "Other_Cancer",
            Feature::Depression => "Depression",
            Feature::Diabetes => "Diabetes",
            Feature::Arthritis => "Arthritis",
            Feature::Sex => "Sex",
            Feature::Age => "Age",
            Feature::Height => "Height",
            Feature::Weight => "Weight",
            Feature::Bmi => "BMI",
            Feature::Smoking => "Smoking",
            Feature::Alcohol => "Alcohol",
            Feature::Fruit => "Fruit",
            Feature::GreenVegetables => "Green_Vegetables",
            Feature::FriedPotato => "Fried_Potato",
        }
    }

    /// Position in [`Feature::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFeature(pub String);

impl fmt::Display for UnknownFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown feature: {}", self.0)
    }
}

impl std::error::Error for UnknownFeature {}

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}

/// Fixed-size model input: one value per [`Feature`], in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Single-row batch `[1, 18]` as handed to the model provider.
    pub fn to_batch(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, FEATURE_COUNT), |(_, j)| self.values[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_model_feature_names() {
        let names: Vec<&str> = Feature::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            [
                "General_Health", "Checkup", "Exercise", "Skin_Cancer", "Other_Cancer",
                "Depression", "Diabetes", "Arthritis", "Sex", "Age", "Height", "Weight",
                "BMI", "Smoking", "Alcohol", "Fruit", "Green_Vegetables", "Fried_Potato",
            ]
        );
        for (i, f) in Feature::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!("BMI".parse::<Feature>(), Ok(Feature::Bmi));
        assert_eq!("Fried_Potato".parse::<Feature>(), Ok(Feature::FriedPotato));
        assert!("bmi".parse::<Feature>().is_err());
        assert!("Heart_Disease".parse::<Feature>().is_err());
    }

    #[test]
    fn batch_is_one_row() {
        let mut values = [0.0; FEATURE_COUNT];
        values[Feature::Age.index()] = 0.5;
        let fv = FeatureVector::new(values);
        let batch = fv.to_batch();
        assert_eq!(batch.shape(), &[1, FEATURE_COUNT]);
        assert_eq!(batch[[0, Feature::Age.index()]], 0.5);
        assert_eq!(fv.get(Feature::Age), 0.5);
    }
}
