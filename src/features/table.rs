//! Static per-feature encoding table.
//!
//! The constants here mirror the ranges and label encodings the classifier was
//! trained on. Several were chosen empirically (Age capped at 80, inverted
//! Fried_Potato and Alcohol scales, Sex encoded Female=1.0); they must stay
//! exactly as they are for predictions to match the trained model.

use super::coerce::Coercion;
use super::{Feature, FEATURE_COUNT};

/// How a raw client value is turned into a model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Encoding {
    /// `(v - min) / (max - min)` clamped to [0, 1]. `min > max` inverts the scale.
    LinearRange { min: f64, max: f64 },
    /// Fixed label lookup.
    CategoryMap(&'static [(&'static str, f64)]),
    /// Numeric or boolean-like value passed through in its natural units.
    BooleanPass,
}

impl Encoding {
    /// Ordered coercion strategies; the first one that yields a value wins.
    pub fn plan(&self) -> &'static [Coercion] {
        match self {
            Encoding::LinearRange { .. } => &[Coercion::Rescale, Coercion::Fallback],
            Encoding::CategoryMap(_) => &[
                Coercion::Label,
                Coercion::TruncatedLabel,
                Coercion::Token,
                Coercion::Fallback,
            ],
            Encoding::BooleanPass => &[Coercion::Numeric, Coercion::Token, Coercion::Fallback],
        }
    }

    pub fn lookup(&self, label: &str) -> Option<f64> {
        match self {
            Encoding::CategoryMap(entries) => entries
                .iter()
                .find(|(key, _)| *key == label)
                .map(|(_, v)| *v),
            _ => None,
        }
    }
}

const GENERAL_HEALTH: &[(&str, f64)] = &[
    ("Excellent", 1.0),
    ("Very_Good", 0.75),
    ("Good", 0.5),
    ("Fair", 0.25),
    ("Poor", 0.0),
];

const CHECKUP: &[(&str, f64)] = &[
    ("Within 1 year", 1.0),
    ("1-2 years", 0.75),
    ("2-5 years", 0.5),
    ("5+ years", 0.25),
    ("Never", 0.0),
];

const DIABETES: &[(&str, f64)] = &[
    ("No", 0.0),
    ("Borderline", 0.33),
    ("During Pregnancy", 0.66),
    ("Yes", 1.0),
];

// Female=1.0, Male=0.0
const SEX: &[(&str, f64)] = &[("0", 1.0), ("1", 0.0)];

const BINARY: &[(&str, f64)] = &[("0", 0.0), ("1", 1.0)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSpec {
    pub feature: Feature,
    pub encoding: Encoding,
}

/// One [`FeatureSpec`] per canonical feature, indexed by [`Feature::index`].
#[derive(Debug, Clone)]
pub struct FeatureTable {
    specs: [FeatureSpec; FEATURE_COUNT],
}

impl FeatureTable {
    /// The encodings the deployed classifier was fit with.
    pub fn standard() -> Self {
        Self {
            specs: Feature::ALL.map(|feature| FeatureSpec {
                feature,
                encoding: standard_encoding(feature),
            }),
        }
    }

    pub fn spec(&self, feature: Feature) -> &FeatureSpec {
        &self.specs[feature.index()]
    }

    pub fn encoding(&self, feature: Feature) -> &Encoding {
        &self.spec(feature).encoding
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureSpec> {
        self.specs.iter()
    }
}

impl Default for FeatureTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_encoding(feature: Feature) -> Encoding {
    use Encoding::*;
    match feature {
        Feature::Weight => LinearRange { min: 30.0, max: 300.0 },
        Feature::Height => LinearRange { min: 90.0, max: 250.0 },
        Feature::Bmi => LinearRange { min: 10.0, max: 100.0 },
        Feature::Age => LinearRange { min: 18.0, max: 80.0 },
        Feature::Fruit => LinearRange { min: 0.0, max: 100.0 },
        Feature::GreenVegetables => LinearRange { min: 0.0, max: 100.0 },
        // Inverted so that a low raw intake lands at the model's "healthy" end.
        Feature::FriedPotato => LinearRange { min: 100.0, max: 0.0 },
        Feature::Alcohol => LinearRange { min: 30.0, max: 0.0 },
        Feature::GeneralHealth => CategoryMap(GENERAL_HEALTH),
        Feature::Checkup => CategoryMap(CHECKUP),
        Feature::Diabetes => CategoryMap(DIABETES),
        Feature::Sex => CategoryMap(SEX),
        Feature::Exercise => CategoryMap(BINARY),
        Feature::Smoking => CategoryMap(BINARY),
        Feature::SkinCancer
        | Feature::OtherCancer
        | Feature::Depression
        | Feature::Arthritis => BooleanPass,
    }
}
