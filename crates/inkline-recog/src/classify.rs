//! Rule-based cell classification
//!
//! A [`Classifier`] is an ordered decision list: rules are evaluated top
//! to bottom and the first rule whose conditions all hold decides the
//! label. When no rule matches the classifier's fallback label is used.
//!
//! The baseline list ([`Classifier::default`]) is:
//!
//! 1. aspect ratio > 2.0 and ink count > 150 gives `I`
//! 2. aspect ratio < 2.0 and ink count > 100 gives `O`
//! 3. otherwise `Unknown`

use crate::RecogResult;
use crate::features::{CellFeatures, FEATURE_COUNT, feature_vector};
use std::borrow::Cow;
use std::fmt;

/// A classification label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(Cow<'static, str>);

impl Label {
    /// The vertical stroke label
    pub const I: Label = Label(Cow::Borrowed("I"));
    /// The round glyph label
    pub const O: Label = Label(Cow::Borrowed("O"));
    /// The fallback label
    pub const UNKNOWN: Label = Label(Cow::Borrowed("Unknown"));

    /// Create a label
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Get the label text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named entry of the feature vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Cell width divided by cell height
    AspectRatio,
    /// Ink pixels in the cell
    InkCount,
}

impl Feature {
    /// Position of the feature in the vector
    pub fn index(self) -> usize {
        match self {
            Feature::AspectRatio => 0,
            Feature::InkCount => 1,
        }
    }
}

/// Comparison operator of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Strictly greater than
    Greater,
    /// Greater than or equal
    GreaterOrEqual,
    /// Strictly less than
    Less,
    /// Less than or equal
    LessOrEqual,
}

/// One threshold test on a feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condition {
    pub feature: Feature,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl Condition {
    /// `feature > threshold`
    pub fn greater(feature: Feature, threshold: f64) -> Self {
        Self {
            feature,
            comparison: Comparison::Greater,
            threshold,
        }
    }

    /// `feature < threshold`
    pub fn less(feature: Feature, threshold: f64) -> Self {
        Self {
            feature,
            comparison: Comparison::Less,
            threshold,
        }
    }

    /// Evaluate the condition on a vector in schema order
    pub fn holds(&self, values: &[f64; FEATURE_COUNT]) -> bool {
        let v = values[self.feature.index()];
        match self.comparison {
            Comparison::Greater => v > self.threshold,
            Comparison::GreaterOrEqual => v >= self.threshold,
            Comparison::Less => v < self.threshold,
            Comparison::LessOrEqual => v <= self.threshold,
        }
    }
}

/// A rule: when every condition holds, the cell gets `label`
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub conditions: Vec<Condition>,
    pub label: Label,
}

impl Rule {
    /// Create a rule
    pub fn new(label: Label, conditions: Vec<Condition>) -> Self {
        Self { conditions, label }
    }

    /// Check whether every condition holds
    pub fn matches(&self, values: &[f64; FEATURE_COUNT]) -> bool {
        self.conditions.iter().all(|c| c.holds(values))
    }
}

/// Ordered decision list classifier
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    rules: Vec<Rule>,
    fallback: Label,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(vec![
            Rule::new(
                Label::I,
                vec![
                    Condition::greater(Feature::AspectRatio, 2.0),
                    Condition::greater(Feature::InkCount, 150.0),
                ],
            ),
            Rule::new(
                Label::O,
                vec![
                    Condition::less(Feature::AspectRatio, 2.0),
                    Condition::greater(Feature::InkCount, 100.0),
                ],
            ),
        ])
    }
}

impl Classifier {
    /// Create a classifier from an ordered rule list with the `Unknown`
    /// fallback
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            fallback: Label::UNKNOWN,
        }
    }

    /// Replace the fallback label
    pub fn with_fallback(mut self, label: Label) -> Self {
        self.fallback = label;
        self
    }

    /// The rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classify a cell; the first matching rule wins
    pub fn classify(&self, features: &CellFeatures) -> Label {
        self.decide(&features.as_array())
    }

    /// Classify a raw feature vector in schema order
    ///
    /// # Errors
    ///
    /// Returns [`crate::RecogError::InvalidFeatureVector`] when the vector
    /// has the wrong length and [`crate::RecogError::InvalidFeatureValue`]
    /// for a negative or non-finite entry.
    pub fn classify_vector(&self, values: &[f64]) -> RecogResult<Label> {
        Ok(self.decide(&feature_vector(values)?))
    }

    fn decide(&self, values: &[f64; FEATURE_COUNT]) -> Label {
        self.rules
            .iter()
            .find(|r| r.matches(values))
            .map_or_else(|| self.fallback.clone(), |r| r.label.clone())
    }
}
