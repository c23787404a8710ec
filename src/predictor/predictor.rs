use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::error::PredictorError;
use super::model::ProbabilityModel;
use crate::encoding::{encode, Selection};
use crate::schema::ModelSchema;

/// Qualitative adoption-likelihood bucket, derived per prediction from
/// the unrounded probability. Inclusive lower bounds: 0.7 for
/// `Promising`, 0.4 for `NeedsAttention`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdoptionTier {
    Promising,
    NeedsAttention,
    AtRisk,
}

impl AdoptionTier {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.7 {
            Self::Promising
        } else if probability >= 0.4 {
            Self::NeedsAttention
        } else {
            Self::AtRisk
        }
    }

    /// The verdict line shown to the user. Visual treatment (success,
    /// warning, error styling) is the host UI's concern.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Promising => "Looks very promising!",
            Self::NeedsAttention => "It may need some extra attention.",
            Self::AtRisk => "It may be at risk.",
        }
    }
}

/// The outcome of one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Unrounded probability of adoption, in [0, 1]. Drives the tier.
    pub probability: f64,
    /// Probability as a percentage rounded to one decimal place, for
    /// display only.
    pub percentage: f64,
    /// Qualitative bucket for the verdict message.
    pub tier: AdoptionTier,
}

/// A thread-safe adoption-likelihood predictor over a trained binary
/// classifier.
///
/// Holds the loaded model and schema behind `Arc`, read-only after
/// construction, so one instance can serve any number of sessions
/// without synchronization. Build one with [`Predictor::builder`].
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::sync::Arc;
/// use pawcast::{
///     AgeGroup, AnimalType, Breed, Color, IntakeCondition, IntakeType, ModelSchema,
///     PredictorError, Predictor, ProbabilityModel, Selection, Sex, SpayedNeutered,
/// };
///
/// struct Fixed(f64);
///
/// impl ProbabilityModel for Fixed {
///     fn predict_probability(&self, _features: &[f32]) -> Result<f64, PredictorError> {
///         Ok(self.0)
///     }
/// }
///
/// let schema = ModelSchema::new(vec!["animal_type_Dog".into(), "is_spayed_neutered".into()]);
/// let predictor = Predictor::builder()
///     .with_model(Arc::new(Fixed(0.82)), schema)?
///     .build()?;
///
/// let prediction = predictor.predict(&Selection {
///     animal_type: AnimalType::Dog,
///     age_group: AgeGroup::YoungAdult,
///     spayed_neutered: SpayedNeutered::Yes,
///     breed: Breed::Mix,
///     color: Color::Brown,
///     intake_condition: IntakeCondition::Normal,
///     intake_type: IntakeType::Stray,
///     sex: Sex::Female,
/// })?;
/// assert_eq!(prediction.percentage, 82.0);
/// # Ok(())
/// # }
/// ```
pub struct Predictor {
    pub model_path: String,
    pub schema_path: String,
    pub(super) model: Arc<dyn ProbabilityModel>,
    pub(super) schema: ModelSchema,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Predictor>();
    }
};

impl fmt::Debug for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predictor")
            .field("model_path", &self.model_path)
            .field("schema_path", &self.schema_path)
            .field("num_features", &self.schema.len())
            .finish_non_exhaustive()
    }
}

impl Predictor {
    /// Creates a new PredictorBuilder for fluent construction
    pub fn builder() -> super::builder::PredictorBuilder {
        super::builder::PredictorBuilder::new()
    }

    /// Returns information about the predictor's current state
    pub fn info(&self) -> super::PredictorInfo {
        super::PredictorInfo {
            model_path: self.model_path.clone(),
            schema_path: self.schema_path.clone(),
            num_features: self.schema.len(),
            feature_names: self.schema.columns().to_vec(),
        }
    }

    /// The feature schema the loaded model was trained with.
    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Predicts the adoption likelihood for one animal.
    ///
    /// Encodes the selection, aligns the features to the model's column
    /// order (missing columns fill with 0), invokes the classifier, and
    /// buckets the probability into an [`AdoptionTier`]. Stateless and
    /// idempotent: the same selection always yields the same prediction.
    pub fn predict(&self, selection: &Selection) -> Result<Prediction, PredictorError> {
        let features = encode(selection);
        let aligned = self.schema.align(&features);
        let probability = self.model.predict_probability(&aligned)?;

        Ok(Prediction {
            probability,
            percentage: round_percentage(probability),
            tier: AdoptionTier::from_probability(probability),
        })
    }
}

/// Rounds a probability to one decimal place as a percentage.
fn round_percentage(probability: f64) -> f64 {
    (probability * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_exact() {
        assert_eq!(AdoptionTier::from_probability(1.0), AdoptionTier::Promising);
        assert_eq!(AdoptionTier::from_probability(0.7), AdoptionTier::Promising);
        assert_eq!(
            AdoptionTier::from_probability(0.699999),
            AdoptionTier::NeedsAttention
        );
        assert_eq!(
            AdoptionTier::from_probability(0.4),
            AdoptionTier::NeedsAttention
        );
        assert_eq!(AdoptionTier::from_probability(0.399999), AdoptionTier::AtRisk);
        assert_eq!(AdoptionTier::from_probability(0.0), AdoptionTier::AtRisk);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(round_percentage(0.123456), 12.3);
        assert_eq!(round_percentage(0.12355), 12.4);
        assert_eq!(round_percentage(0.0), 0.0);
        assert_eq!(round_percentage(1.0), 100.0);
    }

    #[test]
    fn tier_messages() {
        assert_eq!(AdoptionTier::Promising.message(), "Looks very promising!");
        assert_eq!(
            AdoptionTier::NeedsAttention.message(),
            "It may need some extra attention."
        );
        assert_eq!(AdoptionTier::AtRisk.message(), "It may be at risk.");
    }
}
