//! A thread-safe adoption-likelihood predictor for shelter animal intake,
//! wrapping a previously trained binary classifier.
//!
//! The crate turns a set of categorical intake descriptors into the
//! feature vector the classifier was trained on, runs the model, and
//! reduces the predicted probability to a percentage plus a three-tier
//! verdict (Promising / NeedsAttention / AtRisk).
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pawcast::{
//!     AgeGroup, AnimalType, ArtifactStore, Breed, Color, IntakeCondition, IntakeType,
//!     Predictor, Selection, Sex, SpayedNeutered,
//! };
//!
//! let store = ArtifactStore::new_default();
//! let predictor = Predictor::builder()
//!     .with_artifacts(&store)?
//!     .build()?;
//!
//! let prediction = predictor.predict(&Selection {
//!     animal_type: AnimalType::Dog,
//!     age_group: AgeGroup::PuppyKitten,
//!     spayed_neutered: SpayedNeutered::Yes,
//!     breed: Breed::Mix,
//!     color: Color::Black,
//!     intake_condition: IntakeCondition::Normal,
//!     intake_type: IntakeType::Stray,
//!     sex: Sex::Male,
//! })?;
//!
//! println!(
//!     "This animal has a {:.1}% chance of being adopted. {}",
//!     prediction.percentage,
//!     prediction.tier.message()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The predictor is read-only after construction and can be shared
//! across threads using `Arc`; each `predict` call is an independent,
//! idempotent in-memory computation.

pub mod artifacts;
pub mod encoding;
pub mod predictor;
mod runtime;
pub mod schema;

pub use artifacts::{ArtifactError, ArtifactKind, ArtifactStore, MODEL_FILE, SCHEMA_FILE};
pub use encoding::{
    encode, AgeGroup, AnimalType, Breed, Color, FeatureVector, IntakeCondition, IntakeType,
    Selection, Sex, SpayedNeutered,
};
pub use predictor::{
    AdoptionTier, OnnxModel, Prediction, Predictor, PredictorBuilder, PredictorError,
    PredictorInfo, ProbabilityModel,
};
pub use runtime::{create_session_builder, RuntimeConfig};
pub use schema::ModelSchema;

pub fn init_logger() {
    env_logger::init();
}
