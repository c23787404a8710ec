use std::collections::HashMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Kind of animal taken in at the shelter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum AnimalType {
    Dog,
    Cat,
    Other,
}

/// Age bracket at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum AgeGroup {
    #[serde(rename = "Puppy/Kitten")]
    PuppyKitten,
    #[serde(rename = "Young Adult")]
    YoungAdult,
    Senior,
}

/// Whether the animal has been spayed or neutered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum SpayedNeutered {
    Yes,
    No,
}

/// Breed bucket used by the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Breed {
    Mix,
    Purebred,
    Other,
}

/// Primary coat colour bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Color {
    Black,
    White,
    Brown,
    Other,
}

/// Health condition recorded at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum IntakeCondition {
    Normal,
    Sick,
    Injured,
    Other,
}

/// How the animal arrived at the shelter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum IntakeType {
    Stray,
    #[serde(rename = "Owner Surrender")]
    OwnerSurrender,
    #[serde(rename = "Public Assist")]
    PublicAssist,
    Other,
}

/// Recorded sex of the animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Sex {
    Male,
    Female,
}

/// A fully populated set of intake descriptors for one animal.
///
/// Every field is an enum, so each holds exactly one value from its
/// domain; an out-of-domain selection is unrepresentable. Construct one
/// per prediction request and pass it to [`Predictor::predict`].
///
/// [`Predictor::predict`]: crate::Predictor::predict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub animal_type: AnimalType,
    pub age_group: AgeGroup,
    pub spayed_neutered: SpayedNeutered,
    pub breed: Breed,
    pub color: Color,
    pub intake_condition: IntakeCondition,
    pub intake_type: IntakeType,
    pub sex: Sex,
}

/// A named 0/1 feature mapping, one entry per training-schema column.
///
/// Built fresh by [`encode`] for every prediction and discarded after
/// alignment; key order is irrelevant because [`ModelSchema::align`]
/// reindexes by name.
///
/// [`ModelSchema::align`]: crate::ModelSchema::align
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector(HashMap<String, f32>);

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a named feature, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: f32) {
        self.0.insert(name.into(), value);
    }

    /// Returns the value of a named feature, if present.
    pub fn get(&self, name: &str) -> Option<f32> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the feature names in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

fn flag(condition: bool) -> f32 {
    if condition {
        1.0
    } else {
        0.0
    }
}

/// Encodes a selection into the 24 feature columns of the training schema.
///
/// The mapping is total over the enumerated domains and cannot fail. The
/// column semantics reproduce the trained model's inputs exactly,
/// including the residual-bucket columns that are set by *negated*
/// equality (`animal_type_Other`, `breed_Other`, `color_Black`,
/// `color_Other`, `intake_condition_Sick`, `intake_condition_Injured`,
/// `intake_type_Other`, `age_group_Senior`). The model's coefficients
/// were fitted against these columns as-is; changing any of them to a
/// plain one-hot requires retraining.
pub fn encode(selection: &Selection) -> FeatureVector {
    let mut features = FeatureVector::new();

    features.insert(
        "is_spayed_neutered",
        flag(selection.spayed_neutered == SpayedNeutered::Yes),
    );

    // Animal type
    features.insert("animal_type_Dog", flag(selection.animal_type == AnimalType::Dog));
    features.insert("animal_type_Cat", flag(selection.animal_type == AnimalType::Cat));
    features.insert("animal_type_Other", flag(selection.animal_type != AnimalType::Other));

    // Breed
    features.insert("breed_Purebred", flag(selection.breed == Breed::Purebred));
    features.insert("breed_Mix", flag(selection.breed == Breed::Mix));
    features.insert("breed_Other", flag(selection.breed != Breed::Other));

    // Colour
    features.insert("color_Black", flag(selection.color != Color::Black));
    features.insert("color_White", flag(selection.color == Color::White));
    features.insert("color_Brown", flag(selection.color == Color::Brown));
    features.insert("color_Other", flag(selection.color != Color::Other));

    // Intake condition
    features.insert(
        "intake_condition_Normal",
        flag(selection.intake_condition == IntakeCondition::Normal),
    );
    features.insert(
        "intake_condition_Sick",
        flag(selection.intake_condition != IntakeCondition::Sick),
    );
    features.insert(
        "intake_condition_Injured",
        flag(selection.intake_condition != IntakeCondition::Injured),
    );
    features.insert(
        "intake_condition_Other",
        flag(selection.intake_condition == IntakeCondition::Other),
    );

    // Intake type
    features.insert("intake_type_Stray", flag(selection.intake_type == IntakeType::Stray));
    features.insert(
        "intake_type_Owner Surrender",
        flag(selection.intake_type == IntakeType::OwnerSurrender),
    );
    features.insert(
        "intake_type_Public Assist",
        flag(selection.intake_type == IntakeType::PublicAssist),
    );
    features.insert("intake_type_Other", flag(selection.intake_type != IntakeType::Other));

    // Age group
    features.insert(
        "age_group_Puppy/Kitten",
        flag(selection.age_group == AgeGroup::PuppyKitten),
    );
    features.insert(
        "age_group_Young Adult",
        flag(selection.age_group == AgeGroup::YoungAdult),
    );
    features.insert("age_group_Senior", flag(selection.age_group != AgeGroup::Senior));

    // Sex
    features.insert("animal_sex_Male", flag(selection.sex == Sex::Male));
    features.insert("animal_sex_Female", flag(selection.sex == Sex::Female));

    features
}
