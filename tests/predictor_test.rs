use std::sync::{Arc, Mutex};

use pawcast::{
    encode, AdoptionTier, AgeGroup, AnimalType, Breed, Color, IntakeCondition, IntakeType,
    ModelSchema, Predictor, PredictorError, ProbabilityModel, Selection, Sex, SpayedNeutered,
};

/// Always returns the same probability.
struct Fixed(f64);

impl ProbabilityModel for Fixed {
    fn predict_probability(&self, _features: &[f32]) -> Result<f64, PredictorError> {
        Ok(self.0)
    }
}

/// Records the aligned vector it was handed and returns a constant.
struct Recording {
    last: Mutex<Vec<f32>>,
}

impl Recording {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            last: Mutex::new(Vec::new()),
        })
    }
}

impl ProbabilityModel for Recording {
    fn predict_probability(&self, features: &[f32]) -> Result<f64, PredictorError> {
        *self.last.lock().unwrap() = features.to_vec();
        Ok(0.5)
    }
}

fn training_columns() -> Vec<String> {
    [
        "is_spayed_neutered",
        "animal_type_Dog",
        "animal_type_Cat",
        "animal_type_Other",
        "breed_Purebred",
        "breed_Mix",
        "breed_Other",
        "color_Black",
        "color_White",
        "color_Brown",
        "color_Other",
        "intake_condition_Normal",
        "intake_condition_Sick",
        "intake_condition_Injured",
        "intake_condition_Other",
        "intake_type_Stray",
        "intake_type_Owner Surrender",
        "intake_type_Public Assist",
        "intake_type_Other",
        "age_group_Puppy/Kitten",
        "age_group_Young Adult",
        "age_group_Senior",
        "animal_sex_Male",
        "animal_sex_Female",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn example_selection() -> Selection {
    Selection {
        animal_type: AnimalType::Dog,
        age_group: AgeGroup::PuppyKitten,
        spayed_neutered: SpayedNeutered::Yes,
        breed: Breed::Mix,
        color: Color::Black,
        intake_condition: IntakeCondition::Normal,
        intake_type: IntakeType::Stray,
        sex: Sex::Male,
    }
}

#[test]
fn end_to_end_alignment_matches_training_columns() -> Result<(), PredictorError> {
    let model = Recording::new();
    let predictor = Predictor::builder()
        .with_model(Arc::clone(&model) as Arc<dyn ProbabilityModel>, ModelSchema::new(training_columns()))?
        .build()?;

    predictor.predict(&example_selection())?;

    let aligned = model.last.lock().unwrap().clone();
    // In training_columns order, per the encoder's exact semantics
    // (including the negated residual columns).
    let expected = vec![
        1.0, // is_spayed_neutered
        1.0, // animal_type_Dog
        0.0, // animal_type_Cat
        1.0, // animal_type_Other (Dog != Other)
        0.0, // breed_Purebred
        1.0, // breed_Mix
        1.0, // breed_Other (Mix != Other)
        0.0, // color_Black (colour is Black)
        0.0, // color_White
        0.0, // color_Brown
        1.0, // color_Other (Black != Other)
        1.0, // intake_condition_Normal
        1.0, // intake_condition_Sick (Normal != Sick)
        1.0, // intake_condition_Injured (Normal != Injured)
        0.0, // intake_condition_Other
        1.0, // intake_type_Stray
        0.0, // intake_type_Owner Surrender
        0.0, // intake_type_Public Assist
        1.0, // intake_type_Other (Stray != Other)
        1.0, // age_group_Puppy/Kitten
        0.0, // age_group_Young Adult
        1.0, // age_group_Senior (Puppy/Kitten != Senior)
        1.0, // animal_sex_Male
        0.0, // animal_sex_Female
    ];
    assert_eq!(aligned, expected);
    Ok(())
}

#[test]
fn schema_columns_unknown_to_the_encoder_fill_with_zero() -> Result<(), PredictorError> {
    let model = Recording::new();
    let schema = ModelSchema::new(vec![
        "animal_type_Dog".to_string(),
        "column_from_a_newer_training_run".to_string(),
        "is_spayed_neutered".to_string(),
    ]);
    let predictor = Predictor::builder()
        .with_model(Arc::clone(&model) as Arc<dyn ProbabilityModel>, schema)?
        .build()?;

    predictor.predict(&example_selection())?;

    let aligned = model.last.lock().unwrap().clone();
    assert_eq!(aligned, vec![1.0, 0.0, 1.0]);
    Ok(())
}

#[test]
fn predictions_are_idempotent() -> Result<(), PredictorError> {
    let predictor = Predictor::builder()
        .with_model(Arc::new(Fixed(0.55)), ModelSchema::new(training_columns()))?
        .build()?;

    let first = predictor.predict(&example_selection())?;
    let second = predictor.predict(&example_selection())?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn probability_drives_tier_and_percentage() -> Result<(), PredictorError> {
    let cases = [
        (1.0, 100.0, AdoptionTier::Promising),
        (0.7, 70.0, AdoptionTier::Promising),
        (0.699999, 70.0, AdoptionTier::NeedsAttention),
        (0.4, 40.0, AdoptionTier::NeedsAttention),
        (0.399999, 40.0, AdoptionTier::AtRisk),
        (0.0, 0.0, AdoptionTier::AtRisk),
        (0.8234, 82.3, AdoptionTier::Promising),
    ];

    for (probability, percentage, tier) in cases {
        let predictor = Predictor::builder()
            .with_model(Arc::new(Fixed(probability)), ModelSchema::new(training_columns()))?
            .build()?;
        let prediction = predictor.predict(&example_selection())?;
        assert_eq!(prediction.probability, probability);
        assert_eq!(prediction.percentage, percentage, "p = {}", probability);
        assert_eq!(prediction.tier, tier, "p = {}", probability);
    }
    Ok(())
}

#[test]
fn tiering_uses_the_unrounded_probability() -> Result<(), PredictorError> {
    // 0.6999 rounds to 70.0% for display but stays below the Promising
    // threshold.
    let predictor = Predictor::builder()
        .with_model(Arc::new(Fixed(0.6999)), ModelSchema::new(training_columns()))?
        .build()?;
    let prediction = predictor.predict(&example_selection())?;
    assert_eq!(prediction.percentage, 70.0);
    assert_eq!(prediction.tier, AdoptionTier::NeedsAttention);
    Ok(())
}

#[test]
fn encode_emits_exactly_the_training_columns() {
    let features = encode(&example_selection());
    let mut names: Vec<_> = features.names().map(str::to_string).collect();
    let mut expected = training_columns();
    names.sort();
    expected.sort();
    assert_eq!(names, expected);
}

#[test]
fn predictor_info_reports_schema() -> Result<(), PredictorError> {
    let predictor = Predictor::builder()
        .with_model(Arc::new(Fixed(0.5)), ModelSchema::new(training_columns()))?
        .build()?;
    let info = predictor.info();
    assert_eq!(info.num_features, 24);
    assert_eq!(info.feature_names, training_columns());
    assert_eq!(info.model_path, "<in-memory>");
    Ok(())
}

#[test]
fn predictor_is_shareable_across_threads() -> Result<(), PredictorError> {
    let predictor = Arc::new(
        Predictor::builder()
            .with_model(Arc::new(Fixed(0.9)), ModelSchema::new(training_columns()))?
            .build()?,
    );

    let mut handles = vec![];
    for _ in 0..3 {
        let predictor = Arc::clone(&predictor);
        handles.push(std::thread::spawn(move || {
            predictor.predict(&example_selection()).unwrap()
        }));
    }
    for handle in handles {
        let prediction = handle.join().unwrap();
        assert_eq!(prediction.tier, AdoptionTier::Promising);
    }
    Ok(())
}
