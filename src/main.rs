use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;

use pawcast::{
    AgeGroup, AnimalType, ArtifactStore, Breed, Color, IntakeCondition, IntakeType, Predictor,
    Selection, Sex, SpayedNeutered,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Animal type
    #[arg(long, value_enum)]
    animal_type: AnimalType,

    /// Age group at intake
    #[arg(long, value_enum)]
    age_group: AgeGroup,

    /// Spayed/neutered
    #[arg(long, value_enum)]
    spayed_neutered: SpayedNeutered,

    /// Breed bucket
    #[arg(long, value_enum)]
    breed: Breed,

    /// Primary colour
    #[arg(long, value_enum)]
    color: Color,

    /// Intake condition
    #[arg(long, value_enum)]
    intake_condition: IntakeCondition,

    /// Intake type
    #[arg(long, value_enum)]
    intake_type: IntakeType,

    /// Animal sex
    #[arg(long, value_enum)]
    sex: Sex,

    /// Directory holding adoption_model.onnx and model_features.json
    /// (defaults to PAWCAST_MODEL_DIR, then the platform data dir)
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let store = match &args.model_dir {
        Some(dir) => ArtifactStore::new(dir),
        None => ArtifactStore::new_default(),
    };
    info!("Loading model artifacts from {:?}", store.dir());

    let start_time = Instant::now();
    let predictor = Predictor::builder()
        .with_artifacts(&store)
        .context("model artifacts unavailable; run the training step first")?
        .build()
        .context("failed to build predictor")?;
    info!(
        "Predictor ready ({} features, took {:.2?})",
        predictor.info().num_features,
        start_time.elapsed()
    );

    let selection = Selection {
        animal_type: args.animal_type,
        age_group: args.age_group,
        spayed_neutered: args.spayed_neutered,
        breed: args.breed,
        color: args.color,
        intake_condition: args.intake_condition,
        intake_type: args.intake_type,
        sex: args.sex,
    };

    let prediction = predictor.predict(&selection)?;
    info!(
        "Predicted probability {:.6} -> tier {:?}",
        prediction.probability, prediction.tier
    );

    println!(
        "This animal has a {:.1}% chance of being adopted. {}",
        prediction.percentage,
        prediction.tier.message()
    );

    Ok(())
}
