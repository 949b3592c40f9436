use anyhow::Context;
use serde_json::to_string_pretty;

use facerig_deformer::{Reconciler, RigConfig};
use facerig_scene_core::{MemoryScene, SceneDescription};

fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug shows every skip/apply decision.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RigConfig::from_path(facerig_test_fixtures::rigs::path("facial-stack")?)?;
    let desc: SceneDescription = facerig_test_fixtures::scenes::load("facial-partial")?;
    let mut scene = MemoryScene::from_description(&desc).context("seeding the partial rig")?;

    let reconciler = Reconciler::new(config);

    // Bring hand-named deformers in line first so the build can find them.
    let renames = reconciler.normalize_names(&mut scene);
    println!("Renamed: {}", to_string_pretty(&renames)?);

    let report = reconciler.build(&mut scene);
    println!("Build report: {}", to_string_pretty(&report)?);

    println!("Edits applied to the scene:");
    for edit in scene.journal() {
        println!("  {}", serde_json::to_string(edit)?);
    }

    let again = reconciler.build(&mut scene);
    println!(
        "Second build: {} applied, {} skipped",
        again.applied_count(),
        again.skipped_count()
    );
    Ok(())
}
