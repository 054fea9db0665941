//! Loads a level, spawns it, and reports what the renderer would draw

use std::path::{Path, PathBuf};

use anyhow::Context;
use arena_scene::level::{self, LevelLoader, LevelOptions};
use arena_scene::prelude::*;
use clap::Parser;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(version, about = "Load a level file and print its draw list")]
struct Args {
    /// Level file to load
    #[arg(default_value = "Assets/Maps/Untitled.txt")]
    level: PathBuf,

    /// Directory containing the Assets/ tree
    #[arg(long, default_value = ".")]
    asset_root: PathBuf,

    /// Fail on malformed lines and missing meshes instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Use a placeholder cube instead of reading model files
    #[arg(long)]
    no_meshes: bool,

    /// Also write the parsed level as RON
    #[arg(long, value_name = "FILE")]
    export_ron: Option<PathBuf>,

    /// Also write the parsed level as JSON
    #[arg(long, value_name = "FILE")]
    export_json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let options = LevelOptions::default()
        .with_strict(args.strict)
        .with_asset_root(&args.asset_root);

    if args.no_meshes {
        run(&args, LevelLoader::new(CubeLoader, options))
    } else {
        run(&args, LevelLoader::new(ObjLoader, options))
    }
}

fn run<L: MeshLoader>(args: &Args, mut loader: LevelLoader<L>) -> anyhow::Result<()> {
    let level = level::parse_file(&args.level, loader.options())
        .with_context(|| format!("loading level {}", args.level.display()))?;

    export(&level, args.export_ron.as_deref(), |level, path| {
        level.save_ron(path)
    })?;
    export(&level, args.export_json.as_deref(), |level, path| {
        level.save_json(path)
    })?;

    let mut world = World::new();
    loader.spawn(&level, &mut world)?;

    let lights = LightSet::demo();
    for (slot, light) in lights.to_gpu().iter().enumerate() {
        log::info!("Light {slot}: direction {:?}", light.direction);
    }

    let draws = DrawList::collect(&mut world);
    for item in draws.iter() {
        let name = world
            .get::<Name>(item.entity)
            .map(|name| name.0.clone())
            .unwrap_or_default();
        log::info!(
            "{name}: translation {} ({} triangles)",
            item.world_matrix.w_axis.truncate(),
            item.mesh.triangle_count()
        );
    }
    log::info!("{} draws", draws.len());
    Ok(())
}

fn export(
    level: &Level,
    path: Option<&Path>,
    save: fn(&Level, &Path) -> Result<(), level::SceneError>,
) -> anyhow::Result<()> {
    if let Some(path) = path {
        save(level, path).with_context(|| format!("exporting to {}", path.display()))?;
        log::info!("Wrote {}", path.display());
    }
    Ok(())
}
