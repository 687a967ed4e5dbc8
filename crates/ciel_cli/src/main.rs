//! Headless driver: render a scene and write the frame to disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ciel_core::SceneConfig;
use ciel_renderer::{MarchStrategy, RenderSetting, Renderer};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ciel", about = "Volume ray-marching renderer")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Ray-march step length
    #[arg(long, default_value_t = 0.01)]
    ray_dt: f32,

    /// Per-step extinction coefficient
    #[arg(long, default_value_t = 0.02)]
    exp_k: f32,

    /// Parallelize the steps of each ray instead of pixels
    #[arg(long)]
    per_step: bool,

    /// Scene description (JSON); the built-in two-sphere scene if omitted
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Render setting (JSON); overrides the size and step flags
    #[arg(long)]
    setting: Option<PathBuf>,

    /// Print the effective scene as JSON and exit
    #[arg(long)]
    dump_scene: bool,

    /// Output image
    #[arg(short, long, default_value = "ciel.png")]
    output: PathBuf,
}

impl Args {
    fn render_setting(&self) -> Result<RenderSetting> {
        if let Some(path) = &self.setting {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()));
        }

        let strategy = if self.per_step {
            MarchStrategy::PerStep
        } else {
            MarchStrategy::PerPixel
        };
        Ok(RenderSetting::new(self.width, self.height)
            .with_step(self.ray_dt, self.exp_k)
            .with_strategy(strategy))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let config = match &args.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if args.dump_scene {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }

    let setting = args.render_setting()?;
    log::info!("Starting Ciel: {:?}", setting);

    let mut renderer = Renderer::with_config(config);
    renderer.render(&setting)?;

    let frame = renderer.last_render();
    frame
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!("Saved {}", args.output.display());

    Ok(())
}
