use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use cylinder_render::{LightingConfig, WireframeStyle};
use glam::Vec3;
use tracing_subscriber::EnvFilter;

mod camera;
mod window;

use crate::window::ViewerOptions;

#[derive(Parser, Debug)]
#[command(name = "phong-cylinder")]
#[command(about = "Open cylinder with per-vertex Phong lighting")]
struct Cli {
    /// Radius and half-height of the cylinder
    #[arg(short, long, default_value = "1.0")]
    scale: f32,

    /// Angular divisions around the axis
    #[arg(long, default_value = "10")]
    sections: u32,

    /// Draw the strip outline instead of filled triangles
    #[arg(short, long)]
    edges: bool,

    /// Outline used with --edges: legacy per-section loops or a single edge list
    #[arg(long, value_enum, default_value_t = Style::Legacy)]
    wireframe_style: Style,

    #[arg(long)]
    no_ambient: bool,

    #[arg(long)]
    no_diffuse: bool,

    #[arg(long)]
    no_specular: bool,

    /// World-space light position as "x,y,z"
    #[arg(short, long, default_value = "4,4,6", value_parser = parse_vec3)]
    light: Vec3,

    /// Model spin about +Y, radians per second
    #[arg(long, default_value = "0.5")]
    spin: f32,

    /// JSON file overriding light/material constants
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Style {
    Legacy,
    Edges,
}

impl From<Style> for WireframeStyle {
    fn from(s: Style) -> Self {
        match s {
            Style::Legacy => WireframeStyle::Legacy,
            Style::Edges => WireframeStyle::Edges,
        }
    }
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<_, _>>()?;

    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got {} components", parts.len())),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let lighting = match &cli.config {
        Some(path) => LightingConfig::load(path)
            .with_context(|| format!("Failed to load lighting config: {}", path.display()))?,
        None => LightingConfig::default(),
    };
    tracing::info!("Lighting: {:?}", lighting);

    window::run(ViewerOptions {
        scale: cli.scale,
        sections: cli.sections,
        show_edges: cli.edges,
        wireframe_style: cli.wireframe_style.into(),
        ambient_on: !cli.no_ambient,
        diffuse_on: !cli.no_diffuse,
        specular_on: !cli.no_specular,
        light_position: cli.light,
        spin_speed: cli.spin,
        lighting,
    })
}
