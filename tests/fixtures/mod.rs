//! Shared test fixtures for pipeline and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use rangde::models::{
    BrandConfig, LayerConfig, Palette, PaletteRole, PaletteTable, RawPalette, RgbColor, Step,
};
use rangde::services::pipeline::GenerationContext;
use rangde::services::validation::ValidationReport;
use rangde::workspace::Workspace;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Linear ramp from `dark` at step 200 to `light` at step 2500.
pub fn ramp(dark: RgbColor, light: RgbColor) -> BTreeMap<Step, RgbColor> {
    let lerp =
        |a: u8, b: u8, t: f64| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Step::all()
        .map(|step| {
            let t = step.position() as f64 / 23.0;
            let color = RgbColor::new(
                lerp(dark.r, light.r, t),
                lerp(dark.g, light.g, t),
                lerp(dark.b, light.b, t),
            );
            (step, color)
        })
        .collect()
}

fn palette(id: &str, name: &str, primary: u16, steps: BTreeMap<Step, RgbColor>) -> Palette {
    let mut palette = Palette::new(id, name, Step::new(primary).unwrap());
    palette.steps = steps;
    palette
}

/// Indigo: step 200 is #0b0034, step 2500 is #ffffff, primary step 600.
pub fn indigo() -> Palette {
    palette(
        "indigo",
        "Indigo",
        600,
        ramp(RgbColor::new(0x0b, 0x00, 0x34), RgbColor::new(0xff, 0xff, 0xff)),
    )
}

/// Neutral grey ramp, primary step 1200.
pub fn slate() -> Palette {
    palette(
        "slate",
        "Slate",
        1200,
        ramp(RgbColor::new(0x0e, 0x11, 0x16), RgbColor::new(0xfc, 0xfd, 0xfe)),
    )
}

/// Warm ramp, primary step 1000.
pub fn coral() -> Palette {
    palette(
        "coral",
        "Coral",
        1000,
        ramp(RgbColor::new(0x2a, 0x06, 0x00), RgbColor::new(0xff, 0xf6, 0xf2)),
    )
}

/// Green ramp; never referenced by the default brands.
pub fn jade() -> Palette {
    palette(
        "jade",
        "Jade",
        900,
        ramp(RgbColor::new(0x00, 0x1f, 0x12), RgbColor::new(0xf0, 0xff, 0xf8)),
    )
}

/// Indigo, Slate, Coral and Jade.
pub fn palette_table() -> PaletteTable {
    [indigo(), slate(), coral(), jade()].into_iter().collect()
}

/// "Acme": Slate neutral, Indigo primary, Coral negative.
pub fn acme() -> BrandConfig {
    BrandConfig::new("Acme")
        .with_role(PaletteRole::Neutral, "slate")
        .with_role(PaletteRole::Primary, "indigo")
        .with_role(PaletteRole::Negative, "Coral")
}

/// "Nimbus": Slate neutral, Coral primary.
pub fn nimbus() -> BrandConfig {
    BrandConfig::new("Nimbus")
        .with_role(PaletteRole::Neutral, "slate")
        .with_role(PaletteRole::Primary, "coral")
}

/// "Spectrum": all eight roles over the four fixture palettes.
pub fn spectrum() -> BrandConfig {
    BrandConfig::new("Spectrum")
        .with_role(PaletteRole::Neutral, "slate")
        .with_role(PaletteRole::Primary, "indigo")
        .with_role(PaletteRole::Secondary, "jade")
        .with_role(PaletteRole::Sparkle, "coral")
        .with_role(PaletteRole::Positive, "jade")
        .with_role(PaletteRole::Negative, "coral")
        .with_role(PaletteRole::Warning, "coral")
        .with_role(PaletteRole::Informative, "indigo")
}

/// Context with every palette, both brands and every layer.
pub fn context() -> GenerationContext {
    GenerationContext::new(palette_table(), vec![acme(), nimbus()])
}

/// Converts a palette to its workspace-file form.
pub fn raw(palette: &Palette) -> RawPalette {
    RawPalette {
        id: palette.id.clone(),
        name: palette.name.clone(),
        steps: palette
            .steps
            .iter()
            .map(|(step, color)| (step.to_string(), color.to_hex()))
            .collect(),
        primary_step: palette.primary_step.value(),
    }
}

/// Workspace with every palette and both brands.
pub fn workspace() -> Workspace {
    Workspace {
        palettes: palette_table().iter().map(raw).collect(),
        brands: vec![acme(), nimbus()],
        layers: None,
    }
}

/// Workspace limited to layers 0 through `last`.
pub fn workspace_up_to(last: rangde::models::LayerKind) -> Workspace {
    Workspace {
        layers: Some(LayerConfig::default().up_to(last)),
        ..workspace()
    }
}

/// Temporary directory holding one file.
pub struct TempFile {
    pub dir: TempDir,
    pub path: PathBuf,
}

/// Writes a workspace into a temp dir under `file_name` (.json or .toml).
pub fn temp_workspace(workspace: &Workspace, file_name: &str) -> TempFile {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(file_name);
    workspace.save(&path).unwrap();
    TempFile { dir, path }
}

/// Writes raw text into a temp dir under `file_name`.
pub fn temp_text(content: &str, file_name: &str) -> TempFile {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(file_name);
    fs::write(&path, content).unwrap();
    TempFile { dir, path }
}

/// Validation report with nothing in it.
pub fn empty_report() -> ValidationReport {
    ValidationReport::new()
}

/// Runs the `rangde` binary with an absent config file next to `scratch`.
pub fn run_cli(args: &[&str], scratch: &TempFile) -> Output {
    let config = scratch.dir.path().join("missing-config.toml");
    Command::new(env!("CARGO_BIN_EXE_rangde"))
        .args(["--config", config.to_str().unwrap()])
        .args(args)
        .output()
        .expect("Failed to execute command")
}
