//! CLI command implementations

pub mod antialias;
pub mod bands;
pub mod deblur;
pub mod denoise;
pub mod equalize;
pub mod gamma;
pub mod resample;
pub mod response;
pub mod sharpen;
pub mod smooth;
pub mod spectrum;

use crate::{Depth, Endian, InputArgs, RawArgs};
use anyhow::{bail, Context, Result};
use dip_core::{Gray8, Rgb8};
use dip_io::{ByteOrder, RawSpec, SampleDepth};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Side length of curve and histogram charts.
pub const CHART_SIZE: u32 = 320;

/// Gap between montage cells.
pub const MONTAGE_GAP: u32 = 8;

impl RawArgs {
    /// Raw geometry described by the flags.
    pub fn spec(&self) -> RawSpec {
        let (width, height) = self.size;
        let depth = match self.depth {
            Depth::U8 => SampleDepth::U8,
            Depth::U16 => SampleDepth::U16,
        };
        let byte_order = match self.byte_order {
            Endian::Le => ByteOrder::Little,
            Endian::Be => ByteOrder::Big,
        };
        RawSpec::new(width, height)
            .with_depth(depth)
            .with_byte_order(byte_order)
    }
}

/// Expands input arguments; each one is a path or a glob pattern.
pub fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let before = files.len();
        for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern: {}", pattern))? {
            match entry {
                Ok(path) => files.push(path),
                Err(e) => warn!(path = %e.path().display(), error = %e.error(), "Skipping unreadable input"),
            }
        }
        if files.len() == before {
            bail!("No files match pattern: {}", pattern);
        }
    }
    debug!(count = files.len(), "expanded inputs");
    Ok(files)
}

/// Load gray image from path
pub fn load_gray(path: &Path, spec: &RawSpec) -> Result<Gray8> {
    dip_io::load_gray(path, spec).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save gray image to path
pub fn save_gray(path: &Path, image: &Gray8) -> Result<()> {
    dip_io::save_gray(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Save RGB image to path
pub fn save_rgb(path: &Path, image: &Rgb8) -> Result<()> {
    dip_io::save_rgb(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Creates the output directory if needed.
pub fn ensure_out_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}

/// `<out_dir>/<input stem>_<suffix>.png`.
pub fn output_path(out_dir: &Path, input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    out_dir.join(format!("{}_{}.png", stem, sanitize(suffix)))
}

/// Keeps a filter or parameter label usable as a file name.
fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            ':' | '/' | '\\' | ' ' => '_',
            c => c,
        })
        .collect()
}

/// Loads every input and hands it to `f` with its path.
pub fn for_each_input(
    io: &InputArgs,
    verbose: u8,
    mut f: impl FnMut(&Path, Gray8) -> Result<()>,
) -> Result<()> {
    let files = expand_inputs(&io.inputs)?;
    ensure_out_dir(&io.out_dir)?;
    let spec = io.raw.spec();
    for path in &files {
        if verbose > 0 {
            println!("Processing {}", path.display());
        }
        let image = load_gray(path, &spec)?;
        f(path, image)?;
    }
    Ok(())
}
