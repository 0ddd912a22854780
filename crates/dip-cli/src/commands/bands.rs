//! Bands command
//!
//! Builds an RGB image from scaled copies of a gray image and low-pass
//! filters each band.

use crate::BandsArgs;
use anyhow::{bail, Result};
use dip_ops::color::{compose_bands, filter_bands};
use dip_ops::restore::gaussian_psf;
use dip_ops::BorderMode;
use tracing::{info, trace};

pub fn run(args: BandsArgs, verbose: u8) -> Result<()> {
    trace!(factors = ?args.factors, psf_size = args.psf_size, sigma = args.sigma, "bands::run");
    let factors: [f64; 3] = match args.factors.as_slice() {
        &[r, g, b] => [r, g, b],
        other => bail!("Expected 3 band factors, got {}", other.len()),
    };
    let psf = gaussian_psf(args.psf_size, args.sigma)?;

    super::for_each_input(&args.io, verbose, |path, image| {
        let color = compose_bands(&image, factors)?;
        let filtered = filter_bands(&color, &psf, BorderMode::Reflect101)?;
        info!(?factors, "Composed bands");

        let out = |suffix: &str| super::output_path(&args.io.out_dir, path, suffix);
        super::save_rgb(&out("color"), &color)?;
        super::save_rgb(&out("color_filtered"), &filtered)?;
        Ok(())
    })?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
