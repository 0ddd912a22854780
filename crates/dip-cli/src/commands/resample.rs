//! Resample command
//!
//! Subsamples by each factor and interpolates the result back to the
//! original size with nearest-neighbor lookup.

use crate::ResampleArgs;
use anyhow::Result;
use dip_ops::resample::{subsample, upscale_nearest};
use tracing::{info, trace};

pub fn run(args: ResampleArgs, verbose: u8) -> Result<()> {
    trace!(factors = ?args.factors, "resample::run");

    super::for_each_input(&args.io, verbose, |path, image| {
        let (w, h) = image.dimensions();
        super::save_gray(&super::output_path(&args.io.out_dir, path, "original"), &image)?;
        for &factor in &args.factors {
            let small = subsample(&image, factor)?;
            let restored = upscale_nearest(&small, w, h)?;
            info!(
                factor,
                small_w = small.width(),
                small_h = small.height(),
                "Resampled"
            );

            super::save_gray(
                &super::output_path(&args.io.out_dir, path, &format!("s{}", factor)),
                &small,
            )?;
            super::save_gray(
                &super::output_path(&args.io.out_dir, path, &format!("i{}", factor)),
                &restored,
            )?;

            if verbose > 0 {
                println!(
                    "  factor {}: {}x{} -> {}x{}",
                    factor,
                    small.width(),
                    small.height(),
                    w,
                    h
                );
            }
        }
        Ok(())
    })
}
