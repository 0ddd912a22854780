//! Spectrum command
//!
//! Centred log-magnitude of the 2D DFT.

use crate::SpectrumArgs;
use anyhow::Result;
use dip_ops::spectrum::log_magnitude;
use tracing::{info, trace};

pub fn run(args: SpectrumArgs, verbose: u8) -> Result<()> {
    trace!(inputs = ?args.io.inputs, "spectrum::run");

    super::for_each_input(&args.io, verbose, |path, image| {
        let spectrum = log_magnitude(&image)?;
        info!(width = image.width(), height = image.height(), "Transformed");
        super::save_gray(&super::output_path(&args.io.out_dir, path, "dft"), &spectrum)
    })?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
