//! Sharpen command
//!
//! Laplacian response and sharpening by subtracting it.

use crate::SharpenArgs;
use anyhow::Result;
use dip_ops::sharpen::{laplacian, scale_to_display, sharpen};
use tracing::{info, trace};

pub fn run(args: SharpenArgs, verbose: u8) -> Result<()> {
    trace!(scaling = %args.scaling, border = %args.border, "sharpen::run");

    super::for_each_input(&args.io, verbose, |path, image| {
        let response = laplacian(&image, args.border)?;
        let display = scale_to_display(&response, args.scaling);
        let sharpened = sharpen(&image, &display)?;
        info!(scaling = %args.scaling, "Sharpened");

        let out = |suffix: &str| super::output_path(&args.io.out_dir, path, suffix);
        super::save_gray(&out("laplacian"), &display)?;
        super::save_gray(&out("sharpened"), &sharpened)?;
        Ok(())
    })?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
