//! Equalize command
//!
//! Histogram equalization, with the mapping and both histograms charted.

use crate::EqualizeArgs;
use anyhow::Result;
use dip_ops::chart::{plot_curves, plot_histogram};
use dip_ops::histogram::{equalize, Histogram};
use tracing::{info, trace};

use super::CHART_SIZE;

pub fn run(args: EqualizeArgs, verbose: u8) -> Result<()> {
    trace!(inputs = ?args.io.inputs, "equalize::run");

    super::for_each_input(&args.io, verbose, |path, image| {
        let before = Histogram::from_image(&image);
        let (equalized, lut) = equalize(&image);
        let after = Histogram::from_image(&equalized);
        info!(
            levels_before = before.bins().iter().filter(|&&c| c > 0).count(),
            levels_after = after.bins().iter().filter(|&&c| c > 0).count(),
            "Equalized"
        );

        let out = |suffix: &str| super::output_path(&args.io.out_dir, path, suffix);
        super::save_gray(&out("equalized"), &equalized)?;
        super::save_gray(
            &out("equalize_map"),
            &plot_curves(&[lut.to_curve().as_slice()], CHART_SIZE, CHART_SIZE)?,
        )?;
        super::save_gray(&out("hist"), &plot_histogram(&before, CHART_SIZE, CHART_SIZE)?)?;
        super::save_gray(
            &out("equalized_hist"),
            &plot_histogram(&after, CHART_SIZE, CHART_SIZE)?,
        )?;
        Ok(())
    })?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
