//! Smooth command
//!
//! Mean and median smoothing over a square window, with histograms of the
//! input and of each result.

use crate::{SmoothArgs, SmoothKind};
use anyhow::Result;
use dip_ops::chart::plot_histogram;
use dip_ops::filter::{mean_filter, WindowSize};
use dip_ops::histogram::Histogram;
use dip_ops::order::median_filter;
use tracing::{info, trace};

use super::CHART_SIZE;

pub fn run(args: SmoothArgs, verbose: u8) -> Result<()> {
    trace!(filters = ?args.filter, window = args.window, border = %args.border, "smooth::run");
    let size = WindowSize::new(args.window)?;

    super::for_each_input(&args.io, verbose, |path, image| {
        let out = |suffix: &str| super::output_path(&args.io.out_dir, path, suffix);
        super::save_gray(
            &out("hist"),
            &plot_histogram(&Histogram::from_image(&image), CHART_SIZE, CHART_SIZE)?,
        )?;

        for &kind in &args.filter {
            let (name, smoothed) = match kind {
                SmoothKind::Mean => ("mean", mean_filter(&image, size.get(), args.border)?),
                SmoothKind::Median => ("median", median_filter(&image, size.get(), args.border)?),
            };
            info!(filter = name, %size, "Smoothed");

            super::save_gray(&out(&format!("{}{}", name, size.get())), &smoothed)?;
            super::save_gray(
                &out(&format!("{}_hist", name)),
                &plot_histogram(&Histogram::from_image(&smoothed), CHART_SIZE, CHART_SIZE)?,
            )?;
            if verbose > 0 {
                println!("  {} {}", name, size);
            }
        }
        Ok(())
    })
}
