//! Gamma command
//!
//! Applies power-law transforms `s = 255 (r/255)^gamma` and charts the
//! transfer curves.

use crate::{GammaArgs, RoundingArg};
use anyhow::Result;
use dip_ops::chart::plot_curves;
use dip_ops::tone::{Lut, Rounding};
use tracing::{info, trace};

use super::CHART_SIZE;

pub fn run(args: GammaArgs, verbose: u8) -> Result<()> {
    trace!(gamma = ?args.gamma, rounding = ?args.rounding, "gamma::run");

    let rounding = match args.rounding {
        RoundingArg::Truncate => Rounding::Truncate,
        RoundingArg::Nearest => Rounding::Nearest,
    };
    let luts = args
        .gamma
        .iter()
        .map(|&g| Lut::power_law(g, rounding).map(|lut| (g, lut)))
        .collect::<Result<Vec<_>, _>>()?;

    let curves: Vec<Vec<f32>> = luts.iter().map(|(_, lut)| lut.to_curve()).collect();
    let refs: Vec<&[f32]> = curves.iter().map(|c| c.as_slice()).collect();
    let chart = plot_curves(&refs, CHART_SIZE, CHART_SIZE)?;

    super::for_each_input(&args.io, verbose, |path, image| {
        for (gamma, lut) in &luts {
            let out = lut.apply(&image);
            info!(gamma, %rounding, "Applied power law");
            super::save_gray(
                &super::output_path(&args.io.out_dir, path, &format!("gamma{}", gamma)),
                &out,
            )?;
        }
        super::save_gray(
            &super::output_path(&args.io.out_dir, path, "gamma_curves"),
            &chart,
        )?;
        Ok(())
    })?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
