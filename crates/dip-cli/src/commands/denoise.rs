//! Denoise command
//!
//! Runs one window filter at several sizes and lays the results out side
//! by side, input first.

use crate::DenoiseArgs;
use anyhow::Result;
use dip_core::Gray8;
use dip_ops::chart::montage;
use dip_ops::order::apply_window_filter;
use dip_ops::WindowSize;
use tracing::{info, trace};

use super::MONTAGE_GAP;

pub fn run(args: DenoiseArgs, verbose: u8) -> Result<()> {
    trace!(filter = %args.filter, windows = ?args.windows, border = %args.border, "denoise::run");
    let sizes = args
        .windows
        .iter()
        .map(|&n| WindowSize::new(n))
        .collect::<Result<Vec<_>, _>>()?;

    super::for_each_input(&args.io, verbose, |path, image| {
        let mut results: Vec<Gray8> = Vec::with_capacity(sizes.len());
        for size in &sizes {
            let filtered = apply_window_filter(&image, args.filter, size.get(), args.border)?;
            info!(filter = %args.filter, %size, "Filtered");
            super::save_gray(
                &super::output_path(&args.io.out_dir, path, &format!("{}_{}", args.filter, size)),
                &filtered,
            )?;
            if verbose > 0 {
                println!("  {} {}", args.filter, size);
            }
            results.push(filtered);
        }

        let mut panels: Vec<&Gray8> = vec![&image];
        panels.extend(results.iter());
        let sheet = montage(&panels, panels.len(), MONTAGE_GAP)?;
        super::save_gray(
            &super::output_path(&args.io.out_dir, path, &format!("{}_montage", args.filter)),
            &sheet,
        )
    })
}
