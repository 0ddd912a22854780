//! Antialias command
//!
//! Renders the half-plane below `y = slope x + intercept` on a small grid,
//! once point-sampled and once box-filtered, enlarged for viewing.

use crate::AntialiasArgs;
use anyhow::Result;
use dip_ops::raster::{render_box_filtered, render_point_sampled, HalfPlane};
use dip_ops::resample::replicate;
use tracing::{info, trace};

pub fn run(args: AntialiasArgs, verbose: u8) -> Result<()> {
    let (w, h) = args.grid;
    trace!(w, h, slope = args.slope, intercept = args.intercept, subsamples = args.subsamples, "antialias::run");
    super::ensure_out_dir(&args.out_dir)?;

    let plane = HalfPlane::new(args.slope, args.intercept);
    let sampled = render_point_sampled(w, h, plane, args.fg, args.bg);
    let filtered = render_box_filtered(w, h, plane, args.fg, args.bg, args.subsamples)?;
    info!(?plane, subsamples = args.subsamples, "Rendered half-plane");

    for (name, image) in [("halfplane_sampled", &sampled), ("halfplane_antialiased", &filtered)] {
        let path = args.out_dir.join(format!("{}.png", name));
        super::save_gray(&path, &replicate(image, args.scale, args.scale)?)?;
        if verbose > 0 {
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
