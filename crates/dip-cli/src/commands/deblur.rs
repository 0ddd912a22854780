//! Deblur command
//!
//! Blurs with a Gaussian PSF, then restores with the regularized inverse
//! filter `G H* / (|H|^2 + K)`.

use crate::DeblurArgs;
use anyhow::Result;
use dip_ops::restore::{degrade, gaussian_psf, inverse_filter, to_display};
use tracing::{info, trace};

pub fn run(args: DeblurArgs, verbose: u8) -> Result<()> {
    trace!(psf_size = args.psf_size, sigma = args.sigma, k = args.k, "deblur::run");
    let psf = gaussian_psf(args.psf_size, args.sigma)?;
    let psf_view = psf.to_image();

    super::for_each_input(&args.io, verbose, |path, image| {
        let degraded = degrade(&image, &psf)?;
        let restored = to_display(&inverse_filter(&degraded, &psf, args.k)?);
        info!(k = args.k, "Restored");

        let out = |suffix: &str| super::output_path(&args.io.out_dir, path, suffix);
        super::save_gray(&out("psf"), &psf_view)?;
        super::save_gray(&out("degraded"), &degraded)?;
        super::save_gray(&out("restored"), &restored)?;
        Ok(())
    })?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
