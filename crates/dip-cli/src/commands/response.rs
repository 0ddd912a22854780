//! Response command
//!
//! Renders `|H(u, v)|` of the 3x3 averaging and Laplacian masks.

use crate::ResponseArgs;
use anyhow::Result;
use tracing::{info, trace};

pub fn run(args: ResponseArgs, verbose: u8) -> Result<()> {
    let (m, n) = args.grid;
    trace!(m, n, responses = ?args.response, "response::run");
    super::ensure_out_dir(&args.out_dir)?;

    for response in &args.response {
        let image = response.display(m as usize, n as usize);
        let path = args.out_dir.join(format!("h_{}.png", response));
        super::save_gray(&path, &image)?;
        info!(%response, m, n, "Rendered frequency response");

        if verbose > 0 {
            println!("Wrote {}", path.display());
        }
    }
    Ok(())
}
