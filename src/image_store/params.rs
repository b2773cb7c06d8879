//! Calibration side file stored next to every disparity image

use std::fmt::{self, Write as _};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::image_store::common::error::{Result, StoreError};
use crate::image_store::file_name::{ensure_new_file_name, gpio_suffix, with_suffix};
use crate::image_store::types::DisparityImage;

/// Renders the camera geometry and capture parameters of a disparity image.
///
/// Floating point values carry five decimals, e.g.
/// `camera.A=[1075.00000 0 640.00000; 0 1075.00000 480.00000; 0 0 1]`.
pub fn format_params(disparity: &DisparityImage) -> String {
    let mut out = String::new();
    let _ = write_params(&mut out, disparity);
    out
}

fn write_params(out: &mut String, disparity: &DisparityImage) -> fmt::Result {
    let image = &disparity.image;
    let f = image.focal_length;
    let t = disparity.baseline;
    let u = image.principal_point_u;
    let v = image.principal_point_v;

    writeln!(out, "# Created by grpc_image_client")?;
    writeln!(out, "camera.A=[{f:.5} 0 {u:.5}; 0 {f:.5} {v:.5}; 0 0 1]")?;
    writeln!(out, "camera.height={}", image.height)?;
    writeln!(out, "camera.width={}", image.width)?;
    writeln!(out, "rho={:.5}", f * t)?;
    writeln!(out, "t={t:.5}")?;
    writeln!(out, "camera.exposure_time={:.5}", image.exposure_time)?;
    writeln!(out, "camera.gain={:.5}", image.gain)?;
    writeln!(out, "camera.noise={:.5}", image.noise)?;
    writeln!(out, "camera.out1_reduction={:.5}", image.out1_reduction)?;
    writeln!(out, "camera.brightness={:.5}", image.brightness)
}

/// Writes `<prefix><gpio-suffix>_param.txt` and returns the path used.
#[instrument(skip(prefix, disparity), fields(prefix = %prefix.display()))]
pub fn store_param_txt(prefix: &Path, disparity: &DisparityImage) -> Result<PathBuf> {
    let name = format!("{}_param.txt", gpio_suffix(&disparity.image.gpios));
    let path = ensure_new_file_name(&with_suffix(prefix, &name));

    let file = File::create(&path)
        .map_err(|e| StoreError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
    let mut out = BufWriter::new(file);
    out.write_all(format_params(disparity).as_bytes())?;
    out.flush()?;

    debug!(path = %path.display(), "Stored camera parameters");
    Ok(path)
}
