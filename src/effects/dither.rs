use crate::{
    assets::store::SourceFrame,
    foundation::{core::expect_rgba_len, error::GraydriftResult},
};

/// Grayscale amounts above this trigger the error-diffusion pass.
pub const DITHER_THRESHOLD: f32 = 0.3;

/// Bi-level quantization cut point for the red channel.
const QUANT_THRESHOLD: u8 = 128;

/// Blend every pixel toward its Rec. 601 luma by `amount`.
///
/// `channel' = channel + (gray - channel) * amount`; alpha is untouched.
/// `amount = 0` is the identity, `amount = 1` yields `R == G == B`.
pub fn to_grayscale(rgba: &[u8], width: u32, height: u32, amount: f32) -> GraydriftResult<Vec<u8>> {
    expect_rgba_len(rgba, width, height)?;
    let amount = if amount.is_finite() {
        amount.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if amount == 0.0 {
        return Ok(rgba.to_vec());
    }

    let mut out = rgba.to_vec();
    for px in out.chunks_exact_mut(4) {
        let r = f32::from(px[0]);
        let g = f32::from(px[1]);
        let b = f32::from(px[2]);
        let gray = 0.299 * r + 0.587 * g + 0.114 * b;
        px[0] = (r + (gray - r) * amount).round().clamp(0.0, 255.0) as u8;
        px[1] = (g + (gray - g) * amount).round().clamp(0.0, 255.0) as u8;
        px[2] = (b + (gray - b) * amount).round().clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}

/// Floyd-Steinberg error diffusion on the red channel.
///
/// Each pixel's red value is quantized to 0 or 255 (threshold 128) and the
/// quantized value is written to R, G and B, so the output is strictly
/// bi-level. The rounding error `(original_r - quantized) * strength` is
/// spread to the classic four neighbors (7/16 right, 3/16 below-left,
/// 5/16 below, 1/16 below-right), red channel only, since only red feeds the
/// quantizer. Strictly row-major left-to-right order: every pixel must see
/// the error already pushed into it before it is quantized, so this pass
/// must not be parallelized within one frame.
pub fn apply_dither(
    rgba: &[u8],
    width: u32,
    height: u32,
    strength: f32,
) -> GraydriftResult<Vec<u8>> {
    expect_rgba_len(rgba, width, height)?;

    let w = width as usize;
    let h = height as usize;
    let mut out = rgba.to_vec();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) * 4;
            let old = out[idx];
            let quant = if old < QUANT_THRESHOLD { 0u8 } else { 255u8 };
            let err = (f32::from(old) - f32::from(quant)) * strength;

            out[idx] = quant;
            out[idx + 1] = quant;
            out[idx + 2] = quant;

            if x + 1 < w {
                diffuse(&mut out, idx + 4, err * (7.0 / 16.0));
            }
            if y + 1 < h {
                if x > 0 {
                    diffuse(&mut out, idx + (w - 1) * 4, err * (3.0 / 16.0));
                }
                diffuse(&mut out, idx + w * 4, err * (5.0 / 16.0));
                if x + 1 < w {
                    diffuse(&mut out, idx + (w + 1) * 4, err * (1.0 / 16.0));
                }
            }
        }
    }

    Ok(out)
}

/// Add a share of the quantization error into a neighbor's red channel.
#[inline]
fn diffuse(out: &mut [u8], idx: usize, err: f32) {
    out[idx] = (f32::from(out[idx]) + err).round().clamp(0.0, 255.0) as u8;
}

/// Grayscale blend, then error-diffusion dither when `amount` crosses
/// [`DITHER_THRESHOLD`]. This is the per-frame unit the transition engine
/// composes with pixelation.
pub fn dither_frame(frame: &SourceFrame, amount: f32) -> GraydriftResult<Vec<u8>> {
    let size = frame.size();
    let gray = to_grayscale(frame.rgba(), size.width, size.height, amount)?;
    if amount > DITHER_THRESHOLD {
        apply_dither(&gray, size.width, size.height, amount)
    } else {
        Ok(gray)
    }
}
