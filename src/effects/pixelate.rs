use crate::foundation::{core::expect_rgba_len, error::GraydriftResult};

/// Block-average mosaic filter.
///
/// Partitions the buffer into `block x block` tiles (tiles clipped at the
/// right/bottom edge average over however many pixels they actually contain),
/// then writes each tile's channel means uniformly across the tile.
/// `block <= 1` is the identity.
pub fn pixelate(rgba: &[u8], width: u32, height: u32, block: u32) -> GraydriftResult<Vec<u8>> {
    expect_rgba_len(rgba, width, height)?;
    if block <= 1 {
        return Ok(rgba.to_vec());
    }

    let w = width as usize;
    let h = height as usize;
    let block = block as usize;
    let mut out = vec![0u8; rgba.len()];

    for tile_y in (0..h).step_by(block) {
        let tile_h = block.min(h - tile_y);
        for tile_x in (0..w).step_by(block) {
            let tile_w = block.min(w - tile_x);

            let mut acc = [0u64; 4];
            for y in tile_y..tile_y + tile_h {
                for x in tile_x..tile_x + tile_w {
                    let idx = (y * w + x) * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(rgba[idx + c]);
                    }
                }
            }

            let count = (tile_w * tile_h) as u64;
            let mut mean = [0u8; 4];
            for c in 0..4 {
                mean[c] = ((acc[c] + count / 2) / count) as u8;
            }

            for y in tile_y..tile_y + tile_h {
                for x in tile_x..tile_x + tile_w {
                    let idx = (y * w + x) * 4;
                    out[idx..idx + 4].copy_from_slice(&mean);
                }
            }
        }
    }

    Ok(out)
}
