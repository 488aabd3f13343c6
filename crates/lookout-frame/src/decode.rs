use crate::{DecodeError, RawFrame};
use lookout_base::PixelGrid;

/// Converts a planar 4:2:0 frame to a packed BGR pixel grid.
///
/// Each 2x2 luma block shares one U and one V sample. Converts to BGR
/// using BT.601 coefficients:
/// - B = Y + 1.772 * (U - 128)
/// - G = Y - 0.344 * (U - 128) - 0.714 * (V - 128)
/// - R = Y + 1.402 * (V - 128)
///
/// Channel values are clamped to [0, 255]. No resizing, no color
/// correction; identical input bytes always produce identical output.
///
/// # Errors
///
/// Returns `DecodeError` if the declared geometry is not self-consistent:
/// odd dimensions, `row_stride < width`, or a plane too short to cover the
/// declared width/height.
pub fn decode(frame: &RawFrame<'_>) -> Result<PixelGrid, DecodeError> {
    let width = frame.width();
    let height = frame.height();
    let row_stride = frame.row_stride();

    check_geometry(frame)?;

    let luma = frame.luma();
    let chroma_u = frame.chroma_u();
    let chroma_v = frame.chroma_v();
    let chroma_cols = width / 2;

    let mut bgr = Vec::with_capacity(width * height * 3);

    for row in 0..height {
        let luma_row = row * row_stride;
        let chroma_row = (row / 2) * chroma_cols;

        for col in 0..width {
            let y = luma[luma_row + col] as f32;
            let chroma_index = chroma_row + col / 2;
            let u = chroma_u[chroma_index] as f32 - 128.0;
            let v = chroma_v[chroma_index] as f32 - 128.0;

            let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;
            let g = (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8;
            let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;

            bgr.extend_from_slice(&[b, g, r]);
        }
    }

    Ok(PixelGrid::new(width, height, bgr)?)
}

/// Validate plane sizes against the declared width/height/stride.
fn check_geometry(frame: &RawFrame<'_>) -> Result<(), DecodeError> {
    let width = frame.width();
    let height = frame.height();
    let row_stride = frame.row_stride();

    if width % 2 != 0 || height % 2 != 0 {
        return Err(DecodeError::OddDimensions { width, height });
    }
    if row_stride < width {
        return Err(DecodeError::StrideTooSmall { row_stride, width });
    }

    // The last row needs no trailing padding, so only `width` bytes of it.
    let luma_needed = if height == 0 {
        0
    } else {
        (height - 1) * row_stride + width
    };
    if frame.luma().len() < luma_needed {
        return Err(DecodeError::LumaTruncated {
            expected: luma_needed,
            got: frame.luma().len(),
        });
    }

    let chroma_needed = (width / 2) * (height / 2);
    if frame.chroma_u().len() < chroma_needed {
        return Err(DecodeError::ChromaTruncated {
            plane: "U",
            expected: chroma_needed,
            got: frame.chroma_u().len(),
        });
    }
    if frame.chroma_v().len() < chroma_needed {
        return Err(DecodeError::ChromaTruncated {
            plane: "V",
            expected: chroma_needed,
            got: frame.chroma_v().len(),
        });
    }

    Ok(())
}
