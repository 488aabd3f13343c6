/// Borrowed view over one planar 4:2:0 camera frame.
///
/// The three planes stay owned by the capture source; the borrow ends when
/// the delivery callback returns, so a frame cannot be retained past it.
///
/// Layout:
/// - `luma`: one byte per pixel, rows addressed at `row_stride` intervals
///   (`row_stride >= width`, trailing padding ignored).
/// - `chroma_u`, `chroma_v`: one byte per 2x2 luma block, tightly packed at
///   `width / 2` samples per row.
#[derive(Clone, Copy, Debug)]
pub struct RawFrame<'a> {
    luma: &'a [u8],
    chroma_u: &'a [u8],
    chroma_v: &'a [u8],
    width: usize,
    height: usize,
    row_stride: usize,
}

impl<'a> RawFrame<'a> {
    pub fn new(
        luma: &'a [u8],
        chroma_u: &'a [u8],
        chroma_v: &'a [u8],
        width: usize,
        height: usize,
        row_stride: usize,
    ) -> Self {
        Self {
            luma,
            chroma_u,
            chroma_v,
            width,
            height,
            row_stride,
        }
    }

    pub fn luma(&self) -> &'a [u8] {
        self.luma
    }

    pub fn chroma_u(&self) -> &'a [u8] {
        self.chroma_u
    }

    pub fn chroma_v(&self) -> &'a [u8] {
        self.chroma_v
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }
}
