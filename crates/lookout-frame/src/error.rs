use lookout_base::PixelGridError;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum DecodeError {
    OddDimensions { width: usize, height: usize },
    StrideTooSmall { row_stride: usize, width: usize },
    LumaTruncated { expected: usize, got: usize },
    ChromaTruncated { plane: &'static str, expected: usize, got: usize },
    Grid(PixelGridError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::OddDimensions { width, height } => {
                write!(f, "4:2:0 frame dimensions must be even, got {width}x{height}")
            }
            DecodeError::StrideTooSmall { row_stride, width } => {
                write!(f, "row stride {row_stride} smaller than width {width}")
            }
            DecodeError::LumaTruncated { expected, got } => {
                write!(f, "luma plane truncated: expected {expected} bytes, got {got}")
            }
            DecodeError::ChromaTruncated {
                plane,
                expected,
                got,
            } => {
                write!(
                    f,
                    "chroma {plane} plane truncated: expected {expected} bytes, got {got}"
                )
            }
            DecodeError::Grid(err) => write!(f, "grid error: {err}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<PixelGridError> for DecodeError {
    fn from(err: PixelGridError) -> Self {
        DecodeError::Grid(err)
    }
}
