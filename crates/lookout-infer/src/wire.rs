//! Wire format of the detection server.
//!
//! Request body: a bare 3D array, height x width x 3, of integer channel
//! values 0-255 in B,G,R order. Response body:
//! `{"data":[{"class_name","confidence","x1","x2","y1","y2"}]}`.

use crate::{BoundingBox, InferError, Prediction, PredictionSet};
use lookout_base::PixelGrid;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde::Deserialize;

/// Serializes a grid straight into the nested-array request body without
/// materializing the intermediate row/pixel vectors.
struct GridPayload<'a>(&'a PixelGrid);

struct RowPayload<'a>(&'a [u8]);

impl Serialize for GridPayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let grid = self.0;
        let row_bytes = grid.width() * 3;
        let mut rows = serializer.serialize_seq(Some(grid.height()))?;
        if row_bytes > 0 {
            for row in grid.data().chunks_exact(row_bytes) {
                rows.serialize_element(&RowPayload(row))?;
            }
        }
        rows.end()
    }
}

impl Serialize for RowPayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pixels = serializer.serialize_seq(Some(self.0.len() / 3))?;
        for px in self.0.chunks_exact(3) {
            pixels.serialize_element(&(px[0], px[1], px[2]))?;
        }
        pixels.end()
    }
}

pub(crate) fn serialize_grid(grid: &PixelGrid) -> Result<String, InferError> {
    serde_json::to_string(&GridPayload(grid))
        .map_err(|e| InferError::Runtime(format!("serialize request body: {e}")))
}

#[derive(Debug, Deserialize)]
struct WirePrediction {
    class_name: String,
    confidence: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    data: Vec<WirePrediction>,
}

/// Parse a response body into a `PredictionSet`.
///
/// A prediction missing any required field fails the whole parse; there is
/// no partial-record tolerance. Corner order is normalized on conversion.
pub(crate) fn parse_response(body: &str) -> Result<PredictionSet, InferError> {
    let wire: WireResponse =
        serde_json::from_str(body).map_err(|e| InferError::Parse(e.to_string()))?;

    let predictions = wire
        .data
        .into_iter()
        .map(|p| Prediction {
            class_name: p.class_name,
            confidence: p.confidence,
            bounding_box: BoundingBox::new(p.x1, p.y1, p.x2, p.y2),
        })
        .collect();

    Ok(PredictionSet::new(predictions))
}
