use thiserror::Error;

use crate::Point2;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("curve flattening exceeded {limit} samples")]
    SubdivisionLimit {
        limit: usize,
        /// Best-effort polyline covering the whole domain.
        partial: Vec<Point2>,
    },

    #[error("curve parameter domain [{start}, {end}] is empty or non-finite")]
    EmptyDomain { start: f64, end: f64 },

    #[error("invalid NURBS curve: {reason}")]
    InvalidNurbs { reason: String },
}
