//! Hand landmark geometry as produced by the client-side hand tracker.
//!
//! Coordinates are passed through exactly as received. `x`/`y` are normalized
//! to the frame, `z` is depth relative to the wrist.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Upper bound on detected hands per request.
pub const MAX_HANDS: usize = 2;

/// Points per detected hand.
pub const LANDMARKS_PER_HAND: usize = 21;

#[derive(Debug, Error)]
pub enum LandmarkError {
    #[error("expected at most {MAX_HANDS} hands, got {0}")]
    TooManyHands(usize),

    #[error("hand {hand} has {count} landmarks, expected {LANDMARKS_PER_HAND}")]
    WrongLandmarkCount { hand: usize, count: usize },

    #[error("hand {hand} landmark {index} has a non-finite coordinate")]
    NonFinite { hand: usize, index: usize },

    #[error("landmark encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One detected hand, ordered by landmark index (wrist first).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct HandLandmarks(pub Vec<Landmark>);

impl HandLandmarks {
    pub fn points(&self) -> &[Landmark] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Landmark>> for HandLandmarks {
    fn from(points: Vec<Landmark>) -> Self {
        Self(points)
    }
}

/// Every hand detected in a single frame. An empty list means no hand was seen
/// and is still a valid request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GestureInput {
    pub landmarks: Vec<HandLandmarks>,
}

impl GestureInput {
    pub fn new(landmarks: Vec<HandLandmarks>) -> Self {
        Self { landmarks }
    }

    pub fn hand_count(&self) -> usize {
        self.landmarks.len()
    }

    /// Checks the shape only: hand count and points per hand.
    pub fn validate(&self) -> Result<(), LandmarkError> {
        if self.landmarks.len() > MAX_HANDS {
            return Err(LandmarkError::TooManyHands(self.landmarks.len()));
        }

        for (hand, points) in self.landmarks.iter().enumerate() {
            if points.len() != LANDMARKS_PER_HAND {
                return Err(LandmarkError::WrongLandmarkCount {
                    hand,
                    count: points.len(),
                });
            }
        }

        Ok(())
    }

    /// Encodes the nested landmark list into the text stored as `landmark_data`.
    ///
    /// JSON has no representation for NaN or infinity, so those are rejected
    /// here instead of being written as `null` and lost.
    pub fn to_landmark_data(&self) -> Result<String, LandmarkError> {
        for (hand, points) in self.landmarks.iter().enumerate() {
            if let Some(index) = points.points().iter().position(|p| !p.is_finite()) {
                return Err(LandmarkError::NonFinite { hand, index });
            }
        }

        Ok(serde_json::to_string(&self.landmarks)?)
    }

    pub fn from_landmark_data(data: &str) -> Result<Self, LandmarkError> {
        let landmarks: Vec<HandLandmarks> = serde_json::from_str(data)?;
        Ok(Self { landmarks })
    }
}
