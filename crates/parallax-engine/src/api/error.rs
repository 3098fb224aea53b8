use thiserror::Error;

/// Everything that can go wrong while configuring or mounting a scene.
///
/// Catalog problems are programming errors in the shipped data; they are
/// reported once at startup instead of silently mis-rendering.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("catalog is empty")]
    EmptyCatalog,

    #[error("catalog has no origin body (distance 0)")]
    MissingOrigin,

    #[error("catalog has more than one origin body: {first} and {second}")]
    DuplicateOrigin { first: String, second: String },

    #[error("origin body {name} must be the first catalog entry")]
    OriginNotFirst { name: String },

    #[error("catalog is not sorted by distance: {name} ({distance}) follows {previous} ({previous_distance})")]
    Unsorted {
        name: String,
        distance: f64,
        previous: String,
        previous_distance: f64,
    },

    #[error("duplicate body name: {0}")]
    DuplicateName(String),

    #[error("body at index {0} has an empty name")]
    EmptyName(usize),

    #[error("body {name} has invalid distance {distance}")]
    InvalidDistance { name: String, distance: f64 },

    #[error("body {name} has invalid diameter {diameter}")]
    InvalidDiameter { name: String, diameter: f64 },

    #[error("body {name} has invalid render scale multiplier {multiplier}")]
    InvalidOverride { name: String, multiplier: f64 },

    #[error("scale factor must be finite and positive, got {0}")]
    InvalidScale(f64),

    #[error("parallax coefficient must be finite and non-negative, got {0}")]
    InvalidCoefficient(f64),

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("scene is not mounted")]
    NotMounted,

    #[error("scene is already mounted")]
    AlreadyMounted,
}
