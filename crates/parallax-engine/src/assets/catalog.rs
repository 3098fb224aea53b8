use std::collections::HashSet;
use serde::{Deserialize, Serialize};

use crate::api::error::SceneError;
use crate::api::types::BodyIndex;

/// Opaque handle to a visual asset (a URL or path the host knows how to load).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Per-body multipliers applied on top of the true-scale rendered size.
/// Used for bodies whose artwork is wider than the planet itself (rings).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderScaleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl RenderScaleOverride {
    pub fn width(multiplier: f64) -> Self {
        Self { width: Some(multiplier), height: None }
    }

    pub fn width_multiplier(&self) -> f64 {
        self.width.unwrap_or(1.0)
    }

    pub fn height_multiplier(&self) -> f64 {
        self.height.unwrap_or(1.0)
    }
}

/// A single entry of the catalog. Distances and diameters are in real-world
/// units (miles for the solar system); the scale factor turns them into pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    pub name: String,
    /// Distance from the origin body. Zero for the origin itself.
    pub distance: f64,
    pub diameter: f64,
    pub image: ImageRef,
    #[serde(default)]
    pub moons: u32,
    #[serde(default)]
    pub orbital_period: String,
    #[serde(default)]
    pub fun_fact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_scale: Option<RenderScaleOverride>,
}

impl CelestialBody {
    pub fn new(name: impl Into<String>, distance: f64, diameter: f64, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            distance,
            diameter,
            image: ImageRef::new(image),
            moons: 0,
            orbital_period: String::new(),
            fun_fact: String::new(),
            render_scale: None,
        }
    }

    pub fn with_moons(mut self, moons: u32) -> Self {
        self.moons = moons;
        self
    }

    pub fn with_orbital_period(mut self, period: impl Into<String>) -> Self {
        self.orbital_period = period.into();
        self
    }

    pub fn with_fun_fact(mut self, fact: impl Into<String>) -> Self {
        self.fun_fact = fact.into();
        self
    }

    pub fn with_render_scale(mut self, scale: RenderScaleOverride) -> Self {
        self.render_scale = Some(scale);
        self
    }

    /// The origin body sits at distance zero.
    pub fn is_origin(&self) -> bool {
        self.distance == 0.0
    }

    pub fn render_scale(&self) -> RenderScaleOverride {
        self.render_scale.unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct CatalogManifest {
    bodies: Vec<CelestialBody>,
}

/// Validated, ordered list of bodies. The first entry is always the origin and
/// distances never decrease, so the last entry defines the scene width.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    bodies: Vec<CelestialBody>,
}

impl Catalog {
    /// Validate and wrap a list of bodies.
    pub fn new(bodies: Vec<CelestialBody>) -> Result<Self, SceneError> {
        validate(&bodies)?;
        Ok(Self { bodies })
    }

    /// Parse a catalog from JSON of the form `{ "bodies": [ ... ] }`.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let manifest: CatalogManifest = serde_json::from_str(json)?;
        Self::new(manifest.bodies)
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn get(&self, index: BodyIndex) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn origin(&self) -> &CelestialBody {
        &self.bodies[0]
    }

    pub fn last(&self) -> &CelestialBody {
        &self.bodies[self.bodies.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false for a validated catalog; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }
}

fn validate(bodies: &[CelestialBody]) -> Result<(), SceneError> {
    if bodies.is_empty() {
        return Err(SceneError::EmptyCatalog);
    }

    let mut names = HashSet::with_capacity(bodies.len());
    let mut origin: Option<&CelestialBody> = None;

    for (i, body) in bodies.iter().enumerate() {
        if body.name.trim().is_empty() {
            return Err(SceneError::EmptyName(i));
        }
        if !names.insert(body.name.as_str()) {
            return Err(SceneError::DuplicateName(body.name.clone()));
        }
        if !body.distance.is_finite() || body.distance < 0.0 {
            return Err(SceneError::InvalidDistance {
                name: body.name.clone(),
                distance: body.distance,
            });
        }
        if !body.diameter.is_finite() || body.diameter <= 0.0 {
            return Err(SceneError::InvalidDiameter {
                name: body.name.clone(),
                diameter: body.diameter,
            });
        }
        if let Some(scale) = &body.render_scale {
            for multiplier in [scale.width, scale.height].into_iter().flatten() {
                if !multiplier.is_finite() || multiplier <= 0.0 {
                    return Err(SceneError::InvalidOverride {
                        name: body.name.clone(),
                        multiplier,
                    });
                }
            }
        }

        if body.is_origin() {
            if let Some(first) = origin {
                return Err(SceneError::DuplicateOrigin {
                    first: first.name.clone(),
                    second: body.name.clone(),
                });
            }
            if i != 0 {
                return Err(SceneError::OriginNotFirst { name: body.name.clone() });
            }
            origin = Some(body);
        }

        if i > 0 {
            let prev = &bodies[i - 1];
            if body.distance < prev.distance {
                return Err(SceneError::Unsorted {
                    name: body.name.clone(),
                    distance: body.distance,
                    previous: prev.name.clone(),
                    previous_distance: prev.distance,
                });
            }
        }
    }

    if origin.is_none() {
        return Err(SceneError::MissingOrigin);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CelestialBody> {
        vec![
            CelestialBody::new("Sun", 0.0, 865_370.0, "/Sun.svg"),
            CelestialBody::new("Mercury", 36_000_000.0, 3_032.0, "/Mercury.svg"),
            CelestialBody::new("Venus", 67_200_000.0, 7_521.0, "/Venus.svg"),
        ]
    }

    #[test]
    fn accepts_sorted_catalog() {
        let catalog = Catalog::new(sample()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.origin().name, "Sun");
        assert_eq!(catalog.last().name, "Venus");
        assert!(catalog.find("Mercury").is_some());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(Catalog::new(Vec::new()), Err(SceneError::EmptyCatalog)));
    }

    #[test]
    fn rejects_unsorted() {
        let mut bodies = sample();
        bodies.swap(1, 2);
        assert!(matches!(Catalog::new(bodies), Err(SceneError::Unsorted { .. })));
    }

    #[test]
    fn accepts_equal_nonzero_distances() {
        let catalog = Catalog::new(vec![
            CelestialBody::new("Sun", 0.0, 865_370.0, "/Sun.svg"),
            CelestialBody::new("A", 1_000_000.0, 865.37, "/A.svg"),
            CelestialBody::new("B", 1_000_000.0, 865.37, "/B.svg"),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.last().name, "B");
    }

    #[test]
    fn rejects_second_origin() {
        let mut bodies = sample();
        bodies[1].distance = 0.0;
        assert!(matches!(
            Catalog::new(bodies),
            Err(SceneError::DuplicateOrigin { .. })
        ));
    }

    #[test]
    fn rejects_missing_origin() {
        let mut bodies = sample();
        bodies.remove(0);
        assert!(matches!(Catalog::new(bodies), Err(SceneError::MissingOrigin)));
    }

    #[test]
    fn rejects_origin_out_of_place() {
        let bodies = vec![
            CelestialBody::new("Mercury", 36_000_000.0, 3_032.0, "/Mercury.svg"),
            CelestialBody::new("Sun", 0.0, 865_370.0, "/Sun.svg"),
        ];
        assert!(matches!(
            Catalog::new(bodies),
            Err(SceneError::OriginNotFirst { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_names_and_bad_sizes() {
        let mut bodies = sample();
        bodies[2].name = "Mercury".into();
        assert!(matches!(Catalog::new(bodies), Err(SceneError::DuplicateName(_))));

        let mut bodies = sample();
        bodies[1].diameter = 0.0;
        assert!(matches!(Catalog::new(bodies), Err(SceneError::InvalidDiameter { .. })));

        let mut bodies = sample();
        bodies[1].distance = f64::NAN;
        assert!(matches!(Catalog::new(bodies), Err(SceneError::InvalidDistance { .. })));

        let mut bodies = sample();
        bodies[2].render_scale = Some(RenderScaleOverride::width(-1.0));
        assert!(matches!(Catalog::new(bodies), Err(SceneError::InvalidOverride { .. })));
    }

    #[test]
    fn parses_json_catalog() {
        let json = r#"{
            "bodies": [
                { "name": "Sun", "distance": 0, "diameter": 865370, "image": "/Sun.svg" },
                {
                    "name": "Saturn",
                    "distance": 886000000,
                    "diameter": 72367,
                    "image": "/Saturn.svg",
                    "moons": 83,
                    "orbitalPeriod": "29.5 years",
                    "funFact": "Rings.",
                    "renderScale": { "width": 1.75 }
                }
            ]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        let saturn = catalog.find("Saturn").unwrap();
        assert_eq!(saturn.moons, 83);
        assert_eq!(saturn.orbital_period, "29.5 years");
        assert_eq!(saturn.render_scale().width_multiplier(), 1.75);
        assert_eq!(saturn.render_scale().height_multiplier(), 1.0);
        assert_eq!(catalog.origin().moons, 0);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Catalog::from_json("{ nope"), Err(SceneError::Parse(_))));
    }
}
