//! The solar system at true relative scale.
//!
//! Distances are mean distances from the Sun and diameters are equatorial,
//! both in miles. Saturn's artwork includes its rings, so it is drawn wider
//! than the planet itself.

use parallax_engine::{Catalog, CelestialBody, RenderScaleOverride, SceneError};

/// Miles per pixel. Puts the Sun's diameter at exactly 1000 px.
pub const MILES_PER_PIXEL: f64 = 865.37;

/// Ring artwork width relative to Saturn's diameter.
pub const SATURN_RING_WIDTH: f64 = 1.75;

pub fn solar_bodies() -> Vec<CelestialBody> {
    vec![
        CelestialBody::new("Sun", 0.0, 865_370.0, "/Sun.svg")
            .with_orbital_period("N/A")
            .with_fun_fact("The Sun contains more than 99.85% of the total mass of our entire solar system."),
        CelestialBody::new("Mercury", 36_000_000.0, 3_032.0, "/Mercury.svg")
            .with_orbital_period("88 days")
            .with_fun_fact("Mercury has no atmosphere, which means it has no weather."),
        CelestialBody::new("Venus", 67_200_000.0, 7_521.0, "/Venus.svg")
            .with_orbital_period("225 days")
            .with_fun_fact("Venus rotates in the opposite direction of most planets, including Earth."),
        CelestialBody::new("Earth", 93_000_000.0, 7_926.0, "/Earth.svg")
            .with_moons(1)
            .with_orbital_period("365.25 days")
            .with_fun_fact("Earth is the only planet known to support life. That's where we live!"),
        CelestialBody::new("Mars", 142_000_000.0, 4_212.0, "/Mars.svg")
            .with_moons(2)
            .with_orbital_period("687 days")
            .with_fun_fact("Mars is often called the \"Red Planet\" due to its reddish appearance."),
        CelestialBody::new("Jupiter", 484_000_000.0, 86_881.0, "/Jupiter.svg")
            .with_moons(79)
            .with_orbital_period("11.9 years")
            .with_fun_fact("Jupiter has the shortest day of all the planets; it rotates once about every 10 hours."),
        CelestialBody::new("Saturn", 886_000_000.0, 72_367.0, "/Saturn.svg")
            .with_moons(83)
            .with_orbital_period("29.5 years")
            .with_fun_fact("Saturn can be seen with the naked eye and is known for its stunning system of rings.")
            .with_render_scale(RenderScaleOverride::width(SATURN_RING_WIDTH)),
        CelestialBody::new("Uranus", 1_784_000_000.0, 31_518.0, "/Uranus.svg")
            .with_moons(27)
            .with_orbital_period("84 years")
            .with_fun_fact("Uranus rotates on its side, making it unique among the solar system planets."),
        CelestialBody::new("Neptune", 2_793_000_000.0, 30_599.0, "/Neptune.svg")
            .with_moons(14)
            .with_orbital_period("164.8 years")
            .with_fun_fact("Neptune was the first planet to be found using mathematical predictions rather than telescopic observation."),
    ]
}

pub fn solar_catalog() -> Result<Catalog, SceneError> {
    Catalog::new(solar_bodies())
}
