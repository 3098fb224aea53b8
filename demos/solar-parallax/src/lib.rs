use wasm_bindgen::prelude::*;

mod bodies;
mod view;
use view::SolarParallax;

parallax_web::export_scene!(SolarParallax, "solar-parallax");
