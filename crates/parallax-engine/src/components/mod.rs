pub mod element;
pub mod layer;
