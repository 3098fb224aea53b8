pub mod controller;
pub mod scale;
pub mod stage;
