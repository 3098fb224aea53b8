pub mod mapper;
pub mod readout;
pub mod scroll;
pub mod style;
