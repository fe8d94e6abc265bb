//! Domain layer: models, errors and ports. No IO lives here.

pub mod errors;
pub mod models;
pub mod ports;
