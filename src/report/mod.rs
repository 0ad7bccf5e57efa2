// Report data model and the pure derivations the views need: score band,
// severity breakdown, and findings order.

pub mod models;
pub mod score;
pub mod severity;
pub mod sort;
