// Analyzer — the client side of the remote accessibility analysis service.
//
// The service runs axe-core in a headless browser and answers one POST per
// URL. This module owns the request, the error taxonomy, and the adapter
// that turns either of the service's response formats into a report.

pub mod client;
pub mod error;
pub mod traits;
pub mod wire;
