// a11y-report: terminal client for a remote web accessibility analyzer.
//
// This is the library root. The analyzer module talks to the service, the
// report module holds the data model and its pure derivations, and the
// controller ties them into one view's state machine.

pub mod analyzer;
pub mod config;
pub mod controller;
pub mod output;
pub mod report;
pub mod session;
