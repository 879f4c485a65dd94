//! Project report rendering and delimited exports for Taskdeck.
//!
//! Everything here is a pure function of repository read results, so it
//! can be tested with fixture data instead of a live store. PDF
//! rasterization of the HTML document is a downstream concern.

mod csv;
mod filter;
mod html;

pub use csv::*;
pub use filter::*;
pub use html::*;
