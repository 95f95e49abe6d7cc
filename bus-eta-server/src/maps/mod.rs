//! Google Maps Directions client for bus ETAs.
//!
//! Route numbers are not places, so each lookup first resolves the route to
//! a fixed destination (see [`destinations`]) and then asks for a bus-only
//! transit route from the user's location to it. Only the first leg of the
//! first route is read.

mod client;
pub mod destinations;
mod error;
mod eta;
mod types;

pub use client::{MapsClient, MapsConfig};
pub use destinations::{DEFAULT_DESTINATION, destination_for};
pub use error::MapsError;
pub use eta::{EtaData, EtaResult, UNKNOWN, eta_from_response};
pub use types::{DirectionsResponse, DirectionsRoute, RouteLeg, TextValue, TransitTime};
