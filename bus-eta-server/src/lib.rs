//! SMS bus-arrival gateway.
//!
//! A user texts a location and a route number ("MG Road 23"); the service
//! looks up the next bus with the Google Maps Directions API and texts the
//! ETA back through Fast2SMS.

pub mod config;
pub mod format;
pub mod maps;
pub mod parser;
pub mod providers;
pub mod sms;
pub mod web;
