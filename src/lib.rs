//! Situation-weighted scoring for hockey goals and assists.
//!
//! Goals are weighted by score state, strength, period and empty net, credit
//! flows to the scorer and assisters, and players are ranked both by raw
//! points and by weighted points.

pub mod config;
pub mod data;
pub mod filter;
pub mod output;
pub mod scoring;
