//! Estimate the energy and water cost of LLM prompts.
//!
//! The pipeline is pure and synchronous: a prompt is token-counted,
//! classified ([`classify`]), its response length predicted
//! ([`estimator`]) and the total converted to kWh and millilitres
//! ([`energy`]). [`analysis::Analyzer`] wires these together. History,
//! period statistics, export and community sharing sit around it.

pub mod aggregate;
pub mod analysis;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod community;
pub mod config;
pub mod energy;
pub mod error;
pub mod estimator;
pub mod export;
pub mod history;
pub mod output;
pub mod tokens;
pub mod utils;
