//! alphagrow-filter - Tone curve operations
//!
//! This crate provides:
//!
//! - Spline tone curves defined by control points ([`ToneCurve`])
//! - 256-entry lookup tables ([`TrcLut`]) and their application to images

pub mod curves;
mod error;

pub use curves::{ToneCurve, TrcLut, apply_curve, trc_map};
pub use error::{FilterError, FilterResult};
