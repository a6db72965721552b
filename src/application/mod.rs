//! Application layer containing the attribution and expiration orchestration.
//!
//! This module defines the `AttributionEngine`, which credits bookings to
//! referral clicks, accepts collaboration offers and runs expiration sweeps
//! against whichever stores and clock it is given.

pub mod engine;
