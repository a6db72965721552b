//! Domain layer: money, the payout calculator, attribution windows, referral
//! entities and the ports the application layer talks to.

pub mod attribution;
pub mod money;
pub mod payout;
pub mod ports;
pub mod referral;
