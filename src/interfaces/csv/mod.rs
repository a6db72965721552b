//! CSV readers and writers. Readers trim whitespace and tolerate ragged rows;
//! writers emit a header row followed by one record per item.

pub mod booking_reader;
pub mod click_reader;
pub mod offer_reader;
pub mod payout_writer;
pub mod sweep_writer;
