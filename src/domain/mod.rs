//! Core domain types and logic.

pub mod candle;
pub mod indicator;
pub mod screener;
pub mod pipeline;
pub mod universe;
pub mod error;
