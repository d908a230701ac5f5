//! CLI commands for the subword tokenizer.

pub mod benchmark;
pub mod corpus;
pub mod encode;
pub mod train;

pub use benchmark::BenchmarkCommand;
pub use encode::EncodeCommand;
pub use train::TrainCommand;
