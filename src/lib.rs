pub mod cli;
pub mod data;
pub mod defaults;
pub mod processor;
pub mod reader;
pub mod report;
pub mod stats;
