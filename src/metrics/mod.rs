pub mod memory_data;
pub mod report_data;

// Re-export the main types for easy access
pub use memory_data::*;
pub use report_data::*;
