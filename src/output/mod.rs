// Output module - cleanup and logging of captured interpreter output

pub mod report;
pub mod sanitizer;

pub use report::print_process_output;
pub use sanitizer::clean;
