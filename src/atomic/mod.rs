// Atomic module - resolved test descriptors handed to the runners

pub mod error;
pub mod loader;
pub mod paths;
pub mod types;

pub use error::TestDefinitionError;
pub use loader::{filter_technique, load_tests};
pub use paths::abs_path;
pub use types::AtomicTest;
