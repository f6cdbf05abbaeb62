// Platform module - host platform detection and interpreter lookup

pub mod resolver;
pub mod types;

pub use resolver::{local_platform, platform_from_os_name, resolve_interpreter};
pub use types::{ExecutorKind, InterpreterPath, Platform};
