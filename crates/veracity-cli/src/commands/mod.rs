//! Command implementations.

pub mod cache;
pub mod reputation;
pub mod verify;

pub use self::cache::execute_cache;
pub use self::reputation::execute_reputation;
pub use self::verify::execute_verify;
