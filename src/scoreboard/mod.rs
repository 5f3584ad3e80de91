pub mod ranking;
pub mod registry;
pub mod teams;

pub use registry::MatchRegistry;
