pub mod cpu;
pub mod platform;
pub mod sampler;
pub mod snapshot;
