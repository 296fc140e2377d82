pub mod error;
pub mod generator;
pub mod random;
pub mod sampler;
pub mod score;
pub mod session;
pub mod start_time;
