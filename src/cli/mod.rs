//! Command-line workflows shared by the binary and the integration tests

pub mod orchestration;
