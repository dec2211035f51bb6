pub mod machine;

pub use machine::{Machine, MachineConfig, RunSummary};
pub use retro8080_cpu as cpu;
