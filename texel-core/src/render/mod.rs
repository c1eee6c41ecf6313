pub mod backend;
pub mod context;
pub mod cpu;
pub mod recording;
