pub mod clap;
pub mod termination;
