pub mod autocompletion;
pub mod log;
