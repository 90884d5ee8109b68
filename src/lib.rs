pub mod cli;
pub mod commands;
pub mod hoobari;
pub mod utils;
