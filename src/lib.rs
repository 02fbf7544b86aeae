pub mod capture;
pub mod config;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod pipeline;
pub mod spreadsheets;

#[cfg(test)]
mod tests;
