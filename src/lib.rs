pub mod api;
pub mod config;
pub mod errors;
pub mod resource;

#[cfg(test)]
mod tests;
