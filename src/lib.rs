pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
mod testing;
