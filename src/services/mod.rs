pub mod bottle_service;
pub mod bottle_store;

#[cfg(test)]
pub mod memory_store;
