pub mod db;
pub mod error;
#[cfg(test)]
pub mod memory;
