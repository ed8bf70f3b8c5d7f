// Shared test fixtures. Compiled into the crate only under cfg(test).

pub mod data_values;
pub mod payloads;

pub const PSI: &str = "D9PbzJY8bJO";
pub const DE: &str = "DATAEL00001";
pub const USER: &str = "admin";
