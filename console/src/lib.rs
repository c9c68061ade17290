// console/src/lib.rs
pub mod cli;
