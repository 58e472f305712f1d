pub mod adapter;
pub mod strategy;
