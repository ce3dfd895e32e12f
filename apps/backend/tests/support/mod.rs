#![allow(dead_code)]

pub mod factory;
pub mod specs;
pub mod test_state;
