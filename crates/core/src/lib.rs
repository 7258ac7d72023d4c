#![forbid(unsafe_code)]

pub mod achievement;
pub mod fridge;
pub mod level;
pub mod menu;
pub mod quiz;
pub mod streak;
pub mod tags;
