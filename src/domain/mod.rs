//! Domain layer: library items, patrons, money and the commands that move
//! items between patrons and shelves.

pub mod command;
pub mod item;
pub mod money;
pub mod patron;
pub mod ports;
