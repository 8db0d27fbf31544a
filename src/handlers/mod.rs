pub mod cart;
pub mod delivery;
pub mod menu;
pub mod orders;
