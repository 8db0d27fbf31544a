pub mod cart;
pub mod customer;
pub mod menu;
pub mod order;
