pub mod cart;
pub mod catalog_service;
pub mod checkout_service;
pub mod delivery_fee;
pub mod message;
pub mod pricing;
pub mod security;
pub mod validation;
