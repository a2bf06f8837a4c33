pub mod access;
pub mod accounts;
pub mod employees;
pub mod health;
pub mod purchase_orders;
pub mod settings;
