pub mod controller;
pub mod models;
pub mod persistence;
pub mod storage;
pub mod store;
