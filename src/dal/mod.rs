pub mod dao;
pub mod model;
pub mod reader;
