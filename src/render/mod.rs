pub mod composite;
pub mod frame;
