pub mod addresses;
pub mod enterprise;
