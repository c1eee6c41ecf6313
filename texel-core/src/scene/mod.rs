pub mod dot;
pub mod fade;
