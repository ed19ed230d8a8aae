pub mod cv;
pub mod family;
pub mod moscap;
