pub mod moscap;
