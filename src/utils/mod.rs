pub mod constants;
pub mod img_stuffs;
pub mod run_bin;
