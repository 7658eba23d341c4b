pub mod extract;
pub mod spritequad;
