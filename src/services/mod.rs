pub mod seed;

pub use seed::init_storage;
