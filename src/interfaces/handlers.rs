pub mod home;
pub mod proxy;
pub mod system;
