pub mod logger;
pub mod quicklook;
