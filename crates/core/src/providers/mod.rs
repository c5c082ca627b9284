pub mod traits;

// Quote service implementations
pub mod iex;
