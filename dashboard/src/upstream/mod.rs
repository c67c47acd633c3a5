pub mod client;

pub use client::IntensityClient;
