/// Application layer - Use cases, DTOs and package resolution
///
/// This layer orchestrates the errata domain and coordinates with
/// infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod resolution;
pub mod use_cases;
