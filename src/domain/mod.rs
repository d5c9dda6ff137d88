//! Domain layer for Naming Guard
//!
//! Architecture: Domain-Driven Design - Core business logic and entities
//! - Contains naming identities, violations and validation reports

pub mod identity;
pub mod violations;
