use thiserror::Error;

/// Failures surfaced by snapshot lookups and editorial input checks.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}
