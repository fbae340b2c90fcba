use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path segment as a record id; malformed ids are reported as not found.
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound("Record not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_id_is_not_found() {
        assert!(matches!(valid_uuid("not-a-uuid"), Err(AppError::NotFound(_))));
        assert!(valid_uuid("6f1c1f9e-6a0e-4a53-9d8e-1f9c1d2b3a4c").is_ok());
    }
}
