use super::ApiError;

pub fn validate_id(resource: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {resource} ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

/// Normalise an optional `?date=` filter: blank means no filter.
pub fn date_filter(date: Option<&str>) -> Option<&str> {
    date.map(str::trim).filter(|d| !d.is_empty())
}
