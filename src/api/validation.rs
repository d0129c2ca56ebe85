use super::ApiError;

pub fn validate_project_description(description: &str) -> Result<&str, ApiError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Project description cannot be empty"));
    }
    Ok(description)
}
