use validator::Validate;

use crate::api::errors::ApiError;
use crate::schemas::test::TestCreate;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn validate_payload(payload: &impl Validate) -> Result<(), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))
}

pub(crate) fn validate_username(username: &str) -> Result<(), ApiError> {
    let valid = username.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(ApiError::BadRequest(
            "Username may only contain letters, digits, '_', '-' and '.'".to_string(),
        ))
    }
}

pub(crate) fn validate_password_len(password: &str) -> Result<(), ApiError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )))
    }
}

/// Every question must offer at least one correct option.
pub(crate) fn validate_answer_keys(payload: &TestCreate) -> Result<(), ApiError> {
    match payload
        .questions
        .iter()
        .position(|question| !question.options.iter().any(|option| option.is_correct))
    {
        Some(index) => Err(ApiError::BadRequest(format!(
            "Question {} has no correct option",
            index + 1
        ))),
        None => Ok(()),
    }
}
