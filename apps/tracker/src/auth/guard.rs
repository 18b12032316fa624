use crate::errors::AppError;

/// Single-owner authorization: a caller is allowed iff it presents a verified
/// email equal to the configured owner email.
///
/// Stateless. Handlers re-run it on every request.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    owner_email: String,
}

impl AccessGuard {
    pub fn new(owner_email: impl Into<String>) -> Self {
        Self {
            owner_email: owner_email.into(),
        }
    }

    pub fn owner_email(&self) -> &str {
        &self.owner_email
    }

    pub fn allows(&self, identity: Option<&str>) -> bool {
        matches!(identity, Some(email) if email == self.owner_email)
    }

    pub fn check(&self, identity: Option<&str>) -> Result<(), AppError> {
        if self.allows(identity) {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }
}
