//! DTOs for users_sea adapter.

/// DTO for creating a user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
}

impl UserCreate {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
