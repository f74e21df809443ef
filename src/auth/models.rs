use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: Option<String>,
    pub exp: i64,
    pub iat: Option<i64>,
}

impl Claims {
    pub fn is_admin(&self, admin_email: &str) -> bool {
        match &self.email {
            Some(email) => !admin_email.is_empty() && email.eq_ignore_ascii_case(admin_email),
            None => false,
        }
    }

    pub fn into_identity(self, admin_email: &str) -> Identity {
        let is_admin = self.is_admin(admin_email);
        Identity {
            user_id: self.sub,
            is_admin,
        }
    }
}

/// The authenticated caller, as seen by protected handlers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub is_admin: bool,
}

impl Identity {
    pub fn owns(&self, owner_id: &str) -> bool {
        self.user_id == owner_id
    }

    pub fn can_read(&self, owner_id: &str) -> bool {
        self.is_admin || self.owns(owner_id)
    }
}
