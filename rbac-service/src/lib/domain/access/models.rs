use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::Roles;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Authenticated identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub email: EmailAddress,
    pub roles: Roles,
}

impl Principal {
    /// `ROLE_<NAME>` authority strings, one per held role.
    pub fn authorities(&self) -> Vec<String> {
        self.roles.iter().map(|role| role.authority()).collect()
    }

    pub fn has_any_role(&self, required: &[Role]) -> bool {
        self.roles.intersects(required)
    }
}

impl From<User> for Principal {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            roles: user.roles,
        }
    }
}
