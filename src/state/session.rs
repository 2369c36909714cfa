//! Authentication session context
//!
//! Owned by the app and passed to whatever needs a credential. Set on login,
//! cleared on logout, checked when an admin view is entered.

use thiserror::Error;
use tracing::info;

use super::{AuthUser, Role};

/// Bearer credential and the user it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Please sign in first.")]
    NotSignedIn,
    #[error("Administrator access is required.")]
    Forbidden,
    #[error("Only super administrators can manage forms and users.")]
    SuperAdminRequired,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    credential: Option<Credential>,
}

impl Session {
    pub fn sign_in(&mut self, token: String, user: AuthUser) {
        info!(user = %user.email, role = user.role.label(), "Signed in");
        self.credential = Some(Credential { token, user });
    }

    pub fn sign_out(&mut self) {
        if let Some(credential) = self.credential.take() {
            info!(user = %credential.user.email, "Signed out");
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.credential.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.credential.as_ref().map(|c| c.token.as_str())
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.credential.as_ref().map(|c| &c.user)
    }

    /// Guard for admin-only views
    pub fn require_admin(&self) -> Result<&Credential, AccessError> {
        let credential = self.credential.as_ref().ok_or(AccessError::NotSignedIn)?;
        if credential.user.role.is_admin() {
            Ok(credential)
        } else {
            Err(AccessError::Forbidden)
        }
    }

    /// Guard for the form builder
    pub fn require_super_admin(&self) -> Result<&Credential, AccessError> {
        let credential = self.credential.as_ref().ok_or(AccessError::NotSignedIn)?;
        match credential.user.role {
            Role::SuperAdmin => Ok(credential),
            _ => Err(AccessError::SuperAdminRequired),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            role,
        }
    }

    #[test]
    fn test_new_session_is_signed_out() {
        let session = Session::default();
        assert!(!session.is_signed_in());
        assert!(session.token().is_none());
        assert!(session.user().is_none());
        assert_eq!(session.require_admin(), Err(AccessError::NotSignedIn));
    }

    #[test]
    fn test_sign_in_stores_credential() {
        let mut session = Session::default();
        session.sign_in("tok".to_string(), user(Role::Admin));
        assert!(session.is_signed_in());
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.user().map(|u| u.id.as_str()), Some("u1"));
    }

    #[test]
    fn test_require_admin_accepts_admin_roles() {
        let mut session = Session::default();
        session.sign_in("tok".to_string(), user(Role::SuperAdmin));
        assert!(session.require_admin().is_ok());
        session.sign_in("tok".to_string(), user(Role::Admin));
        assert_eq!(session.require_admin().map(|c| c.token.as_str()), Ok("tok"));
    }

    #[test]
    fn test_require_admin_rejects_other_roles() {
        let mut session = Session::default();
        session.sign_in("tok".to_string(), user(Role::Other));
        assert_eq!(session.require_admin(), Err(AccessError::Forbidden));
    }

    #[test]
    fn test_builder_needs_super_admin() {
        let mut session = Session::default();
        assert_eq!(session.require_super_admin(), Err(AccessError::NotSignedIn));
        session.sign_in("tok".to_string(), user(Role::Admin));
        assert_eq!(
            session.require_super_admin(),
            Err(AccessError::SuperAdminRequired)
        );
        session.sign_in("tok".to_string(), user(Role::SuperAdmin));
        assert!(session.require_super_admin().is_ok());
    }

    #[test]
    fn test_sign_out_clears_credential() {
        let mut session = Session::default();
        session.sign_in("tok".to_string(), user(Role::Admin));
        session.sign_out();
        assert!(!session.is_signed_in());
        session.sign_out();
        assert!(!session.is_signed_in());
    }
}
