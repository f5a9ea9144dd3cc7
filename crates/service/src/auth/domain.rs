use serde::{Deserialize, Serialize};

use models::user::Role;

use crate::errors::ServiceError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Profile row to create alongside the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewProfile {
    Student { university: String },
    Business { company_name: String },
    Admin,
}

fn non_blank(v: &Option<String>) -> Option<String> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

impl RegisterInput {
    /// Field checks that must pass before any transaction is opened.
    pub fn validate(&self) -> Result<(Role, NewProfile), ServiceError> {
        if !self.email.contains('@') {
            return Err(ServiceError::Validation("invalid email".into()));
        }
        if self.name.trim().is_empty() {
            return Err(ServiceError::Validation("name required".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        let role: Role = self.role.parse()?;
        let profile = match role {
            Role::Student => NewProfile::Student {
                university: non_blank(&self.university)
                    .ok_or_else(|| ServiceError::Validation("university required for students".into()))?,
            },
            Role::Business => NewProfile::Business {
                company_name: non_blank(&self.company_name)
                    .ok_or_else(|| ServiceError::Validation("company_name required for businesses".into()))?,
            },
            Role::Admin => NewProfile::Admin,
        };
        Ok((role, profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(role: &str) -> RegisterInput {
        RegisterInput {
            email: "a@b.c".into(),
            name: "A".into(),
            password: "Passw0rd".into(),
            role: role.into(),
            university: None,
            company_name: None,
        }
    }

    #[test]
    fn student_requires_university() {
        assert!(matches!(input("student").validate(), Err(ServiceError::Validation(_))));
        let mut i = input("student");
        i.university = Some("  ".into());
        assert!(i.validate().is_err());
        i.university = Some("MIT".into());
        assert_eq!(i.validate().unwrap(), (Role::Student, NewProfile::Student { university: "MIT".into() }));
    }

    #[test]
    fn business_requires_company_name() {
        assert!(input("business").validate().is_err());
        let mut i = input("business");
        i.company_name = Some("Acme".into());
        assert_eq!(i.validate().unwrap().1, NewProfile::Business { company_name: "Acme".into() });
    }

    #[test]
    fn rejects_bad_fields() {
        let mut i = input("admin");
        i.password = "short".into();
        assert!(i.validate().is_err());
        let mut i = input("admin");
        i.email = "nope".into();
        assert!(i.validate().is_err());
        assert!(input("root").validate().is_err());
        assert_eq!(input("admin").validate().unwrap(), (Role::Admin, NewProfile::Admin));
    }
}
