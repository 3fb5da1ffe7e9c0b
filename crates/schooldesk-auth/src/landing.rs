//! Where a caller lands when they open the app root.

use schooldesk_models::UserType;

use crate::session::Identity;

/// Every kind of caller the landing router distinguishes, including one with
/// no session at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    Admin,
    Teacher,
    Student,
    Parent,
    Unauthenticated,
}

impl Audience {
    /// Parses a role string. Anything unrecognized is treated as no session.
    pub fn from_role_str(role: &str) -> Self {
        role.parse::<UserType>()
            .map(Self::from)
            .unwrap_or(Self::Unauthenticated)
    }
}

impl From<UserType> for Audience {
    fn from(user_type: UserType) -> Self {
        match user_type {
            UserType::Admin => Self::Admin,
            UserType::Teacher => Self::Teacher,
            UserType::Student => Self::Student,
            UserType::Parent => Self::Parent,
        }
    }
}

impl From<Option<UserType>> for Audience {
    fn from(user_type: Option<UserType>) -> Self {
        user_type.map_or(Self::Unauthenticated, Self::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingRoute {
    AdminArea,
    TeacherArea,
    StudentArea,
    ParentArea,
    SignIn,
}

impl LandingRoute {
    pub const fn for_audience(audience: Audience) -> Self {
        match audience {
            Audience::Admin => Self::AdminArea,
            Audience::Teacher => Self::TeacherArea,
            Audience::Student => Self::StudentArea,
            Audience::Parent => Self::ParentArea,
            Audience::Unauthenticated => Self::SignIn,
        }
    }

    pub fn for_identity(identity: Option<&Identity>) -> Self {
        Self::for_audience(identity.map(|i| i.user_type).into())
    }

    pub const fn path(&self) -> &'static str {
        match self {
            Self::AdminArea => "/admin",
            Self::TeacherArea => "/teacher",
            Self::StudentArea => "/student",
            Self::ParentArea => "/parent",
            Self::SignIn => "/sign-in",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use schooldesk_models::UserId;
    use std::collections::HashSet;

    const ALL_AUDIENCES: [Audience; 5] = [
        Audience::Admin,
        Audience::Teacher,
        Audience::Student,
        Audience::Parent,
        Audience::Unauthenticated,
    ];

    #[test]
    fn test_role_paths() {
        let cases = [
            (UserType::Admin, "/admin"),
            (UserType::Teacher, "/teacher"),
            (UserType::Student, "/student"),
            (UserType::Parent, "/parent"),
        ];
        for (user_type, expected) in cases {
            assert_eq!(
                LandingRoute::for_audience(user_type.into()).path(),
                expected
            );
        }
        assert_eq!(
            LandingRoute::for_audience(Audience::Unauthenticated).path(),
            "/sign-in"
        );
    }

    #[test]
    fn test_every_audience_has_a_distinct_destination() {
        let paths: HashSet<_> = ALL_AUDIENCES
            .into_iter()
            .map(|a| LandingRoute::for_audience(a).path())
            .collect();
        assert_eq!(paths.len(), ALL_AUDIENCES.len());
    }

    #[test]
    fn test_unknown_role_string_goes_to_sign_in() {
        assert_eq!(Audience::from_role_str("JANITOR"), Audience::Unauthenticated);
        assert_eq!(Audience::from_role_str(""), Audience::Unauthenticated);
        assert_eq!(Audience::from_role_str("teacher"), Audience::Teacher);
    }

    #[test]
    fn test_identity_routing() {
        assert_eq!(LandingRoute::for_identity(None), LandingRoute::SignIn);

        let identity = Identity {
            user_id: UserId::new(),
            user_type: UserType::Parent,
            expires_at: Utc::now(),
        };
        assert_eq!(
            LandingRoute::for_identity(Some(&identity)),
            LandingRoute::ParentArea
        );
    }
}
