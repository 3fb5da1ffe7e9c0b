//! Row-level visibility of classes.

use schooldesk_auth::Identity;
use schooldesk_models::{UserId, UserType};

/// Which classes a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassScope {
    All,
    SupervisedBy(UserId),
    Enrolled(UserId),
    ChildrenOf(UserId),
}

impl ClassScope {
    pub fn for_identity(identity: &Identity) -> Self {
        let user_id = identity.user_id;
        match identity.user_type {
            UserType::Admin => Self::All,
            UserType::Teacher => Self::SupervisedBy(user_id),
            UserType::Student => Self::Enrolled(user_id),
            UserType::Parent => Self::ChildrenOf(user_id),
        }
    }

    /// The caller bound to the filter, if the scope has one.
    pub fn subject(&self) -> Option<UserId> {
        match *self {
            Self::All => None,
            Self::SupervisedBy(id) | Self::Enrolled(id) | Self::ChildrenOf(id) => Some(id),
        }
    }

    /// SQL condition on `classes c`, with the caller bound at `$param`.
    pub fn condition(&self, param: usize) -> Option<String> {
        let clause = match self {
            Self::All => return None,
            Self::SupervisedBy(_) => format!("c.supervisor_id = ${param}"),
            Self::Enrolled(_) => {
                format!("c.id = (SELECT class_id FROM users WHERE id = ${param})")
            }
            Self::ChildrenOf(_) => format!(
                "c.id IN (SELECT class_id FROM users WHERE parent_id = ${param} AND class_id IS NOT NULL)"
            ),
        };
        Some(clause)
    }
}
