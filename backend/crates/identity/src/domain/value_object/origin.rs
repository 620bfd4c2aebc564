//! Account Origin Value Object
//!
//! Records which authentication path created an account. Set once at
//! creation and never changed afterwards, even when the same account later
//! signs in through a different path.

use std::fmt;

/// Authentication path that created an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i16)]
pub enum AccountOrigin {
    /// Local registration with email + password
    #[default]
    Local = 0,

    /// Graph-style identity provider
    Graph = 1,

    /// OIDC identity provider
    Oidc = 2,
}

impl AccountOrigin {
    /// Get numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Graph => "graph",
            Self::Oidc => "oidc",
        }
    }

    /// Check if accounts of this origin carry a password credential
    #[inline]
    pub const fn has_credential(&self) -> bool {
        matches!(self, Self::Local)
    }

    /// Create from numeric ID
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Local),
            1 => Some(Self::Graph),
            2 => Some(Self::Oidc),
            _ => None,
        }
    }
}

impl fmt::Display for AccountOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
