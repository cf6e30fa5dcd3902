//! Who may see which notification rows.
//!
//! One shared feed serves three audiences that must never leak into each
//! other: the client portal (addressed via `data.user_id`), personally
//! targeted staff rows (`recipient_id`), and role broadcasts
//! (`recipient_role`, including the `all` pseudo-role). The request mode
//! is resolved with a strict precedence order, then compiled into a
//! `Predicate` tree that both the SQL layer and the pure evaluator
//! interpret identically.

use domus_domain::role;

use crate::domain::types::{Notification, NotificationStatus, Priority};

/// Resolved request mode. Order of the variants mirrors the precedence
/// order of `resolve`; first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Client portal: only `client`-role rows addressed to this user via
    /// the data payload. Role broadcasts (including `all`) are
    /// deliberately excluded — portal users must never see staff
    /// notifications.
    ClientOnly { user_id: i64 },
    /// Staff member: personally targeted rows, own-role broadcasts, and
    /// `all` broadcasts.
    Staff { user_id: i64, role: String },
    /// Role broadcasts only (no personal id supplied). Rows with no
    /// recipient role at all are excluded rather than surfaced to
    /// everyone who asks for a role.
    RoleWide { role: String },
    /// Personally targeted rows only — no role fallback.
    Personal { user_id: i64 },
    /// No filter supplied. Administrative fallback: everything.
    Unrestricted,
}

impl Audience {
    /// Resolve the request mode from the raw filter inputs.
    ///
    /// `client_only` wins over every role/user combination, but only when
    /// a user id is actually present; without one it is ignored and the
    /// remaining filters apply as usual.
    pub fn resolve(role: Option<&str>, user_id: Option<i64>, client_only: bool) -> Self {
        match (user_id, role) {
            (Some(user_id), _) if client_only => Self::ClientOnly { user_id },
            (Some(user_id), Some(role)) => Self::Staff {
                user_id,
                role: role.to_owned(),
            },
            (None, Some(role)) => Self::RoleWide {
                role: role.to_owned(),
            },
            (Some(user_id), None) => Self::Personal { user_id },
            (None, None) => Self::Unrestricted,
        }
    }

    /// Compile this mode into its row predicate.
    pub fn predicate(&self) -> Predicate {
        match self {
            Self::ClientOnly { user_id } => Predicate::AllOf(vec![
                Predicate::RecipientRoleIs(role::CLIENT.to_owned()),
                Predicate::DataUserIdIs(*user_id),
            ]),
            Self::Staff { user_id, role } => Predicate::AnyOf(vec![
                Predicate::RecipientIdIs(*user_id),
                Predicate::RecipientRoleIs(role.clone()),
                Predicate::RecipientRoleIs(role::ALL.to_owned()),
            ]),
            Self::RoleWide { role } => Predicate::AllOf(vec![
                Predicate::RecipientRoleNotNull,
                Predicate::AnyOf(vec![
                    Predicate::RecipientRoleIs(role.clone()),
                    Predicate::RecipientRoleIs(role::ALL.to_owned()),
                ]),
            ]),
            Self::Personal { user_id } => Predicate::RecipientIdIs(*user_id),
            Self::Unrestricted => Predicate::All,
        }
    }
}

/// Composable boolean row predicate over the targeting fields.
///
/// The SQL repository translates this tree into a sea-orm `Condition`;
/// `matches` is the reference evaluator used by tests and mock stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    All,
    RecipientRoleIs(String),
    RecipientRoleNotNull,
    RecipientIdIs(i64),
    DataUserIdIs(i64),
    AnyOf(Vec<Predicate>),
    AllOf(Vec<Predicate>),
}

impl Predicate {
    pub fn matches(&self, n: &Notification) -> bool {
        match self {
            Self::All => true,
            Self::RecipientRoleIs(role) => n.recipient_role.as_deref() == Some(role.as_str()),
            Self::RecipientRoleNotNull => n.recipient_role.is_some(),
            Self::RecipientIdIs(id) => n.recipient_id == Some(*id),
            Self::DataUserIdIs(id) => n.data_user_id() == Some(*id),
            Self::AnyOf(ps) => ps.iter().any(|p| p.matches(n)),
            Self::AllOf(ps) => ps.iter().all(|p| p.matches(n)),
        }
    }
}

/// Status dimension of a feed query. Archived rows are hidden unless the
/// caller asks for them by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    ExcludeArchived,
    Only(NotificationStatus),
}

/// A fully resolved feed query: targeting predicate plus the generic
/// filters. Results are always newest-first, truncated to `limit`.
#[derive(Debug, Clone)]
pub struct FeedQuery {
    pub predicate: Predicate,
    pub status: StatusFilter,
    pub priority: Option<Priority>,
    pub limit: u64,
}

impl FeedQuery {
    /// Reference row filter (targeting + status + priority), used by
    /// in-memory stores. The SQL layer applies the same logic as a WHERE
    /// clause.
    pub fn admits(&self, n: &Notification) -> bool {
        let status_ok = match self.status {
            StatusFilter::ExcludeArchived => n.status != NotificationStatus::Archived,
            StatusFilter::Only(status) => n.status == status,
        };
        let priority_ok = self.priority.is_none_or(|p| n.priority == p);
        status_ok && priority_ok && self.predicate.matches(n)
    }
}
