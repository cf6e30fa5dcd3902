use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

// ── OTP challenge ────────────────────────────────────────────────────────────

/// OTP code length in digits.
pub const OTP_CODE_LEN: usize = 6;

/// OTP time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 300;

/// A one-time email verification challenge.
///
/// At most one live (unconsumed, unexpired) challenge exists per email:
/// reissuing replaces the previous one. Verification stamps
/// `verified_at`; accepting an anonymous inquiry stamps `consumed_at`,
/// after which the challenge is spent.
#[derive(Debug, Clone)]
pub struct OtpChallenge {
    pub id: Uuid,
    pub email: String,
    pub code: String,
    pub purpose: String,
    pub verified_at: Option<DateTime<Utc>>,
    pub consumed_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpChallenge {
    pub fn issue(email: String, purpose: String, code: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            code,
            purpose,
            verified_at: None,
            consumed_at: None,
            expires_at: now + chrono::Duration::seconds(OTP_TTL_SECS),
            created_at: now,
        }
    }

    /// Whether this challenge can still be verified at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.consumed_at.is_none() && now < self.expires_at
    }

    /// Whether this challenge proves email ownership for an inquiry.
    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some() && self.consumed_at.is_none()
    }
}

/// Exactly six ASCII digits.
pub fn is_valid_otp_format(code: &str) -> bool {
    code.len() == OTP_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Ownership is what the OTP flow proves; this only keeps
/// obvious garbage out.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.len() > 254 || email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.len() >= 3
}

// ── Booking ──────────────────────────────────────────────────────────────────

/// Workflow position of a tour booking.
///
/// Sales approval without prior CS approval is unrepresentable: the only
/// way to construct `SalesApproved` is through `approve_sales`, which
/// requires the CS timestamp already present. Approval timestamps travel
/// with the state so terminal outcomes keep their history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingState {
    Pending,
    CsApproved {
        cs_at: DateTime<Utc>,
    },
    SalesApproved {
        cs_at: DateTime<Utc>,
        sales_at: DateTime<Utc>,
    },
    Confirmed {
        cs_at: DateTime<Utc>,
        sales_at: DateTime<Utc>,
    },
    Rejected {
        reason: String,
        cs_at: Option<DateTime<Utc>>,
        sales_at: Option<DateTime<Utc>>,
    },
    Cancelled {
        cs_at: Option<DateTime<Utc>>,
        sales_at: Option<DateTime<Utc>>,
    },
    Completed {
        cs_at: DateTime<Utc>,
        sales_at: DateTime<Utc>,
    },
    NoShow {
        cs_at: DateTime<Utc>,
        sales_at: DateTime<Utc>,
    },
}

/// A transition that the current state does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("{action} is not allowed from the {from} state")]
    InvalidFrom {
        action: &'static str,
        from: &'static str,
    },
    #[error("a rejection reason is required")]
    MissingReason,
    #[error("stored booking state is inconsistent: {0}")]
    Corrupt(&'static str),
}

impl BookingState {
    pub fn status_name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::CsApproved { .. } => "cs_approved",
            Self::SalesApproved { .. } => "sales_approved",
            Self::Confirmed { .. } => "confirmed",
            Self::Rejected { .. } => "rejected",
            Self::Cancelled { .. } => "cancelled",
            Self::Completed { .. } => "completed",
            Self::NoShow { .. } => "no_show",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Confirmed { .. }
                | Self::Rejected { .. }
                | Self::Cancelled { .. }
                | Self::Completed { .. }
                | Self::NoShow { .. }
        )
    }

    /// The approval stage this booking is waiting on, if any.
    pub fn pending_stage(&self) -> Option<&'static str> {
        match self {
            Self::Pending => Some("cs_approval"),
            Self::CsApproved { .. } => Some("sales_approval"),
            _ => None,
        }
    }

    pub fn cs_approved_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Pending => None,
            Self::CsApproved { cs_at }
            | Self::SalesApproved { cs_at, .. }
            | Self::Confirmed { cs_at, .. }
            | Self::Completed { cs_at, .. }
            | Self::NoShow { cs_at, .. } => Some(*cs_at),
            Self::Rejected { cs_at, .. } | Self::Cancelled { cs_at, .. } => *cs_at,
        }
    }

    pub fn sales_approved_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Pending | Self::CsApproved { .. } => None,
            Self::SalesApproved { sales_at, .. }
            | Self::Confirmed { sales_at, .. }
            | Self::Completed { sales_at, .. }
            | Self::NoShow { sales_at, .. } => Some(*sales_at),
            Self::Rejected { sales_at, .. } | Self::Cancelled { sales_at, .. } => *sales_at,
        }
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn approve_cs(&self, at: DateTime<Utc>) -> Result<Self, TransitionError> {
        match self {
            Self::Pending => Ok(Self::CsApproved { cs_at: at }),
            other => Err(other.invalid("cs approval")),
        }
    }

    pub fn approve_sales(&self, at: DateTime<Utc>) -> Result<Self, TransitionError> {
        match self {
            Self::CsApproved { cs_at } => Ok(Self::SalesApproved {
                cs_at: *cs_at,
                sales_at: at,
            }),
            other => Err(other.invalid("sales approval")),
        }
    }

    pub fn confirm(&self) -> Result<Self, TransitionError> {
        match self {
            Self::SalesApproved { cs_at, sales_at } => Ok(Self::Confirmed {
                cs_at: *cs_at,
                sales_at: *sales_at,
            }),
            other => Err(other.invalid("confirmation")),
        }
    }

    /// Reject from any non-terminal state. The reason is mandatory and is
    /// surfaced verbatim to the submitting client.
    pub fn reject(&self, reason: &str) -> Result<Self, TransitionError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(TransitionError::MissingReason);
        }
        if self.is_terminal() {
            return Err(self.invalid("rejection"));
        }
        Ok(Self::Rejected {
            reason: reason.to_owned(),
            cs_at: self.cs_approved_at(),
            sales_at: self.sales_approved_at(),
        })
    }

    pub fn cancel(&self) -> Result<Self, TransitionError> {
        if self.is_terminal() {
            return Err(self.invalid("cancellation"));
        }
        Ok(Self::Cancelled {
            cs_at: self.cs_approved_at(),
            sales_at: self.sales_approved_at(),
        })
    }

    pub fn complete(&self) -> Result<Self, TransitionError> {
        match self {
            Self::SalesApproved { cs_at, sales_at } | Self::Confirmed { cs_at, sales_at } => {
                Ok(Self::Completed {
                    cs_at: *cs_at,
                    sales_at: *sales_at,
                })
            }
            other => Err(other.invalid("completion")),
        }
    }

    pub fn mark_no_show(&self) -> Result<Self, TransitionError> {
        match self {
            Self::SalesApproved { cs_at, sales_at } | Self::Confirmed { cs_at, sales_at } => {
                Ok(Self::NoShow {
                    cs_at: *cs_at,
                    sales_at: *sales_at,
                })
            }
            other => Err(other.invalid("no-show")),
        }
    }

    fn invalid(&self, action: &'static str) -> TransitionError {
        TransitionError::InvalidFrom {
            action,
            from: self.status_name(),
        }
    }

    /// Rebuild the state from its stored columns, refusing rows that
    /// violate the approval invariants (they cannot be produced through
    /// this type, only by writing the table directly).
    pub fn from_parts(
        status: &str,
        cs_at: Option<DateTime<Utc>>,
        sales_at: Option<DateTime<Utc>>,
        reason: Option<String>,
    ) -> Result<Self, TransitionError> {
        match status {
            "pending" => Ok(Self::Pending),
            "cs_approved" => {
                let cs_at = cs_at.ok_or(TransitionError::Corrupt(
                    "cs_approved without cs_approved_at",
                ))?;
                Ok(Self::CsApproved { cs_at })
            }
            "sales_approved" | "confirmed" | "completed" | "no_show" => {
                let cs_at = cs_at.ok_or(TransitionError::Corrupt(
                    "sales approval without cs_approved_at",
                ))?;
                let sales_at = sales_at.ok_or(TransitionError::Corrupt(
                    "sales approval without sales_approved_at",
                ))?;
                Ok(match status {
                    "sales_approved" => Self::SalesApproved { cs_at, sales_at },
                    "confirmed" => Self::Confirmed { cs_at, sales_at },
                    "completed" => Self::Completed { cs_at, sales_at },
                    _ => Self::NoShow { cs_at, sales_at },
                })
            }
            "rejected" => {
                let reason =
                    reason.ok_or(TransitionError::Corrupt("rejected without a reason"))?;
                Ok(Self::Rejected {
                    reason,
                    cs_at,
                    sales_at,
                })
            }
            "cancelled" => Ok(Self::Cancelled { cs_at, sales_at }),
            _ => Err(TransitionError::Corrupt("unknown booking status")),
        }
    }

    /// Storage columns for this state.
    pub fn to_parts(
        &self,
    ) -> (
        &'static str,
        Option<DateTime<Utc>>,
        Option<DateTime<Utc>>,
        Option<String>,
    ) {
        (
            self.status_name(),
            self.cs_approved_at(),
            self.sales_approved_at(),
            self.rejection_reason().map(str::to_owned),
        )
    }
}

/// The operational status changes staff apply after the approval stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationalStatus {
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl OperationalStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            "no_show" => Some(Self::NoShow),
            _ => None,
        }
    }
}

/// A property tour booking.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: Uuid,
    pub property_id: Uuid,
    pub property_title: Option<String>,
    pub user_id: Option<i64>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub message: Option<String>,
    pub state: BookingState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The booking status names accepted by the staff list filter.
pub fn is_known_booking_status(s: &str) -> bool {
    matches!(
        s,
        "pending"
            | "cs_approved"
            | "sales_approved"
            | "confirmed"
            | "rejected"
            | "cancelled"
            | "completed"
            | "no_show"
    )
}

// ── Inquiry ──────────────────────────────────────────────────────────────────

/// Handling status of an inquiry, staff-managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryStatus {
    New,
    Contacted,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "contacted" => Some(Self::Contacted),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// A property inquiry from the public portal.
#[derive(Debug, Clone)]
pub struct Inquiry {
    pub id: Uuid,
    pub property_id: Uuid,
    pub property_title: Option<String>,
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub is_authenticated: bool,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}
