//! Actor role names shared by every service.
//!
//! The role set is open: notification targeting stores the role as plain
//! text so new staff roles can be introduced without a schema change. The
//! constants below are the names the portal itself routes on.

/// Full administrative access.
pub const ADMIN: &str = "admin";
/// Generic back-office staff.
pub const STAFF: &str = "staff";
/// Customer-service staff (first approval stage for tour bookings).
pub const CS: &str = "cs";
/// Sales staff (second approval stage for tour bookings).
pub const SALES: &str = "sales";
/// Portal client (homeowner / prospective buyer).
pub const CLIENT: &str = "client";
/// Broadcast pseudo-role: visible to every staff audience.
pub const ALL: &str = "all";

/// Whether `role` names a back-office actor allowed on staff surfaces.
pub fn is_staff(role: &str) -> bool {
    matches!(role, ADMIN | STAFF | CS | SALES)
}

/// Whether `role` may act on the given booking approval stage.
/// Admin may act on either stage.
pub fn may_approve(role: &str, stage: &str) -> bool {
    role == ADMIN || role == stage
}
