pub mod bookings;
pub mod inquiries;
pub mod otp;
