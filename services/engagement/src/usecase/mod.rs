pub mod booking;
pub mod inquiry;
pub mod otp;
