pub mod blocking;
pub mod booking;
pub mod ranking;

pub use blocking::BlockingService;
pub use booking::AppointmentService;
