//! Front desk client
//!
//! Client layer of the hotel booking app: availability search, the booking
//! dialog, guest self-service (lookup, modify, cancel) and the receptionist
//! console. Controllers own their page state and render to escaped markup;
//! all business rules stay on the booking API.

pub mod api;
pub mod booking;
pub mod clock;
pub mod config;
pub mod console;
pub mod dates;
pub mod error;
pub mod feedback;
pub mod guard;
pub mod http;
pub mod manage;
pub mod markup;
pub mod search;
pub mod view;

pub use api::BookingApi;
pub use booking::{BookingModal, GuestInfo};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::ClientConfig;
pub use console::{AddRoomForm, ConsoleAction, ReceptionistConsole, WalkInForm};
pub use dates::{DateRangePicker, SearchDates};
pub use error::{ClientError, ClientResult, Precondition};
pub use feedback::{Dialog, Feedback, FeedbackKind, FeedbackLayer};
pub use guard::Dispatch;
pub use http::{HttpClient, NetworkHttpClient};
pub use manage::{ManageBooking, ManageScreen};
pub use search::AvailabilitySearch;

// Re-export shared types for convenience
pub use shared::error::{Action, ErrorCode};
pub use shared::models::{
    Booking, BookingStatus, BookingTimeframe, PaymentStatus, Room, RoomOption, RoomType,
};
