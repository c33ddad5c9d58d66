//! Booking dialog controller

use crate::api::BookingApi;
use crate::clock::Clock;
use crate::dates::SearchDates;
use crate::error::Precondition;
use crate::feedback::{Dialog, Feedback, FeedbackLayer};
use crate::guard::{Dispatch, RequestGuard, criteria_key};
use crate::markup::Element;
use crate::search::AvailabilitySearch;
use crate::view::format_currency;
use crate::{ClientConfig, ClientError, ClientResult, HttpClient};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::error::Action;
use shared::models::Room;
use shared::request::CreateBookingRequest;
use std::sync::Arc;
use validator::Validate;

const BOOKING_DIALOG: &str = "bookingModal";
const BOOKING_FOCUS: &[&str] = &[
    "full_name",
    "email",
    "phone",
    "submitBookingBtn",
    "closeBookingModal",
];

/// Guest identity typed into the booking dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Validate)]
pub struct GuestInfo {
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 32))]
    pub phone: String,
}

impl GuestInfo {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    fn trimmed(&self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }

    /// Every field required, email well-formed
    pub fn check(&self) -> Result<Self, Precondition> {
        let info = self.trimmed();
        if info.full_name.is_empty() || info.email.is_empty() || info.phone.is_empty() {
            return Err(Precondition::MissingGuestDetails);
        }
        match info.validate() {
            Ok(()) => Ok(info),
            Err(errors) if errors.field_errors().contains_key("email") => {
                Err(Precondition::InvalidEmail)
            }
            Err(_) => Err(Precondition::MissingGuestDetails),
        }
    }
}

#[derive(Debug)]
struct ModalState {
    room: Option<Room>,
    form: GuestInfo,
    dialog: Dialog,
    error: Option<String>,
    feedback: FeedbackLayer,
}

/// Collects guest identity for a room picked from the search result
pub struct BookingModal<H> {
    api: BookingApi<H>,
    clock: Arc<dyn Clock>,
    guard: RequestGuard,
    state: Mutex<ModalState>,
}

impl<H: HttpClient> BookingModal<H> {
    pub fn new(api: BookingApi<H>, config: &ClientConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            guard: RequestGuard::new("booking", config.debounce()),
            state: Mutex::new(ModalState {
                room: None,
                form: GuestInfo::default(),
                dialog: Dialog::new(BOOKING_DIALOG, BOOKING_FOCUS),
                error: None,
                feedback: FeedbackLayer::default(),
            }),
        }
    }

    /// Open the dialog for a room of the current search result
    pub fn open(&self, search: &AvailabilitySearch<H>, room_id: i64) -> Result<(), Precondition> {
        if search.last_dates().is_none() {
            return Err(Precondition::NoSearchDates);
        }
        let room = search.room(room_id).ok_or(Precondition::NoRoomSelected)?;
        let mut state = self.state.lock();
        state.room = Some(room);
        state.error = None;
        state.dialog.show();
        Ok(())
    }

    pub fn close(&self) {
        let mut state = self.state.lock();
        state.dialog.hide();
        state.error = None;
    }

    pub fn set_guest(&self, info: GuestInfo) {
        self.state.lock().form = info;
    }

    /// Submit the booking for the open room and the last searched dates
    ///
    /// On success the dialog closes, a confirmation with the reference is
    /// shown and the room leaves the cached search result. On failure the
    /// dialog stays open with the form untouched.
    pub async fn submit(&self, search: &AvailabilitySearch<H>) -> Dispatch<ClientResult<String>> {
        let prepared = self.prepare(search);
        let (room, guest, dates) = match prepared {
            Ok(parts) => parts,
            Err(rule) => {
                tracing::debug!(%rule, "booking rejected locally");
                let err = ClientError::from(rule);
                self.fail(&err);
                return Dispatch::Completed(Err(err));
            }
        };

        let request = CreateBookingRequest {
            room_id: room.id,
            full_name: guest.full_name,
            email: guest.email,
            phone: guest.phone,
            check_in_date: dates.check_in,
            check_out_date: dates.check_out,
            request_id: shared::util::request_id(self.clock.now_millis()),
        };

        // keyed by room only: edits to the form never supersede a submission
        let outcome = self
            .guard
            .dispatch(criteria_key(&room.id), async {
                self.api.create_booking(&request).await
            })
            .await;

        match outcome {
            Dispatch::Completed(Ok(response)) => {
                tracing::info!(
                    room_id = room.id,
                    reference = %response.booking_reference,
                    "booking created"
                );
                search.remove_room(room.id);
                let mut state = self.state.lock();
                state.dialog.hide();
                state.form = GuestInfo::default();
                state.room = None;
                state.error = None;
                state.feedback.show(Feedback::with_reference(
                    "Booking Confirmed",
                    response.booking_reference.clone(),
                ));
                Dispatch::Completed(Ok(response.booking_reference))
            }
            Dispatch::Completed(Err(err)) => {
                tracing::warn!(error = %err, "booking failed");
                self.fail(&err);
                Dispatch::Completed(Err(err))
            }
            Dispatch::Dropped => Dispatch::Dropped,
            Dispatch::Superseded => Dispatch::Superseded,
        }
    }

    fn prepare(
        &self,
        search: &AvailabilitySearch<H>,
    ) -> Result<(Room, GuestInfo, SearchDates), Precondition> {
        let state = self.state.lock();
        let room = state.room.clone().ok_or(Precondition::NoRoomSelected)?;
        let dates = search.last_dates().ok_or(Precondition::NoSearchDates)?;
        let dates = SearchDates::validate(
            Some(dates.check_in),
            Some(dates.check_out),
            self.clock.today(),
        )?;
        let guest = state.form.check()?;
        Ok((room, guest, dates))
    }

    fn fail(&self, err: &ClientError) {
        let mut state = self.state.lock();
        state.error = Some(err.user_message(Action::CreateBooking));
        state.feedback.show(Feedback::from_error(Action::CreateBooking, err));
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().dialog.is_visible()
    }

    pub fn is_submitting(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn form(&self) -> GuestInfo {
        self.state.lock().form.clone()
    }

    pub fn room(&self) -> Option<Room> {
        self.state.lock().room.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.state.lock().feedback.current().cloned()
    }

    pub fn dismiss_feedback(&self) -> Option<Feedback> {
        self.state.lock().feedback.dismiss()
    }

    /// Control holding focus: feedback first, then the dialog
    pub fn focused(&self) -> Option<&'static str> {
        let state = self.state.lock();
        state.feedback.focused().or_else(|| state.dialog.focused())
    }

    pub fn tab(&self) -> Option<&'static str> {
        self.state.lock().dialog.tab()
    }

    pub fn shift_tab(&self) -> Option<&'static str> {
        self.state.lock().dialog.shift_tab()
    }

    pub fn render(&self, search: &AvailabilitySearch<H>) -> Element {
        let state = self.state.lock();
        let submitting = self.guard.is_busy();
        let mut form = Element::new("form").id("bookingForm");

        if let Some(room) = &state.room {
            let mut summary = format!(
                "Room {} ({}), {} / night",
                room.room_number,
                room.room_type,
                format_currency(room.price)
            );
            if let Some(dates) = search.last_dates() {
                let total = room.price * Decimal::from(dates.nights());
                summary = format!("{summary}, {}: {}", dates.display(), format_currency(total));
            }
            form = form.child(Element::new("p").class("booking-summary").text(summary));
        }

        let input = |id: &'static str, kind: &'static str, value: &str| {
            Element::new("input")
                .id(id)
                .attr("name", id)
                .attr("type", kind)
                .attr("value", value.to_string())
                .flag("required", true)
        };
        form = form
            .child(input("full_name", "text", &state.form.full_name))
            .child(input("email", "email", &state.form.email))
            .child(input("phone", "tel", &state.form.phone));
        if let Some(error) = &state.error {
            form = form.child(
                Element::new("p")
                    .class("form-error")
                    .attr("role", "alert")
                    .text(error.clone()),
            );
        }
        form = form
            .child(
                Element::new("button")
                    .id("submitBookingBtn")
                    .attr("type", "submit")
                    .flag("disabled", submitting)
                    .attr("aria-busy", submitting.to_string())
                    .text("Confirm Booking"),
            )
            .child(
                Element::new("button")
                    .id("closeBookingModal")
                    .attr("type", "button")
                    .text("Close"),
            );
        state.dialog.render(form)
    }
}
