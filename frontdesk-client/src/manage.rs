//! Manage-booking flow
//!
//! ```text
//! Query ──lookup──▶ Viewing ──▶ ModifyForm ──close──▶ Viewing
//!                      │  └───▶ CancelConfirm ─close─▶ Viewing
//!                      └── success of either ──▶ Done ──dismiss──▶ Query
//! ```
//!
//! The looked-up booking is the single source of truth for every screen
//! until the flow returns to `Query`. Exactly one dialog is visible at a
//! time; feedback overlays it and, once dismissed, hands control to a
//! predetermined screen.

use crate::api::BookingApi;
use crate::clock::Clock;
use crate::dates::{DateRangePicker, to_display};
use crate::error::Precondition;
use crate::feedback::{Dialog, Feedback, FeedbackLayer};
use crate::guard::{Dispatch, RequestGuard, criteria_key, with_min_duration};
use crate::markup::Element;
use crate::view::{BookingDetailView, render_room_select};
use crate::{ClientConfig, ClientError, ClientResult, HttpClient};
use chrono::NaiveDate;
use parking_lot::Mutex;
use shared::error::{Action, ErrorCode};
use shared::models::{Booking, RoomOption};
use shared::request::{AlternativeRoomsRequest, BookingLookupRequest, ModifyBookingRequest};
use std::sync::Arc;
use std::time::Duration;

const QUERY_DIALOG: &str = "queryBookingForm";
const QUERY_FOCUS: &[&str] = &["email", "booking_reference", "queryBookingBtn"];

const BOOKING_DIALOG: &str = "bookingModal";
pub const MODIFY_BUTTON: &str = "modifyBtn";
pub const CANCEL_BUTTON: &str = "cancelBtn";
const BOOKING_CLOSE: &str = "closeBookingModalBtn";

const MODIFY_DIALOG: &str = "modifyBookingModal";
const MODIFY_FOCUS: &[&str] = &[
    "modify_check_in_date",
    "modify_check_out_date",
    "searchRoomsBtn",
    "modify_room_id",
    "submitModifyBtn",
    "closeModifyModal",
];

const CANCEL_DIALOG: &str = "cancelConfirmModal";
const CANCEL_FOCUS: &[&str] = &["confirmCancelBtn", "closeCancelModal"];

/// Screen of the manage-booking flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManageScreen {
    Query,
    Viewing,
    ModifyForm,
    CancelConfirm,
    Done,
}

#[derive(Debug)]
struct ManageState {
    screen: ManageScreen,
    booking: Option<Booking>,
    email: String,
    query: Dialog,
    detail: Dialog,
    modify: Dialog,
    cancel: Dialog,
    picker: DateRangePicker,
    room_options: Vec<RoomOption>,
    room_choice: Option<i64>,
    feedback: FeedbackLayer,
    /// Screen shown once the current feedback is dismissed
    return_to: ManageScreen,
}

impl ManageState {
    fn new(today: NaiveDate) -> Self {
        let mut query = Dialog::new(QUERY_DIALOG, QUERY_FOCUS);
        query.show();
        Self {
            screen: ManageScreen::Query,
            booking: None,
            email: String::new(),
            query,
            detail: Dialog::new(BOOKING_DIALOG, &[BOOKING_CLOSE]),
            modify: Dialog::new(MODIFY_DIALOG, MODIFY_FOCUS),
            cancel: Dialog::new(CANCEL_DIALOG, CANCEL_FOCUS),
            picker: DateRangePicker::new(today),
            room_options: Vec::new(),
            room_choice: None,
            feedback: FeedbackLayer::default(),
            return_to: ManageScreen::Query,
        }
    }

    /// Switch screens; the target dialog becomes the only visible one
    fn enter(&mut self, screen: ManageScreen) {
        self.screen = screen;
        self.query.hide();
        self.detail.hide();
        self.modify.hide();
        self.cancel.hide();
        match screen {
            ManageScreen::Query => self.query.show(),
            ManageScreen::Viewing => {
                if let Some(booking) = &self.booking {
                    self.detail = detail_dialog(booking);
                }
                self.detail.show();
            }
            ManageScreen::ModifyForm => self.modify.show(),
            ManageScreen::CancelConfirm => self.cancel.show(),
            ManageScreen::Done => {}
        }
    }

    fn reset(&mut self, today: NaiveDate) {
        self.booking = None;
        self.email.clear();
        self.picker = DateRangePicker::new(today);
        self.room_options.clear();
        self.room_choice = None;
        self.return_to = ManageScreen::Query;
        self.enter(ManageScreen::Query);
    }

    fn fail(&mut self, action: Action, err: &ClientError, return_to: ManageScreen) {
        self.feedback.show(Feedback::from_error(action, err));
        self.return_to = return_to;
    }
}

/// Booking dialog whose focus order skips disabled actions
fn detail_dialog(booking: &Booking) -> Dialog {
    let mut focus = Vec::with_capacity(3);
    if booking.can_modify() {
        focus.push(MODIFY_BUTTON);
    }
    if booking.can_cancel() {
        focus.push(CANCEL_BUTTON);
    }
    focus.push(BOOKING_CLOSE);
    Dialog::new(BOOKING_DIALOG, &focus)
}

/// Guest self-service lookup, modification and cancellation
pub struct ManageBooking<H> {
    api: BookingApi<H>,
    clock: Arc<dyn Clock>,
    min_spinner: Duration,
    lookup_guard: RequestGuard,
    modify_guard: RequestGuard,
    cancel_guard: RequestGuard,
    rooms_guard: RequestGuard,
    state: Mutex<ManageState>,
}

impl<H: HttpClient> ManageBooking<H> {
    pub fn new(api: BookingApi<H>, config: &ClientConfig, clock: Arc<dyn Clock>) -> Self {
        let window = config.debounce();
        let state = ManageState::new(clock.today());
        Self {
            api,
            clock,
            min_spinner: config.min_spinner(),
            lookup_guard: RequestGuard::new("lookup", window),
            modify_guard: RequestGuard::new("modify", window),
            cancel_guard: RequestGuard::new("cancel", window),
            rooms_guard: RequestGuard::new("modify-rooms", window),
            state: Mutex::new(state),
        }
    }

    // ==================== Query ====================

    /// Fetch a booking by guest email and booking reference
    pub async fn lookup(&self, email: &str, reference: &str) -> Dispatch<ClientResult<Booking>> {
        let email = email.trim().to_string();
        let reference = reference.trim().to_string();
        if email.is_empty() || reference.is_empty() {
            let err = ClientError::from(Precondition::MissingLookupDetails);
            self.state
                .lock()
                .fail(Action::LookupBooking, &err, ManageScreen::Query);
            return Dispatch::Completed(Err(err));
        }

        let request = BookingLookupRequest {
            email: email.clone(),
            booking_reference: reference,
        };
        let key = criteria_key(&(email.to_lowercase(), &request.booking_reference));
        let outcome = self
            .lookup_guard
            .dispatch(
                key,
                with_min_duration(self.api.manage_booking(&request), self.min_spinner),
            )
            .await;

        if let Dispatch::Completed(result) = &outcome {
            let mut state = self.state.lock();
            match result {
                Ok(booking) => {
                    tracing::info!(reference = %booking.booking_reference, "booking loaded");
                    state.booking = Some(booking.clone());
                    state.email = email;
                    state.enter(ManageScreen::Viewing);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "booking lookup failed");
                    state.fail(Action::LookupBooking, err, ManageScreen::Query);
                }
            }
        }
        outcome
    }

    // ==================== Viewing ====================

    /// Open the modify form; needs a paid booking that is still `booked`
    pub fn open_modify(&self) -> Result<(), Precondition> {
        let today = self.clock.today();
        let mut state = self.state.lock();
        if state.screen != ManageScreen::Viewing {
            return Err(Precondition::ActionUnavailable);
        }
        let booking = state.booking.as_ref().ok_or(Precondition::NoBookingLoaded)?;
        if booking.status.is_locked() {
            return Err(Precondition::BookingLocked);
        }
        if !booking.payment_status.is_paid() {
            return Err(Precondition::PaymentPending);
        }
        state.picker =
            DateRangePicker::with_range(today, booking.check_in_date, booking.check_out_date);
        state.room_options.clear();
        state.room_choice = None;
        state.enter(ManageScreen::ModifyForm);
        Ok(())
    }

    /// Back out of the modify form to the booking details
    pub fn close_modify(&self) {
        self.rooms_guard.supersede();
        let mut state = self.state.lock();
        if state.screen == ManageScreen::ModifyForm {
            state.enter(ManageScreen::Viewing);
            state.detail.focus(MODIFY_BUTTON);
        }
    }

    /// Open the cancellation confirmation; needs a `booked` booking
    pub fn open_cancel(&self) -> Result<(), Precondition> {
        let mut state = self.state.lock();
        if state.screen != ManageScreen::Viewing {
            return Err(Precondition::ActionUnavailable);
        }
        let booking = state.booking.as_ref().ok_or(Precondition::NoBookingLoaded)?;
        if !booking.can_cancel() {
            return Err(Precondition::BookingLocked);
        }
        state.enter(ManageScreen::CancelConfirm);
        Ok(())
    }

    pub fn close_cancel(&self) {
        let mut state = self.state.lock();
        if state.screen == ManageScreen::CancelConfirm {
            state.enter(ManageScreen::Viewing);
            state.detail.focus(CANCEL_BUTTON);
        }
    }

    /// Leave the booking details and start over
    pub fn reset(&self) {
        self.lookup_guard.supersede();
        self.rooms_guard.supersede();
        let today = self.clock.today();
        let mut state = self.state.lock();
        state.feedback.dismiss();
        state.reset(today);
    }

    // ==================== Modify ====================

    /// Pick a new check-in; invalidates the offered rooms
    pub fn set_check_in(&self, date: NaiveDate) -> bool {
        let mut state = self.state.lock();
        let accepted = state.picker.set_check_in(date);
        if accepted {
            self.invalidate_rooms(&mut state);
        }
        accepted
    }

    /// Pick a new check-out; invalidates the offered rooms
    pub fn set_check_out(&self, date: NaiveDate) -> bool {
        let mut state = self.state.lock();
        let accepted = state.picker.set_check_out(date);
        if accepted {
            self.invalidate_rooms(&mut state);
        }
        accepted
    }

    /// Typed check-in; unparseable text clears the field
    pub fn input_check_in(&self, input: &str) -> bool {
        let mut state = self.state.lock();
        let before = state.picker.check_in();
        let accepted = state.picker.input_check_in(input);
        if state.picker.check_in() != before {
            self.invalidate_rooms(&mut state);
        }
        accepted
    }

    /// Typed check-out; unparseable text clears the field
    pub fn input_check_out(&self, input: &str) -> bool {
        let mut state = self.state.lock();
        let before = state.picker.check_out();
        let accepted = state.picker.input_check_out(input);
        if state.picker.check_out() != before {
            self.invalidate_rooms(&mut state);
        }
        accepted
    }

    fn invalidate_rooms(&self, state: &mut ManageState) {
        if !state.room_options.is_empty() || self.rooms_guard.is_busy() {
            self.rooms_guard.supersede();
            state.room_options.clear();
            state.room_choice = None;
        }
    }

    /// Choose one of the offered rooms (`None` keeps the current one)
    pub fn select_room(&self, room_id: Option<i64>) -> Result<(), Precondition> {
        let mut state = self.state.lock();
        let offered = room_id.is_none_or(|id| state.room_options.iter().any(|r| r.id == id));
        if !offered {
            return Err(Precondition::NoRoomSelected);
        }
        state.room_choice = room_id;
        Ok(())
    }

    /// Load rooms the booking can move to for the picked dates
    pub async fn search_modify_rooms(&self) -> Dispatch<ClientResult<usize>> {
        let prepared = {
            let state = self.state.lock();
            match (&state.booking, state.screen) {
                (Some(booking), ManageScreen::ModifyForm) => state
                    .picker
                    .dates()
                    .map(|dates| AlternativeRoomsRequest {
                        check_in_date: dates.check_in,
                        check_out_date: dates.check_out,
                        exclude_booking_id: booking.id,
                        current_room_id: booking.room.id,
                        room_type: booking.room.room_type,
                    }),
                (None, _) => Err(Precondition::NoBookingLoaded),
                _ => Err(Precondition::ActionUnavailable),
            }
        };
        let request = match prepared {
            Ok(request) => request,
            Err(rule) => {
                let err = ClientError::from(rule);
                self.state
                    .lock()
                    .fail(Action::ModifyBooking, &err, ManageScreen::ModifyForm);
                return Dispatch::Completed(Err(err));
            }
        };

        let key = criteria_key(&(request.check_in_date, request.check_out_date));
        let outcome = self
            .rooms_guard
            .dispatch(
                key,
                with_min_duration(self.api.alternative_rooms(&request), self.min_spinner),
            )
            .await;

        match outcome {
            Dispatch::Completed(Ok(rooms)) => {
                let count = rooms.len();
                let mut state = self.state.lock();
                state.room_choice = rooms.iter().find(|r| r.is_current).map(|r| r.id);
                state.room_options = rooms;
                if count == 0 {
                    state.feedback.show(Feedback::from_code(
                        Action::ModifyBooking,
                        ErrorCode::NoRoomsAvailable.as_str(),
                    ));
                    state.return_to = ManageScreen::ModifyForm;
                }
                Dispatch::Completed(Ok(count))
            }
            Dispatch::Completed(Err(err)) => {
                tracing::warn!(error = %err, "modify room search failed");
                self.state
                    .lock()
                    .fail(Action::ModifyBooking, &err, ManageScreen::ModifyForm);
                Dispatch::Completed(Err(err))
            }
            Dispatch::Dropped => Dispatch::Dropped,
            Dispatch::Superseded => Dispatch::Superseded,
        }
    }

    /// Request carrying only the fields that differ from the loaded booking
    pub fn modify_request(&self) -> Result<ModifyBookingRequest, Precondition> {
        let today = self.clock.today();
        let state = self.state.lock();
        let booking = state.booking.as_ref().ok_or(Precondition::NoBookingLoaded)?;

        let picked = (state.picker.check_in(), state.picker.check_out());
        let (Some(picked_in), Some(picked_out)) = picked else {
            return Err(Precondition::MissingDates);
        };

        let room_id = state.room_choice.filter(|id| *id != booking.room.id);
        let check_in = Some(picked_in).filter(|d| *d != booking.check_in_date);
        let check_out = Some(picked_out).filter(|d| *d != booking.check_out_date);

        if room_id.is_none() && check_in.is_none() && check_out.is_none() {
            return Err(Precondition::NoChanges);
        }
        if check_in.is_some_and(|d| d < today) {
            return Err(Precondition::CheckInInPast);
        }
        let effective_in = check_in.unwrap_or(booking.check_in_date);
        let effective_out = check_out.unwrap_or(booking.check_out_date);
        if effective_out <= effective_in {
            return Err(Precondition::CheckOutNotAfterCheckIn);
        }

        Ok(ModifyBookingRequest {
            email: state.email.clone(),
            request_id: shared::util::request_id(self.clock.now_millis()),
            room_id,
            check_in_date: check_in,
            check_out_date: check_out,
        })
    }

    /// Submit the modify form
    pub async fn submit_modify(&self) -> Dispatch<ClientResult<String>> {
        let reference = {
            let state = self.state.lock();
            match (&state.booking, state.screen) {
                (Some(b), ManageScreen::ModifyForm) => Ok(b.booking_reference.clone()),
                (None, _) => Err(Precondition::NoBookingLoaded),
                _ => Err(Precondition::ActionUnavailable),
            }
        };
        let prepared = reference.and_then(|r| self.modify_request().map(|req| (r, req)));
        let (reference, request) = match prepared {
            Ok(parts) => parts,
            Err(rule) => {
                tracing::debug!(%rule, "modification rejected locally");
                let err = ClientError::from(rule);
                let mut state = self.state.lock();
                if rule == Precondition::NoChanges {
                    state.feedback.show(Feedback::error("No Changes", rule.message()));
                    state.return_to = ManageScreen::ModifyForm;
                } else {
                    state.fail(Action::ModifyBooking, &err, ManageScreen::ModifyForm);
                }
                return Dispatch::Completed(Err(err));
            }
        };

        let outcome = self
            .modify_guard
            .dispatch(
                criteria_key(&reference),
                with_min_duration(
                    self.api.modify_booking(&reference, &request),
                    self.min_spinner,
                ),
            )
            .await;

        match outcome {
            Dispatch::Completed(Ok(response)) => {
                tracing::info!(reference = %response.booking_reference, "booking modified");
                let mut state = self.state.lock();
                state.enter(ManageScreen::Done);
                state.feedback.show(Feedback::with_reference(
                    "Booking Modified",
                    response.booking_reference.clone(),
                ));
                state.return_to = ManageScreen::Query;
                Dispatch::Completed(Ok(response.booking_reference))
            }
            Dispatch::Completed(Err(err)) => {
                tracing::warn!(error = %err, "modification failed");
                self.state
                    .lock()
                    .fail(Action::ModifyBooking, &err, ManageScreen::ModifyForm);
                Dispatch::Completed(Err(err))
            }
            Dispatch::Dropped => Dispatch::Dropped,
            Dispatch::Superseded => Dispatch::Superseded,
        }
    }

    // ==================== Cancel ====================

    /// Confirm cancellation of the loaded booking
    pub async fn confirm_cancel(&self) -> Dispatch<ClientResult<String>> {
        let prepared = {
            let state = self.state.lock();
            match (&state.booking, state.screen) {
                (Some(b), ManageScreen::CancelConfirm) => Ok(BookingLookupRequest {
                    email: state.email.clone(),
                    booking_reference: b.booking_reference.clone(),
                }),
                (None, _) => Err(Precondition::NoBookingLoaded),
                _ => Err(Precondition::ActionUnavailable),
            }
        };
        let request = match prepared {
            Ok(request) => request,
            Err(rule) => {
                let err = ClientError::from(rule);
                self.state
                    .lock()
                    .fail(Action::CancelBooking, &err, ManageScreen::Viewing);
                return Dispatch::Completed(Err(err));
            }
        };

        let outcome = self
            .cancel_guard
            .dispatch(
                criteria_key(&request.booking_reference),
                with_min_duration(self.api.cancel_booking(&request), self.min_spinner),
            )
            .await;

        match outcome {
            Dispatch::Completed(Ok(response)) => {
                tracing::info!(reference = %response.booking_reference, "booking cancelled");
                let mut state = self.state.lock();
                state.enter(ManageScreen::Done);
                state.feedback.show(Feedback::with_reference(
                    "Booking Cancelled",
                    response.booking_reference.clone(),
                ));
                state.return_to = ManageScreen::Query;
                Dispatch::Completed(Ok(response.booking_reference))
            }
            Dispatch::Completed(Err(err)) => {
                tracing::warn!(error = %err, "cancellation failed");
                self.state
                    .lock()
                    .fail(Action::CancelBooking, &err, ManageScreen::Viewing);
                Dispatch::Completed(Err(err))
            }
            Dispatch::Dropped => Dispatch::Dropped,
            Dispatch::Superseded => Dispatch::Superseded,
        }
    }

    // ==================== Feedback ====================

    /// Close the feedback overlay and move to the screen it was pointing at
    pub fn dismiss_feedback(&self) -> Option<Feedback> {
        let today = self.clock.today();
        let mut state = self.state.lock();
        let feedback = state.feedback.dismiss()?;
        let target = state.return_to;
        match target {
            ManageScreen::Query if state.screen != ManageScreen::Query => state.reset(today),
            ManageScreen::Query => {}
            screen if screen != state.screen => {
                state.enter(screen);
                if screen == ManageScreen::Viewing {
                    state.detail.focus(CANCEL_BUTTON);
                }
            }
            _ => {}
        }
        Some(feedback)
    }

    // ==================== Accessors ====================

    pub fn screen(&self) -> ManageScreen {
        self.state.lock().screen
    }

    pub fn booking(&self) -> Option<Booking> {
        self.state.lock().booking.clone()
    }

    pub fn detail_view(&self) -> Option<BookingDetailView> {
        self.state
            .lock()
            .booking
            .as_ref()
            .map(BookingDetailView::from_booking)
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.state.lock().feedback.current().cloned()
    }

    pub fn room_options(&self) -> Vec<RoomOption> {
        self.state.lock().room_options.clone()
    }

    pub fn room_choice(&self) -> Option<i64> {
        self.state.lock().room_choice
    }

    pub fn picker(&self) -> DateRangePicker {
        self.state.lock().picker.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.lookup_guard.is_busy()
            || self.modify_guard.is_busy()
            || self.cancel_guard.is_busy()
            || self.rooms_guard.is_busy()
    }

    /// Whether the dialog with the given id is shown
    pub fn is_visible(&self, dialog: &str) -> bool {
        let state = self.state.lock();
        [&state.query, &state.detail, &state.modify, &state.cancel]
            .into_iter()
            .find(|d| d.id() == dialog)
            .is_some_and(Dialog::is_visible)
    }

    pub fn aria_hidden(&self, dialog: &str) -> Option<&'static str> {
        let state = self.state.lock();
        [&state.query, &state.detail, &state.modify, &state.cancel]
            .into_iter()
            .find(|d| d.id() == dialog)
            .map(Dialog::aria_hidden)
    }

    /// Control holding focus: the feedback overlay wins over dialogs
    pub fn focused(&self) -> Option<&'static str> {
        let state = self.state.lock();
        if let Some(id) = state.feedback.focused() {
            return Some(id);
        }
        [&state.query, &state.detail, &state.modify, &state.cancel]
            .into_iter()
            .find_map(Dialog::focused)
    }

    pub fn tab(&self) -> Option<&'static str> {
        let mut state = self.state.lock();
        active_dialog(&mut state).and_then(Dialog::tab)
    }

    pub fn shift_tab(&self) -> Option<&'static str> {
        let mut state = self.state.lock();
        active_dialog(&mut state).and_then(Dialog::shift_tab)
    }

    pub fn render(&self) -> Element {
        let state = self.state.lock();
        let busy = self.is_busy();

        let query = Element::new("form")
            .child(
                Element::new("input")
                    .id("email")
                    .attr("type", "email")
                    .attr("value", state.email.clone()),
            )
            .child(Element::new("input").id("booking_reference").attr("type", "text"))
            .child(
                Element::new("button")
                    .id("queryBookingBtn")
                    .flag("disabled", self.lookup_guard.is_busy())
                    .text("Find Booking"),
            );

        let detail = match &state.booking {
            Some(booking) => BookingDetailView::from_booking(booking).render(),
            None => Element::new("div").id("booking-details"),
        }
        .child(Element::new("button").id(BOOKING_CLOSE).text("Close"));

        let modify = Element::new("form")
            .id("modifyBookingForm")
            .child(
                Element::new("input")
                    .id("modify_check_in_date")
                    .attr("value", state.picker.check_in_display())
                    .attr("data-date", state.picker.check_in_transmission())
                    .attr("data-min-date", to_display(state.picker.min_check_in())),
            )
            .child(
                Element::new("input")
                    .id("modify_check_out_date")
                    .attr("value", state.picker.check_out_display())
                    .attr("data-date", state.picker.check_out_transmission())
                    .attr("data-min-date", to_display(state.picker.min_check_out())),
            )
            .child(
                Element::new("button")
                    .id("searchRoomsBtn")
                    .flag("disabled", self.rooms_guard.is_busy())
                    .text("Search Rooms"),
            )
            .child(render_room_select(
                "modify_room_id",
                &state.room_options,
                state.room_choice,
            ))
            .child(
                Element::new("button")
                    .id("submitModifyBtn")
                    .flag("disabled", busy)
                    .text("Save Changes"),
            )
            .child(Element::new("button").id("closeModifyModal").text("Close"));

        let cancel = Element::new("div")
            .child(Element::new("p").text("Are you sure you want to cancel this booking?"))
            .child(
                Element::new("button")
                    .id("confirmCancelBtn")
                    .flag("disabled", self.cancel_guard.is_busy())
                    .text("Yes, cancel"),
            )
            .child(Element::new("button").id("closeCancelModal").text("Keep booking"));

        let mut root = Element::new("section")
            .id("manage-booking")
            .child(state.query.render(query))
            .child(state.detail.render(detail))
            .child(state.modify.render(modify))
            .child(state.cancel.render(cancel));
        if let Some(feedback) = state.feedback.render() {
            root = root.child(feedback);
        }
        root
    }
}

fn active_dialog(state: &mut ManageState) -> Option<&mut Dialog> {
    if state.feedback.is_visible() {
        return None;
    }
    match state.screen {
        ManageScreen::Query => Some(&mut state.query),
        ManageScreen::Viewing => Some(&mut state.detail),
        ManageScreen::ModifyForm => Some(&mut state.modify),
        ManageScreen::CancelConfirm => Some(&mut state.cancel),
        ManageScreen::Done => None,
    }
}
