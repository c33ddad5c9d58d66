//! Receptionist console
//!
//! Lists (bookings, rooms, guests, priorities) are refreshed from the API and
//! never paged client-side. Every mutation locks the control that triggered
//! it, refreshes the lists it affects on success and unlocks afterwards.

use crate::api::BookingApi;
use crate::booking::GuestInfo;
use crate::clock::Clock;
use crate::dates::SearchDates;
use crate::error::Precondition;
use crate::feedback::{Dialog, Feedback, FeedbackLayer};
use crate::guard::{Dispatch, RequestGuard, criteria_key};
use crate::markup::Element;
use crate::view::{
    BookingActions, PaginationView, ReceptionBookingCard, WalkInSummary, format_currency,
    render_guest_table, render_priorities, render_room_row,
};
use crate::{ClientConfig, ClientError, ClientResult, HttpClient};
use chrono::NaiveDate;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::error::Action;
use shared::models::{
    Booking, BookingStatus, BookingTimeframe, Guest, Pagination, PaymentStatus, Priorities, Room,
    RoomType,
};
use shared::request::{
    AddRoomRequest, BookingListQuery, StaffModifyRequest, StaffRoomSearchRequest,
    UpdatePaymentRequest, UpdateStatusRequest, WalkInRequest,
};
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub const NO_BOOKINGS_MESSAGE: &str = "No bookings found.";
pub const NO_STAFF_ROOMS_MESSAGE: &str = "No rooms available for the selected dates.";

const WALK_IN_DIALOG: &str = "walkinConfirmModal";
const WALK_IN_FOCUS: &[&str] = &["walkinConfirmSubmit", "walkinConfirmCancel"];

/// Control-level mutation on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleAction {
    CheckIn,
    CheckOut,
    RecordPayment,
    Modify,
    Delete,
    SearchRooms,
    WalkIn,
    AddRoom,
    DeleteRoom,
}

impl ConsoleAction {
    /// `data-action` of the control that triggers this action
    pub fn control(&self) -> &'static str {
        match self {
            ConsoleAction::CheckIn => "check-in",
            ConsoleAction::CheckOut => "check-out",
            ConsoleAction::RecordPayment => "payment",
            ConsoleAction::Modify => "modify",
            ConsoleAction::Delete => "delete",
            ConsoleAction::SearchRooms => "search-rooms",
            ConsoleAction::WalkIn => "walk-in",
            ConsoleAction::AddRoom => "add-room",
            ConsoleAction::DeleteRoom => "delete-room",
        }
    }

    fn action(&self) -> Action {
        match self {
            ConsoleAction::CheckIn => Action::CheckIn,
            ConsoleAction::CheckOut => Action::CheckOut,
            ConsoleAction::RecordPayment => Action::RecordPayment,
            ConsoleAction::Modify => Action::ModifyBooking,
            ConsoleAction::Delete => Action::DeleteBooking,
            ConsoleAction::SearchRooms => Action::SearchStaffRooms,
            ConsoleAction::WalkIn => Action::CreateWalkIn,
            ConsoleAction::AddRoom => Action::AddRoom,
            ConsoleAction::DeleteRoom => Action::DeleteRoom,
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            ConsoleAction::CheckIn => "Check-in successful!",
            ConsoleAction::CheckOut => "Check-out successful!",
            ConsoleAction::RecordPayment => "Payment recorded successfully!",
            ConsoleAction::Modify => "Booking modified successfully!",
            ConsoleAction::Delete => "Booking deleted successfully!",
            ConsoleAction::SearchRooms => "Rooms loaded.",
            ConsoleAction::WalkIn => "Booking created successfully!",
            ConsoleAction::AddRoom => "Room added successfully!",
            ConsoleAction::DeleteRoom => "Room deleted successfully!",
        }
    }
}

/// Lists a successful mutation invalidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refresh {
    Bookings,
    Rooms,
}

type LockKey = (ConsoleAction, i64);

/// Held while a control's request is in flight; unlocks on drop
struct ControlLock<'a> {
    locks: &'a Mutex<HashSet<LockKey>>,
    key: LockKey,
}

impl<'a> ControlLock<'a> {
    fn acquire(locks: &'a Mutex<HashSet<LockKey>>, key: LockKey) -> Option<Self> {
        if locks.lock().insert(key) {
            Some(Self { locks, key })
        } else {
            None
        }
    }
}

impl Drop for ControlLock<'_> {
    fn drop(&mut self) {
        self.locks.lock().remove(&self.key);
    }
}

/// Walk-in booking form as typed by the receptionist
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkInForm {
    pub guest: GuestInfo,
    pub room_id: Option<i64>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

/// Room form of the add-room dialog
#[derive(Debug, Clone, PartialEq)]
pub struct AddRoomForm {
    pub room_number: String,
    pub room_type: RoomType,
    pub price: Decimal,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
struct PreparedWalkIn {
    guest: GuestInfo,
    room_id: i64,
    dates: SearchDates,
    summary: WalkInSummary,
}

#[derive(Debug)]
struct ConsoleState {
    query: BookingListQuery,
    bookings: Vec<Booking>,
    bookings_page: Pagination,
    rooms: Vec<Room>,
    rooms_page: Pagination,
    guests: Vec<Guest>,
    priorities: Option<Priorities>,
    staff_rooms: Vec<Room>,
    staff_rooms_message: Option<String>,
    walk_in: Option<PreparedWalkIn>,
    walk_in_dialog: Dialog,
    feedback: FeedbackLayer,
}

impl ConsoleState {
    fn new(first_page: u32) -> Self {
        Self {
            query: BookingListQuery {
                page: first_page,
                ..BookingListQuery::default()
            },
            bookings: Vec::new(),
            bookings_page: Pagination::default(),
            rooms: Vec::new(),
            rooms_page: Pagination::default(),
            guests: Vec::new(),
            priorities: None,
            staff_rooms: Vec::new(),
            staff_rooms_message: None,
            walk_in: None,
            walk_in_dialog: Dialog::new(WALK_IN_DIALOG, WALK_IN_FOCUS),
            feedback: FeedbackLayer::default(),
        }
    }
}

/// Front-desk dashboard controller
pub struct ReceptionistConsole<H> {
    api: BookingApi<H>,
    clock: Arc<dyn Clock>,
    first_page: u32,
    bookings_guard: RequestGuard,
    rooms_guard: RequestGuard,
    guests_guard: RequestGuard,
    priorities_guard: RequestGuard,
    staff_rooms_guard: RequestGuard,
    locks: Mutex<HashSet<LockKey>>,
    state: Mutex<ConsoleState>,
}

impl<H: HttpClient> ReceptionistConsole<H> {
    pub fn new(api: BookingApi<H>, config: &ClientConfig, clock: Arc<dyn Clock>) -> Self {
        // list refreshes follow mutations immediately, so they never debounce
        let lists = Duration::ZERO;
        Self {
            api,
            clock,
            first_page: config.first_page,
            bookings_guard: RequestGuard::new("bookings", lists),
            rooms_guard: RequestGuard::new("rooms", lists),
            guests_guard: RequestGuard::new("guests", lists),
            priorities_guard: RequestGuard::new("priorities", lists),
            staff_rooms_guard: RequestGuard::new("staff-rooms", config.debounce()),
            locks: Mutex::new(HashSet::new()),
            state: Mutex::new(ConsoleState::new(config.first_page)),
        }
    }

    // ==================== Lists ====================

    /// Reload the booking list for the current page, filters and search
    pub async fn load_bookings(&self) -> Dispatch<ClientResult<usize>> {
        let query = self.state.lock().query.clone();
        let outcome = self
            .bookings_guard
            .dispatch(criteria_key(&query), self.api.bookings(&query))
            .await;
        match outcome {
            Dispatch::Completed(Ok(response)) => {
                let count = response.bookings.len();
                tracing::debug!(page = query.page, count, "bookings loaded");
                let mut state = self.state.lock();
                state.bookings = response.bookings;
                state.bookings_page = response.pagination;
                Dispatch::Completed(Ok(count))
            }
            Dispatch::Completed(Err(err)) => {
                Dispatch::Completed(Err(self.fail(Action::LoadBookings, err)))
            }
            Dispatch::Dropped => Dispatch::Dropped,
            Dispatch::Superseded => Dispatch::Superseded,
        }
    }

    /// Load one page of the room list
    pub async fn load_rooms(&self, page: u32) -> Dispatch<ClientResult<usize>> {
        let outcome = self
            .rooms_guard
            .dispatch(criteria_key(&page), self.api.rooms(page))
            .await;
        match outcome {
            Dispatch::Completed(Ok(response)) => {
                let count = response.rooms.len();
                let mut state = self.state.lock();
                state.rooms = response.rooms;
                state.rooms_page = response.pagination;
                Dispatch::Completed(Ok(count))
            }
            Dispatch::Completed(Err(err)) => {
                Dispatch::Completed(Err(self.fail(Action::LoadRooms, err)))
            }
            Dispatch::Dropped => Dispatch::Dropped,
            Dispatch::Superseded => Dispatch::Superseded,
        }
    }

    pub async fn load_guests(&self) -> Dispatch<ClientResult<usize>> {
        match self.guests_guard.dispatch(0, self.api.guests()).await {
            Dispatch::Completed(Ok(guests)) => {
                let count = guests.len();
                self.state.lock().guests = guests;
                Dispatch::Completed(Ok(count))
            }
            Dispatch::Completed(Err(err)) => {
                Dispatch::Completed(Err(self.fail(Action::LoadGuests, err)))
            }
            Dispatch::Dropped => Dispatch::Dropped,
            Dispatch::Superseded => Dispatch::Superseded,
        }
    }

    pub async fn load_priorities(&self) -> Dispatch<ClientResult<Priorities>> {
        match self.priorities_guard.dispatch(0, self.api.priorities()).await {
            Dispatch::Completed(Ok(priorities)) => {
                self.state.lock().priorities = Some(priorities);
                Dispatch::Completed(Ok(priorities))
            }
            Dispatch::Completed(Err(err)) => {
                Dispatch::Completed(Err(self.fail(Action::LoadPriorities, err)))
            }
            Dispatch::Dropped => Dispatch::Dropped,
            Dispatch::Superseded => Dispatch::Superseded,
        }
    }

    /// Reset paging, filters and search, then reload every list
    ///
    /// Returns whether all four lists loaded.
    pub async fn refresh_dashboard(&self) -> bool {
        self.state.lock().query = BookingListQuery {
            page: self.first_page,
            ..BookingListQuery::default()
        };
        let (bookings, rooms, guests, priorities) = tokio::join!(
            self.load_bookings(),
            self.load_rooms(self.first_page),
            self.load_guests(),
            self.load_priorities(),
        );
        let ok = [
            bookings.completed().is_some_and(|r| r.is_ok()),
            rooms.completed().is_some_and(|r| r.is_ok()),
            guests.completed().is_some_and(|r| r.is_ok()),
            priorities.completed().is_some_and(|r| r.is_ok()),
        ];
        tracing::info!(loaded = ok.iter().filter(|b| **b).count(), "dashboard refreshed");
        ok.iter().all(|b| *b)
    }

    // ==================== Paging & filters ====================

    /// Status tab; `None` shows every status
    pub async fn set_status_filter(
        &self,
        status: Option<BookingStatus>,
    ) -> Dispatch<ClientResult<usize>> {
        self.update_query(|q| {
            q.status = status.map_or("all", |s| s.as_str()).to_string();
        });
        self.load_bookings().await
    }

    /// Timeframe filter; `None` shows every booking
    pub async fn set_booking_filter(
        &self,
        timeframe: Option<BookingTimeframe>,
    ) -> Dispatch<ClientResult<usize>> {
        self.update_query(|q| {
            q.filter = match timeframe {
                None => "all",
                Some(BookingTimeframe::Today) => "today",
                Some(BookingTimeframe::Upcoming) => "upcoming",
                Some(BookingTimeframe::Past) => "past",
            }
            .to_string();
        });
        self.load_bookings().await
    }

    pub async fn search_reference(&self, reference: &str) -> Dispatch<ClientResult<usize>> {
        let reference = reference.trim().to_string();
        self.update_query(|q| q.search_reference = reference);
        self.load_bookings().await
    }

    pub async fn clear_search(&self) -> Dispatch<ClientResult<usize>> {
        self.update_query(|q| q.search_reference.clear());
        self.load_bookings().await
    }

    /// Apply a filter change; any filter change starts over at the first page
    fn update_query(&self, change: impl FnOnce(&mut BookingListQuery)) {
        let mut state = self.state.lock();
        change(&mut state.query);
        state.query.page = self.first_page;
    }

    /// Next booking page; dropped on the last page
    pub async fn next_page(&self) -> Dispatch<ClientResult<usize>> {
        {
            let mut state = self.state.lock();
            if !state.bookings_page.has_next() {
                return Dispatch::Dropped;
            }
            state.query.page = state.bookings_page.current_page + 1;
        }
        self.load_bookings().await
    }

    /// Previous booking page; dropped on the first page
    pub async fn prev_page(&self) -> Dispatch<ClientResult<usize>> {
        {
            let mut state = self.state.lock();
            if !state.bookings_page.has_previous() {
                return Dispatch::Dropped;
            }
            state.query.page = state.bookings_page.current_page - 1;
        }
        self.load_bookings().await
    }

    pub async fn next_rooms_page(&self) -> Dispatch<ClientResult<usize>> {
        let page = {
            let state = self.state.lock();
            if !state.rooms_page.has_next() {
                return Dispatch::Dropped;
            }
            state.rooms_page.current_page + 1
        };
        self.load_rooms(page).await
    }

    pub async fn prev_rooms_page(&self) -> Dispatch<ClientResult<usize>> {
        let page = {
            let state = self.state.lock();
            if !state.rooms_page.has_previous() {
                return Dispatch::Dropped;
            }
            state.rooms_page.current_page - 1
        };
        self.load_rooms(page).await
    }

    // ==================== Booking mutations ====================

    pub async fn check_in(&self, booking_id: i64) -> Dispatch<ClientResult<()>> {
        let action = ConsoleAction::CheckIn;
        if let Err(rule) = self.permitted(booking_id, |a| a.check_in) {
            return self.reject(action, rule);
        }
        let request = UpdateStatusRequest {
            booking_id,
            status: BookingStatus::CheckedIn,
        };
        self.mutate(action, booking_id, &[Refresh::Bookings], async {
            self.api.update_status(&request).await.map(drop)
        })
        .await
    }

    pub async fn check_out(&self, booking_id: i64) -> Dispatch<ClientResult<()>> {
        let action = ConsoleAction::CheckOut;
        if let Err(rule) = self.permitted(booking_id, |a| a.check_out) {
            return self.reject(action, rule);
        }
        self.mutate(action, booking_id, &[Refresh::Bookings], async {
            self.api.checkout(booking_id).await.map(drop)
        })
        .await
    }

    pub async fn record_payment(&self, booking_id: i64) -> Dispatch<ClientResult<()>> {
        let action = ConsoleAction::RecordPayment;
        if let Err(rule) = self.permitted(booking_id, |a| a.record_payment) {
            return self.reject(action, rule);
        }
        let request = UpdatePaymentRequest {
            booking_id,
            payment_status: PaymentStatus::Paid,
        };
        self.mutate(action, booking_id, &[Refresh::Bookings], async {
            self.api.update_payment(&request).await.map(drop)
        })
        .await
    }

    pub async fn delete_booking(&self, booking_id: i64) -> Dispatch<ClientResult<()>> {
        let action = ConsoleAction::Delete;
        if let Err(rule) = self.permitted(booking_id, |a| a.delete) {
            return self.reject(action, rule);
        }
        self.mutate(action, booking_id, &[Refresh::Bookings], async {
            self.api.delete_booking(booking_id).await.map(drop)
        })
        .await
    }

    /// Change dates and optionally the room of a listed booking
    pub async fn staff_modify(
        &self,
        booking_id: i64,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        room_id: Option<i64>,
    ) -> Dispatch<ClientResult<()>> {
        let action = ConsoleAction::Modify;
        let today = self.clock.today();
        let prepared = self.permitted(booking_id, |a| a.modify).and_then(|booking| {
            let dates = SearchDates::ordered(check_in, check_out)?;
            // an unchanged check-in may already be in the past for a stay under way
            if dates.check_in != booking.check_in_date && dates.check_in < today {
                return Err(Precondition::CheckInInPast);
            }
            Ok(StaffModifyRequest {
                booking_id,
                email: booking.guest.email,
                check_in_date: dates.check_in,
                check_out_date: dates.check_out,
                room_id,
            })
        });
        let request = match prepared {
            Ok(request) => request,
            Err(rule) => return self.reject(action, rule),
        };
        self.mutate(action, booking_id, &[Refresh::Bookings], async {
            self.api.staff_modify_booking(&request).await.map(drop)
        })
        .await
    }

    /// Listed booking whose action set allows `allowed`
    fn permitted(
        &self,
        booking_id: i64,
        allowed: impl Fn(&BookingActions) -> bool,
    ) -> Result<Booking, Precondition> {
        let state = self.state.lock();
        let booking = state
            .bookings
            .iter()
            .find(|b| b.id == booking_id)
            .ok_or(Precondition::NoBookingLoaded)?;
        if !allowed(&BookingActions::for_booking(booking)) {
            return Err(Precondition::ActionUnavailable);
        }
        Ok(booking.clone())
    }

    // ==================== Walk-in ====================

    /// Rooms free for a date range, for walk-ins and staff modifications
    pub async fn staff_search_rooms(
        &self,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        room_type: Option<RoomType>,
        exclude_booking_id: Option<i64>,
    ) -> Dispatch<ClientResult<usize>> {
        let action = ConsoleAction::SearchRooms;
        let dates = match SearchDates::ordered(check_in, check_out) {
            Ok(dates) => dates,
            Err(rule) => return self.reject(action, rule),
        };
        let request = StaffRoomSearchRequest {
            check_in_date: dates.check_in,
            check_out_date: dates.check_out,
            room_type,
            exclude_booking_id,
        };
        let key = criteria_key(&(dates, room_type, exclude_booking_id));
        let outcome = self
            .staff_rooms_guard
            .dispatch(key, self.api.staff_search_rooms(&request))
            .await;
        match outcome {
            Dispatch::Completed(Ok(rooms)) => {
                let count = rooms.len();
                let mut state = self.state.lock();
                state.staff_rooms = rooms;
                state.staff_rooms_message =
                    (count == 0).then(|| NO_STAFF_ROOMS_MESSAGE.to_string());
                Dispatch::Completed(Ok(count))
            }
            Dispatch::Completed(Err(err)) => {
                let mut state = self.state.lock();
                state.staff_rooms.clear();
                state.staff_rooms_message = None;
                drop(state);
                Dispatch::Completed(Err(self.fail(action.action(), err)))
            }
            Dispatch::Dropped => Dispatch::Dropped,
            Dispatch::Superseded => Dispatch::Superseded,
        }
    }

    /// Validate the walk-in form and open the confirmation summary
    pub fn prepare_walk_in(&self, form: &WalkInForm) -> Result<WalkInSummary, Precondition> {
        let prepared = self.build_walk_in(form);
        let mut state = self.state.lock();
        match prepared {
            Ok(walk_in) => {
                let summary = walk_in.summary.clone();
                state.walk_in = Some(walk_in);
                state.walk_in_dialog.show();
                Ok(summary)
            }
            Err(rule) => {
                state.feedback.show(Feedback::error("Error", rule.message()));
                Err(rule)
            }
        }
    }

    fn build_walk_in(&self, form: &WalkInForm) -> Result<PreparedWalkIn, Precondition> {
        let guest = form.guest.check()?;
        let dates = SearchDates::validate(form.check_in, form.check_out, self.clock.today())?;
        let room_id = form.room_id.ok_or(Precondition::NoRoomSelected)?;
        let room = self
            .state
            .lock()
            .staff_rooms
            .iter()
            .find(|r| r.id == room_id)
            .cloned()
            .ok_or(Precondition::NoRoomSelected)?;
        let total = room.price * Decimal::from(dates.nights());
        let summary = WalkInSummary {
            guest_name: guest.full_name.clone(),
            email: guest.email.clone(),
            phone: guest.phone.clone(),
            room_label: format!(
                "Room {} ({}, {})",
                room.room_number,
                room.room_type,
                format_currency(room.price)
            ),
            dates,
            total_label: format_currency(total),
        };
        Ok(PreparedWalkIn {
            guest,
            room_id,
            dates,
            summary,
        })
    }

    /// Close the confirmation without booking
    pub fn cancel_walk_in(&self) {
        let mut state = self.state.lock();
        state.walk_in_dialog.hide();
    }

    /// Book the prepared walk-in
    pub async fn confirm_walk_in(&self) -> Dispatch<ClientResult<String>> {
        let action = ConsoleAction::WalkIn;
        let prepared = self.state.lock().walk_in.clone();
        let Some(walk_in) = prepared else {
            return self.reject(action, Precondition::WalkInNotPrepared);
        };
        let Some(_lock) = ControlLock::acquire(&self.locks, (action, walk_in.room_id)) else {
            return Dispatch::Dropped;
        };

        let request = WalkInRequest {
            full_name: walk_in.guest.full_name,
            email: walk_in.guest.email,
            phone: walk_in.guest.phone,
            room_id: walk_in.room_id,
            check_in_date: walk_in.dates.check_in,
            check_out_date: walk_in.dates.check_out,
            request_id: shared::util::walk_in_request_id(self.clock.now_millis()),
        };
        match self.api.create_walk_in(&request).await {
            Ok(response) => {
                tracing::info!(reference = %response.booking_reference, "walk-in booked");
                {
                    let mut state = self.state.lock();
                    state.walk_in = None;
                    state.walk_in_dialog.hide();
                    state.staff_rooms.clear();
                    state.staff_rooms_message = None;
                    state.feedback.show(Feedback::with_reference(
                        action.success_message(),
                        response.booking_reference.clone(),
                    ));
                }
                self.refresh(&[Refresh::Bookings]).await;
                Dispatch::Completed(Ok(response.booking_reference))
            }
            Err(err) => {
                tracing::warn!(error = %err, "walk-in failed");
                Dispatch::Completed(Err(self.fail(action.action(), err)))
            }
        }
    }

    // ==================== Rooms ====================

    pub async fn add_room(&self, form: &AddRoomForm) -> Dispatch<ClientResult<()>> {
        let action = ConsoleAction::AddRoom;
        let room_number = form.room_number.trim().to_string();
        if room_number.is_empty() {
            return self.reject(action, Precondition::MissingRoomDetails);
        }
        if form.price <= Decimal::ZERO {
            return self.reject(action, Precondition::InvalidPrice);
        }
        let request = AddRoomRequest {
            room_number,
            room_type: form.room_type,
            price: form.price,
            description: form
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        };
        self.mutate(action, 0, &[Refresh::Rooms], async {
            self.api.add_room(&request).await.map(drop)
        })
        .await
    }

    pub async fn delete_room(&self, room_id: i64) -> Dispatch<ClientResult<()>> {
        self.mutate(ConsoleAction::DeleteRoom, room_id, &[Refresh::Rooms], async {
            self.api.delete_room(room_id).await.map(drop)
        })
        .await
    }

    // ==================== Plumbing ====================

    /// Lock `(action, id)`, run `request`, refresh on success, unlock
    async fn mutate<F>(
        &self,
        action: ConsoleAction,
        id: i64,
        refresh: &[Refresh],
        request: F,
    ) -> Dispatch<ClientResult<()>>
    where
        F: Future<Output = ClientResult<()>>,
    {
        let Some(_lock) = ControlLock::acquire(&self.locks, (action, id)) else {
            tracing::debug!(control = action.control(), id, "control locked, dropping");
            return Dispatch::Dropped;
        };
        match request.await {
            Ok(()) => {
                tracing::info!(control = action.control(), id, "console action succeeded");
                self.state
                    .lock()
                    .feedback
                    .show(Feedback::success("Success", action.success_message()));
                self.refresh(refresh).await;
                Dispatch::Completed(Ok(()))
            }
            Err(err) => {
                tracing::warn!(
                    control = action.control(),
                    id,
                    error = %err,
                    "console action failed"
                );
                Dispatch::Completed(Err(self.fail(action.action(), err)))
            }
        }
    }

    async fn refresh(&self, lists: &[Refresh]) {
        for list in lists {
            match list {
                // a load still in flight was issued before the mutation landed
                Refresh::Bookings => {
                    self.bookings_guard.supersede();
                    self.priorities_guard.supersede();
                    let _ = tokio::join!(self.load_bookings(), self.load_priorities());
                }
                Refresh::Rooms => {
                    self.rooms_guard.supersede();
                    let page = self.state.lock().rooms_page.current_page;
                    let _ = self.load_rooms(page).await;
                }
            }
        }
    }

    fn reject<T>(&self, action: ConsoleAction, rule: Precondition) -> Dispatch<ClientResult<T>> {
        tracing::debug!(control = action.control(), %rule, "console action rejected locally");
        Dispatch::Completed(Err(self.fail(action.action(), ClientError::from(rule))))
    }

    fn fail(&self, action: Action, err: ClientError) -> ClientError {
        self.state
            .lock()
            .feedback
            .show(Feedback::from_error(action, &err));
        err
    }

    // ==================== Accessors ====================

    pub fn is_locked(&self, action: ConsoleAction, id: i64) -> bool {
        self.locks.lock().contains(&(action, id))
    }

    pub fn query(&self) -> BookingListQuery {
        self.state.lock().query.clone()
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.state.lock().bookings.clone()
    }

    pub fn booking_cards(&self) -> Vec<ReceptionBookingCard> {
        let today = self.clock.today();
        self.state
            .lock()
            .bookings
            .iter()
            .map(|b| ReceptionBookingCard::from_booking(b, today))
            .collect()
    }

    pub fn bookings_pagination(&self) -> PaginationView {
        PaginationView::new(&self.state.lock().bookings_page)
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.state.lock().rooms.clone()
    }

    pub fn rooms_pagination(&self) -> PaginationView {
        PaginationView::new(&self.state.lock().rooms_page)
    }

    pub fn guests(&self) -> Vec<Guest> {
        self.state.lock().guests.clone()
    }

    pub fn priorities(&self) -> Option<Priorities> {
        self.state.lock().priorities
    }

    pub fn staff_rooms(&self) -> Vec<Room> {
        self.state.lock().staff_rooms.clone()
    }

    pub fn staff_rooms_message(&self) -> Option<String> {
        self.state.lock().staff_rooms_message.clone()
    }

    pub fn walk_in_summary(&self) -> Option<WalkInSummary> {
        self.state.lock().walk_in.as_ref().map(|w| w.summary.clone())
    }

    pub fn is_walk_in_dialog_visible(&self) -> bool {
        self.state.lock().walk_in_dialog.is_visible()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.state.lock().feedback.current().cloned()
    }

    pub fn dismiss_feedback(&self) -> Option<Feedback> {
        self.state.lock().feedback.dismiss()
    }

    pub fn render(&self) -> Element {
        let today = self.clock.today();
        let locks = self.locks.lock().clone();
        let state = self.state.lock();

        let status_tabs = Element::new("div").class("status-tabs").children(
            ["all", "booked", "checked-in", "checked-out", "cancelled"]
                .into_iter()
                .map(|status| {
                    let active = state.query.status == status;
                    Element::new("button")
                        .class(if active { "status-tab active" } else { "status-tab" })
                        .attr("data-status", status)
                        .attr("aria-selected", active.to_string())
                        .text(status)
                }),
        );
        let search = Element::new("input")
            .id("searchReference")
            .attr("type", "search")
            .attr("value", state.query.search_reference.clone());

        let bookings = if state.bookings.is_empty() {
            Element::new("div")
                .id("bookings-content")
                .child(Element::new("p").class("no-bookings").text(NO_BOOKINGS_MESSAGE))
        } else {
            Element::new("div")
                .id("bookings-content")
                .children(state.bookings.iter().map(|b| {
                    let card = ReceptionBookingCard::from_booking(b, today);
                    let id = card.booking_id;
                    card.render(|control| {
                        locks
                            .iter()
                            .any(|(action, locked)| *locked == id && action.control() == control)
                    })
                }))
        };

        let rooms = Element::new("div").id("rooms-content").children(
            state.rooms.iter().map(|room| {
                render_room_row(room, locks.contains(&(ConsoleAction::DeleteRoom, room.id)))
            }),
        );

        let mut root = Element::new("main")
            .id("receptionist-dashboard")
            .child(status_tabs)
            .child(search)
            .child(bookings)
            .child(PaginationView::new(&state.bookings_page).render("bookings-pagination"))
            .child(rooms)
            .child(PaginationView::new(&state.rooms_page).render("rooms-pagination"))
            .child(render_guest_table(&state.guests));
        if let Some(priorities) = &state.priorities {
            root = root.child(render_priorities(priorities));
        }
        if let Some(message) = &state.staff_rooms_message {
            root = root.child(Element::new("p").id("walkinRoomsMessage").text(message.clone()));
        }
        let summary = match &state.walk_in {
            Some(walk_in) => walk_in.summary.render(),
            None => Element::new("div").id("walkin-summary"),
        };
        root = root.child(
            state.walk_in_dialog.render(
                summary
                    .child(
                        Element::new("button")
                            .id("walkinConfirmSubmit")
                            .flag(
                                "disabled",
                                locks.iter().any(|(a, _)| *a == ConsoleAction::WalkIn),
                            )
                            .text("Confirm"),
                    )
                    .child(Element::new("button").id("walkinConfirmCancel").text("Cancel")),
            ),
        );
        if let Some(feedback) = state.feedback.render() {
            root = root.child(feedback);
        }
        root
    }
}
