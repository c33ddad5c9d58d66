//! Availability search controller

use crate::api::BookingApi;
use crate::clock::Clock;
use crate::dates::{self, SearchDates};
use crate::guard::{Dispatch, RequestGuard, criteria_key};
use crate::markup::Element;
use crate::view::{CategoryView, render_category_tabs};
use crate::{ClientConfig, ClientError, ClientResult, HttpClient};
use chrono::NaiveDate;
use parking_lot::Mutex;
use shared::error::{Action, ErrorCode};
use shared::models::{Room, RoomType};
use shared::request::SearchRoomsRequest;
use std::sync::Arc;

pub const SELECT_CATEGORY_MESSAGE: &str = "Please select a room category.";

#[derive(Debug, Default)]
struct SearchState {
    rooms: Vec<Room>,
    /// Range that produced `rooms`
    fetched: Option<SearchDates>,
    category: Option<RoomType>,
    message: Option<String>,
}

/// Owns the last search result and the dates that produced it
pub struct AvailabilitySearch<H> {
    api: BookingApi<H>,
    clock: Arc<dyn Clock>,
    first_page: u32,
    guard: RequestGuard,
    state: Mutex<SearchState>,
}

impl<H: HttpClient> AvailabilitySearch<H> {
    pub fn new(api: BookingApi<H>, config: &ClientConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            first_page: config.first_page,
            guard: RequestGuard::new("search", config.debounce()),
            state: Mutex::new(SearchState::default()),
        }
    }

    /// Query rooms for a date range, optionally switching the active tab
    ///
    /// Resolves to the number of rooms returned. Invalid ranges fail without
    /// a request; an identical search already in flight is dropped.
    pub async fn search(
        &self,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        category: Option<RoomType>,
    ) -> Dispatch<ClientResult<usize>> {
        if let Some(category) = category {
            self.state.lock().category = Some(category);
        }

        let dates = match SearchDates::validate(check_in, check_out, self.clock.today()) {
            Ok(dates) => dates,
            Err(rule) => {
                tracing::debug!(%rule, "search rejected locally");
                self.state.lock().message = Some(rule.message());
                return Dispatch::Completed(Err(rule.into()));
            }
        };

        let request = SearchRoomsRequest {
            check_in_date: dates.check_in,
            check_out_date: dates.check_out,
        };
        let outcome = self
            .guard
            .dispatch(criteria_key(&dates), async {
                self.api.search_rooms(self.first_page, &request).await
            })
            .await;

        match outcome {
            Dispatch::Completed(Ok(response)) => {
                let count = response.rooms.len();
                tracing::info!(
                    check_in = %dates.check_in,
                    check_out = %dates.check_out,
                    count,
                    "rooms loaded"
                );
                self.store(dates, response.rooms);
                Dispatch::Completed(Ok(count))
            }
            Dispatch::Completed(Err(ClientError::Api {
                code: ErrorCode::NoRoomsAvailable,
                ..
            })) => {
                self.store(dates, Vec::new());
                Dispatch::Completed(Ok(0))
            }
            Dispatch::Completed(Err(err)) => {
                tracing::warn!(error = %err, "room search failed");
                let mut state = self.state.lock();
                state.rooms.clear();
                state.fetched = None;
                state.message = Some(err.user_message(Action::SearchRooms));
                Dispatch::Completed(Err(err))
            }
            Dispatch::Dropped => Dispatch::Dropped,
            Dispatch::Superseded => Dispatch::Superseded,
        }
    }

    /// Search from the text of the two date inputs
    ///
    /// Blank fields count as missing; text that is not a date is rejected
    /// without a request.
    pub async fn search_typed(
        &self,
        check_in: &str,
        check_out: &str,
        category: Option<RoomType>,
    ) -> Dispatch<ClientResult<usize>> {
        let parsed = dates::parse_input(check_in)
            .and_then(|check_in| Ok((check_in, dates::parse_input(check_out)?)));
        match parsed {
            Ok((check_in, check_out)) => self.search(check_in, check_out, category).await,
            Err(rule) => {
                tracing::debug!(%rule, "typed dates rejected");
                self.state.lock().message = Some(rule.message());
                Dispatch::Completed(Err(rule.into()))
            }
        }
    }

    fn store(&self, dates: SearchDates, rooms: Vec<Room>) {
        let mut state = self.state.lock();
        state.rooms = rooms;
        state.fetched = Some(dates);
        state.message = None;
    }

    /// Select a category tab
    ///
    /// Filters the cached result, or re-queries when the given range differs
    /// from the one the cache was fetched for. Resolves to the number of rooms
    /// in the selected category.
    pub async fn switch_category(
        &self,
        category: RoomType,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> Dispatch<ClientResult<usize>> {
        if self.criteria_changed(check_in, check_out) && check_in.is_some() && check_out.is_some()
        {
            tracing::debug!(%category, "date range changed, re-querying");
            return match self.search(check_in, check_out, Some(category)).await {
                Dispatch::Completed(Ok(_)) => Dispatch::Completed(Ok(self.category_count())),
                other => other,
            };
        }
        self.state.lock().category = Some(category);
        Dispatch::Completed(Ok(self.category_count()))
    }

    /// Whether `check_in`/`check_out` differ from the cached result's range
    pub fn criteria_changed(
        &self,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> bool {
        match self.state.lock().fetched {
            Some(fetched) => {
                Some(fetched.check_in) != check_in || Some(fetched.check_out) != check_out
            }
            None => true,
        }
    }

    /// Drop the cached result and cancel any search in flight
    pub fn invalidate(&self) {
        self.guard.supersede();
        let mut state = self.state.lock();
        state.rooms.clear();
        state.fetched = None;
        state.message = None;
    }

    /// Remove a just-booked room from the cached result until the next search
    pub fn remove_room(&self, room_id: i64) -> bool {
        let mut state = self.state.lock();
        let before = state.rooms.len();
        state.rooms.retain(|r| r.id != room_id);
        state.rooms.len() != before
    }

    pub fn last_dates(&self) -> Option<SearchDates> {
        self.state.lock().fetched
    }

    pub fn room(&self, room_id: i64) -> Option<Room> {
        self.state.lock().rooms.iter().find(|r| r.id == room_id).cloned()
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.state.lock().rooms.clone()
    }

    pub fn active_category(&self) -> Option<RoomType> {
        self.state.lock().category
    }

    pub fn message(&self) -> Option<String> {
        self.state.lock().message.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.guard.is_busy()
    }

    fn category_count(&self) -> usize {
        self.category_view().map(|v| v.cards.len()).unwrap_or(0)
    }

    /// Cards of the active category
    pub fn category_view(&self) -> Option<CategoryView> {
        let state = self.state.lock();
        state
            .category
            .map(|category| CategoryView::new(category, &state.rooms))
    }

    pub fn render(&self) -> Element {
        let state = self.state.lock();
        let mut el = Element::new("section").id("availability");
        if let Some(category) = state.category {
            el = el.child(render_category_tabs(category));
        }
        if self.guard.is_busy() {
            return el.child(Element::new("div").class("spinner").attr("aria-busy", "true"));
        }
        if let Some(message) = &state.message {
            return el.child(Element::new("p").class("search-error").text(message.clone()));
        }
        match state.category {
            Some(category) => el.child(CategoryView::new(category, &state.rooms).render()),
            None => el.child(Element::new("p").class("no-rooms").text(SELECT_CATEGORY_MESSAGE)),
        }
    }
}
