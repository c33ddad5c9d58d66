//! Receptionist endpoints

use super::{BookingApi, accept};
use crate::{ClientError, ClientResult, HttpClient};
use serde_json::Value;
use shared::models::{Guest, Priorities, Room};
use shared::request::{
    AddRoomRequest, BookingListQuery, CheckoutRequest, StaffModifyRequest, StaffRoomSearchRequest,
    UpdatePaymentRequest, UpdateStatusRequest, WalkInRequest,
};
use shared::response::{
    Ack, BookingListResponse, BookingReferenceResponse, GuestListResponse, RoomListResponse,
};

impl<H: HttpClient> BookingApi<H> {
    /// `GET /receptionist/bookings?page&status&filter&search_reference`
    pub async fn bookings(&self, query: &BookingListQuery) -> ClientResult<BookingListResponse> {
        self.http
            .get_with_query("/receptionist/bookings", query)
            .await
    }

    /// `GET /receptionist/rooms?page=N`
    pub async fn rooms(&self, page: u32) -> ClientResult<RoomListResponse> {
        self.http
            .get(&format!("/receptionist/rooms?page={page}"))
            .await
    }

    /// `GET /receptionist/guests`
    pub async fn guests(&self) -> ClientResult<Vec<Guest>> {
        let response: GuestListResponse = self.http.get("/receptionist/guests").await?;
        Ok(response.guests)
    }

    /// `GET /receptionist/priorities`
    pub async fn priorities(&self) -> ClientResult<Priorities> {
        self.http.get("/receptionist/priorities").await
    }

    /// `POST /receptionist/booking/update_status`
    pub async fn update_status(&self, request: &UpdateStatusRequest) -> ClientResult<Ack> {
        let value: Value = self
            .http
            .post("/receptionist/booking/update_status", request)
            .await?;
        accept(value)
    }

    /// `POST /receptionist/bookings/checkout`
    pub async fn checkout(&self, booking_id: i64) -> ClientResult<Ack> {
        let value: Value = self
            .http
            .post("/receptionist/bookings/checkout", &CheckoutRequest { booking_id })
            .await?;
        accept(value)
    }

    /// `POST /receptionist/booking/update_payment`
    pub async fn update_payment(&self, request: &UpdatePaymentRequest) -> ClientResult<Ack> {
        let value: Value = self
            .http
            .post("/receptionist/booking/update_payment", request)
            .await?;
        accept(value)
    }

    /// `POST /receptionist/booking/delete/{id}`
    pub async fn delete_booking(&self, booking_id: i64) -> ClientResult<Ack> {
        let value: Value = self
            .http
            .post_empty(&format!("/receptionist/booking/delete/{booking_id}"))
            .await?;
        accept(value)
    }

    /// `POST /receptionist/booking/modify/{id}`
    pub async fn staff_modify_booking(&self, request: &StaffModifyRequest) -> ClientResult<Ack> {
        let path = format!("/receptionist/booking/modify/{}", request.booking_id);
        let value: Value = self.http.post(&path, request).await?;
        accept(value)
    }

    /// `POST /receptionist/rooms/search`
    ///
    /// The endpoint answers with a bare array; a `{"rooms": [...]}` wrapper is
    /// accepted as well.
    pub async fn staff_search_rooms(
        &self,
        request: &StaffRoomSearchRequest,
    ) -> ClientResult<Vec<Room>> {
        let value: Value = self.http.post("/receptionist/rooms/search", request).await?;
        match value {
            Value::Array(_) => Ok(serde_json::from_value(value)?),
            Value::Object(mut map) if map.contains_key("rooms") => {
                let rooms = map.remove("rooms").unwrap_or(Value::Array(Vec::new()));
                Ok(serde_json::from_value(rooms)?)
            }
            other => {
                accept::<Ack>(other)?;
                Err(ClientError::InvalidResponse("expected a list of rooms".into()))
            }
        }
    }

    /// `POST /receptionist/bookings/walkin`
    pub async fn create_walk_in(
        &self,
        request: &WalkInRequest,
    ) -> ClientResult<BookingReferenceResponse> {
        let value: Value = self
            .http
            .post("/receptionist/bookings/walkin", request)
            .await?;
        accept(value)
    }

    /// `POST /receptionist/room/add` (form-encoded)
    pub async fn add_room(&self, request: &AddRoomRequest) -> ClientResult<Ack> {
        let value: Value = self.http.post_form("/receptionist/room/add", request).await?;
        accept(value)
    }

    /// `POST /receptionist/room/delete/{id}`
    pub async fn delete_room(&self, room_id: i64) -> ClientResult<Ack> {
        let value: Value = self
            .http
            .post_empty(&format!("/receptionist/room/delete/{room_id}"))
            .await?;
        accept(value)
    }
}
