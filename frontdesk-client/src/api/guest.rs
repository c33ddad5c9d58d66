//! Guest self-service endpoints

use super::{BookingApi, accept};
use crate::{ClientResult, HttpClient};
use serde_json::Value;
use shared::models::{Booking, RoomOption};
use shared::request::{
    AlternativeRoomsRequest, BookingLookupRequest, CreateBookingRequest, ModifyBookingRequest,
    SearchRoomsRequest,
};
use shared::response::{
    AlternativeRoomsResponse, BookingReferenceResponse, ManageBookingResponse, SearchRoomsResponse,
};

impl<H: HttpClient> BookingApi<H> {
    /// `POST /search_rooms?page=N`
    pub async fn search_rooms(
        &self,
        page: u32,
        request: &SearchRoomsRequest,
    ) -> ClientResult<SearchRoomsResponse> {
        self.http
            .post(&format!("/search_rooms?page={page}"), request)
            .await
    }

    /// `POST /create_booking`
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> ClientResult<BookingReferenceResponse> {
        let value: Value = self.http.post("/create_booking", request).await?;
        accept(value)
    }

    /// `POST /manage_booking`
    pub async fn manage_booking(&self, request: &BookingLookupRequest) -> ClientResult<Booking> {
        let response: ManageBookingResponse = self.http.post("/manage_booking", request).await?;
        Ok(response.booking)
    }

    /// `POST /modify_booking/{reference}`
    pub async fn modify_booking(
        &self,
        reference: &str,
        request: &ModifyBookingRequest,
    ) -> ClientResult<BookingReferenceResponse> {
        let path = format!("/modify_booking/{}", urlencoding::encode(reference));
        let value: Value = self.http.post(&path, request).await?;
        accept(value)
    }

    /// `POST /cancel_booking`
    pub async fn cancel_booking(
        &self,
        request: &BookingLookupRequest,
    ) -> ClientResult<BookingReferenceResponse> {
        let value: Value = self.http.post("/cancel_booking", request).await?;
        accept(value)
    }

    /// `POST /available_rooms`: rooms an existing booking can move to
    pub async fn alternative_rooms(
        &self,
        request: &AlternativeRoomsRequest,
    ) -> ClientResult<Vec<RoomOption>> {
        let value: Value = self.http.post("/available_rooms", request).await?;
        let response: AlternativeRoomsResponse = accept(value)?;
        Ok(response.rooms)
    }
}
