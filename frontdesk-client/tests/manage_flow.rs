// frontdesk-client/tests/manage_flow.rs
// Manage-booking state machine: lookup, modify, cancel, dialog restoration

mod common;

use common::*;
use frontdesk_client::feedback::FEEDBACK_CLOSE_ID;
use frontdesk_client::manage::{CANCEL_BUTTON, MODIFY_BUTTON};
use frontdesk_client::{ClientError, ManageBooking, ManageScreen, Precondition};
use http::StatusCode;
use serde_json::{Value, json};
use std::sync::Arc;

const LOOKUP: &str = "/manage_booking";
const CANCEL: &str = "/cancel_booking";
const ROOMS: &str = "/available_rooms";

fn manage(http: ScriptedHttp) -> (ManageBooking<ScriptedHttp>, Arc<ScriptedHttp>) {
    let (api, http) = api(http);
    (ManageBooking::new(api, &config(), clock()), http)
}

fn found(status: &str, payment: &str) -> Value {
    json!({"booking": booking(7, "BK-7Q2X", status, payment)})
}

async fn loaded(
    status: &str,
    payment: &str,
    http: ScriptedHttp,
) -> (ManageBooking<ScriptedHttp>, Arc<ScriptedHttp>) {
    let (manage, http) = manage(http.ok(LOOKUP, found(status, payment)));
    let booking = manage
        .lookup("ama@example.com", "BK-7Q2X")
        .await
        .completed()
        .unwrap()
        .unwrap();
    assert_eq!(booking.booking_reference, "BK-7Q2X");
    (manage, http)
}

#[tokio::test]
async fn test_lookup_moves_to_viewing() {
    let (manage, http) = loaded("booked", "paid", ScriptedHttp::new()).await;

    assert_eq!(manage.screen(), ManageScreen::Viewing);
    assert!(manage.is_visible("bookingModal"));
    assert!(!manage.is_visible("queryBookingForm"));
    assert_eq!(manage.aria_hidden("queryBookingForm"), Some("true"));
    assert_eq!(manage.focused(), Some(MODIFY_BUTTON));

    let view = manage.detail_view().unwrap();
    assert_eq!(view.room_label, "201 (Double, GHS 450.00)");
    assert_eq!(view.total_label, "GHS 900.00");
    assert_eq!(view.check_in, "1 August 2025");

    let body = http.calls_to(LOOKUP)[0].body.clone().unwrap();
    assert_eq!(
        body,
        json!({"email": "ama@example.com", "booking_reference": "BK-7Q2X"})
    );
}

#[tokio::test]
async fn test_lookup_requires_both_fields() {
    let (manage, http) = manage(ScriptedHttp::new());
    let outcome = manage.lookup("ama@example.com", "  ").await.completed().unwrap();
    assert!(matches!(
        outcome,
        Err(ClientError::Precondition(Precondition::MissingLookupDetails))
    ));
    assert_eq!(
        manage.feedback().unwrap().message,
        "Please enter both your email and booking reference."
    );
    assert!(http.calls().is_empty());
    assert_eq!(manage.screen(), ManageScreen::Query);
}

#[tokio::test]
async fn test_lookup_failure_returns_to_query() {
    let http = ScriptedHttp::new().fail(
        LOOKUP,
        StatusCode::NOT_FOUND,
        json!({"error": "BOOKING_NOT_FOUND"}),
    );
    let (manage, _http) = manage(http);
    manage.lookup("ama@example.com", "BK-NOPE").await;

    let feedback = manage.feedback().unwrap();
    assert_eq!(feedback.title, "Not found");
    assert_eq!(feedback.message, "Booking not found.");
    assert_eq!(manage.focused(), Some(FEEDBACK_CLOSE_ID));

    manage.dismiss_feedback();
    assert_eq!(manage.screen(), ManageScreen::Query);
    assert!(manage.is_visible("queryBookingForm"));
    assert!(manage.booking().is_none());
}

#[tokio::test]
async fn test_checked_in_booking_disables_modify_and_cancel() {
    for payment in ["paid", "pending"] {
        let (manage, _http) = loaded("checked-in", payment, ScriptedHttp::new()).await;

        let view = manage.detail_view().unwrap();
        assert!(!view.can_modify);
        assert!(!view.can_cancel);

        let html = manage.render();
        for control in [MODIFY_BUTTON, CANCEL_BUTTON] {
            let button = html.find_by_id(control).unwrap();
            assert_eq!(button.get_attr("disabled"), Some("disabled"), "{control} / {payment}");
        }
        assert_eq!(manage.open_modify(), Err(Precondition::BookingLocked));
        assert_eq!(manage.open_cancel(), Err(Precondition::BookingLocked));
        assert_eq!(manage.screen(), ManageScreen::Viewing);
        // focus skips the disabled actions
        assert_eq!(manage.focused(), Some("closeBookingModalBtn"));
    }
}

#[tokio::test]
async fn test_unpaid_booking_cannot_be_modified_but_can_be_cancelled() {
    let (manage, _http) = loaded("booked", "pending", ScriptedHttp::new()).await;

    let view = manage.detail_view().unwrap();
    assert_eq!(
        view.payment_notice(),
        Some("You must complete payment to modify this booking.")
    );
    assert_eq!(manage.open_modify(), Err(Precondition::PaymentPending));
    assert!(manage.open_cancel().is_ok());
    assert_eq!(manage.screen(), ManageScreen::CancelConfirm);
}

#[tokio::test]
async fn test_unchanged_modify_form_is_rejected_locally() {
    let (manage, http) = loaded("booked", "paid", ScriptedHttp::new()).await;
    manage.open_modify().unwrap();

    // picking the same dates again is still "no changes"
    assert!(manage.set_check_in(date(2025, 8, 1)));
    assert!(manage.set_check_out(date(2025, 8, 3)));
    assert_eq!(manage.modify_request(), Err(Precondition::NoChanges));

    let outcome = manage.submit_modify().await.completed().unwrap();
    assert!(matches!(
        outcome,
        Err(ClientError::Precondition(Precondition::NoChanges))
    ));
    assert_eq!(
        manage.feedback().unwrap().message,
        "Please change at least one field (room, check-in, or check-out)"
    );
    assert_eq!(http.calls().len(), 1, "only the lookup went out");

    manage.dismiss_feedback();
    assert_eq!(manage.screen(), ManageScreen::ModifyForm);
}

#[tokio::test]
async fn test_modify_sends_only_changed_fields() {
    let http = ScriptedHttp::new().ok(
        "/modify_booking/BK-7Q2X",
        json!({"booking_reference": "BK-7Q2X"}),
    );
    let (manage, http) = loaded("booked", "paid", http).await;
    manage.open_modify().unwrap();
    assert!(manage.set_check_out(date(2025, 8, 5)));

    let reference = manage.submit_modify().await.completed().unwrap().unwrap();
    assert_eq!(reference, "BK-7Q2X");

    let body = http.calls_to("/modify_booking/BK-7Q2X")[0].body.clone().unwrap();
    assert_eq!(body["email"], "ama@example.com");
    assert_eq!(body["check_out_date"], "2025-08-05");
    assert!(body.get("check_in_date").is_none());
    assert!(body.get("room_id").is_none());
    assert!(body["request_id"].as_str().unwrap().starts_with("REQ"));

    assert_eq!(manage.screen(), ManageScreen::Done);
    assert_eq!(manage.feedback().unwrap().title, "Booking Modified");
    manage.dismiss_feedback();
    assert_eq!(manage.screen(), ManageScreen::Query);
    assert!(manage.booking().is_none());
}

#[tokio::test]
async fn test_unparseable_typed_date_blocks_the_modification() {
    let http = ScriptedHttp::new().ok(
        "/modify_booking/BK-7Q2X",
        json!({"booking_reference": "BK-7Q2X"}),
    );
    let (manage, http) = loaded("booked", "paid", http).await;
    manage.open_modify().unwrap();

    assert!(!manage.input_check_out("the fifth"));
    assert_eq!(manage.picker().check_out(), None);
    let html = manage.render();
    let input = html.find_by_id("modify_check_out_date").unwrap();
    assert_eq!(input.get_attr("value"), Some(""));
    assert_eq!(input.get_attr("data-date"), Some(""));

    let outcome = manage.submit_modify().await.completed().unwrap();
    assert!(matches!(
        outcome,
        Err(ClientError::Precondition(Precondition::MissingDates))
    ));
    assert!(manage.search_modify_rooms().await.completed().unwrap().is_err());
    assert_eq!(http.calls().len(), 1, "only the lookup went out");
    assert_eq!(manage.screen(), ManageScreen::ModifyForm);

    assert!(manage.input_check_out("5 August 2025"));
    let request = manage.modify_request().unwrap();
    assert_eq!(request.check_out_date, Some(date(2025, 8, 5)));
}

#[tokio::test]
async fn test_closing_modify_restores_booking_dialog() {
    let (manage, _http) = loaded("booked", "paid", ScriptedHttp::new()).await;
    manage.open_modify().unwrap();
    assert!(manage.is_visible("modifyBookingModal"));
    assert!(!manage.is_visible("bookingModal"));
    assert_eq!(manage.focused(), Some("modify_check_in_date"));

    manage.close_modify();
    assert_eq!(manage.screen(), ManageScreen::Viewing);
    assert!(manage.is_visible("bookingModal"));
    assert_eq!(manage.aria_hidden("bookingModal"), Some("false"));
    assert_eq!(manage.aria_hidden("modifyBookingModal"), Some("true"));
    assert!(!manage.is_visible("queryBookingForm"));
    assert_eq!(manage.focused(), Some(MODIFY_BUTTON));
}

#[tokio::test]
async fn test_closing_cancel_restores_booking_dialog() {
    let (manage, _http) = loaded("booked", "paid", ScriptedHttp::new()).await;
    manage.open_cancel().unwrap();
    assert_eq!(manage.focused(), Some("confirmCancelBtn"));
    assert_eq!(manage.tab(), Some("closeCancelModal"));
    assert_eq!(manage.tab(), Some("confirmCancelBtn"));

    manage.close_cancel();
    assert!(manage.is_visible("bookingModal"));
    assert!(!manage.is_visible("queryBookingForm"));
    assert_eq!(manage.focused(), Some(CANCEL_BUTTON));
}

#[tokio::test]
async fn test_modify_room_search_offers_current_room() {
    let http = ScriptedHttp::new().ok(
        ROOMS,
        json!({"rooms": [
            {
                "id": 3,
                "room_number": "201",
                "room_type": "Double",
                "price": 450.0,
                "is_current": true
            },
            {"id": 5, "room_number": "205", "room_type": "Double", "price": 450.0}
        ]}),
    );
    let (manage, http) = loaded("booked", "paid", http).await;
    manage.open_modify().unwrap();
    manage.set_check_in(date(2025, 8, 2));

    let count = manage.search_modify_rooms().await.completed().unwrap().unwrap();
    assert_eq!(count, 2);
    assert_eq!(manage.room_choice(), Some(3));

    let body = http.calls_to(ROOMS)[0].body.clone().unwrap();
    assert_eq!(body["exclude_booking_id"], 7);
    assert_eq!(body["current_room_id"], 3);
    assert_eq!(body["room_type"], "Double");
    assert_eq!(body["check_in_date"], "2025-08-02");

    let html = manage.render();
    let select = html.find_by_id("modify_room_id").unwrap();
    assert!(select.text_content().contains("Keep my current room: 201 (Double, GHS 450.00)"));

    assert_eq!(manage.select_room(Some(42)), Err(Precondition::NoRoomSelected));
    manage.select_room(Some(5)).unwrap();
    let request = manage.modify_request().unwrap();
    assert_eq!(request.room_id, Some(5));
    assert_eq!(request.check_in_date, Some(date(2025, 8, 2)));
    assert_eq!(request.check_out_date, None);

    // new dates invalidate the offered rooms
    manage.set_check_out(date(2025, 8, 6));
    assert!(manage.room_options().is_empty());
    assert_eq!(manage.room_choice(), None);
}

#[tokio::test]
async fn test_modify_room_search_without_rooms_keeps_form() {
    let http = ScriptedHttp::new().ok(ROOMS, json!({"rooms": []}));
    let (manage, _http) = loaded("booked", "paid", http).await;
    manage.open_modify().unwrap();

    let count = manage.search_modify_rooms().await.completed().unwrap().unwrap();
    assert_eq!(count, 0);
    assert_eq!(
        manage.feedback().unwrap().message,
        "No rooms available for the selected dates."
    );
    manage.dismiss_feedback();
    assert_eq!(manage.screen(), ManageScreen::ModifyForm);
}

#[tokio::test]
async fn test_cancel_success_then_back_to_query() {
    let http = ScriptedHttp::new().ok(CANCEL, json!({"booking_reference": "BK-7Q2X"}));
    let (manage, http) = loaded("booked", "paid", http).await;
    manage.open_cancel().unwrap();

    manage.confirm_cancel().await.completed().unwrap().unwrap();
    assert_eq!(manage.screen(), ManageScreen::Done);
    let feedback = manage.feedback().unwrap();
    assert_eq!(feedback.title, "Booking Cancelled");
    assert_eq!(feedback.booking_reference.as_deref(), Some("BK-7Q2X"));
    assert_eq!(
        http.calls_to(CANCEL)[0].body,
        Some(json!({"email": "ama@example.com", "booking_reference": "BK-7Q2X"}))
    );

    manage.dismiss_feedback();
    assert_eq!(manage.screen(), ManageScreen::Query);
    assert!(manage.is_visible("queryBookingForm"));
}

#[tokio::test]
async fn test_cancel_failure_returns_to_booking_details() {
    let http = ScriptedHttp::new().fail(
        CANCEL,
        StatusCode::BAD_REQUEST,
        json!({"code": "INVALID_MODIFICATION"}),
    );
    let (manage, _http) = loaded("booked", "paid", http).await;
    manage.open_cancel().unwrap();

    let outcome = manage.confirm_cancel().await.completed().unwrap();
    assert!(outcome.is_err());
    assert_eq!(
        manage.feedback().unwrap().message,
        "Cannot modify or cancel a checked-in or checked-out booking."
    );

    manage.dismiss_feedback();
    assert_eq!(manage.screen(), ManageScreen::Viewing);
    assert!(manage.is_visible("bookingModal"));
    assert!(manage.booking().is_some());
}

#[tokio::test]
async fn test_modify_payment_required_keeps_form() {
    let http = ScriptedHttp::new().fail(
        "/modify_booking/BK-7Q2X",
        StatusCode::FORBIDDEN,
        json!({"code": "PAYMENT_REQUIRED"}),
    );
    let (manage, _http) = loaded("booked", "paid", http).await;
    manage.open_modify().unwrap();
    manage.set_check_out(date(2025, 8, 4));

    manage.submit_modify().await;
    assert_eq!(
        manage.feedback().unwrap().message,
        "Payment must be completed before modification."
    );
    manage.dismiss_feedback();
    assert_eq!(manage.screen(), ManageScreen::ModifyForm);
    assert_eq!(manage.picker().check_out(), Some(date(2025, 8, 4)));
}
