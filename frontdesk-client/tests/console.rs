// frontdesk-client/tests/console.rs
// Receptionist console: lists, gated actions, locks, walk-ins, rooms

mod common;

use common::*;
use frontdesk_client::console::NO_STAFF_ROOMS_MESSAGE;
use frontdesk_client::view::BookingActions;
use frontdesk_client::{
    AddRoomForm, BookingStatus, BookingTimeframe, ClientError, ConsoleAction, GuestInfo,
    PaymentStatus, Precondition, ReceptionistConsole, RoomType, WalkInForm,
};
use http::StatusCode;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

const BOOKINGS: &str = "/receptionist/bookings";
const ROOMS: &str = "/receptionist/rooms";
const GUESTS: &str = "/receptionist/guests";
const PRIORITIES: &str = "/receptionist/priorities";
const STATUS: &str = "/receptionist/booking/update_status";
const PAYMENT: &str = "/receptionist/booking/update_payment";
const CHECKOUT: &str = "/receptionist/bookings/checkout";
const ROOM_SEARCH: &str = "/receptionist/rooms/search";
const WALK_IN: &str = "/receptionist/bookings/walkin";
const ADD_ROOM: &str = "/receptionist/room/add";
const MODIFY_FIRST: &str = "/receptionist/booking/modify/1";

fn listing(bookings: Vec<Value>, current: u32, total: u32) -> Value {
    json!({"bookings": bookings, "pagination": page(current, total)})
}

fn dashboard(http: ScriptedHttp) -> ScriptedHttp {
    http.ok(
        BOOKINGS,
        listing(
            vec![
                booking(1, "BK-A", "booked", "paid"),
                booking(2, "BK-B", "booked", "pending"),
                booking(3, "BK-C", "checked-in", "paid"),
                booking(4, "BK-D", "checked-out", "paid"),
            ],
            1,
            3,
        ),
    )
    .ok(
        ROOMS,
        json!({"rooms": [room(3, "201", "Double", 450.0)], "pagination": page(1, 1)}),
    )
    .ok(
        GUESTS,
        json!({"guests": [{"id": 11, "full_name": "Ama Mensah", "email": "ama@example.com"}]}),
    )
    .ok(PRIORITIES, json!({"check_ins_today": 2, "overdue_payments": 1}))
}

async fn console(http: ScriptedHttp) -> (ReceptionistConsole<ScriptedHttp>, Arc<ScriptedHttp>) {
    let (api, http) = api(dashboard(http));
    let console = ReceptionistConsole::new(api, &config(), clock());
    assert!(console.refresh_dashboard().await);
    (console, http)
}

#[test]
fn test_check_in_needs_paid_booking() {
    use BookingStatus::*;
    use PaymentStatus::*;

    assert!(BookingActions::for_state(Booked, Paid).check_in);
    assert!(!BookingActions::for_state(Booked, Pending).check_in);
    assert!(!BookingActions::for_state(CheckedIn, Paid).check_in);

    assert!(BookingActions::for_state(CheckedIn, Paid).check_out);
    assert!(BookingActions::for_state(Booked, Pending).record_payment);
    assert!(!BookingActions::for_state(Cancelled, Pending).record_payment);
    assert!(BookingActions::for_state(CheckedOut, Paid).delete);
    assert!(!BookingActions::for_state(Booked, Paid).delete);
}

#[tokio::test]
async fn test_dashboard_loads_every_list() {
    let (console, http) = console(ScriptedHttp::new()).await;

    assert_eq!(console.bookings().len(), 4);
    assert_eq!(console.rooms().len(), 1);
    assert_eq!(console.guests().len(), 1);
    let priorities = console.priorities().unwrap();
    assert_eq!(priorities.check_ins_today, 2);
    assert_eq!(priorities.check_outs_today, 0);

    let pager = console.bookings_pagination();
    assert_eq!(pager.label(), "Page 1 of 3");
    assert!(!pager.previous_enabled);
    assert!(pager.next_enabled);
    assert!(!console.rooms_pagination().visible);

    let query = http.calls_to(BOOKINGS)[0].body.clone().unwrap();
    assert_eq!(
        query,
        json!({"page": 1, "status": "all", "filter": "all", "search_reference": ""})
    );

    let html = console.render().render();
    assert!(html.contains("Page 1 of 3"));
    assert!(html.contains("N/A"), "guest without phone");
}

#[tokio::test]
async fn test_cards_disable_actions_by_state() {
    let (console, _http) = console(ScriptedHttp::new()).await;
    let html = console.render();

    let card = |id: &str| {
        html.find_by_class("booking-card")
            .into_iter()
            .find(|c| c.get_attr("data-booking-id") == Some(id))
            .unwrap()
    };
    let disabled = |id: &str, action: &str| {
        card(id)
            .find_by_class(&format!("{action}-btn"))
            .first()
            .unwrap()
            .get_attr("disabled")
            .is_some()
    };

    assert!(!disabled("1", "check-in"));
    assert!(disabled("2", "check-in"), "unpaid booking");
    assert!(!disabled("2", "payment"));
    assert!(!disabled("3", "check-out"));
    assert!(disabled("3", "check-in"));
    assert!(!disabled("4", "delete"));
    assert!(disabled("1", "delete"));
}

#[tokio::test]
async fn test_check_in_refreshes_lists() {
    let (console, http) = console(ScriptedHttp::new().ok(STATUS, json!({"success": true}))).await;

    console.check_in(1).await.completed().unwrap().unwrap();
    assert_eq!(
        http.calls_to(STATUS)[0].body,
        Some(json!({"booking_id": 1, "status": "checked-in"}))
    );
    assert_eq!(console.feedback().unwrap().message, "Check-in successful!");
    assert_eq!(http.count(BOOKINGS), 2);
    assert_eq!(http.count(PRIORITIES), 2);
    assert!(!console.is_locked(ConsoleAction::CheckIn, 1));
}

#[tokio::test]
async fn test_refresh_after_mutation_replaces_a_stale_load() {
    let http = ScriptedHttp::new()
        .with_delay(Duration::from_millis(50))
        .ok(STATUS, json!({"success": true}));
    let (console, http) = console(http).await;

    // the second load starts while check-in is still in flight
    let (checked_in, stale) = tokio::join!(console.check_in(1), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        console.load_bookings().await
    });
    assert!(checked_in.completed().unwrap().is_ok());
    assert!(stale.is_superseded());

    let calls = http.calls();
    let mutation = calls.iter().position(|c| c.path == STATUS).unwrap();
    let later_loads = calls[mutation + 1..]
        .iter()
        .filter(|c| c.path == BOOKINGS)
        .count();
    assert_eq!(later_loads, 2, "the stale load plus a fresh refresh");
    assert_eq!(calls.last().map(|c| c.method), Some("GET"));
}

#[tokio::test]
async fn test_disallowed_action_sends_nothing() {
    let (console, http) = console(ScriptedHttp::new()).await;

    let outcome = console.check_in(2).await.completed().unwrap();
    assert!(matches!(
        outcome,
        Err(ClientError::Precondition(Precondition::ActionUnavailable))
    ));
    let outcome = console.check_out(1).await.completed().unwrap();
    assert!(outcome.is_err());
    assert_eq!(http.count(STATUS) + http.count(CHECKOUT), 0);
}

#[tokio::test]
async fn test_failed_mutation_unlocks_and_explains() {
    let http = ScriptedHttp::new().fail(
        STATUS,
        StatusCode::BAD_REQUEST,
        json!({"code": "INVALID_CHECK_IN_DATE"}),
    );
    let (console, http) = console(http).await;

    let outcome = console.check_in(1).await.completed().unwrap();
    assert_eq!(
        outcome.unwrap_err().code(),
        Some(frontdesk_client::ErrorCode::InvalidCheckInDate)
    );
    let feedback = console.feedback().unwrap();
    assert_eq!(feedback.message, "Check-in is only allowed on the check-in date.");
    assert_eq!(feedback.title, "Action not allowed");
    assert!(!console.is_locked(ConsoleAction::CheckIn, 1));
    // failures do not refresh
    assert_eq!(http.count(BOOKINGS), 1);
}

#[tokio::test]
async fn test_control_locked_while_in_flight() {
    let http = ScriptedHttp::new()
        .with_delay(Duration::from_millis(20))
        .ok(PAYMENT, json!({}));
    let (console, http) = console(http).await;

    let (first, second, locked) = tokio::join!(
        console.record_payment(2),
        console.record_payment(2),
        async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            let html = console.render();
            let button = html
                .find_by_class("payment-btn")
                .into_iter()
                .find(|b| b.get_attr("data-booking-id") == Some("2"))
                .unwrap()
                .get_attr("disabled")
                .is_some();
            (console.is_locked(ConsoleAction::RecordPayment, 2), button)
        },
    );
    assert!(first.completed().unwrap().is_ok());
    assert!(second.is_dropped());
    assert_eq!(locked, (true, true));
    assert_eq!(http.count(PAYMENT), 1);
    assert_eq!(
        http.calls_to(PAYMENT)[0].body,
        Some(json!({"booking_id": 2, "payment_status": "paid"}))
    );
}

#[tokio::test]
async fn test_filters_reset_paging() {
    let (console, http) = console(ScriptedHttp::new()).await;

    console.next_page().await;
    assert_eq!(console.query().page, 2);

    console.set_status_filter(Some(BookingStatus::CheckedIn)).await;
    let query = console.query();
    assert_eq!(query.page, 1);
    assert_eq!(query.status, "checked-in");

    console.next_page().await;
    console.search_reference(" BK-C ").await;
    let query = console.query();
    assert_eq!(query.page, 1);
    assert_eq!(query.search_reference, "BK-C");
    assert_eq!(query.status, "checked-in");

    console
        .set_booking_filter(Some(BookingTimeframe::Upcoming))
        .await;
    assert_eq!(console.query().filter, "upcoming");

    console.clear_search().await;
    assert_eq!(console.query().search_reference, "");

    assert!(console.refresh_dashboard().await);
    let query = console.query();
    assert_eq!(query.page, 1);
    assert_eq!((query.status.as_str(), query.filter.as_str()), ("all", "all"));
    assert!(query.search_reference.is_empty());

    let last = http.calls_to(BOOKINGS).last().unwrap().body.clone().unwrap();
    assert_eq!(last["status"], "all");
    assert_eq!(last["page"], 1);
}

#[tokio::test]
async fn test_prev_page_on_first_page_is_dropped() {
    let (console, http) = console(ScriptedHttp::new()).await;
    assert!(console.prev_page().await.is_dropped());
    assert!(console.next_rooms_page().await.is_dropped());
    assert_eq!(http.count(BOOKINGS), 1);
}

#[tokio::test]
async fn test_walk_in_two_step() {
    let http = ScriptedHttp::new()
        .ok(ROOM_SEARCH, json!([room(5, "105", "Single", 250.0)]))
        .ok(WALK_IN, json!({"booking_reference": "BK-WALK"}));
    let (console, http) = console(http).await;

    let form = WalkInForm {
        guest: GuestInfo::new("Kofi Boateng", "kofi@example.com", "0201234567"),
        room_id: Some(5),
        check_in: Some(today()),
        check_out: Some(date(2025, 8, 2)),
    };
    // rooms have not been searched yet
    assert_eq!(console.prepare_walk_in(&form), Err(Precondition::NoRoomSelected));

    let found = console
        .staff_search_rooms(form.check_in, form.check_out, Some(RoomType::Single), None)
        .await;
    assert_eq!(found.completed().unwrap().unwrap(), 1);
    assert_eq!(
        http.calls_to(ROOM_SEARCH)[0].body,
        Some(json!({
            "check_in_date": "2025-07-30",
            "check_out_date": "2025-08-02",
            "room_type": "Single"
        }))
    );

    let summary = console.prepare_walk_in(&form).unwrap();
    assert_eq!(summary.room_label, "Room 105 (Single, GHS 250.00)");
    assert_eq!(summary.total_label, "GHS 750.00");
    assert!(console.is_walk_in_dialog_visible());
    assert_eq!(http.count(WALK_IN), 0, "prepare sends nothing");

    let reference = console.confirm_walk_in().await.completed().unwrap().unwrap();
    assert_eq!(reference, "BK-WALK");

    let body = http.calls_to(WALK_IN)[0].body.clone().unwrap();
    assert_eq!(body["room_id"], 5);
    assert_eq!(body["full_name"], "Kofi Boateng");
    let request_id = body["request_id"].as_str().unwrap();
    assert!(request_id.starts_with("WALKIN-"));
    assert!(request_id["WALKIN-".len()..].parse::<i64>().is_ok());

    assert!(!console.is_walk_in_dialog_visible());
    assert!(console.walk_in_summary().is_none());
    assert!(console.staff_rooms().is_empty());
    assert_eq!(
        console.feedback().unwrap().booking_reference.as_deref(),
        Some("BK-WALK")
    );
    assert_eq!(http.count(BOOKINGS), 2);

    // nothing left to confirm
    let again = console.confirm_walk_in().await.completed().unwrap();
    assert!(matches!(
        again,
        Err(ClientError::Precondition(Precondition::WalkInNotPrepared))
    ));
}

#[tokio::test]
async fn test_staff_room_search_empty_message() {
    let (console, _http) = console(ScriptedHttp::new().ok(ROOM_SEARCH, json!([]))).await;
    let found = console
        .staff_search_rooms(Some(date(2025, 8, 1)), Some(date(2025, 8, 2)), None, None)
        .await;
    assert_eq!(found.completed().unwrap().unwrap(), 0);
    assert_eq!(console.staff_rooms_message().as_deref(), Some(NO_STAFF_ROOMS_MESSAGE));

    let missing = console.staff_search_rooms(None, Some(date(2025, 8, 2)), None, None).await;
    assert!(missing.completed().unwrap().is_err());
}

#[tokio::test]
async fn test_staff_room_search_rejects_inverted_range() {
    let (console, http) = console(ScriptedHttp::new().ok(ROOM_SEARCH, json!([]))).await;
    let outcome = console
        .staff_search_rooms(Some(date(2025, 8, 4)), Some(date(2025, 8, 2)), None, None)
        .await;
    assert!(matches!(
        outcome.completed().unwrap(),
        Err(ClientError::Precondition(Precondition::CheckOutNotAfterCheckIn))
    ));
    assert_eq!(http.count(ROOM_SEARCH), 0);
}

#[tokio::test]
async fn test_staff_modify_checks_dates_locally() {
    let http = ScriptedHttp::new().ok(MODIFY_FIRST, json!({"success": true}));
    let (console, http) = console(http).await;

    let inverted = console
        .staff_modify(1, Some(date(2025, 8, 10)), Some(date(2025, 8, 5)), None)
        .await;
    assert!(matches!(
        inverted.completed().unwrap(),
        Err(ClientError::Precondition(Precondition::CheckOutNotAfterCheckIn))
    ));
    assert_eq!(
        console.feedback().unwrap().message,
        "Check-out date must be after check-in date."
    );

    let same_day = console
        .staff_modify(1, Some(date(2025, 8, 5)), Some(date(2025, 8, 5)), None)
        .await;
    assert!(same_day.completed().unwrap().is_err());

    let past = console
        .staff_modify(1, Some(date(2025, 7, 28)), Some(date(2025, 8, 3)), None)
        .await;
    assert!(matches!(
        past.completed().unwrap(),
        Err(ClientError::Precondition(Precondition::CheckInInPast))
    ));
    assert_eq!(http.count(MODIFY_FIRST), 0);
    assert!(!console.is_locked(ConsoleAction::Modify, 1));

    console
        .staff_modify(1, Some(date(2025, 8, 1)), Some(date(2025, 8, 4)), Some(5))
        .await
        .completed()
        .unwrap()
        .unwrap();
    assert_eq!(
        http.calls_to(MODIFY_FIRST)[0].body,
        Some(json!({
            "booking_id": 1,
            "email": "ama@example.com",
            "check_in_date": "2025-08-01",
            "check_out_date": "2025-08-04",
            "room_id": 5
        }))
    );
    assert_eq!(console.feedback().unwrap().message, "Booking modified successfully!");
}

#[tokio::test]
async fn test_staff_modify_keeps_past_check_in_of_a_stay_under_way() {
    let mut stay = booking(5, "BK-E", "checked-in", "paid");
    stay["check_in_date"] = json!("2025-07-28");
    let http = ScriptedHttp::new()
        .ok(BOOKINGS, listing(vec![stay], 1, 1))
        .ok("/receptionist/booking/modify/5", json!({"success": true}));
    let (console, http) = console(http).await;

    let moved = console
        .staff_modify(5, Some(date(2025, 7, 27)), Some(date(2025, 8, 2)), None)
        .await;
    assert!(matches!(
        moved.completed().unwrap(),
        Err(ClientError::Precondition(Precondition::CheckInInPast))
    ));

    let extended = console
        .staff_modify(5, Some(date(2025, 7, 28)), Some(date(2025, 8, 2)), None)
        .await;
    assert!(extended.completed().unwrap().is_ok());
    assert_eq!(http.count("/receptionist/booking/modify/5"), 1);
}

#[tokio::test]
async fn test_add_room_validates_then_refreshes_rooms() {
    let (console, http) = console(ScriptedHttp::new().ok(ADD_ROOM, json!({"success": true}))).await;

    let mut form = AddRoomForm {
        room_number: "  ".into(),
        room_type: RoomType::Suite,
        price: Decimal::new(90000, 2),
        description: Some("  ".into()),
    };
    let outcome = console.add_room(&form).await.completed().unwrap();
    assert!(matches!(
        outcome,
        Err(ClientError::Precondition(Precondition::MissingRoomDetails))
    ));

    form.room_number = "301".into();
    form.price = Decimal::ZERO;
    let outcome = console.add_room(&form).await.completed().unwrap();
    assert!(matches!(
        outcome,
        Err(ClientError::Precondition(Precondition::InvalidPrice))
    ));
    assert_eq!(http.count(ADD_ROOM), 0);

    form.price = Decimal::new(90000, 2);
    console.add_room(&form).await.completed().unwrap().unwrap();
    let body = http.calls_to(ADD_ROOM)[0].body.clone().unwrap();
    assert_eq!(body["room_number"], "301");
    assert_eq!(body["room_type"], "Suite");
    assert!(body.get("description").is_none());
    assert_eq!(console.feedback().unwrap().message, "Room added successfully!");
    assert_eq!(http.count(ROOMS), 2);
}

#[tokio::test]
async fn test_room_number_conflict_message() {
    let http = ScriptedHttp::new().ok(
        ADD_ROOM,
        json!({"success": false, "error": "ROOM_NUMBER_EXISTS"}),
    );
    let (console, _http) = console(http).await;
    let form = AddRoomForm {
        room_number: "201".into(),
        room_type: RoomType::Double,
        price: Decimal::new(450, 0),
        description: None,
    };
    console.add_room(&form).await;
    let feedback = console.feedback().unwrap();
    assert_eq!(feedback.title, "Already exists");
    assert_eq!(feedback.message, "Room number already exists.");
}

#[tokio::test]
async fn test_delete_room_reports_active_bookings() {
    let http = ScriptedHttp::new().fail(
        "/receptionist/room/delete/3",
        StatusCode::BAD_REQUEST,
        json!({"code": "ROOM_ACTIVE"}),
    );
    let (console, http) = console(http).await;

    console.delete_room(3).await;
    assert_eq!(
        console.feedback().unwrap().message,
        "Cannot delete room with active bookings."
    );
    assert_eq!(http.calls_to("/receptionist/room/delete/3")[0].method, "POST");
    assert!(!console.is_locked(ConsoleAction::DeleteRoom, 3));
}

#[tokio::test]
async fn test_list_failure_shows_generic_message() {
    let (api, _http) = api(ScriptedHttp::new().fail_raw(
        GUESTS,
        StatusCode::BAD_GATEWAY,
        "",
    ));
    let console = ReceptionistConsole::new(api, &config(), clock());
    let outcome = console.load_guests().await.completed().unwrap();
    assert!(outcome.is_err());
    assert_eq!(
        console.feedback().unwrap().message,
        "Failed to load guests. Please try again."
    );
}
