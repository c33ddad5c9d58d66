//! View models and their markup
//!
//! Each view model is built from API data alone and renders through
//! [`crate::markup`], which escapes every value on the way out.

use crate::dates::{self, SearchDates};
use crate::markup::Element;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{
    Booking, BookingStatus, BookingTimeframe, Guest, Pagination, PaymentStatus, Priorities, Room,
    RoomOption, RoomStatus, RoomType,
};

// =============================================================================
// Formatting
// =============================================================================

pub const CURRENCY: &str = "GHS";

/// `GHS 1,234.50`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{CURRENCY} {grouped}.{frac_part}")
}

pub fn status_label(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Booked => "Booked",
        BookingStatus::CheckedIn => "Checked In",
        BookingStatus::CheckedOut => "Checked Out",
        BookingStatus::Cancelled => "Cancelled",
    }
}

pub fn payment_label(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "Pending",
        PaymentStatus::Paid => "Paid",
    }
}

fn room_status_label(status: RoomStatus) -> &'static str {
    match status {
        RoomStatus::Available => "Available",
        RoomStatus::Booked => "Booked",
        RoomStatus::Maintenance => "Maintenance",
    }
}

fn field(label: &str, value: impl Into<String>) -> Element {
    Element::new("p")
        .child(Element::new("strong").text(format!("{label}:")))
        .text(format!(" {}", value.into()))
}

// =============================================================================
// Availability search
// =============================================================================

/// Bookable room card
#[derive(Debug, Clone, PartialEq)]
pub struct RoomCard {
    pub room_id: i64,
    pub room_number: String,
    pub room_type: RoomType,
    pub price_label: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl RoomCard {
    pub fn from_room(room: &Room) -> Self {
        Self {
            room_id: room.id,
            room_number: room.room_number.clone(),
            room_type: room.room_type,
            price_label: format!("{} / night", format_currency(room.price)),
            description: room.description.clone(),
            image_url: room.image_url.clone(),
        }
    }

    pub fn render(&self) -> Element {
        let title = format!("Room {}", self.room_number);
        let mut card = Element::new("div")
            .class("room-card")
            .attr("data-room-id", self.room_id.to_string());
        if let Some(url) = &self.image_url {
            card = card.child(
                Element::new("img")
                    .attr("src", url.clone())
                    .attr("alt", title.clone()),
            );
        }
        let mut body = Element::new("div")
            .class("room-card-body")
            .child(Element::new("h3").text(title))
            .child(Element::new("p").class("room-type").text(self.room_type.as_str()));
        if let Some(description) = &self.description {
            body = body.child(
                Element::new("p")
                    .class("room-description")
                    .text(description.clone()),
            );
        }
        body = body
            .child(Element::new("p").class("price").text(self.price_label.clone()))
            .child(
                Element::new("button")
                    .class("book-btn")
                    .attr("type", "button")
                    .attr("data-room-id", self.room_id.to_string())
                    .attr("data-room-number", self.room_number.clone())
                    .text("Book Now"),
            );
        card.child(body)
    }
}

/// One category tab of a search result
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryView {
    pub category: RoomType,
    pub cards: Vec<RoomCard>,
}

impl CategoryView {
    pub fn new<'a>(category: RoomType, rooms: impl IntoIterator<Item = &'a Room>) -> Self {
        Self {
            category,
            cards: rooms
                .into_iter()
                .filter(|r| r.room_type == category)
                .map(RoomCard::from_room)
                .collect(),
        }
    }

    pub fn empty_message(&self) -> String {
        format!("No rooms available for {}.", self.category)
    }

    pub fn render(&self) -> Element {
        let grid = Element::new("div")
            .id("rooms-container")
            .class("rooms-grid")
            .attr("data-category", self.category.as_str());
        if self.cards.is_empty() {
            return grid.child(Element::new("p").class("no-rooms").text(self.empty_message()));
        }
        grid.children(self.cards.iter().map(RoomCard::render))
    }
}

/// Category tab strip
pub fn render_category_tabs(active: RoomType) -> Element {
    Element::new("div")
        .class("category-tabs")
        .attr("role", "tablist")
        .children(RoomType::ALL.iter().map(|t| {
            let selected = *t == active;
            Element::new("button")
                .class(if selected { "tab-btn active-tab" } else { "tab-btn" })
                .attr("role", "tab")
                .attr("data-category", t.as_str())
                .attr("aria-selected", selected.to_string())
                .text(t.as_str())
        }))
}

// =============================================================================
// Manage booking
// =============================================================================

pub const PAYMENT_NOTICE: &str = "You must complete payment to modify this booking.";

/// Booking record as shown to the guest
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetailView {
    pub booking_reference: String,
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub room_label: String,
    pub check_in: String,
    pub check_out: String,
    pub nights: i64,
    pub total_label: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub can_modify: bool,
    pub can_cancel: bool,
}

impl BookingDetailView {
    pub fn from_booking(booking: &Booking) -> Self {
        let nights = booking.nights().max(0);
        Self {
            booking_reference: booking.booking_reference.clone(),
            guest_name: booking.guest.full_name.clone(),
            email: booking.guest.email.clone(),
            phone: booking.guest.phone.clone().unwrap_or_default(),
            room_label: format!(
                "{} ({}, {})",
                booking.room.room_number,
                booking.room.room_type,
                format_currency(booking.room.price)
            ),
            check_in: dates::to_display(booking.check_in_date),
            check_out: dates::to_display(booking.check_out_date),
            nights,
            total_label: format_currency(booking.room.price * Decimal::from(nights)),
            status: booking.status,
            payment_status: booking.payment_status,
            can_modify: booking.can_modify(),
            can_cancel: booking.can_cancel(),
        }
    }

    pub fn payment_notice(&self) -> Option<&'static str> {
        (!self.payment_status.is_paid()).then_some(PAYMENT_NOTICE)
    }

    pub fn render(&self) -> Element {
        let mut el = Element::new("div")
            .id("booking-details")
            .child(
                Element::new("h3")
                    .id("booking-modal-title")
                    .text(format!("Booking: {}", self.booking_reference)),
            )
            .child(field("Guest", self.guest_name.clone()))
            .child(field("Email", self.email.clone()))
            .child(field("Phone", self.phone.clone()))
            .child(field("Room", self.room_label.clone()))
            .child(field("Check-In", self.check_in.clone()))
            .child(field("Check-Out", self.check_out.clone()))
            .child(field("Total", format!("{} ({} nights)", self.total_label, self.nights)))
            .child(field("Status", status_label(self.status)))
            .child(field("Payment Status", payment_label(self.payment_status)));
        if let Some(notice) = self.payment_notice() {
            el = el.child(Element::new("p").class("payment-notice").text(notice));
        }
        el.child(
            Element::new("div")
                .class("booking-actions")
                .child(
                    Element::new("button")
                        .id("cancelBtn")
                        .attr("aria-label", "Cancel booking")
                        .flag("disabled", !self.can_cancel)
                        .text("Cancel Booking"),
                )
                .child(
                    Element::new("button")
                        .id("modifyBtn")
                        .attr("aria-label", "Modify booking")
                        .flag("disabled", !self.can_modify)
                        .text("Modify Booking"),
                ),
        )
    }
}

/// Option label in the modify-room selector
pub fn room_option_label(room: &RoomOption) -> String {
    let base = format!(
        "{} ({}, {})",
        room.room_number,
        room.room_type,
        format_currency(room.price)
    );
    if room.is_current {
        format!("Keep my current room: {base}")
    } else {
        base
    }
}

/// Modify-room `<select>`, pre-selecting `selected`
pub fn render_room_select(id: &str, rooms: &[RoomOption], selected: Option<i64>) -> Element {
    Element::new("select")
        .id(id.to_string())
        .flag("disabled", rooms.is_empty())
        .child(Element::new("option").attr("value", "").text("Select a Room"))
        .children(rooms.iter().map(|room| {
            Element::new("option")
                .attr("value", room.id.to_string())
                .flag("selected", selected == Some(room.id))
                .text(room_option_label(room))
        }))
}

// =============================================================================
// Receptionist console
// =============================================================================

/// Which console actions a booking's status/payment combination permits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingActions {
    pub check_in: bool,
    pub check_out: bool,
    pub record_payment: bool,
    pub modify: bool,
    pub delete: bool,
}

impl BookingActions {
    pub fn for_booking(booking: &Booking) -> Self {
        Self::for_state(booking.status, booking.payment_status)
    }

    pub fn for_state(status: BookingStatus, payment: PaymentStatus) -> Self {
        let paid = payment.is_paid();
        Self {
            // the API refuses check-in until the booking is paid
            check_in: status == BookingStatus::Booked && paid,
            check_out: status == BookingStatus::CheckedIn,
            record_payment: !paid && status != BookingStatus::Cancelled,
            modify: !status.is_terminal(),
            delete: status.is_terminal(),
        }
    }
}

/// Booking card on the console
#[derive(Debug, Clone, PartialEq)]
pub struct ReceptionBookingCard {
    pub booking_id: i64,
    pub booking_reference: String,
    pub guest_name: String,
    pub room_number: String,
    pub check_in: String,
    pub check_out: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub timeframe: BookingTimeframe,
    pub actions: BookingActions,
}

impl ReceptionBookingCard {
    pub fn from_booking(booking: &Booking, today: NaiveDate) -> Self {
        Self {
            booking_id: booking.id,
            booking_reference: booking.booking_reference.clone(),
            guest_name: if booking.guest.full_name.trim().is_empty() {
                "Unknown".to_string()
            } else {
                booking.guest.full_name.clone()
            },
            room_number: booking.room.room_number.clone(),
            check_in: dates::to_display(booking.check_in_date),
            check_out: dates::to_display(booking.check_out_date),
            status: booking.status,
            payment_status: booking.payment_status,
            timeframe: booking.timeframe(today),
            actions: BookingActions::for_booking(booking),
        }
    }

    /// Render with `locked` reporting controls whose request is in flight
    pub fn render(&self, locked: impl Fn(&str) -> bool) -> Element {
        let id = self.booking_id.to_string();
        let button = |action: &'static str, label: &str, enabled: bool| {
            Element::new("button")
                .class(format!("{action}-btn"))
                .attr("data-action", action)
                .attr("data-booking-id", id.clone())
                .attr(
                    "aria-label",
                    format!("{label} booking {}", self.booking_reference),
                )
                .flag("disabled", !enabled || locked(action))
                .text(label)
        };
        Element::new("div")
            .class("booking-card")
            .attr("data-booking-id", id.clone())
            .child(
                Element::new("div")
                    .class("booking-card-header")
                    .child(Element::new("h3").text(self.guest_name.clone()))
                    .child(
                        Element::new("span")
                            .class("booking-reference")
                            .text(self.booking_reference.clone()),
                    )
                    .child(
                        Element::new("span")
                            .class(format!("badge badge-{}", self.timeframe.label().to_lowercase()))
                            .text(self.timeframe.label()),
                    ),
            )
            .child(field("Room", self.room_number.clone()))
            .child(field("Check-In", self.check_in.clone()))
            .child(field("Check-Out", self.check_out.clone()))
            .child(field("Status", status_label(self.status)))
            .child(field("Payment", payment_label(self.payment_status)))
            .child(
                Element::new("div")
                    .class("booking-card-actions")
                    .child(button("modify", "Modify", self.actions.modify))
                    .child(button("check-in", "Check-in", self.actions.check_in))
                    .child(button("check-out", "Check-out", self.actions.check_out))
                    .child(button("payment", "Record payment", self.actions.record_payment))
                    .child(button("delete", "Delete", self.actions.delete)),
            )
    }
}

/// Room card on the console's room list
pub fn render_room_row(room: &Room, delete_locked: bool) -> Element {
    Element::new("div")
        .class("room-row")
        .attr("data-room-id", room.id.to_string())
        .child(Element::new("h3").text(format!("Room {}", room.room_number)))
        .child(field("Type", room.room_type.as_str()))
        .child(field("Price", format_currency(room.price)))
        .child(field("Status", room_status_label(room.status)))
        .child(
            Element::new("button")
                .class("delete-room-btn")
                .attr("data-room-id", room.id.to_string())
                .attr("aria-label", format!("Delete room {}", room.room_number))
                .flag("disabled", delete_locked)
                .text("Delete"),
        )
}

pub fn render_guest_table(guests: &[Guest]) -> Element {
    let body = if guests.is_empty() {
        Element::new("tbody").child(
            Element::new("tr").child(
                Element::new("td")
                    .attr("colspan", "4")
                    .text("No guests found."),
            ),
        )
    } else {
        Element::new("tbody").children(guests.iter().map(|g| {
            Element::new("tr")
                .class("guest-row")
                .child(Element::new("td").text(g.id.to_string()))
                .child(Element::new("td").text(g.full_name.clone()))
                .child(Element::new("td").text(g.email.clone()))
                .child(Element::new("td").text(g.phone.clone().unwrap_or_else(|| "N/A".into())))
        }))
    };
    Element::new("table").id("guests-table").child(body)
}

/// Pager under a server-paginated list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub visible: bool,
}

impl PaginationView {
    pub fn new(pagination: &Pagination) -> Self {
        Self {
            current_page: pagination.current_page,
            total_pages: pagination.total_pages,
            previous_enabled: pagination.has_previous(),
            next_enabled: pagination.has_next(),
            visible: pagination.is_paged(),
        }
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }

    pub fn render(&self, id: &str) -> Element {
        Element::new("nav")
            .id(id.to_string())
            .class("pagination")
            .flag("hidden", !self.visible)
            .child(
                Element::new("button")
                    .class("prev-page")
                    .flag("disabled", !self.previous_enabled)
                    .text("Previous"),
            )
            .child(Element::new("span").class("page-info").text(self.label()))
            .child(
                Element::new("button")
                    .class("next-page")
                    .flag("disabled", !self.next_enabled)
                    .text("Next"),
            )
    }
}

/// Read-only priorities panel
pub fn render_priorities(priorities: &Priorities) -> Element {
    let items = [
        ("Check-ins today", priorities.check_ins_today),
        ("Check-outs today", priorities.check_outs_today),
        ("Overdue payments", priorities.overdue_payments),
        ("Recent bookings", priorities.recent_bookings),
        ("Upcoming check-ins", priorities.upcoming_check_ins),
        ("Bookings today", priorities.total_bookings_today),
    ];
    Element::new("ul")
        .id("priorities")
        .children(items.into_iter().map(|(label, count)| {
            Element::new("li")
                .class("priority-item")
                .child(Element::new("span").class("priority-label").text(label))
                .child(Element::new("span").class("priority-count").text(count.to_string()))
        }))
}

/// Walk-in confirmation summary
#[derive(Debug, Clone, PartialEq)]
pub struct WalkInSummary {
    pub guest_name: String,
    pub email: String,
    pub phone: String,
    pub room_label: String,
    pub dates: SearchDates,
    pub total_label: String,
}

impl WalkInSummary {
    pub fn render(&self) -> Element {
        Element::new("div")
            .id("walkin-summary")
            .child(field("Guest", self.guest_name.clone()))
            .child(field("Email", self.email.clone()))
            .child(field("Phone", self.phone.clone()))
            .child(field("Room", self.room_label.clone()))
            .child(field("Dates", self.dates.display()))
            .child(field("Total", self.total_label.clone()))
    }
}
