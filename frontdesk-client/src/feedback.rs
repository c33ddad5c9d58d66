//! Feedback and dialog primitives shared by every controller

use crate::ClientError;
use crate::markup::Element;
use shared::error::{Action, ErrorCode};

/// Id of the feedback dismiss button, focused whenever feedback is shown
pub const FEEDBACK_CLOSE_ID: &str = "feedbackCloseBtn";

pub const REFERENCE_REMINDER: &str =
    "Please keep your booking reference for check-in and future modifications.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Transient message shown over the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub title: String,
    pub message: String,
    pub booking_reference: Option<String>,
}

impl Feedback {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            title: title.into(),
            message: message.into(),
            booking_reference: None,
        }
    }

    /// Success carrying a booking reference the guest must keep
    pub fn with_reference(title: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            booking_reference: Some(reference.into()),
            ..Self::success(title, REFERENCE_REMINDER)
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            title: title.into(),
            message: message.into(),
            booking_reference: None,
        }
    }

    /// Error feedback for a failed `action`
    ///
    /// Domain codes take their category title; everything else is titled
    /// "Error".
    pub fn from_error(action: Action, err: &ClientError) -> Self {
        let title = err
            .code()
            .filter(ErrorCode::is_known)
            .map(|c| c.category().title())
            .unwrap_or("Error");
        Self::error(title, err.user_message(action))
    }

    /// Error feedback straight from a wire code
    pub fn from_code(action: Action, code: &str) -> Self {
        let code = ErrorCode::parse(code);
        let title = if code.is_known() {
            code.category().title()
        } else {
            "Error"
        };
        Self::error(title, code.message_for(action))
    }

    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }

    pub fn render(&self) -> Element {
        let kind = match self.kind {
            FeedbackKind::Success => "success",
            FeedbackKind::Error => "error",
        };
        let mut el = Element::new("div")
            .id("feedbackModal")
            .class(format!("feedback feedback-{kind}"))
            .attr("role", "alertdialog")
            .attr("aria-hidden", "false")
            .child(Element::new("h3").id("feedbackTitle").text(self.title.clone()))
            .child(Element::new("p").id("feedbackMessage").text(self.message.clone()));
        if let Some(reference) = &self.booking_reference {
            el = el.child(
                Element::new("p")
                    .id("bookingReferenceDisplay")
                    .text(format!("Booking Reference: {reference}")),
            );
        }
        el.child(
            Element::new("button")
                .id(FEEDBACK_CLOSE_ID)
                .attr("type", "button")
                .text("Close"),
        )
    }
}

/// Single-slot feedback overlay
#[derive(Debug, Clone, Default)]
pub struct FeedbackLayer {
    current: Option<Feedback>,
}

impl FeedbackLayer {
    pub fn show(&mut self, feedback: Feedback) {
        tracing::debug!(title = %feedback.title, "feedback shown");
        self.current = Some(feedback);
    }

    pub fn dismiss(&mut self) -> Option<Feedback> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Feedback> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    /// Feedback always takes focus on its dismiss control
    pub fn focused(&self) -> Option<&'static str> {
        self.current.as_ref().map(|_| FEEDBACK_CLOSE_ID)
    }

    pub fn render(&self) -> Option<Element> {
        self.current.as_ref().map(Feedback::render)
    }
}

/// Tab order of a dialog's focusable controls, cycling at both ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrap {
    order: Vec<&'static str>,
    index: usize,
}

impl FocusTrap {
    pub fn new(order: &[&'static str]) -> Self {
        Self {
            order: order.to_vec(),
            index: 0,
        }
    }

    pub fn current(&self) -> Option<&'static str> {
        self.order.get(self.index).copied()
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn tab(&mut self) -> Option<&'static str> {
        if !self.order.is_empty() {
            self.index = (self.index + 1) % self.order.len();
        }
        self.current()
    }

    pub fn shift_tab(&mut self) -> Option<&'static str> {
        if !self.order.is_empty() {
            self.index = (self.index + self.order.len() - 1) % self.order.len();
        }
        self.current()
    }

    /// Move focus to a control of this dialog; foreign ids are ignored
    pub fn focus(&mut self, id: &str) -> bool {
        match self.order.iter().position(|c| *c == id) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }
}

/// Modal dialog with ARIA visibility and a focus trap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    id: &'static str,
    visible: bool,
    trap: FocusTrap,
}

impl Dialog {
    /// `focusables` in tab order; the first receives focus when shown
    pub fn new(id: &'static str, focusables: &[&'static str]) -> Self {
        Self {
            id,
            visible: false,
            trap: FocusTrap::new(focusables),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.trap.reset();
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn aria_hidden(&self) -> &'static str {
        if self.visible { "false" } else { "true" }
    }

    pub fn focused(&self) -> Option<&'static str> {
        if self.visible {
            self.trap.current()
        } else {
            None
        }
    }

    pub fn tab(&mut self) -> Option<&'static str> {
        if !self.visible {
            return None;
        }
        self.trap.tab()
    }

    pub fn shift_tab(&mut self) -> Option<&'static str> {
        if !self.visible {
            return None;
        }
        self.trap.shift_tab()
    }

    pub fn focus(&mut self, control: &str) -> bool {
        self.visible && self.trap.focus(control)
    }

    /// Wrapper element carrying visibility attributes around `content`
    pub fn render(&self, content: Element) -> Element {
        Element::new("div")
            .id(self.id)
            .attr("role", "dialog")
            .attr("aria-modal", "true")
            .attr("aria-hidden", self.aria_hidden())
            .flag("hidden", !self.visible)
            .child(content)
    }
}
