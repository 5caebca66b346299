use crate::customers::{CustomerManager, FormField};
use crate::feed::{Applied, SocialFeed};
use crate::orchestrator::{AppEvent, Request};
use crate::outcome::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Customers,
    Feed,
}

impl Tab {
    pub const TITLES: [&'static str; 2] = ["Customers", "Feed"];

    pub fn index(self) -> usize {
        match self {
            Tab::Customers => 0,
            Tab::Feed => 1,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Tab::Customers => Tab::Feed,
            Tab::Feed => Tab::Customers,
        }
    }
}

/// What keystrokes on the Customers tab currently drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Moving through the customer table.
    Browse,
    /// Typing into the form.
    Form,
    /// Typing the path of a photo to upload.
    PhotoPath(String),
    /// Waiting for y/n before deleting this docname.
    ConfirmDelete(String),
}

pub struct UiState {
    pub tab: Tab,
    pub mode: Mode,
    pub show_help: bool,
    pub customers: CustomerManager,
    pub feed: SocialFeed,
    pub selected: usize, // Index into the customer table
    pub focus: usize,    // Index into the form's focus order
    pub feed_scroll: usize,
    pub in_flight: usize,
    pub info: String,
}

impl UiState {
    pub fn new(attach_doctype: &str) -> Self {
        Self {
            tab: Tab::Customers,
            mode: Mode::Browse,
            show_help: false,
            customers: CustomerManager::new(attach_doctype),
            feed: SocialFeed::new(),
            selected: 0,
            focus: 0,
            feed_scroll: 0,
            in_flight: 0,
            info: String::new(),
        }
    }

    pub fn focused_field(&self) -> Option<FormField> {
        self.customers.form.focus_order().get(self.focus).copied()
    }

    pub fn focus_on(&mut self, field: FormField) {
        if let Some(idx) = self.customers.form.focus_order().iter().position(|f| *f == field) {
            self.focus = idx;
        }
    }

    pub fn clamp_focus(&mut self) {
        let n = self.customers.form.focus_order().len();
        self.focus = self.focus.min(n.saturating_sub(1));
    }

    pub fn clamp_selection(&mut self) {
        let n = self.customers.table.len();
        self.selected = self.selected.min(n.saturating_sub(1));
    }

    pub fn selected_docname(&self) -> Option<String> {
        self.customers.table.get(self.selected).map(|c| c.name.clone())
    }

    /// Notice of the active tab, falling back to the generic info line.
    pub fn status_notice(&self) -> Option<Notice> {
        let notice = match self.tab {
            Tab::Customers => self.customers.notice.clone(),
            Tab::Feed => self.feed.notice.clone(),
        };
        notice.or_else(|| {
            if self.info.is_empty() {
                None
            } else {
                Some(Notice::Info(self.info.clone()))
            }
        })
    }

    /// Apply a completed request; returns follow-up requests to issue.
    pub(crate) fn apply_event(&mut self, ev: AppEvent) -> Vec<Request> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match ev {
            AppEvent::CustomersLoaded(res) => {
                self.customers.apply_list(res);
                self.clamp_selection();
                Vec::new()
            }
            AppEvent::CustomerFetched(res) => {
                if self.customers.apply_edit(res).is_success() {
                    self.mode = Mode::Form;
                    self.focus = 0;
                }
                Vec::new()
            }
            AppEvent::CustomerSaved(res) => {
                if self.customers.apply_save(res).is_success() {
                    self.focus = 0;
                    self.mode = Mode::Browse;
                    vec![Request::LoadCustomers]
                } else {
                    Vec::new()
                }
            }
            AppEvent::CustomerDeleted(res) => {
                if self.customers.apply_delete(res).is_success() {
                    vec![Request::LoadCustomers]
                } else {
                    Vec::new()
                }
            }
            AppEvent::PhotoUploaded(res) => {
                self.customers.apply_upload(res);
                Vec::new()
            }
            AppEvent::BlogsLoaded(ticket, res) => {
                if self.feed.apply(&ticket, res) == Applied::Current {
                    self.feed_scroll = 0;
                }
                Vec::new()
            }
            AppEvent::Info(msg) => {
                self.info = msg;
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, CustomerSummary, SaveReply};

    fn state() -> UiState {
        UiState::new("CostomerX")
    }

    #[test]
    fn successful_save_event_requests_a_reload() {
        let mut s = state();
        s.mode = Mode::Form;
        s.customers.form.first_name = "A".into();
        s.in_flight = 1;
        let follow = s.apply_event(AppEvent::CustomerSaved(Ok(SaveReply {
            status: "success".into(),
            docname: Some("C1".into()),
        })));
        assert!(matches!(follow.as_slice(), [Request::LoadCustomers]));
        assert_eq!(s.mode, Mode::Browse);
        assert!(s.customers.form.first_name.is_empty());
        assert_eq!(s.in_flight, 0);
    }

    #[test]
    fn rejected_save_event_keeps_editing() {
        let mut s = state();
        s.mode = Mode::Form;
        s.customers.add_address_row(Some(Address::new("X", "Y", "1")));
        let follow = s.apply_event(AppEvent::CustomerSaved(Ok(SaveReply {
            status: "error".into(),
            docname: None,
        })));
        assert!(follow.is_empty());
        assert_eq!(s.mode, Mode::Form);
        assert_eq!(s.customers.form.addresses.len(), 1);
    }

    #[test]
    fn shrinking_list_clamps_selection() {
        let mut s = state();
        s.selected = 4;
        s.apply_event(AppEvent::CustomersLoaded(Ok(vec![CustomerSummary {
            name: "C1".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.com".into(),
            photo: None,
        }])));
        assert_eq!(s.selected, 0);
        assert_eq!(s.selected_docname().as_deref(), Some("C1"));
    }
}
