use super::state::{Mode, Tab, UiState};
use crate::customers::{AddressField, FormField};
use crate::orchestrator::Request;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug)]
pub(crate) enum KeyOutcome {
    Requests(Vec<Request>),
    Quit,
}

impl KeyOutcome {
    fn none() -> Self {
        KeyOutcome::Requests(Vec::new())
    }

    fn one(req: Request) -> Self {
        KeyOutcome::Requests(vec![req])
    }
}

pub(crate) fn handle_key(state: &mut UiState, k: KeyEvent) -> KeyOutcome {
    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && k.code == KeyCode::Char('c') {
        return KeyOutcome::Quit;
    }
    if state.show_help {
        state.show_help = false;
        return KeyOutcome::none();
    }
    if k.code == KeyCode::F(1) {
        state.show_help = true;
        return KeyOutcome::none();
    }

    match state.tab {
        Tab::Feed => feed_key(state, k),
        Tab::Customers => match state.mode.clone() {
            Mode::Browse => browse_key(state, k),
            Mode::Form => form_key(state, k),
            Mode::PhotoPath(buf) => photo_key(state, k, buf),
            Mode::ConfirmDelete(docname) => confirm_key(state, k, docname),
        },
    }
}

fn browse_key(state: &mut UiState, k: KeyEvent) -> KeyOutcome {
    match k.code {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Tab => state.tab = state.tab.toggle(),
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Down | KeyCode::Char('j') => {
            if state.selected + 1 < state.customers.table.len() {
                state.selected += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => state.selected = state.selected.saturating_sub(1),
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(docname) = state.selected_docname() {
                return KeyOutcome::one(Request::FetchCustomer(docname));
            }
        }
        KeyCode::Char('d') => {
            if let Some(docname) = state.selected_docname() {
                state.mode = Mode::ConfirmDelete(docname);
            }
        }
        KeyCode::Char('n') => {
            state.customers.reset_form();
            state.customers.notice = None;
            state.focus = 0;
            state.mode = Mode::Form;
        }
        KeyCode::Char('f') => {
            state.clamp_focus();
            state.mode = Mode::Form;
        }
        KeyCode::Char('r') => return KeyOutcome::one(Request::LoadCustomers),
        _ => {}
    }
    KeyOutcome::none()
}

fn confirm_key(state: &mut UiState, k: KeyEvent, docname: String) -> KeyOutcome {
    match k.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            state.mode = Mode::Browse;
            tracing::debug!(%docname, "delete confirmed");
            KeyOutcome::one(Request::DeleteCustomer(docname))
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Browse;
            KeyOutcome::none()
        }
        _ => KeyOutcome::none(),
    }
}

fn form_key(state: &mut UiState, k: KeyEvent) -> KeyOutcome {
    let fields = state.customers.form.focus_order();
    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        match k.code {
            KeyCode::Char('a') => {
                let id = state.customers.add_address_row(None);
                state.focus_on(FormField::Address(id, AddressField::Line1));
            }
            KeyCode::Char('d') => {
                if let Some(FormField::Address(id, _)) = state.focused_field() {
                    state.customers.remove_address_row(id);
                    state.clamp_focus();
                }
            }
            KeyCode::Char('u') | KeyCode::Char('o') => state.mode = Mode::PhotoPath(String::new()),
            KeyCode::Char('s') => {
                if let Ok(req) = state.customers.prepare_save() {
                    return KeyOutcome::one(Request::SaveCustomer(req));
                }
            }
            KeyCode::Char('r') => {
                state.customers.reset_form();
                state.focus = 0;
            }
            _ => {}
        }
        return KeyOutcome::none();
    }

    match k.code {
        KeyCode::Esc => state.mode = Mode::Browse,
        KeyCode::Tab | KeyCode::Down => {
            if !fields.is_empty() {
                state.focus = (state.focus + 1) % fields.len();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if !fields.is_empty() {
                state.focus = (state.focus + fields.len() - 1) % fields.len();
            }
        }
        KeyCode::Backspace => {
            if let Some(slot) = state.focused_field().and_then(|f| state.customers.form.value_mut(f)) {
                slot.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(slot) = state.focused_field().and_then(|f| state.customers.form.value_mut(f)) {
                slot.push(c);
            }
        }
        _ => {}
    }
    KeyOutcome::none()
}

fn photo_key(state: &mut UiState, k: KeyEvent, mut buf: String) -> KeyOutcome {
    match k.code {
        KeyCode::Esc => state.mode = Mode::Form,
        KeyCode::Enter => {
            state.mode = Mode::Form;
            let path = buf.trim();
            if !path.is_empty() {
                let upload = state.customers.prepare_upload(path);
                return KeyOutcome::one(Request::UploadPhoto(upload));
            }
        }
        KeyCode::Backspace => {
            buf.pop();
            state.mode = Mode::PhotoPath(buf);
        }
        KeyCode::Char(c) => {
            buf.push(c);
            state.mode = Mode::PhotoPath(buf);
        }
        _ => {}
    }
    KeyOutcome::none()
}

/// Every edit of the search term goes out immediately.
fn feed_key(state: &mut UiState, k: KeyEvent) -> KeyOutcome {
    let mut term = state.feed.term.clone();
    match k.code {
        KeyCode::Tab => {
            state.tab = state.tab.toggle();
            return KeyOutcome::none();
        }
        KeyCode::Down => {
            state.feed_scroll = state.feed_scroll.saturating_add(1);
            return KeyOutcome::none();
        }
        KeyCode::Up => {
            state.feed_scroll = state.feed_scroll.saturating_sub(1);
            return KeyOutcome::none();
        }
        KeyCode::Esc => {
            if term.is_empty() {
                return KeyOutcome::none();
            }
            term.clear();
        }
        KeyCode::Backspace => {
            if term.pop().is_none() {
                return KeyOutcome::none();
            }
        }
        KeyCode::Char(c) if !k.modifiers.contains(KeyModifiers::CONTROL) => term.push(c),
        _ => return KeyOutcome::none(),
    }
    let ticket = state.feed.begin_search(&term);
    KeyOutcome::one(Request::SearchBlogs(ticket))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, CustomerSummary};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn requests(out: KeyOutcome) -> Vec<Request> {
        match out {
            KeyOutcome::Requests(r) => r,
            KeyOutcome::Quit => panic!("unexpected quit"),
        }
    }

    fn with_rows() -> UiState {
        let mut s = UiState::new("CostomerX");
        s.customers.table = ["C1", "C2"]
            .iter()
            .map(|n| CustomerSummary {
                name: n.to_string(),
                first_name: "A".into(),
                last_name: "B".into(),
                email: "a@b.com".into(),
                photo: None,
            })
            .collect();
        s
    }

    #[test]
    fn delete_waits_for_confirmation() {
        let mut s = with_rows();
        handle_key(&mut s, key(KeyCode::Char('j')));
        assert!(requests(handle_key(&mut s, key(KeyCode::Char('d')))).is_empty());
        assert_eq!(s.mode, Mode::ConfirmDelete("C2".into()));

        let reqs = requests(handle_key(&mut s, key(KeyCode::Char('y'))));
        assert!(matches!(reqs.as_slice(), [Request::DeleteCustomer(d)] if d == "C2"));
        assert_eq!(s.mode, Mode::Browse);
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let mut s = with_rows();
        handle_key(&mut s, key(KeyCode::Char('d')));
        assert!(requests(handle_key(&mut s, key(KeyCode::Char('n')))).is_empty());
        assert_eq!(s.mode, Mode::Browse);
    }

    #[test]
    fn typing_goes_into_the_focused_address_field() {
        let mut s = UiState::new("CostomerX");
        handle_key(&mut s, key(KeyCode::Char('n')));
        handle_key(&mut s, ctrl('a'));
        for c in "12 Main".chars() {
            handle_key(&mut s, key(KeyCode::Char(c)));
        }
        handle_key(&mut s, key(KeyCode::Tab));
        handle_key(&mut s, key(KeyCode::Char('X')));
        assert_eq!(
            s.customers.form.addresses.collect(),
            vec![Address::new("12 Main", "X", "")]
        );
    }

    #[test]
    fn remove_drops_only_the_focused_row() {
        let mut s = UiState::new("CostomerX");
        s.mode = Mode::Form;
        s.customers.add_address_row(Some(Address::new("a", "b", "1")));
        let second = s.customers.add_address_row(Some(Address::new("c", "d", "2")));
        s.customers.add_address_row(Some(Address::new("e", "f", "3")));
        s.focus_on(FormField::Address(second, AddressField::City));
        handle_key(&mut s, ctrl('d'));
        assert_eq!(
            s.customers.form.addresses.collect(),
            vec![Address::new("a", "b", "1"), Address::new("e", "f", "3")]
        );
    }

    #[test]
    fn save_with_incomplete_row_is_blocked() {
        let mut s = UiState::new("CostomerX");
        s.mode = Mode::Form;
        s.customers.add_address_row(None);
        assert!(requests(handle_key(&mut s, ctrl('s'))).is_empty());
        assert!(s.customers.notice.is_some());
    }

    #[test]
    fn photo_prompt_issues_upload() {
        let mut s = UiState::new("CostomerX");
        s.mode = Mode::Form;
        handle_key(&mut s, ctrl('u'));
        for c in "/tmp/p.png".chars() {
            handle_key(&mut s, key(KeyCode::Char(c)));
        }
        let reqs = requests(handle_key(&mut s, key(KeyCode::Enter)));
        match reqs.as_slice() {
            [Request::UploadPhoto(up)] => {
                assert_eq!(up.path.to_str(), Some("/tmp/p.png"));
                assert_eq!(up.attached_to_doctype, "CostomerX");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(s.mode, Mode::Form);
    }

    #[test]
    fn every_feed_keystroke_searches() {
        let mut s = UiState::new("CostomerX");
        s.tab = Tab::Feed;
        let a = requests(handle_key(&mut s, key(KeyCode::Char('r'))));
        let b = requests(handle_key(&mut s, key(KeyCode::Char('u'))));
        let (Request::SearchBlogs(t1), Request::SearchBlogs(t2)) = (&a[0], &b[0]) else {
            panic!("expected searches");
        };
        assert_eq!(t1.term, "r");
        assert_eq!(t2.term, "ru");
        assert!(t2.token > t1.token);
    }

    #[test]
    fn q_quits_from_the_list_but_types_in_the_feed() {
        let mut s = UiState::new("CostomerX");
        assert!(matches!(handle_key(&mut s, key(KeyCode::Char('q'))), KeyOutcome::Quit));
        s.tab = Tab::Feed;
        assert!(matches!(handle_key(&mut s, key(KeyCode::Char('q'))), KeyOutcome::Requests(_)));
        assert_eq!(s.feed.term, "q");
    }
}
