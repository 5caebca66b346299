//! Published blog feed with live search.
//!
//! Every search is issued immediately; responses may come back in any order.
//! Each request carries a monotonically increasing token and a response is
//! only rendered if nothing newer has been rendered already.

mod card;

pub use card::BlogCard;

use crate::backend::FeedApi;
use crate::model::BlogPost;
use crate::outcome::{Notice, Outcome};
use crate::rpc::RpcError;

/// Handle for one issued search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub token: u64,
    pub term: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The response was rendered (or, on failure, recorded as the latest answer).
    Current,
    /// A newer search had already been rendered; the response was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub struct SocialFeed {
    pub term: String,
    pub cards: Vec<BlogCard>,
    pub notice: Option<Notice>,
    issued: u64,
    applied: u64,
}

impl SocialFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_search(&mut self, term: &str) -> SearchTicket {
        self.issued += 1;
        self.term = term.to_string();
        SearchTicket {
            token: self.issued,
            term: self.term.clone(),
        }
    }

    /// Number of issued searches that have not been answered yet or were superseded.
    pub fn pending(&self) -> u64 {
        self.issued - self.applied
    }

    pub fn apply(&mut self, ticket: &SearchTicket, res: Result<Vec<BlogPost>, RpcError>) -> Applied {
        if ticket.token <= self.applied {
            tracing::debug!(token = ticket.token, term = %ticket.term, "dropping stale search response");
            return Applied::Stale;
        }
        self.applied = ticket.token;

        match Outcome::from_result(res) {
            Outcome::Success(posts) => {
                self.cards = posts.iter().map(BlogCard::from).collect();
                self.notice = None;
                tracing::debug!(term = %ticket.term, count = self.cards.len(), "feed rendered");
            }
            other => {
                self.notice = Some(other.report("Loading posts", String::new));
            }
        }
        Applied::Current
    }

    pub async fn search<A: FeedApi>(&mut self, api: &A, term: &str) -> Applied {
        let ticket = self.begin_search(term);
        let res = api.get_published_blogs(&ticket.term).await;
        self.apply(&ticket, res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{post, FakeFeed};

    #[tokio::test]
    async fn initial_load_uses_empty_term() {
        let api = FakeFeed::default();
        api.answer("", vec![post("One", "a"), post("Two", "b")]);
        let mut feed = SocialFeed::new();
        assert_eq!(feed.search(&api, "").await, Applied::Current);
        assert_eq!(api.calls(), vec![String::new()]);
        assert_eq!(feed.cards.len(), 2);
    }

    #[test]
    fn older_response_arriving_last_is_dropped() {
        let mut feed = SocialFeed::new();
        let first = feed.begin_search("fo");
        let second = feed.begin_search("foo");

        assert_eq!(feed.apply(&second, Ok(vec![post("Foo", "x")])), Applied::Current);
        assert_eq!(feed.apply(&first, Ok(vec![post("Fo", "y"), post("Fox", "z")])), Applied::Stale);

        assert_eq!(feed.cards.len(), 1);
        assert_eq!(feed.cards[0].title, "Foo");
        assert_eq!(feed.pending(), 0);
    }

    #[test]
    fn in_order_responses_both_render() {
        let mut feed = SocialFeed::new();
        let first = feed.begin_search("f");
        let second = feed.begin_search("fo");
        assert_eq!(feed.apply(&first, Ok(vec![post("F", "")])), Applied::Current);
        assert_eq!(feed.cards[0].title, "F");
        assert_eq!(feed.pending(), 1);
        assert_eq!(feed.apply(&second, Ok(vec![post("Fo", "")])), Applied::Current);
        assert_eq!(feed.cards[0].title, "Fo");
    }

    #[tokio::test]
    async fn each_keystroke_issues_a_call() {
        let api = FakeFeed::default();
        let mut feed = SocialFeed::new();
        feed.search(&api, "foo").await;
        feed.search(&api, "foo").await;
        assert_eq!(api.calls().len(), 2);
    }

    #[test]
    fn failure_keeps_previous_cards() {
        let mut feed = SocialFeed::new();
        let t = feed.begin_search("");
        feed.apply(&t, Ok(vec![post("Kept", "")]));
        let t = feed.begin_search("x");
        let applied = feed.apply(&t, Err(RpcError::MissingMessage));
        assert_eq!(applied, Applied::Current);
        assert_eq!(feed.cards[0].title, "Kept");
        assert!(matches!(feed.notice, Some(Notice::Error(_))));
    }
}
