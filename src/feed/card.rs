use crate::model::BlogPost;
use serde::Serialize;
use time::macros::format_description;
use time::PrimitiveDateTime;

/// Characters of post content shown on a card.
pub const EXCERPT_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";

/// One post as rendered in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogCard {
    pub title: String,
    pub link: String,
    pub meta: String,
    pub excerpt: String,
}

impl From<&BlogPost> for BlogCard {
    fn from(p: &BlogPost) -> Self {
        let author = p
            .author_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown");
        let city = p.author_city.as_deref().unwrap_or("");
        let published = p.published_on.as_deref().map(display_date).unwrap_or_default();
        Self {
            title: p.title.clone(),
            link: format!("/blogs/{}", p.route),
            meta: format!("By {author} ({city}) | {published}"),
            excerpt: excerpt(p.content.as_deref().unwrap_or("")),
        }
    }
}

/// First `EXCERPT_CHARS` characters followed by `...`, whatever the length.
pub fn excerpt(content: &str) -> String {
    let head: String = content.chars().take(EXCERPT_CHARS).collect();
    format!("{head}{ELLIPSIS}")
}

/// Shorten `YYYY-MM-DD HH:MM:SS[.ffffff]` to minutes; anything else is shown as-is.
pub fn display_date(raw: &str) -> String {
    let input = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let output = format_description!("[year]-[month]-[day] [hour]:[minute]");
    let trimmed = raw.trim();
    let without_fraction = trimmed.split('.').next().unwrap_or(trimmed);
    PrimitiveDateTime::parse(without_fraction, &input)
        .ok()
        .and_then(|dt| dt.format(&output).ok())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::post;

    #[test]
    fn long_content_is_cut_at_200_chars() {
        let content: String = (0..500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let e = excerpt(&content);
        assert_eq!(e.chars().count(), 203);
        assert!(e.ends_with("..."));
        assert_eq!(&e[..200], &content[..200]);
    }

    #[test]
    fn short_content_still_gets_the_marker() {
        assert_eq!(excerpt("hi"), "hi...");
        assert_eq!(excerpt(""), "...");
    }

    #[test]
    fn multibyte_content_is_cut_on_char_boundaries() {
        let content = "é".repeat(300);
        let e = excerpt(&content);
        assert_eq!(e.chars().count(), 203);
    }

    #[test]
    fn card_fields() {
        let card = BlogCard::from(&post("Hello World", "body"));
        assert_eq!(card.link, "/blogs/hello-world");
        assert_eq!(card.meta, "By Asha (Pune) | 2025-03-04 09:15");
        assert_eq!(card.excerpt, "body...");
    }

    #[test]
    fn missing_author_shows_unknown() {
        let mut p = post("T", "c");
        p.author_name = None;
        p.author_city = None;
        p.published_on = Some("2025-03-04 09:15:00.123456".into());
        let card = BlogCard::from(&p);
        assert_eq!(card.meta, "By Unknown () | 2025-03-04 09:15");
    }

    #[test]
    fn unparsed_dates_pass_through() {
        assert_eq!(display_date("2025-03-04"), "2025-03-04");
        assert_eq!(display_date("yesterday"), "yesterday");
    }
}
