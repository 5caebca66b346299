//! Plain-text rendering for the one-shot commands.

use crate::customers::CustomerRowView;
use crate::feed::BlogCard;
use crate::model::Customer;

fn width(values: impl Iterator<Item = usize>, header: &str) -> usize {
    values.max().unwrap_or(0).max(header.chars().count())
}

fn pad(s: &str, w: usize) -> String {
    let n = s.chars().count();
    format!("{s}{}", " ".repeat(w.saturating_sub(n)))
}

/// Table of customers: ID, name, email, photo.
pub(crate) fn customer_table(rows: &[CustomerRowView]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["No customers".into()];
    }
    let w_id = width(rows.iter().map(|r| r.docname.chars().count()), "ID");
    let w_name = width(rows.iter().map(|r| r.name.chars().count()), "Name");
    let w_email = width(rows.iter().map(|r| r.email.chars().count()), "Email");

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        format!(
            "{}  {}  {}  Photo",
            pad("ID", w_id),
            pad("Name", w_name),
            pad("Email", w_email)
        )
        .trim_end()
        .to_string(),
    );
    for r in rows {
        lines.push(
            format!(
                "{}  {}  {}  {}",
                pad(&r.docname, w_id),
                pad(&r.name, w_name),
                pad(&r.email, w_email),
                r.photo
            )
            .trim_end()
            .to_string(),
        );
    }
    lines
}

pub(crate) fn customer_detail(c: &Customer) -> Vec<String> {
    let mut lines = vec![
        format!("ID:         {}", c.name),
        format!("First name: {}", c.first_name),
        format!("Last name:  {}", c.last_name),
        format!("Email:      {}", c.email),
        format!("Photo:      {}", c.photo.as_deref().unwrap_or("-")),
    ];
    if c.customer_addressx.is_empty() {
        lines.push("Addresses:  none".into());
    } else {
        lines.push("Addresses:".into());
        for (i, a) in c.customer_addressx.iter().enumerate() {
            lines.push(format!(
                "  {}. {}, {} {}",
                i + 1,
                a.address_line1,
                a.city,
                a.pincode
            ));
        }
    }
    lines
}

pub(crate) fn blog_cards(cards: &[BlogCard]) -> Vec<String> {
    if cards.is_empty() {
        return vec!["No posts".into()];
    }
    let mut lines = Vec::new();
    for (i, c) in cards.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("{}  <{}>", c.title, c.link));
        lines.push(format!("  {}", c.meta));
        lines.push(format!("  {}", c.excerpt));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Address;

    #[test]
    fn table_aligns_columns_and_leaves_photo_blank() {
        let rows = vec![
            CustomerRowView {
                docname: "C1".into(),
                name: "A B".into(),
                email: "a@b.com".into(),
                photo: String::new(),
            },
            CustomerRowView {
                docname: "C10".into(),
                name: "Long Name".into(),
                email: "x@y.org".into(),
                photo: "/files/p.png".into(),
            },
        ];
        let lines = customer_table(&rows);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "C1   A B        a@b.com");
        assert!(lines[2].ends_with("/files/p.png"));
    }

    #[test]
    fn detail_lists_addresses_in_order() {
        let c = Customer {
            name: "C1".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.com".into(),
            photo: None,
            customer_addressx: vec![Address::new("X", "Y", "1"), Address::new("P", "Q", "2")],
        };
        let lines = customer_detail(&c);
        assert_eq!(lines[5], "Addresses:");
        assert_eq!(lines[6], "  1. X, Y 1");
        assert_eq!(lines[7], "  2. P, Q 2");
    }
}
