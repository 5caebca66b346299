use crate::model::CustomerSummary;

/// One rendered line of the customer table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRowView {
    pub docname: String,
    pub name: String,
    pub email: String,
    /// Thumbnail reference; empty when the customer has no photo.
    pub photo: String,
}

impl From<&CustomerSummary> for CustomerRowView {
    fn from(c: &CustomerSummary) -> Self {
        Self {
            docname: c.name.clone(),
            name: c.full_name(),
            email: c.email.clone(),
            photo: c.photo.clone().unwrap_or_default(),
        }
    }
}

pub fn table_rows(customers: &[CustomerSummary]) -> Vec<CustomerRowView> {
    customers.iter().map(CustomerRowView::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_customer_without_photo_has_empty_thumbnail_cell() {
        let rows: Vec<CustomerSummary> = serde_json::from_str(
            r#"[{"name":"C1","first_name":"A","last_name":"B","email":"a@b.com","photo":""}]"#,
        )
        .unwrap();
        let view = table_rows(&rows);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "A B");
        assert_eq!(view[0].email, "a@b.com");
        assert_eq!(view[0].photo, "");
        assert_eq!(view[0].docname, "C1");
    }
}
