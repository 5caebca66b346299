use serde::{Deserialize, Deserializer, Serialize};

/// Decode JSON `null` (or an absent field, with `#[serde(default)]`) as an empty string.
/// The backend serializes unset text fields as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a photo reference, treating `null` and `""` as "no photo".
fn photo_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

/// One address line-item embedded in a customer document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address_line1: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pincode: String,
}

impl Address {
    pub fn new(
        address_line1: impl Into<String>,
        city: impl Into<String>,
        pincode: impl Into<String>,
    ) -> Self {
        Self {
            address_line1: address_line1.into(),
            city: city.into(),
            pincode: pincode.into(),
        }
    }

    /// Whether every field carries a non-blank value.
    pub fn is_complete(&self) -> bool {
        !self.address_line1.trim().is_empty()
            && !self.city.trim().is_empty()
            && !self.pincode.trim().is_empty()
    }
}

/// Row returned by the customer list call (no addresses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "photo_ref")]
    pub photo: Option<String>,
}

impl CustomerSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Full customer document including its address child table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "photo_ref")]
    pub photo: Option<String>,
    #[serde(default)]
    pub customer_addressx: Vec<Address>,
}

/// Published blog post, read-only on this side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub route: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_city: Option<String>,
    #[serde(default)]
    pub published_on: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// File document returned by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub file_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Reply of the create-or-update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveReply {
    pub status: String,
    #[serde(default)]
    pub docname: Option<String>,
}

/// Reply of calls that only report a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReply {
    pub status: String,
}

pub const STATUS_SUCCESS: &str = "success";

/// Replies that carry an application-level status string.
pub trait HasStatus {
    fn status(&self) -> &str;

    fn is_success(&self) -> bool {
        self.status() == STATUS_SUCCESS
    }
}

impl HasStatus for SaveReply {
    fn status(&self) -> &str {
        &self.status
    }
}

impl HasStatus for StatusReply {
    fn status(&self) -> &str {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_with_empty_photo_has_no_photo() {
        let rows: Vec<CustomerSummary> = serde_json::from_str(
            r#"[{"name":"C1","first_name":"A","last_name":"B","email":"a@b.com","photo":""}]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].photo, None);
        assert_eq!(rows[0].full_name(), "A B");
    }

    #[test]
    fn null_text_fields_decode_as_empty() {
        let c: Customer = serde_json::from_str(
            r#"{"name":"C2","first_name":"A","last_name":null,"email":null,"photo":null,
                "customer_addressx":[{"address_line1":"X","city":null,"pincode":"1","idx":1}]}"#,
        )
        .unwrap();
        assert_eq!(c.last_name, "");
        assert_eq!(c.email, "");
        assert_eq!(c.photo, None);
        assert_eq!(c.customer_addressx, vec![Address::new("X", "", "1")]);
    }

    #[test]
    fn customer_without_child_table_has_no_addresses() {
        let c: Customer = serde_json::from_str(r#"{"name":"C3"}"#).unwrap();
        assert!(c.customer_addressx.is_empty());
    }

    #[test]
    fn status_success_is_exact() {
        let ok = StatusReply {
            status: "success".into(),
        };
        let other = StatusReply {
            status: "Success".into(),
        };
        assert!(ok.is_success());
        assert!(!other.is_success());
    }

    #[test]
    fn incomplete_address_is_detected() {
        assert!(Address::new("X", "Y", "1").is_complete());
        assert!(!Address::new("X", " ", "1").is_complete());
        assert!(!Address::default().is_complete());
    }
}
