//! Customer records: list table, edit form with address rows, photo attachment.

mod form;
mod manager;
mod view;

pub use form::{AddressField, FormField};
pub use manager::{CustomerManager, DELETE_PROMPT};
pub use view::{table_rows, CustomerRowView};
