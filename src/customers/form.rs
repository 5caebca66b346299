//! Editable customer form: scalar fields plus a dynamic list of address rows.

use crate::backend::SaveRequest;
use crate::model::{Address, Customer};
use thiserror::Error;

/// Stable identity of one address row for the lifetime of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Line1,
    City,
    Pincode,
}

impl AddressField {
    pub const ALL: [AddressField; 3] = [AddressField::Line1, AddressField::City, AddressField::Pincode];

    pub fn label(self) -> &'static str {
        match self {
            AddressField::Line1 => "Address Line 1",
            AddressField::City => "City",
            AddressField::Pincode => "Pincode",
        }
    }

    fn get(self, a: &Address) -> &str {
        match self {
            AddressField::Line1 => &a.address_line1,
            AddressField::City => &a.city,
            AddressField::Pincode => &a.pincode,
        }
    }

    fn get_mut(self, a: &mut Address) -> &mut String {
        match self {
            AddressField::Line1 => &mut a.address_line1,
            AddressField::City => &mut a.city,
            AddressField::Pincode => &mut a.pincode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRow {
    pub id: RowId,
    pub address: Address,
}

/// Ordered address rows; actions address a row by `RowId`, never by position.
#[derive(Debug, Clone, Default)]
pub struct AddressRows {
    next_id: u64,
    rows: Vec<AddressRow>,
}

impl AddressRows {
    pub fn push(&mut self, address: Address) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(AddressRow { id, address });
        id
    }

    /// Remove exactly the row with `id`. Returns false if it no longer exists.
    pub fn remove(&mut self, id: RowId) -> bool {
        match self.rows.iter().position(|r| r.id == id) {
            Some(idx) => {
                self.rows.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: RowId) -> Option<&Address> {
        self.rows.iter().find(|r| r.id == id).map(|r| &r.address)
    }

    pub fn field(&self, id: RowId, field: AddressField) -> Option<&str> {
        self.get(id).map(|a| field.get(a))
    }

    pub fn field_mut(&mut self, id: RowId, field: AddressField) -> Option<&mut String> {
        self.rows
            .iter_mut()
            .find(|r| r.id == id)
            .map(|r| field.get_mut(&mut r.address))
    }

    #[cfg(test)]
    pub fn set_field(&mut self, id: RowId, field: AddressField, value: impl Into<String>) -> bool {
        match self.field_mut(id, field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AddressRow> {
        self.rows.iter()
    }

    #[cfg(test)]
    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    /// Addresses in row order, as they go into the save payload.
    pub fn collect(&self) -> Vec<Address> {
        self.rows.iter().map(|r| r.address.clone()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    FirstName,
    LastName,
    Email,
}

impl ScalarField {
    pub const ALL: [ScalarField; 3] = [ScalarField::FirstName, ScalarField::LastName, ScalarField::Email];

    pub fn label(self) -> &'static str {
        match self {
            ScalarField::FirstName => "First Name",
            ScalarField::LastName => "Last Name",
            ScalarField::Email => "Email",
        }
    }
}

/// Any editable input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Scalar(ScalarField),
    Address(RowId, AddressField),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("address row {row}: {field} is required")]
    MissingAddressField { row: usize, field: &'static str },
    #[error("encoding addresses: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, Default)]
pub struct CustomerForm {
    /// Identifier of the record being edited; empty while creating.
    pub docname: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub addresses: AddressRows,
}

impl CustomerForm {
    pub fn scalar(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::FirstName => &self.first_name,
            ScalarField::LastName => &self.last_name,
            ScalarField::Email => &self.email,
        }
    }

    pub fn scalar_mut(&mut self, field: ScalarField) -> &mut String {
        match field {
            ScalarField::FirstName => &mut self.first_name,
            ScalarField::LastName => &mut self.last_name,
            ScalarField::Email => &mut self.email,
        }
    }

    pub fn value(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Scalar(s) => Some(self.scalar(s)),
            FormField::Address(id, f) => self.addresses.field(id, f),
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Scalar(s) => Some(self.scalar_mut(s)),
            FormField::Address(id, f) => self.addresses.field_mut(id, f),
        }
    }

    pub fn docname(&self) -> Option<&str> {
        let d = self.docname.trim();
        if d.is_empty() {
            None
        } else {
            Some(d)
        }
    }

    /// Inputs in visual order: scalar fields, then each row's three fields.
    pub fn focus_order(&self) -> Vec<FormField> {
        let mut out: Vec<FormField> = ScalarField::ALL.iter().map(|s| FormField::Scalar(*s)).collect();
        for row in self.addresses.iter() {
            out.extend(AddressField::ALL.iter().map(|f| FormField::Address(row.id, *f)));
        }
        out
    }

    /// Replace the whole form with a fetched record.
    pub fn load(&mut self, customer: &Customer) {
        self.docname = customer.name.clone();
        self.first_name = customer.first_name.clone();
        self.last_name = customer.last_name.clone();
        self.email = customer.email.clone();
        self.addresses.clear();
        for a in &customer.customer_addressx {
            self.addresses.push(a.clone());
        }
    }

    pub fn reset(&mut self) {
        self.docname.clear();
        self.first_name.clear();
        self.last_name.clear();
        self.email.clear();
        self.addresses.clear();
    }

    /// Every address row needs all three fields.
    pub fn validate(&self) -> Result<(), FormError> {
        for (idx, row) in self.addresses.iter().enumerate() {
            for field in AddressField::ALL {
                if field.get(&row.address).trim().is_empty() {
                    return Err(FormError::MissingAddressField {
                        row: idx + 1,
                        field: field.label(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Build the save payload; the photo comes from the edit session, not the form.
    pub fn to_request(&self, photo: Option<&str>) -> Result<SaveRequest, FormError> {
        self.validate()?;
        SaveRequest::new(
            self.docname(),
            &self.first_name,
            &self.last_name,
            &self.email,
            photo,
            &self.addresses.collect(),
        )
        .map_err(|e| FormError::Encode(e.to_string()))
    }
}
