//! Record types and identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a record ID from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh, unique record ID.
    ///
    /// IDs are UUID v7, so they embed the creation time and sort roughly
    /// in creation order, but only uniqueness is relied upon.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The caller-editable part of a record.
///
/// Passed to [`crate::RecordStore::create`] and [`crate::RecordStore::update`],
/// and produced by the CSV parser. Values are kept exactly as supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    /// Display name (required).
    pub name: String,
    /// Location reference, either a URL or free text (required).
    pub location: String,
    /// Mobile phone number.
    pub mobile: String,
    /// Email address.
    pub email: String,
    /// Postal address.
    pub address: String,
    /// Free-form notes.
    pub description: String,
    /// Opaque reference to a locally stored image.
    pub image_uri: String,
}

impl RecordFields {
    /// Creates a field set with the two required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    /// Sets the mobile number.
    #[must_use]
    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = mobile.into();
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image_uri(mut self, image_uri: impl Into<String>) -> Self {
        self.image_uri = image_uri.into();
        self
    }
}

/// A saved entry.
///
/// Serialized with camelCase keys (`imageUri`, `createdAt`) so the persisted
/// blob is a plain array of field maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique identifier, immutable once assigned.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Location reference.
    pub location: String,
    /// Mobile phone number.
    #[serde(default)]
    pub mobile: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Free-form notes.
    #[serde(default)]
    pub description: String,
    /// Opaque reference to a locally stored image.
    #[serde(default)]
    pub image_uri: String,
    /// Creation timestamp (RFC 3339), never changed on update.
    pub created_at: String,
}

impl Record {
    /// Builds a record from fields with an explicit id and creation stamp.
    #[must_use]
    pub fn from_fields(id: RecordId, fields: RecordFields, created_at: impl Into<String>) -> Self {
        Self {
            id,
            name: fields.name,
            location: fields.location,
            mobile: fields.mobile,
            email: fields.email,
            address: fields.address,
            description: fields.description,
            image_uri: fields.image_uri,
            created_at: created_at.into(),
        }
    }

    /// Returns a copy with every editable field replaced.
    ///
    /// `id` and `created_at` are carried over unchanged.
    #[must_use]
    pub fn with_fields(&self, fields: RecordFields) -> Self {
        Self::from_fields(self.id.clone(), fields, self.created_at.clone())
    }

    /// Returns the editable fields of this record.
    #[must_use]
    pub fn fields(&self) -> RecordFields {
        RecordFields {
            name: self.name.clone(),
            location: self.location.clone(),
            mobile: self.mobile.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            description: self.description.clone(),
            image_uri: self.image_uri.clone(),
        }
    }
}
