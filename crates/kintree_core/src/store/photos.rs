//! Photo blob-store boundary.
//!
//! # Responsibility
//! - Model the external blob storage interface members attach photos
//!   through; the store hands back a URL, nothing else.

use crate::model::member::MemberId;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

/// One photo file to attach to a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Blob-store failure; the backend message is passed through opaquely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    Backend(String),
}

impl Display for PhotoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(message) => write!(f, "photo upload failed: {message}"),
        }
    }
}

impl Error for PhotoError {}

/// External blob storage for member photos.
pub trait PhotoStore {
    /// Uploads one photo and returns the URL to persist on the member.
    fn upload(&self, member_id: &MemberId, upload: &PhotoUpload) -> Result<String, PhotoError>;
}

/// Byte-sink photo backend for tests; hands back `memory://` URLs.
#[derive(Default)]
pub struct InMemoryPhotoStore {
    photos: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryPhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a photo was stored under the URL.
    pub fn contains(&self, url: &str) -> bool {
        self.photos().contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.photos().len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos().is_empty()
    }

    fn photos(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.photos.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl PhotoStore for InMemoryPhotoStore {
    fn upload(&self, member_id: &MemberId, upload: &PhotoUpload) -> Result<String, PhotoError> {
        let url = format!("memory://photos/{member_id}/{}", upload.file_name);
        self.photos().insert(url.clone(), upload.bytes.clone());
        Ok(url)
    }
}
