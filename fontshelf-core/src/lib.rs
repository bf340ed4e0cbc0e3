//! fontshelf-core: the front desk of a font library
//!
//! Somebody walks up with a font file. Before it goes on the shelf we check
//! that it really is a font and not too heavy to carry, learn its family
//! name, read the list of OpenType features it knows how to perform, put it
//! safely into storage and hand back a card describing where to find it.
//! Meanwhile the visitor watches a progress bar that is honest enough never
//! to claim the job is done before it is.
//!
//! ## The Pipeline
//!
//! 1. [`upload::Uploader::validate`] turns away missing files, unexpected
//!    MIME types and anything over 5 MiB, before a single table is read
//! 2. a [`introspect::FontIntrospector`] reports the family name and feature
//!    tags, choosing one face when the file is a collection
//! 3. [`features::resolve`] gives every tag a readable name and description
//! 4. [`format::classify`] names the container from the file extension
//! 5. an [`storage::ObjectStore`] receives the bytes in a single put
//! 6. the access URL is joined onto a public base or signed by the store
//!
//! ## A Sample Visit
//!
//! ```rust,no_run
//! use fontshelf_core::introspect::FontationsIntrospector;
//! use fontshelf_core::storage::FsStore;
//! use fontshelf_core::upload::{AccessUrl, UploadRequest, Uploader, UploaderConfig};
//!
//! let store = FsStore::open("/srv/fonts")?;
//! let config = UploaderConfig::default().with_access(AccessUrl::public("https://cdn.example"));
//! let uploader = Uploader::new(FontationsIntrospector, store, config);
//!
//! let bytes = std::fs::read("Inter-Regular.ttf")?;
//! let font = uploader.handle(UploadRequest::new(bytes, "font/ttf", "Inter-Regular.ttf"))?;
//!
//! println!("{} ({}) -> {}", font.family_name, font.format, font.access_url);
//! for feature in &font.features {
//!     let label = feature.info.as_ref().map(|i| &*i.name).unwrap_or("?");
//!     println!("  {}  {}", feature.tag, label);
//! }
//! #
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## On the Client Side
//!
//! - [`progress`] projects eased progress from the file size while a put is
//!   in flight and only reaches 100 when told the put succeeded
//! - [`status`] is the stage machine a UI follows from `idle` to `complete`
//! - [`cache`] keeps exactly one recently uploaded font around between runs
//!
//! ---
//!
//! Crafted with care at FontLab https://www.fontlab.com/

pub mod cache;
pub mod error;
pub mod features;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod format;
pub mod introspect;
pub mod output;
pub mod progress;
pub mod status;
pub mod storage;
pub mod upload;
pub mod woff;

pub use error::{CacheError, ParseError, StatusError, StoreError, UploadError};
pub use upload::{FontMetadata, UploadRequest, Uploader, UploaderConfig};
