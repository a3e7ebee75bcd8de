//! Formdeck Storage
//!
//! On-disk and in-memory storage around the form index:
//!
//! - **forms**: stored forms rendered as small HTML files
//! - **templates**: imported HTML templates served back to the client
//! - **html**: escaping and rendering helpers
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use formdeck::index::{FieldSet, FormIndex};
//! use formdeck::storage::FormFileStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let files = FormFileStore::new("./forms").await?;
//!     let index = FormIndex::new();
//!
//!     let fields = FieldSet::new().with("color", "red");
//!     let id = index.append(fields.clone())?;
//!     files.write(id, &fields).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod forms;
pub mod html;
pub mod templates;

pub use error::{StorageError, StorageResult};
pub use forms::FormFileStore;
pub use templates::TemplateLibrary;
