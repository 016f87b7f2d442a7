pub(crate) mod client;
pub(crate) mod drive_file;
pub(crate) mod error;

pub use client::DriveClient;
pub use drive_file::DriveFile;
pub use error::{ClientError, Result as DriveResult};
