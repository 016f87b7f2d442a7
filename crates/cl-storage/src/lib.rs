pub mod drive;
pub mod error;
pub mod local_provider;
pub mod provider_factory;
pub mod remote_provider;
pub mod save_outcome;
pub mod storage_info;
pub mod storage_provider;

pub use drive::{ClientError, DriveClient, DriveFile, DriveResult};
pub use error::{Result, StorageError, StorageErrorKind};
pub use local_provider::{LocalProvider, read_owned_record, write_owned_record};
pub use provider_factory::{ProviderSet, select_provider};
pub use remote_provider::{RemoteProvider, RemoteSettings, remote_file_name};
pub use save_outcome::{SaveAction, SaveOutcome};
pub use storage_info::StorageInfo;
pub use storage_provider::StorageProvider;

#[cfg(test)]
mod tests;
