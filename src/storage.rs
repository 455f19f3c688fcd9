pub mod fs_repository_storage;
pub mod repository_storage;
pub mod transient_repository_storage;

pub use fs_repository_storage::FsRepositoryStorage;
pub use repository_storage::RepositoryStorage;
pub use transient_repository_storage::TransientRepositoryStorage;
