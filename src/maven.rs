pub mod coordinates;
pub mod file_types;
pub mod layout;
pub mod legacy_paths;
pub mod paths;
pub mod repository_content;
pub mod type_mapping;
pub mod version;

pub use coordinates::{ArtifactCoordinate, MavenClassifier, ProjectCoordinate, VersionCoordinate};
pub use layout::Layout;
pub use repository_content::RepositoryContent;
pub use version::{base_version, is_version_token, MavenVersion};
