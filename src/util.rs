pub mod blob;
pub mod checksums;
