use hex::FromHex;
use sha1::{Digest, Sha1};

/// Checksums of a blob as they are published next to artifacts in '.sha1' and '.md5' files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksums {
    pub md5: [u8;16],
    pub sha1: [u8;20],
}

impl Checksums {
    pub fn sha1_hex(&self) -> String {
        hex::encode(self.sha1)
    }

    pub fn md5_hex(&self) -> String {
        hex::encode(self.md5)
    }
}

/// Computes SHA1 and MD5 in a single pass while data is streamed through
pub struct ChecksumAccumulator {
    sha1_hasher: Sha1,
    md5_hasher: md5::Context,
}

impl ChecksumAccumulator {
    pub fn new() -> ChecksumAccumulator {
        ChecksumAccumulator {
            sha1_hasher: Default::default(),
            md5_hasher: md5::Context::new(),
        }
    }

    pub fn add_data(&mut self, data: &[u8]) {
        self.sha1_hasher.update(data);
        self.md5_hasher.consume(data);
    }

    pub fn finish(self) -> Checksums {
        Checksums {
            md5: self.md5_hasher.compute().into(),
            sha1: self.sha1_hasher.finalize().into(),
        }
    }
}

impl Default for ChecksumAccumulator {
    fn default() -> Self {
        ChecksumAccumulator::new()
    }
}

/// Parses the content of a checksum file. Besides the bare hex string, tools write
///  "<hash>  <file name>", so only the first whitespace-separated word counts.
pub fn parse_checksum_file<const N: usize>(content: &str) -> anyhow::Result<[u8;N]>
    where [u8;N]: FromHex<Error = hex::FromHexError>
{
    let hash = content.split_whitespace()
        .next()
        .ok_or_else(|| anyhow::anyhow!("empty checksum file"))?;
    Ok(<[u8;N]>::from_hex(hash)?)
}
