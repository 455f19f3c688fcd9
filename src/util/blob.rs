use std::pin::Pin;

use bytes::Bytes;
use futures_core::Stream;

pub type ByteStream = Pin<Box<dyn Stream<Item = anyhow::Result<Bytes>> + Send + 'static>>;

/// An artifact's content together with the checksums published for it, if any
pub struct Blob {
    pub data: ByteStream,
    pub md5: Option<[u8;16]>,
    pub sha1: Option<[u8;20]>,
}

/// a stream with a single chunk, e.g. for small files like checksums
pub fn single_chunk(data: impl Into<Bytes>) -> ByteStream {
    let bytes = data.into();
    Box::pin(futures::stream::once(async move { Ok::<_, anyhow::Error>(bytes) }))
}

/// drains a stream into memory
pub async fn collect_bytes(mut data: ByteStream) -> anyhow::Result<Vec<u8>> {
    use futures::StreamExt;

    let mut result = Vec::new();
    while let Some(chunk) = data.next().await {
        result.extend_from_slice(&chunk?);
    }
    Ok(result)
}
