use async_compression::tokio::bufread::{GzipDecoder, ZstdDecoder};
use std::io;
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::{AsyncRead, BufReader};
use tokio_util::codec::FramedRead;
use tokio_util::io::StreamReader;
use tracing::debug;

use crate::codec::Transcoder;

/// Compression applied to a source file, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Zstd,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("gz") => Self::Gzip,
            Some("zst") => Self::Zstd,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceMeta {
    /// just the file name, for log lines
    pub name_hint: String,
    pub compression: Compression,
    /// Which character encoding to expect (defaults to UTF-8)
    pub charset: &'static encoding_rs::Encoding,
}

impl Default for SourceMeta {
    fn default() -> Self {
        Self {
            name_hint: String::new(),
            compression: Compression::None,
            charset: encoding_rs::UTF_8,
        }
    }
}

/// Wrap a raw source with decompression and, for non-UTF-8 charsets, strict
/// transcoding to UTF-8.
pub fn build_source_reader<R>(raw: R, meta: &SourceMeta) -> Box<dyn AsyncRead + Unpin + Send>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let buf = BufReader::with_capacity(1 << 20, raw);
    let decompressed: Box<dyn AsyncRead + Unpin + Send> = match meta.compression {
        Compression::Gzip => Box::new(GzipDecoder::new(buf)),
        Compression::Zstd => Box::new(ZstdDecoder::new(buf)),
        Compression::None => Box::new(buf),
    };

    // UTF-8 passes through untouched; the CSV reader validates it per record.
    if meta.charset == encoding_rs::UTF_8 {
        decompressed
    } else {
        let framed = FramedRead::new(decompressed, Transcoder::new(meta.charset));
        Box::new(StreamReader::new(framed))
    }
}

/// Open a local source file. Compression comes from the extension.
pub async fn reader_from_path(
    path: &Path,
    charset: &'static encoding_rs::Encoding,
) -> io::Result<(Box<dyn AsyncRead + Unpin + Send>, SourceMeta)> {
    let file = File::open(path).await?;
    let meta = SourceMeta {
        name_hint: path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string(),
        compression: Compression::from_path(path),
        charset,
    };
    debug!(
        source = %meta.name_hint,
        compression = ?meta.compression,
        charset = meta.charset.name(),
        "opened source"
    );

    Ok((build_source_reader(file, &meta), meta))
}

/// Write `bytes` to `path`, truncating any existing file in place so its
/// permissions and links are kept. Parent directories are not created.
pub async fn write_document(path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(path, bytes).await
}
