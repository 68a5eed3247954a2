use bytes::{Buf, BytesMut};
use encoding_rs::{DecoderResult, Encoding};
use std::io;
use thiserror::Error;
use tokio_util::codec::Decoder;

/// Raised inside an `io::Error` when the source bytes are not valid in the
/// declared charset.
#[derive(Debug, Error)]
#[error("malformed {charset} byte sequence")]
pub(crate) struct MalformedInput {
    pub(crate) charset: &'static str,
}

/// Strict charset -> UTF-8 transcoder. Malformed input is an error, never
/// replaced with U+FFFD.
pub struct Transcoder {
    decoder: encoding_rs::Decoder,
    finished: bool,
}

impl Transcoder {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder(),
            finished: false,
        }
    }

    fn transcode(&mut self, src: &mut BytesMut, last: bool) -> io::Result<Option<BytesMut>> {
        let capacity = self
            .decoder
            .max_utf8_buffer_length_without_replacement(src.len())
            .unwrap_or_else(|| src.len() * 3 + 16);
        let mut out = vec![0; capacity];

        let (result, read, written) = self
            .decoder
            .decode_to_utf8_without_replacement(src, &mut out, last);
        src.advance(read);

        if let DecoderResult::Malformed(..) = result {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                MalformedInput {
                    charset: self.decoder.encoding().name(),
                },
            ));
        }

        if written == 0 {
            return Ok(None);
        }
        Ok(Some(BytesMut::from(&out[..written])))
    }
}

impl Decoder for Transcoder {
    type Item = BytesMut;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }
        self.transcode(src, false)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.finished {
            buf.clear();
            return Ok(None);
        }
        // The final call flushes any sequence the decoder is still holding.
        self.finished = true;
        let out = self.transcode(buf, true)?;
        buf.clear();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(encoding: &'static Encoding, chunks: &[&[u8]]) -> io::Result<String> {
        let mut transcoder = Transcoder::new(encoding);
        let mut out = Vec::new();
        let mut buf = BytesMut::new();
        for chunk in chunks {
            buf.extend_from_slice(chunk);
            while let Some(piece) = transcoder.decode(&mut buf)? {
                out.extend_from_slice(&piece);
            }
        }
        while let Some(piece) = transcoder.decode_eof(&mut buf)? {
            out.extend_from_slice(&piece);
        }
        Ok(String::from_utf8(out).expect("transcoder emits UTF-8"))
    }

    #[test]
    fn transcodes_windows_1252() {
        let text = collect(encoding_rs::WINDOWS_1252, &[b"LF\xC9N,1\n"]).unwrap();
        assert_eq!(text, "LFÉN,1\n");
    }

    #[test]
    fn holds_split_multibyte_sequences_across_chunks() {
        let text = collect(encoding_rs::UTF_8, &[b"caf\xC3", b"\xA9"]).unwrap();
        assert_eq!(text, "café");
    }

    #[test]
    fn rejects_malformed_input() {
        let err = collect(encoding_rs::UTF_8, &[b"ok\xFFbad"]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err
            .get_ref()
            .is_some_and(|inner| inner.is::<MalformedInput>()));
    }

    #[test]
    fn rejects_truncated_sequence_at_eof() {
        let err = collect(encoding_rs::UTF_8, &[b"abc\xE2\x82"]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
