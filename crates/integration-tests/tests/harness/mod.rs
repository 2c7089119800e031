#![allow(dead_code)]

pub mod config;
pub mod mock_openai;
pub mod server;

/// Bytes standing in for an MP3 upload
pub const SAMPLE_AUDIO: &[u8] = b"ID3\x03\x00\x00\x00\x00\x00\x00fake-mpeg-frames";

/// Multipart form with one file field
pub fn audio_form(filename: &str, bytes: &[u8]) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes.to_vec())
        .file_name(filename.to_owned())
        .mime_str("audio/mpeg")
        .unwrap();

    reqwest::multipart::Form::new().part("file", part)
}
