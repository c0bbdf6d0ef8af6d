//! frame.rs
//! Frame header inspection.

use serde::{Deserialize, Serialize};

use crate::types::{Operation, Result, ZstdError};

/// What a frame header says about its frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInfo {
    /// `None` when the header does not record the size.
    pub decompressed_size: Option<u64>,
    /// 0 when the frame was compressed without a dictionary or the id was omitted.
    pub dictionary_id: u32,
}

/// Parse the header of the frame at the start of `frame_buffer`.
///
/// # Errors
/// `FrameHeader` when the buffer does not start with a complete frame header.
pub fn get_frame_info(frame_buffer: &[u8]) -> Result<FrameInfo> {
    let decompressed_size =
        zstd_safe::get_frame_content_size(frame_buffer).map_err(|_| ZstdError::FrameHeader)?;
    let dictionary_id = zstd_safe::get_dict_id_from_frame(frame_buffer).map_or(0, |id| id.get());
    Ok(FrameInfo { decompressed_size, dictionary_id })
}

/// Compressed size of the complete frame at the start of `frame_buffer`.
pub fn get_frame_size(frame_buffer: &[u8]) -> Result<usize> {
    zstd_safe::find_frame_compressed_size(frame_buffer)
        .map_err(|code| ZstdError::codec(Operation::GetFrameSize, code))
}
