// Mogg
// Copyright (c) 2026 The Mogg Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `page` module reads Ogg page headers.

use std::io::Read;

use log::debug;

use crate::errors::{Error, Result};
use crate::io::SourceStream;

const OGG_PAGE_MARKER: [u8; 4] = *b"OggS";

/// An Ogg page header.
///
/// Every field after the capture pattern is recorded but not validated; the stream's checksum is
/// never verified since the parse is structural only. The header is overwritten on each page
/// read and carries no identity beyond the current parse position.
#[derive(Default)]
pub struct PageHeader {
    pub version: u8,
    pub flags: u8,
    pub absgp: u64,
    pub serial: u32,
    pub sequence: u32,
    pub crc: u32,
    /// One length byte per segment, in page order. A length of 255 continues the logical packet
    /// into the next segment.
    pub segment_table: Vec<u8>,
    /// The stream offset of the page's capture pattern.
    pub start_pos: u64,
}

impl PageHeader {
    /// Reads a page header from the current stream position.
    ///
    /// The stream is expected to be positioned exactly at a page boundary; no resynchronization
    /// is attempted. On success the stream is positioned at the first byte of segment data.
    pub fn read<R: Read>(&mut self, stream: &mut SourceStream<R>) -> Result<()> {
        self.start_pos = stream.pos();

        let marker = stream.read_quad_bytes()?;

        if marker != OGG_PAGE_MARKER {
            return Err(Error::NoCapturePattern);
        }

        self.version = stream.read_byte()?;
        self.flags = stream.read_byte()?;
        self.absgp = stream.read_u64()?;
        self.serial = stream.read_u32()?;
        self.sequence = stream.read_u32()?;
        self.crc = stream.read_u32()?;

        let n_segments = stream.read_byte()?;

        self.segment_table.resize(usize::from(n_segments), 0);
        stream.read_buf_exact(&mut self.segment_table)?;

        debug!(
            "page {{ absgp={}, serial={:#x}, sequence={}, n_segments={} }}",
            self.absgp, self.serial, self.sequence, n_segments
        );

        Ok(())
    }
}
