// Mogg
// Copyright (c) 2026 The Mogg Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `parser` module drives the whole structural parse: page demuxing, packet reassembly,
//! header parsing, and per-packet block-size iteration.

use std::io::Read;

use log::debug;

use crate::bitstream::{Packet, MAX_PACKET_SIZE};
use crate::common::ilog;
use crate::errors::{Error, Result};
use crate::header::{
    read_ident_header, read_setup_header, IdentHeader, SetupHeader, PACKET_TYPE_COMMENT,
};
use crate::io::SourceStream;
use crate::page::PageHeader;

/// The structural description of one audio packet: where it starts in the stream, how large its
/// transform window is, and where it falls on the stream's sample timeline.
///
/// A sequence of these tuples is the parser's sole externally useful output; it is exactly what
/// a seek-map builder consumes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PacketInfo {
    /// Stream offset of the packet's first byte.
    pub offset: u64,
    /// The packet's block size in samples (a power of two).
    pub block_size: u32,
    /// Cumulative sample position after the overlap-add advance for this packet.
    pub position: u64,
}

/// A forward-only structural reader over one Ogg Vorbis stream.
///
/// Constructing the reader parses all three Vorbis headers; [`OggVorbisReader::next_packet`]
/// then steps through audio packets one at a time. The reader owns its packet buffer and parsed
/// headers outright, so dropping it releases everything regardless of where a parse failed. It
/// is not restartable after a failure: the source has been consumed past the point of error.
pub struct OggVorbisReader<R: Read> {
    stream: SourceStream<R>,
    page: PageHeader,
    /// Index of the next unconsumed entry in the current page's segment table.
    next_segment: usize,
    /// Logical stream position of the next unconsumed segment byte.
    file_pos: u64,
    packet: Packet,
    /// Stream offset of the first byte of the current packet.
    packet_start: u64,
    ident: IdentHeader,
    setup: SetupHeader,
    /// Running sample-time cursor, advanced by the overlap-add half-window formula.
    next_sample: u64,
    /// Block size of the previous audio packet, 0 before the first.
    last_block_size: u32,
}

impl<R: Read> OggVorbisReader<R> {
    /// Reads the stream's three header packets and returns a reader positioned at the first
    /// audio packet.
    pub fn try_new(source: R) -> Result<Self> {
        let mut reader = OggVorbisReader {
            stream: SourceStream::new(source),
            page: PageHeader::default(),
            next_segment: 0,
            file_pos: 0,
            packet: Packet::new(),
            packet_start: 0,
            ident: IdentHeader::default(),
            setup: SetupHeader::default(),
            next_sample: 0,
            last_block_size: 0,
        };

        reader.read_page()?;

        reader.read_packet()?;
        reader.ident = read_ident_header(&mut reader.packet)?;

        debug!(
            "ident {{ channels={}, sample_rate={}, blocksize_0={}, blocksize_1={} }}",
            reader.ident.channels,
            reader.ident.sample_rate,
            reader.ident.blocksize_0,
            reader.ident.blocksize_1
        );

        // The comment header occupies the second logical packet. Its body is skipped as an
        // ordinary packet boundary, but the packet type must still identify it.
        reader.read_packet()?;

        if reader.packet.read_bits(8) != PACKET_TYPE_COMMENT {
            return Err(Error::InvalidData);
        }

        reader.read_packet()?;
        reader.setup = read_setup_header(&mut reader.packet, &reader.ident)?;

        Ok(reader)
    }

    /// The parsed identification header.
    pub fn ident(&self) -> &IdentHeader {
        &self.ident
    }

    /// The parsed setup header.
    pub fn setup(&self) -> &SetupHeader {
        &self.setup
    }

    /// Unwraps the reader, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.stream.into_inner()
    }

    /// Advances by exactly one audio packet, returning its structural description.
    pub fn next_packet(&mut self) -> Result<PacketInfo> {
        self.read_packet()?;

        // The leading packet-type bit distinguishes audio packets (0) from headers.
        if self.packet.read_bits(1) != 0 {
            return Err(Error::InvalidData);
        }

        let mode_bits = ilog(self.setup.modes.len() as u32 - 1);
        let mode_number = self.packet.read_bits(mode_bits) as usize;

        let mode = self.setup.modes.get(mode_number).ok_or(Error::InvalidData)?;

        let exponent =
            if mode.block_flag { self.ident.blocksize_1 } else { self.ident.blocksize_0 };

        let block_size = 1u32 << exponent;

        // Overlap-add: each packet contributes half of its own window and half of the previous
        // one. Before the first packet there is nothing to lap against.
        if self.last_block_size != 0 {
            self.next_sample += u64::from((self.last_block_size + block_size) / 4);
        }

        self.last_block_size = block_size;

        Ok(PacketInfo { offset: self.packet_start, block_size, position: self.next_sample })
    }

    /// Reads the next page header and rewinds the segment cursor.
    fn read_page(&mut self) -> Result<()> {
        self.page.read(&mut self.stream)?;
        self.file_pos = self.stream.pos();
        self.next_segment = 0;
        Ok(())
    }

    /// Reassembles the next logical packet into the packet buffer.
    ///
    /// Segments of 255 bytes continue the packet; the first shorter segment (including 0)
    /// terminates it. When the current page's segment table is exhausted mid-packet, the bytes
    /// accumulated so far are flushed into the buffer and reassembly continues transparently on
    /// the next page.
    fn read_packet(&mut self) -> Result<()> {
        let mut packet_size = 0usize;
        let mut packet_read = 0usize;

        loop {
            if self.next_segment >= self.page.segment_table.len() {
                if packet_size > packet_read {
                    self.stream.read_buf_exact(&mut self.packet.buf_mut()[packet_read..packet_size])?;
                    packet_read = packet_size;
                }

                self.read_page()?;
                continue;
            }

            let segment_len = self.page.segment_table[self.next_segment];
            self.next_segment += 1;

            if packet_size == 0 {
                self.packet_start = self.file_pos;
            }

            packet_size += usize::from(segment_len);
            self.file_pos += u64::from(segment_len);

            if packet_size > MAX_PACKET_SIZE {
                return Err(Error::PacketTooLarge);
            }

            if segment_len < 255 {
                break;
            }
        }

        if packet_size > packet_read {
            self.stream.read_buf_exact(&mut self.packet.buf_mut()[packet_read..packet_size])?;
        }

        self.packet.reset(packet_size);

        Ok(())
    }
}
