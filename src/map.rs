// Mogg
// Copyright (c) 2026 The Mogg Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `map` module builds the seek table a mogg container carries ahead of the audio data.

use std::io::Read;

use log::debug;

use crate::errors::{Error, Result};
use crate::parser::OggVorbisReader;

/// The default spacing between seek entries, in samples.
pub const DEFAULT_MAP_INTERVAL: u64 = 20000;

/// One seek entry: the stream offset of an audio packet and the sample position it lands on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MapEntry {
    pub offset: u32,
    pub position: u32,
}

/// A seek table mapping sample positions to packet byte offsets at a fixed sample interval.
pub struct OggMap {
    interval: u64,
    entries: Vec<MapEntry>,
}

impl OggMap {
    /// Drives `reader` through every audio packet and collects a seek entry for the first
    /// packet and for each packet that first reaches the next interval multiple.
    ///
    /// A read failure from the packet iterator marks the end of the stream; any other failure
    /// aborts the build.
    pub fn build<R: Read>(reader: &mut OggVorbisReader<R>) -> Result<OggMap> {
        Self::build_with_interval(reader, DEFAULT_MAP_INTERVAL)
    }

    pub fn build_with_interval<R: Read>(
        reader: &mut OggVorbisReader<R>,
        interval: u64,
    ) -> Result<OggMap> {
        assert!(interval > 0, "map interval must be non-zero");

        let mut entries = Vec::new();
        let mut threshold = 0u64;

        loop {
            let info = match reader.next_packet() {
                Ok(info) => info,
                // The read/tell contract cannot distinguish a clean EOF from a short read, so
                // the first read failure past the headers ends the stream.
                Err(Error::Read) => break,
                Err(e) => return Err(e),
            };

            if info.position >= threshold {
                entries.push(MapEntry { offset: info.offset as u32, position: info.position as u32 });
                threshold = (info.position / interval + 1) * interval;
            }
        }

        debug!("map {{ entries={}, interval={} }}", entries.len(), interval);

        Ok(OggMap { interval, entries })
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    /// Serializes the map: little-endian interval and entry count, then one
    /// (offset, position) pair of little-endian u32s per entry.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.entries.len() * 8);

        bytes.extend_from_slice(&(self.interval as u32).to_le_bytes());
        bytes.extend_from_slice(&(self.entries.len() as u32).to_le_bytes());

        for entry in self.entries.iter() {
            bytes.extend_from_slice(&entry.offset.to_le_bytes());
            bytes.extend_from_slice(&entry.position.to_le_bytes());
        }

        bytes
    }
}
