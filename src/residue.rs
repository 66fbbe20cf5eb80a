// Mogg
// Copyright (c) 2026 The Mogg Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `residue` module parses residue configurations from the setup header.

use crate::bitstream::Packet;
use crate::errors::{Error, Result};

/// A parsed residue configuration (section 8.6.1 of the Vorbis I specification).
///
/// The auxiliary codebook indices selected by the cascade masks are consumed but not retained;
/// they matter only to spectral decode.
pub struct Residue {
    /// Start offset of the coded spectrum range.
    pub begin: u32,
    /// End offset of the coded spectrum range.
    pub end: u32,
    /// Size of one partition (stored value plus one).
    pub partition_size: u32,
    /// Number of classifications (up-to 64).
    pub classifications: u8,
    /// Codebook used to decode partition classifications.
    pub classbook: u8,
    /// Per-classification cascade bit masks; bit `k` set means pass `k` uses an auxiliary
    /// codebook.
    pub cascades: Vec<u8>,
}

impl Residue {
    /// Reads one residue configuration, including its leading 16-bit type field.
    pub fn read(packet: &mut Packet) -> Result<Self> {
        let residue_type = packet.read_bits(16);

        if residue_type > 2 {
            return Err(Error::InvalidResidues);
        }

        let begin = packet.read_bits(24) as u32;
        let end = packet.read_bits(24) as u32;
        let partition_size = packet.read_bits(24) as u32 + 1;
        let classifications = packet.read_bits(6) as u8 + 1;
        let classbook = packet.read_bits(8) as u8;

        let mut cascades = Vec::with_capacity(usize::from(classifications));

        for _ in 0..classifications {
            let low_bits = packet.read_bits(3) as u8;

            let high_bits = if packet.read_bool() { packet.read_bits(5) as u8 } else { 0 };

            cascades.push((high_bits << 3) | low_bits);
        }

        // Each set cascade bit selects an auxiliary codebook for that pass.
        for &cascade in cascades.iter() {
            for pass in 0..8 {
                if cascade & (1 << pass) != 0 {
                    let _book = packet.read_bits(8);
                }
            }
        }

        Ok(Residue { begin, end, partition_size, classifications, classbook, cascades })
    }
}
