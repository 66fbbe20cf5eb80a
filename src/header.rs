// Mogg
// Copyright (c) 2026 The Mogg Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `header` module parses the Vorbis identification and setup headers.

use log::debug;

use crate::bitstream::Packet;
use crate::codebook::Codebook;
use crate::common::ilog;
use crate::errors::{Error, Result};
use crate::floor::{read_floor0, read_floor1};
use crate::residue::Residue;

/// The packet type for an identification header.
const PACKET_TYPE_IDENTIFICATION: u64 = 1;
/// The packet type for a comment header.
pub(crate) const PACKET_TYPE_COMMENT: u64 = 3;
/// The packet type for a setup header.
const PACKET_TYPE_SETUP: u64 = 5;

/// The 6-byte "vorbis" header signature, read as a single 48-bit little-endian value.
const VORBIS_SIGNATURE: u64 = 0x736962726f76;

/// The exact size of an identification header packet in bytes.
const IDENT_PACKET_SIZE: usize = 30;

/// The minimum block size (64) expressed as a power-of-2 exponent.
const BLOCKSIZE_MIN: u8 = 6;
/// The maximum block size (8192) expressed as a power-of-2 exponent.
const BLOCKSIZE_MAX: u8 = 13;

/// The parsed identification header (section 4.2.2 of the Vorbis I specification).
#[derive(Debug, Default)]
pub struct IdentHeader {
    pub version: u32,
    pub channels: u8,
    pub sample_rate: u32,
    pub bitrate_maximum: u32,
    pub bitrate_nominal: u32,
    pub bitrate_minimum: u32,
    /// Short block size expressed as a power-of-2 exponent.
    pub blocksize_0: u8,
    /// Long block size expressed as a power-of-2 exponent.
    pub blocksize_1: u8,
    pub framing_flag: u8,
}

/// A channel mapping (section 4.2.4.1 of the Vorbis I specification).
///
/// Coupling-step channel indices are consumed but not retained; they matter only to spectral
/// decode.
pub struct Mapping {
    pub coupling_steps: u16,
    pub submaps: Vec<SubMap>,
}

/// One submap of a channel mapping, binding a floor and a residue configuration.
pub struct SubMap {
    pub floor: u8,
    pub residue: u8,
}

/// A mode configuration. The window and transform types are validated to be 0 and not retained.
pub struct Mode {
    /// Selects blocksize_1 when set, blocksize_0 otherwise.
    pub block_flag: bool,
    pub mapping: u8,
}

/// The parsed setup header. Immutable once parsed; packet iteration reads from it without
/// mutation.
#[derive(Default)]
pub struct SetupHeader {
    pub codebooks: Vec<Codebook>,
    pub floor_types: Vec<u16>,
    pub residues: Vec<Residue>,
    pub mappings: Vec<Mapping>,
    pub modes: Vec<Mode>,
}

/// Parses the identification header from the stream's first logical packet.
pub fn read_ident_header(packet: &mut Packet) -> Result<IdentHeader> {
    // An identification header packet is exactly 30 bytes.
    if packet.len() != IDENT_PACKET_SIZE {
        return Err(Error::NotVorbis);
    }

    if packet.read_bits(8) != PACKET_TYPE_IDENTIFICATION {
        return Err(Error::NotVorbis);
    }

    if packet.read_bits(48) != VORBIS_SIGNATURE {
        return Err(Error::NotVorbis);
    }

    let ident = IdentHeader {
        version: packet.read_bits(32) as u32,
        channels: packet.read_bits(8) as u8,
        sample_rate: packet.read_bits(32) as u32,
        bitrate_maximum: packet.read_bits(32) as u32,
        bitrate_nominal: packet.read_bits(32) as u32,
        bitrate_minimum: packet.read_bits(32) as u32,
        blocksize_0: packet.read_bits(4) as u8,
        blocksize_1: packet.read_bits(4) as u8,
        framing_flag: packet.read_bits(1) as u8,
    };

    if ident.version != 0 {
        return Err(Error::InvalidVersion);
    }

    if ident.channels == 0 {
        return Err(Error::InvalidChannels);
    }

    if ident.sample_rate == 0 {
        return Err(Error::InvalidSampleRate);
    }

    // The block sizes must not exceed the bounds, and the short block may not exceed the long.
    if ident.blocksize_0 < BLOCKSIZE_MIN || ident.blocksize_0 > BLOCKSIZE_MAX {
        return Err(Error::InvalidBlocksize0);
    }

    if ident.blocksize_1 < BLOCKSIZE_MIN || ident.blocksize_1 > BLOCKSIZE_MAX {
        return Err(Error::InvalidBlocksize1);
    }

    if ident.blocksize_0 > ident.blocksize_1 {
        return Err(Error::InvalidBlocksize0);
    }

    Ok(ident)
}

/// Parses the setup header from the stream's third logical packet.
pub fn read_setup_header(packet: &mut Packet, ident: &IdentHeader) -> Result<SetupHeader> {
    if packet.read_bits(8) != PACKET_TYPE_SETUP {
        return Err(Error::InvalidData);
    }

    if packet.read_bits(48) != VORBIS_SIGNATURE {
        return Err(Error::InvalidData);
    }

    // Codebooks (8-bit count, up-to 256).
    let codebook_count = packet.read_bits(8) as usize + 1;
    let mut codebooks = Vec::with_capacity(codebook_count);

    for _ in 0..codebook_count {
        codebooks.push(Codebook::read(packet)?);
    }

    read_time_domain_transforms(packet)?;

    // Floors (6-bit count, up-to 64).
    let floor_count = packet.read_bits(6) as usize + 1;
    let mut floor_types = Vec::with_capacity(floor_count);

    for _ in 0..floor_count {
        let floor_type = packet.read_bits(16) as u16;

        match floor_type {
            0 => read_floor0(packet)?,
            1 => read_floor1(packet, codebooks.len())?,
            _ => return Err(Error::InvalidFloor),
        }

        floor_types.push(floor_type);
    }

    // Residues (6-bit count, up-to 64).
    let residue_count = packet.read_bits(6) as usize + 1;
    let mut residues = Vec::with_capacity(residue_count);

    for _ in 0..residue_count {
        residues.push(Residue::read(packet)?);
    }

    // Mappings (6-bit count, up-to 64).
    let mapping_count = packet.read_bits(6) as usize + 1;
    let mut mappings = Vec::with_capacity(mapping_count);

    for _ in 0..mapping_count {
        mappings.push(read_mapping(packet, ident.channels, floor_types.len(), residues.len())?);
    }

    // Modes (6-bit count, up-to 64).
    let mode_count = packet.read_bits(6) as usize + 1;
    let mut modes = Vec::with_capacity(mode_count);

    for _ in 0..mode_count {
        modes.push(read_mode(packet, mappings.len())?);
    }

    // Framing flag must be set.
    if packet.read_bits(1) == 0 {
        return Err(Error::FramingError);
    }

    debug!(
        "setup {{ codebooks={}, floors={}, residues={}, mappings={}, modes={} }}",
        codebooks.len(),
        floor_types.len(),
        residues.len(),
        mappings.len(),
        modes.len()
    );

    Ok(SetupHeader { codebooks, floor_types, residues, mappings, modes })
}

/// Consumes the vestigial time-domain transform slots, each of which must be 0 in Vorbis I
/// (section 4.2.4).
fn read_time_domain_transforms(packet: &mut Packet) -> Result<()> {
    let count = packet.read_bits(6) + 1;

    for _ in 0..count {
        if packet.read_bits(16) != 0 {
            return Err(Error::InvalidData);
        }
    }

    Ok(())
}

fn read_mapping(
    packet: &mut Packet,
    channels: u8,
    floor_count: usize,
    residue_count: usize,
) -> Result<Mapping> {
    // Only mapping type 0 exists in Vorbis I.
    if packet.read_bits(16) != 0 {
        return Err(Error::InvalidMapping);
    }

    let submap_count = if packet.read_bool() { packet.read_bits(4) as usize + 1 } else { 1 };

    let coupling_steps = if packet.read_bool() {
        let steps = packet.read_bits(8) as u16 + 1;

        // Magnitude and angle channel indices, discarded.
        let coupling_bits = ilog(u32::from(channels) - 1);

        for _ in 0..steps {
            let _magnitude = packet.read_bits(coupling_bits);
            let _angle = packet.read_bits(coupling_bits);
        }

        steps
    }
    else {
        0
    };

    if packet.read_bits(2) != 0 {
        return Err(Error::InvalidMapping);
    }

    // With multiple submaps, each channel names the submap that covers it.
    if submap_count > 1 {
        for _ in 0..channels {
            if packet.read_bits(4) as usize > submap_count {
                return Err(Error::InvalidMapping);
            }
        }
    }

    let mut submaps = Vec::with_capacity(submap_count);

    for _ in 0..submap_count {
        let _time = packet.read_bits(8);

        let floor = packet.read_bits(8) as u8;

        if usize::from(floor) > floor_count {
            return Err(Error::InvalidMapping);
        }

        let residue = packet.read_bits(8) as u8;

        if usize::from(residue) > residue_count {
            return Err(Error::InvalidMapping);
        }

        submaps.push(SubMap { floor, residue });
    }

    Ok(Mapping { coupling_steps, submaps })
}

fn read_mode(packet: &mut Packet, mapping_count: usize) -> Result<Mode> {
    let block_flag = packet.read_bool();
    let window_type = packet.read_bits(16);
    let transform_type = packet.read_bits(16);
    let mapping = packet.read_bits(8) as u8;

    // Only window type 0 and transform type 0 are allowed in Vorbis I (section 4.2.4), and the
    // mapping must exist.
    if window_type != 0 || transform_type != 0 || usize::from(mapping) >= mapping_count {
        return Err(Error::InvalidMode);
    }

    Ok(Mode { block_flag, mapping })
}
