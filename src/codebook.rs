// Mogg
// Copyright (c) 2026 The Mogg Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `codebook` module parses codebook definitions from the setup header.
//!
//! Only the structure is retained: codeword lengths, dimensions, and the lookup type. The VQ
//! lookup table values themselves are decode-irrelevant for block-size extraction and are
//! consumed without being stored.

use crate::bitstream::Packet;
use crate::common::ilog;
use crate::errors::{Error, Result};

/// The 24-bit codebook synchronization pattern, "BCV" (section 3.2.1 of the Vorbis I
/// specification).
const CODEBOOK_SYNC: u64 = 0x564342;

/// A parsed codebook definition.
pub struct Codebook {
    /// Number of scalars per VQ vector.
    pub dimensions: u16,
    /// Codeword length in bits for each entry. 0 marks an entry unused (sparse codebooks only).
    pub code_lens: Vec<u8>,
    /// VQ lookup table type: 0 = none, 1 = implicit lattice, 2 = explicit value list.
    pub lookup_type: u8,
}

impl Codebook {
    /// Reads one codebook definition from the setup header bitstream.
    pub fn read(packet: &mut Packet) -> Result<Self> {
        // Verify codebook synchronization word.
        if packet.read_bits(24) != CODEBOOK_SYNC {
            return Err(Error::InvalidCodebook);
        }

        let dimensions = packet.read_bits(16) as u16;
        let entries = packet.read_bits(24) as u32;

        // The entry count is attacker-controlled (up-to 16M), so the length buffer is reserved
        // fallibly rather than trusted to the allocator.
        let mut code_lens = Vec::new();

        code_lens.try_reserve_exact(entries as usize).map_err(|_| Error::Allocation)?;

        let is_length_ordered = packet.read_bool();

        if !is_length_ordered {
            // Codeword list is not length ordered.
            let is_sparse = packet.read_bool();

            for _ in 0..entries {
                let code_len = if !is_sparse || packet.read_bool() {
                    packet.read_bits(5) as u8 + 1
                }
                else {
                    // Unused entries have a length of 0.
                    0
                };

                code_lens.push(code_len);
            }
        }
        else {
            // Codeword list is length ordered: runs of entries share a length that increments
            // by 1 after each run.
            let mut cur_entry = 0u32;
            let mut cur_len = packet.read_bits(5) as u8 + 1;

            while cur_entry != entries {
                let num = packet.read_bits(ilog(entries - cur_entry)) as u32;

                if cur_entry.saturating_add(num) > entries {
                    return Err(Error::InvalidCodebook);
                }

                code_lens.extend(std::iter::repeat(cur_len).take(num as usize));

                cur_entry += num;
                cur_len = cur_len.wrapping_add(1);

                // Run counts read past the packet's end can repeat 0 forever; a stream that
                // exhausts its setup packet mid-codebook cannot be valid.
                if packet.is_past_end() {
                    return Err(Error::InvalidCodebook);
                }
            }
        }

        let lookup_type = packet.read_bits(4) as u8;

        match lookup_type {
            0 => (),
            1 | 2 => {
                // Minimum value, delta value (packed floats), value width, and sequence flag.
                // None of these affect block-size extraction.
                let _min_value = packet.read_bits(32);
                let _delta_value = packet.read_bits(32);
                let value_bits = packet.read_bits(4) as u32 + 1;
                let _sequence_p = packet.read_bool();

                let lookup_values = if lookup_type == 1 {
                    u64::from(lookup1_values(entries, dimensions)?)
                }
                else {
                    u64::from(entries) * u64::from(dimensions)
                };

                packet.skip_bits(lookup_values * u64::from(value_bits));
            }
            _ => return Err(Error::InvalidCodebook),
        }

        Ok(Codebook { dimensions, code_lens, lookup_type })
    }
}

/// As defined in section 9.2.3 of the Vorbis I specification.
///
/// Returns the greatest integer for which the return value to the power of `dimensions` is less
/// than or equal to `entries`, found by incremental search.
fn lookup1_values(entries: u32, dimensions: u16) -> Result<u32> {
    // With 0 dimensions every candidate satisfies x^0 <= entries and the search cannot
    // terminate.
    if dimensions == 0 {
        return Err(Error::InvalidCodebook);
    }

    let mut value = 0u32;

    loop {
        let next = u64::from(value) + 1;

        match next.checked_pow(u32::from(dimensions)) {
            Some(pow) if pow <= u64::from(entries) => value += 1,
            _ => break,
        }
    }

    Ok(value)
}
