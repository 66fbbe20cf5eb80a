// Mogg
// Copyright (c) 2026 The Mogg Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `floor` module consumes floor configurations from the setup header.
//!
//! Floors describe the spectral envelope and play no part in block-size extraction, so nothing
//! is retained beyond the floor type; the parse exists to validate the structure and advance the
//! bit cursor by exactly the right amount.

use crate::bitstream::Packet;
use crate::errors::{Error, Result};

/// Consumes a type 0 (LSP-based) floor configuration (section 6.2 of the Vorbis I
/// specification).
pub fn read_floor0(packet: &mut Packet) -> Result<()> {
    let _order = packet.read_bits(8);
    let _rate = packet.read_bits(16);
    let _bark_map_size = packet.read_bits(16);
    let _amplitude_bits = packet.read_bits(6);
    let _amplitude_offset = packet.read_bits(8);

    let number_of_books = packet.read_bits(4) + 1;

    for _ in 0..number_of_books {
        let _book = packet.read_bits(8);
    }

    Ok(())
}

/// Consumes a type 1 (line-based) floor configuration (section 7.2 of the Vorbis I
/// specification), validating its codebook references against `max_codebook`.
pub fn read_floor1(packet: &mut Packet, max_codebook: usize) -> Result<()> {
    // Up-to 31 partitions, each naming one of up-to 16 classes.
    let partitions = packet.read_bits(5) as usize;

    let mut class_list = [0u8; 32];
    let mut dimensions = [0u8; 16];

    if partitions > 0 {
        let mut max_class = 0u8;

        for class in class_list[..partitions].iter_mut() {
            *class = packet.read_bits(4) as u8;
            max_class = max_class.max(*class);
        }

        for dim in dimensions[..usize::from(max_class) + 1].iter_mut() {
            *dim = packet.read_bits(3) as u8 + 1;

            let subclasses = packet.read_bits(2);

            if subclasses != 0 {
                let masterbook = packet.read_bits(8) as usize;

                if masterbook >= max_codebook {
                    return Err(Error::InvalidFloor);
                }
            }

            for _ in 0..(1u32 << subclasses) {
                // Subclass books are biased by one, with 0 (stored as -1) meaning unused.
                let subclass_book = packet.read_bits(8) as i32 - 1;

                if subclass_book >= max_codebook as i32 {
                    return Err(Error::InvalidFloor);
                }
            }
        }
    }

    let _multiplier = packet.read_bits(2);
    let rangebits = packet.read_bits(4) as u32;

    // The curve's X list always holds the two range endpoints, so the count starts at 2 and may
    // not exceed 64 in total.
    let mut floor1_values = 2u32;

    for &class in class_list[..partitions].iter() {
        for _ in 0..dimensions[usize::from(class)] {
            let _x = packet.read_bits(rangebits);

            floor1_values += 1;

            if floor1_values > 64 {
                return Err(Error::InvalidFloor);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_floor0, read_floor1};
    use crate::bitstream::Packet;
    use crate::errors::Error;
    use crate::testutil::BitWriter;

    fn packet_with(data: &[u8]) -> Packet {
        let mut packet = Packet::new();
        packet.buf_mut()[..data.len()].copy_from_slice(data);
        packet.reset(data.len());
        packet
    }

    #[test]
    fn verify_floor0_consumes_exactly_its_fields() {
        let mut bw = BitWriter::new();
        bw.put(8, 12); // order
        bw.put(16, 44100); // rate
        bw.put(16, 256); // bark map size
        bw.put(6, 10); // amplitude bits
        bw.put(8, 128); // amplitude offset
        bw.put(4, 1); // 2 books
        bw.put(8, 0);
        bw.put(8, 3);
        bw.put(8, 0x7d); // trailing marker

        let mut packet = packet_with(&bw.finish());

        read_floor0(&mut packet).unwrap();
        assert_eq!(packet.read_bits(8), 0x7d);
        assert!(!packet.is_past_end());
    }

    fn write_single_class_floor1(bw: &mut BitWriter, masterbook: u64, subclass_book: u64) {
        bw.put(5, 1); // 1 partition
        bw.put(4, 0); // class 0
        bw.put(3, 1); // dimension 2
        bw.put(2, 1); // 2 subclasses
        bw.put(8, masterbook);
        bw.put(8, subclass_book);
        bw.put(8, 0); // second subclass book, unused
        bw.put(2, 0); // multiplier
        bw.put(4, 4); // rangebits
        bw.put(4, 3); // 2 curve values
        bw.put(4, 9);
    }

    #[test]
    fn verify_floor1_round_trip() {
        let mut bw = BitWriter::new();
        write_single_class_floor1(&mut bw, 0, 1);
        bw.put(8, 0x33);

        let mut packet = packet_with(&bw.finish());

        read_floor1(&mut packet, 2).unwrap();
        assert_eq!(packet.read_bits(8), 0x33);
        assert!(!packet.is_past_end());
    }

    #[test]
    fn verify_floor1_masterbook_out_of_range() {
        let mut bw = BitWriter::new();
        write_single_class_floor1(&mut bw, 2, 1);

        let mut packet = packet_with(&bw.finish());

        assert_eq!(read_floor1(&mut packet, 2), Err(Error::InvalidFloor));
    }

    #[test]
    fn verify_floor1_subclass_book_out_of_range() {
        let mut bw = BitWriter::new();
        write_single_class_floor1(&mut bw, 0, 3);

        let mut packet = packet_with(&bw.finish());

        assert_eq!(read_floor1(&mut packet, 2), Err(Error::InvalidFloor));
    }

    #[test]
    fn verify_floor1_zero_partitions() {
        let mut bw = BitWriter::new();
        bw.put(5, 0); // no partitions
        bw.put(2, 0);
        bw.put(4, 0);
        bw.put(8, 0x2c);

        let mut packet = packet_with(&bw.finish());

        read_floor1(&mut packet, 1).unwrap();
        assert_eq!(packet.read_bits(8), 0x2c);
    }

    #[test]
    fn verify_floor1_value_count_limit() {
        let mut bw = BitWriter::new();
        // 16 partitions of one class with dimension 8 produce 2 + 128 curve values.
        bw.put(5, 16);
        for _ in 0..16 {
            bw.put(4, 0);
        }
        bw.put(3, 7); // dimension 8
        bw.put(2, 0); // no subclasses
        bw.put(8, 0); // single subclass book, unused
        bw.put(2, 0);
        bw.put(4, 0); // rangebits 0: curve values consume no bits
        // No curve values follow.

        let mut packet = packet_with(&bw.finish());

        assert_eq!(read_floor1(&mut packet, 1), Err(Error::InvalidFloor));
    }
}
