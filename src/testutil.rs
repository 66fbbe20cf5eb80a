// Mogg
// Copyright (c) 2026 The Mogg Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Test-only builders for byte-exact Ogg Vorbis fixtures.
//!
//! Tests synthesize streams rather than carrying binary fixtures, so every property can be
//! exercised against input whose construction is visible in the test itself.

/// A least-significant-bit-first bit writer, the mirror image of [`crate::bitstream::Packet`]'s
/// reader.
pub struct BitWriter {
    bytes: Vec<u8>,
    bit: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        BitWriter { bytes: Vec::new(), bit: 0 }
    }

    /// Appends the low `width` bits of `value`, least-significant-bit first.
    pub fn put(&mut self, width: u32, value: u64) {
        for i in 0..width {
            if self.bit == 0 {
                self.bytes.push(0);
            }

            let bit = ((value >> i) & 0x1) as u8;

            *self.bytes.last_mut().unwrap() |= bit << self.bit;

            self.bit = (self.bit + 1) & 0x7;
        }
    }

    /// Appends whole bytes. Panics unless the writer is byte-aligned.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        assert_eq!(self.bit, 0, "unaligned byte write");
        self.bytes.extend_from_slice(bytes);
    }

    /// Returns the written bytes, with any trailing partial byte zero-padded.
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Field values for building an identification header packet.
pub struct IdentParams {
    pub version: u32,
    pub channels: u8,
    pub sample_rate: u32,
    pub blocksize_0: u8,
    pub blocksize_1: u8,
    pub framing: u8,
}

impl Default for IdentParams {
    fn default() -> Self {
        IdentParams {
            version: 0,
            channels: 2,
            sample_rate: 44100,
            blocksize_0: 8,
            blocksize_1: 11,
            framing: 1,
        }
    }
}

/// Builds a 30-byte identification header packet.
pub fn build_ident_packet(params: &IdentParams) -> Vec<u8> {
    let mut bw = BitWriter::new();

    bw.put_bytes(&[0x01]);
    bw.put_bytes(b"vorbis");
    bw.put(32, u64::from(params.version));
    bw.put(8, u64::from(params.channels));
    bw.put(32, u64::from(params.sample_rate));
    bw.put(32, 0); // bitrate maximum
    bw.put(32, 0); // bitrate nominal
    bw.put(32, 0); // bitrate minimum
    bw.put(4, u64::from(params.blocksize_0));
    bw.put(4, u64::from(params.blocksize_1));
    bw.put(1, u64::from(params.framing));

    let bytes = bw.finish();
    assert_eq!(bytes.len(), 30);
    bytes
}

/// Field values for building a minimal setup header packet: one empty codebook, one type 1
/// floor with no partitions, one type 0 residue with one empty classification, one
/// single-submap mapping, and the given modes.
pub struct SetupParams {
    pub time_transform: u16,
    pub mapping_reserved: u8,
    /// (block_flag, window_type, transform_type, mapping) per mode.
    pub modes: Vec<(bool, u16, u16, u8)>,
    pub framing: bool,
}

impl Default for SetupParams {
    fn default() -> Self {
        SetupParams {
            time_transform: 0,
            mapping_reserved: 0,
            // A short-block mode and a long-block mode.
            modes: vec![(false, 0, 0, 0), (true, 0, 0, 0)],
            framing: true,
        }
    }
}

/// Builds a setup header packet.
pub fn build_setup_packet(params: &SetupParams) -> Vec<u8> {
    let mut bw = BitWriter::new();

    bw.put_bytes(&[0x05]);
    bw.put_bytes(b"vorbis");

    // One codebook with no entries and no lookup.
    bw.put(8, 0);
    bw.put(24, 0x564342);
    bw.put(16, 0); // dimensions
    bw.put(24, 0); // entries
    bw.put(1, 0); // unordered
    bw.put(1, 0); // dense
    bw.put(4, 0); // no lookup

    // One time-domain transform slot.
    bw.put(6, 0);
    bw.put(16, u64::from(params.time_transform));

    // One type 1 floor with no partitions.
    bw.put(6, 0);
    bw.put(16, 1);
    bw.put(5, 0); // partitions
    bw.put(2, 0); // multiplier
    bw.put(4, 0); // rangebits

    // One type 0 residue with a single empty classification.
    bw.put(6, 0);
    bw.put(16, 0);
    bw.put(24, 0); // begin
    bw.put(24, 0); // end
    bw.put(24, 0); // partition size
    bw.put(6, 0); // classifications
    bw.put(8, 0); // classbook
    bw.put(3, 0); // low bits
    bw.put(1, 0); // no high bits

    // One mapping with a single submap and no coupling.
    bw.put(6, 0);
    bw.put(16, 0); // mapping type
    bw.put(1, 0); // default submap count
    bw.put(1, 0); // no coupling steps
    bw.put(2, u64::from(params.mapping_reserved));
    bw.put(8, 0); // time configuration placeholder
    bw.put(8, 0); // floor
    bw.put(8, 0); // residue

    // Modes.
    bw.put(6, params.modes.len() as u64 - 1);

    for &(block_flag, window_type, transform_type, mapping) in params.modes.iter() {
        bw.put(1, u64::from(block_flag));
        bw.put(16, u64::from(window_type));
        bw.put(16, u64::from(transform_type));
        bw.put(8, u64::from(mapping));
    }

    bw.put(1, u64::from(params.framing));

    bw.finish()
}

/// Builds one Ogg page from explicit segment lengths and payload bytes. The segment lengths
/// must sum to the payload length; they are deliberately independent so that tests can express
/// packets spanning page boundaries.
pub fn build_page(absgp: u64, sequence: u32, segments: &[u8], data: &[u8]) -> Vec<u8> {
    assert_eq!(segments.iter().map(|&s| usize::from(s)).sum::<usize>(), data.len());

    let mut page = Vec::new();

    page.extend_from_slice(b"OggS");
    page.push(0); // version
    page.push(0); // flags
    page.extend_from_slice(&absgp.to_le_bytes());
    page.extend_from_slice(&0x1d2d3d4du32.to_le_bytes()); // serial
    page.extend_from_slice(&sequence.to_le_bytes());
    page.extend_from_slice(&0u32.to_le_bytes()); // checksum, never verified
    page.push(segments.len() as u8);
    page.extend_from_slice(segments);
    page.extend_from_slice(data);

    page
}

/// Lays a packet out as page segments: as many 255 markers as needed, then the remainder.
pub fn segments_for(len: usize) -> Vec<u8> {
    let mut segments = vec![255u8; len / 255];
    segments.push((len % 255) as u8);
    segments
}

/// Builds a complete three-header Ogg Vorbis stream followed by single-byte audio packets, one
/// per entry in `modes` (the mode number each packet selects, assuming 2 configured modes).
pub fn build_stream(ident: &IdentParams, setup: &SetupParams, modes: &[u8]) -> Vec<u8> {
    let ident_packet = build_ident_packet(ident);
    let comment_packet = [0x03u8];
    let setup_packet = build_setup_packet(setup);

    let mut stream = build_page(0, 0, &segments_for(ident_packet.len()), &ident_packet);

    let mut header_data = comment_packet.to_vec();
    header_data.extend_from_slice(&setup_packet);

    let mut header_segments = segments_for(comment_packet.len());
    header_segments.extend_from_slice(&segments_for(setup_packet.len()));

    stream.extend_from_slice(&build_page(0, 1, &header_segments, &header_data));

    if !modes.is_empty() {
        // Audio packets: bit 0 = 0 (audio), bit 1 = mode number (2 modes -> 1 bit).
        let audio_data: Vec<u8> = modes.iter().map(|&m| m << 1).collect();
        let audio_segments = vec![1u8; audio_data.len()];

        stream.extend_from_slice(&build_page(0, 2, &audio_segments, &audio_data));
    }

    stream
}
