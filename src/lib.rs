// Mogg
// Copyright (c) 2026 The Mogg Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural parsing of Ogg Vorbis streams, and repackaging into the mogg container.
//!
//! The parser extracts page/packet framing, the Vorbis identification header, and a fully
//! validated setup header from a stream without ever decoding audio samples. What it yields per
//! audio packet (stream offset, block size, cumulative sample position) is exactly the
//! information a seek map needs, and the [`mogg`] module uses it to repackage the stream into
//! the container layout certain game audio engines expect.
//!
//! Parsing is forward-only and sequential. A reader owns its parse state outright, so
//! independent streams can be parsed in parallel with independent readers; a single reader is
//! not meant to be shared.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]
// Where possible, expressing an algorithm as closely as possible to the specification is
// preferrable.
#![allow(clippy::manual_range_contains)]
#![allow(clippy::collapsible_else_if)]

pub mod errors;
pub mod map;
pub mod mogg;

mod bitstream;
mod codebook;
mod common;
mod floor;
mod header;
mod io;
mod page;
mod parser;
mod residue;

#[cfg(test)]
mod testutil;

pub use bitstream::{Packet, MAX_PACKET_SIZE};
pub use codebook::Codebook;
pub use errors::{Error, Result};
pub use header::{IdentHeader, Mapping, Mode, SetupHeader, SubMap};
pub use io::SourceStream;
pub use map::{MapEntry, OggMap};
pub use mogg::write_unencrypted;
pub use page::PageHeader;
pub use parser::{OggVorbisReader, PacketInfo};
pub use residue::Residue;
