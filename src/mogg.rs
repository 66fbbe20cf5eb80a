// Mogg
// Copyright (c) 2026 The Mogg Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `mogg` module writes the output container: a small header, the serialized seek map, and
//! a verbatim copy of the original stream.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::errors::{Error, Result};
use crate::map::OggMap;
use crate::parser::OggVorbisReader;

/// The container version tag.
pub const MOGG_VERSION: u32 = 0x0a;

/// Repackages an Ogg Vorbis stream as an unencrypted mogg container.
///
/// The layout is a little-endian version tag, a little-endian offset to the start of the audio
/// data (8 plus the serialized map length), the map bytes, then the input stream copied
/// byte-for-byte from its beginning. The stream is parsed and the map built in full before the
/// first output byte, so a failed parse leaves the sink untouched.
pub fn write_unencrypted<R, W>(input: R, mut output: W) -> Result<()>
where
    R: Read + Seek,
    W: Write,
{
    let mut reader = OggVorbisReader::try_new(input)?;
    let map = OggMap::build(&mut reader)?;

    let map_bytes = map.serialize();

    let mut input = reader.into_inner();

    input.seek(SeekFrom::Start(0)).map_err(|_| Error::Read)?;

    let data_offset = 8 + map_bytes.len() as u32;

    output.write_all(&MOGG_VERSION.to_le_bytes()).map_err(|_| Error::Write)?;
    output.write_all(&data_offset.to_le_bytes()).map_err(|_| Error::Write)?;
    output.write_all(&map_bytes).map_err(|_| Error::Write)?;

    io::copy(&mut input, &mut output).map_err(|_| Error::Write)?;

    Ok(())
}
