// Mogg
// Copyright (c) 2026 The Mogg Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error;
use std::fmt;
use std::result;

/// `Error` enumerates all possible errors reported while parsing an Ogg Vorbis stream or writing
/// a mogg container.
///
/// The taxonomy is flat: each variant names the field or framing constraint that was violated,
/// and carries no nested cause. The first violation aborts the parse and is surfaced verbatim.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The source could not provide the requested bytes (short read, likely EOF).
    Read,
    /// The 4-byte OggS capture pattern was not found at the expected page boundary.
    NoCapturePattern,
    /// A logical packet exceeded the maximum supported packet size.
    PacketTooLarge,
    /// A buffer for parsed structures could not be allocated.
    Allocation,
    /// The stream's first logical packet did not identify as Vorbis.
    NotVorbis,
    /// A field violated a structural constraint not covered by a more specific variant.
    InvalidData,
    /// The Vorbis version was not 0.
    InvalidVersion,
    /// The channel count was 0.
    InvalidChannels,
    /// The sample rate was 0.
    InvalidSampleRate,
    /// blocksize_0 was out of range, or exceeded blocksize_1.
    InvalidBlocksize0,
    /// blocksize_1 was out of range.
    InvalidBlocksize1,
    /// A codebook failed structural validation.
    InvalidCodebook,
    /// A mode declared a non-zero window or transform type, or a bad mapping index.
    InvalidMode,
    /// A mapping failed structural validation.
    InvalidMapping,
    /// A floor failed structural validation.
    InvalidFloor,
    /// A residue failed structural validation.
    InvalidResidues,
    /// A mandatory framing bit was unset.
    FramingError,
    /// The container output sink failed.
    Write,
}

impl Error {
    /// Gets a human-readable description of the error, suitable for logging.
    ///
    /// This mapping is purely descriptive and not part of the error taxonomy's semantics.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Error::Read => "read error (probably EOF)",
            Error::NoCapturePattern => "could not find a capture pattern (OggS)",
            Error::PacketTooLarge => "encountered a packet that was too large",
            Error::Allocation => "out of memory or other allocation failure",
            Error::NotVorbis => "codec in the ogg stream did not identify as vorbis",
            Error::InvalidData => "invalid data was detected",
            Error::InvalidVersion => "invalid vorbis version",
            Error::InvalidChannels => "invalid number of audio channels",
            Error::InvalidSampleRate => "invalid sample rate",
            Error::InvalidBlocksize0 => "invalid blocksize 0",
            Error::InvalidBlocksize1 => "invalid blocksize 1",
            Error::InvalidCodebook => "invalid codebook format",
            Error::InvalidMode => "invalid mode",
            Error::InvalidMapping => "invalid mapping",
            Error::InvalidFloor => "invalid floor",
            Error::InvalidResidues => "invalid residues",
            Error::FramingError => "framing error",
            Error::Write => "write error",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;
