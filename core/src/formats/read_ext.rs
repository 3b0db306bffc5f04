use std::io::{self, Read};

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

/// Byte order of the floats in a binary file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    pub fn read_f32_into(self, src: &[u8], dst: &mut [f32]) {
        match self {
            Endian::Little => LittleEndian::read_f32_into(src, dst),
            Endian::Big => BigEndian::read_f32_into(src, dst),
        }
    }
}

pub trait ReadExt {
    /// Reads at most `limit` bytes, stopping early only at EOF.
    ///
    /// The buffer grows with the data actually read, so a large `limit` over
    /// a short input allocates no more than the input.
    fn read_up_to(&mut self, limit: usize) -> Result<Vec<u8>, io::Error>;
    fn read_all(&mut self) -> Result<Vec<u8>, io::Error>;
}

impl<T: Read> ReadExt for T {
    fn read_up_to(&mut self, limit: usize) -> Result<Vec<u8>, io::Error> {
        let mut buf = Vec::new();
        self.take(limit as u64).read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn read_all(&mut self) -> Result<Vec<u8>, io::Error> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf)?;
        Ok(buf)
    }
}
