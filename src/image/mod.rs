/// Disk image data structures

use crate::error::{ApexError, Result};
use crate::format::ImageFormat;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// A whole-disk byte buffer with format-aware persistence
///
/// The buffer always holds sectors in canonical logical order; the sector
/// permutation of the chosen [`ImageFormat`] is applied while streaming to
/// and from the image file, never on in-memory access.
#[derive(Debug, Clone)]
pub struct DiskImage {
    format: ImageFormat,
    image: Vec<u8>,
}

impl DiskImage {
    /// Create a new zero-filled image for the given format
    pub fn new(format: ImageFormat) -> Self {
        Self {
            format,
            image: vec![0u8; format.geometry().bytes_per_disk()],
        }
    }

    /// Open an image file, deinterleaving it into logical order
    pub fn open<P: AsRef<Path>>(format: ImageFormat, path: P) -> Result<Self> {
        let mut image = Self::new(format);
        image.load(format, path)?;
        Ok(image)
    }

    /// Get the active format
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Total image size in bytes
    pub fn size(&self) -> usize {
        self.image.len()
    }

    /// Raw image bytes in logical order
    pub fn bytes(&self) -> &[u8] {
        &self.image
    }

    fn byte_range(&self, track: u8, head: u8, sector: u8, sector_count: usize) -> Result<(usize, usize)> {
        let geometry = self.format.geometry();
        let bytes_per_sector = geometry.bytes_per_sector as usize;
        let offset = ((track as usize * geometry.heads as usize + head as usize)
            * geometry.sectors as usize
            + sector as usize)
            * bytes_per_sector;
        let length = sector_count * bytes_per_sector;
        // Historical boundary check: the final legal byte is also rejected.
        if offset + length >= self.image.len() {
            return Err(ApexError::OutOfRange {
                offset,
                length,
                size: self.image.len(),
            });
        }
        Ok((offset, length))
    }

    /// Read consecutive sectors into `data`
    ///
    /// `data` must hold at least `sector_count` sectors' worth of bytes.
    pub fn read(
        &self,
        track: u8,
        head: u8,
        sector: u8,
        sector_count: usize,
        data: &mut [u8],
    ) -> Result<()> {
        let (offset, length) = self.byte_range(track, head, sector, sector_count)?;
        data[..length].copy_from_slice(&self.image[offset..offset + length]);
        Ok(())
    }

    /// Write consecutive sectors from `data`
    pub fn write(
        &mut self,
        track: u8,
        head: u8,
        sector: u8,
        sector_count: usize,
        data: &[u8],
    ) -> Result<()> {
        let (offset, length) = self.byte_range(track, head, sector, sector_count)?;
        self.image[offset..offset + length].copy_from_slice(&data[..length]);
        Ok(())
    }

    /// Zero the entire image buffer
    pub fn clear(&mut self) {
        self.image.fill(0);
    }

    /// Load an image file under the given format
    ///
    /// Interleaved formats are streamed one physical sector at a time
    /// through the deinterleave table so the buffer ends up in logical
    /// order; formats without a table are copied sequentially.
    pub fn load<P: AsRef<Path>>(&mut self, format: ImageFormat, path: P) -> Result<()> {
        self.format = format;
        let geometry = format.geometry();
        self.image.resize(geometry.bytes_per_disk(), 0);

        let mut file = File::open(path)?;
        match geometry.deinterleave {
            Some(map) => {
                let bytes_per_sector = geometry.bytes_per_sector as usize;
                for track in 0..geometry.cylinders as usize {
                    for &logical in map.iter() {
                        let offset =
                            (track * geometry.sectors as usize + logical as usize) * bytes_per_sector;
                        file.read_exact(&mut self.image[offset..offset + bytes_per_sector])?;
                    }
                }
            }
            None => file.read_exact(&mut self.image)?,
        }
        Ok(())
    }

    /// Save the image to a file under the given format
    pub fn save<P: AsRef<Path>>(&self, format: ImageFormat, path: P) -> Result<()> {
        let geometry = format.geometry();
        let mut file = File::create(path)?;
        match geometry.deinterleave {
            Some(map) => {
                let bytes_per_sector = geometry.bytes_per_sector as usize;
                for track in 0..geometry.cylinders as usize {
                    for &logical in map.iter() {
                        let offset =
                            (track * geometry.sectors as usize + logical as usize) * bytes_per_sector;
                        file.write_all(&self.image[offset..offset + bytes_per_sector])?;
                    }
                }
            }
            None => file.write_all(&self.image)?,
        }
        Ok(())
    }
}
