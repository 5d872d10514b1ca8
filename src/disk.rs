/// Apex volume on top of a disk image

use crate::directory::{VolumeDirectory, BYTES_PER_BLOCK};
use crate::error::Result;
use crate::format::ImageFormat;
use crate::image::DiskImage;
use rand::Rng;
use std::path::Path;

/// Which of the two independent directories on a volume
///
/// Every volume carries a primary and a backup directory. They are not
/// mirrored automatically; keeping them consistent is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryType {
    /// Main directory at block 9
    Primary,
    /// Backup directory at block 13
    Backup,
}

impl DirectoryType {
    /// First block of this directory
    pub fn start_block(&self) -> u16 {
        match self {
            DirectoryType::Primary => 9,
            DirectoryType::Backup => 13,
        }
    }
}

/// An Apex volume: a disk image addressed in 256-byte logical blocks
///
/// One sector holds one block, so block N lives at track N / 16,
/// sector N % 16 of the canonical image buffer.
#[derive(Debug, Clone)]
pub struct Disk {
    image: DiskImage,
}

impl Disk {
    /// Create a blank volume for the given format
    pub fn new(format: ImageFormat) -> Self {
        Self {
            image: DiskImage::new(format),
        }
    }

    /// Open a disk image file as a volume
    pub fn open<P: AsRef<Path>>(format: ImageFormat, path: P) -> Result<Self> {
        Ok(Self {
            image: DiskImage::open(format, path)?,
        })
    }

    /// Load an image file into this volume
    pub fn load<P: AsRef<Path>>(&mut self, format: ImageFormat, path: P) -> Result<()> {
        self.image.load(format, path)
    }

    /// Save this volume to an image file
    pub fn save<P: AsRef<Path>>(&self, format: ImageFormat, path: P) -> Result<()> {
        self.image.save(format, path)
    }

    /// The underlying disk image
    pub fn image(&self) -> &DiskImage {
        &self.image
    }

    /// Read consecutive blocks into `data`
    pub fn read_blocks(&self, block: u16, block_count: usize, data: &mut [u8]) -> Result<()> {
        let sectors = self.image.format().geometry().sectors as u16;
        self.image.read(
            (block / sectors) as u8,
            0,
            (block % sectors) as u8,
            block_count,
            data,
        )
    }

    /// Write consecutive blocks from `data`
    pub fn write_blocks(&mut self, block: u16, block_count: usize, data: &[u8]) -> Result<()> {
        let sectors = self.image.format().geometry().sectors as u16;
        self.image.write(
            (block / sectors) as u8,
            0,
            (block % sectors) as u8,
            block_count,
            data,
        )
    }

    /// Read one block
    pub fn read_block(&self, block: u16) -> Result<[u8; BYTES_PER_BLOCK]> {
        let mut data = [0u8; BYTES_PER_BLOCK];
        self.read_blocks(block, 1, &mut data)?;
        Ok(data)
    }

    /// Open one of the volume's directories
    pub fn directory(&self, directory_type: DirectoryType) -> Result<VolumeDirectory> {
        VolumeDirectory::open(self, directory_type)
    }

    /// Format the volume as empty
    ///
    /// Zeroes the whole image and writes identical primary and backup
    /// directories for a volume of `block_count` blocks. When
    /// `volume_number` is `None` a random non-zero id is assigned.
    pub fn initialize(&mut self, block_count: u16, volume_number: Option<u16>) -> Result<()> {
        let volume_number =
            volume_number.unwrap_or_else(|| rand::thread_rng().gen_range(1..=u16::MAX));
        self.image.clear();
        for directory_type in [DirectoryType::Primary, DirectoryType::Backup] {
            let mut dir = self.directory(directory_type)?;
            dir.initialize(self, block_count, volume_number)?;
        }
        Ok(())
    }
}
