/// Directory entry views and status codes

use crate::date::Date;
use crate::directory::{layout, VolumeDirectory, BYTES_PER_BLOCK};
use crate::disk::Disk;
use crate::error::Result;
use crate::filename::Filename;

/// Status byte of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Unused or deleted slot
    Invalid,
    /// Slot describes a live file
    Valid,
    /// Slot erased by a whole-disk erase
    DiskErased,
    /// File queued for replacement
    Replace,
    /// Tentative file, not yet committed
    Tentative,
    /// Any other status byte found on disk
    Other(u8),
}

impl EntryStatus {
    /// The on-disk status byte
    pub fn to_raw(self) -> u8 {
        match self {
            EntryStatus::Invalid => 0x00,
            EntryStatus::Valid => 0x01,
            EntryStatus::DiskErased => 0xe5,
            EntryStatus::Replace => 0xfe,
            EntryStatus::Tentative => 0xff,
            EntryStatus::Other(raw) => raw,
        }
    }
}

impl From<u8> for EntryStatus {
    fn from(raw: u8) -> Self {
        match raw {
            0x00 => EntryStatus::Invalid,
            0x01 => EntryStatus::Valid,
            0xe5 => EntryStatus::DiskErased,
            0xfe => EntryStatus::Replace,
            0xff => EntryStatus::Tentative,
            other => EntryStatus::Other(other),
        }
    }
}

/// A read-only view of one entry slot
///
/// Holds no data of its own: every accessor computes its field offset
/// from the slot index into the owning directory's live buffer, so a view
/// is always current. Obtained through [`VolumeDirectory::entry`] or
/// [`VolumeDirectory::entries`]; mutation goes through the directory's
/// methods with the slot index.
#[derive(Debug, Clone, Copy)]
pub struct DirectoryEntry<'d> {
    dir: &'d VolumeDirectory,
    index: usize,
}

impl<'d> DirectoryEntry<'d> {
    pub(crate) fn new(dir: &'d VolumeDirectory, index: usize) -> Self {
        Self { dir, index }
    }

    /// Slot index of this entry, stable for the entry's lifetime
    pub fn index(&self) -> usize {
        self.index
    }

    /// The entry's status byte
    pub fn status(&self) -> EntryStatus {
        EntryStatus::from(self.dir.status_raw(self.index))
    }

    /// The entry's filename as stored on disk
    pub fn filename(&self) -> Filename {
        Filename::from_parts(self.dir.filename_bytes(self.index))
    }

    /// First block of the file
    pub fn first_block(&self) -> u16 {
        self.dir.read_u16(layout::FIRST_BLOCK + self.index * 2)
    }

    /// Last block of the file, inclusive
    pub fn last_block(&self) -> u16 {
        self.dir.read_u16(layout::LAST_BLOCK + self.index * 2)
    }

    /// Number of blocks the file occupies
    ///
    /// A corrupt directory can carry an inverted block range; that reads
    /// as zero blocks rather than panicking.
    pub fn block_count(&self) -> u16 {
        let first = self.first_block();
        let last = self.last_block();
        if first > last {
            0
        } else {
            (last - first).saturating_add(1)
        }
    }

    /// The file's modification date
    pub fn date(&self) -> Date {
        Date::from_raw(self.dir.read_u16(layout::FDATE + self.index * 2))
    }

    /// Read the file's blocks from the disk
    pub fn read(&self, disk: &Disk) -> Result<Vec<u8>> {
        let block_count = self.block_count() as usize;
        let mut data = vec![0u8; block_count * BYTES_PER_BLOCK];
        disk.read_blocks(self.first_block(), block_count, &mut data)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for raw in [0x00u8, 0x01, 0xe5, 0xfe, 0xff, 0x42] {
            assert_eq!(EntryStatus::from(raw).to_raw(), raw);
        }
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(EntryStatus::from(0x00), EntryStatus::Invalid);
        assert_eq!(EntryStatus::from(0x01), EntryStatus::Valid);
        assert_eq!(EntryStatus::from(0xe5), EntryStatus::DiskErased);
        assert_eq!(EntryStatus::from(0xfe), EntryStatus::Replace);
        assert_eq!(EntryStatus::from(0xff), EntryStatus::Tentative);
        assert_eq!(EntryStatus::from(0x07), EntryStatus::Other(0x07));
    }
}
