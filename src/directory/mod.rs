/// Volume directory and free-space management

/// Directory entry view and status codes
pub mod entry;
/// On-disk directory layout offsets
pub mod layout;

pub use entry::{DirectoryEntry, EntryStatus};

use crate::date::Date;
use crate::disk::{Disk, DirectoryType};
use crate::error::{ApexError, Result};
use crate::filename::{Filename, EXTENSION_CHARS, FILENAME_CHARS};

/// Bytes in one logical block
pub const BYTES_PER_BLOCK: usize = 256;
/// Blocks occupied by one directory
pub const BLOCKS_PER_DIRECTORY: usize = 4;
/// Total directory size in bytes
pub const DIRECTORY_BYTES: usize = BLOCKS_PER_DIRECTORY * BYTES_PER_BLOCK;
/// Fixed number of entry slots in a directory
pub const ENTRIES_PER_DIRECTORY: usize = 48;
/// Maximum volume title length in bytes
pub const MAX_TITLE_CHARS: usize = 32;
/// First block available for file data; everything below is boot code
/// and the two directories
pub const FILE_AREA_START_BLOCK: usize = 17;

/// A maximal run of contiguous free blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeExtent {
    /// First free block of the extent
    pub start: u16,
    /// Number of free blocks in the extent
    pub count: u16,
}

/// One of a volume's two directories, with its derived free-block bitmap
///
/// Owns a decoded copy of the directory's four blocks. The free bitmap is
/// a pure function of those bytes and is fully recomputed after every
/// mutation rather than patched incrementally. Mutating operations write
/// the whole directory back through the owning [`Disk`], which is passed
/// explicitly per call; opening both directories of one disk is allowed
/// but nothing keeps them consistent.
#[derive(Debug, Clone)]
pub struct VolumeDirectory {
    directory_type: DirectoryType,
    start_block: u16,
    data: [u8; DIRECTORY_BYTES],
    free_bitmap: Vec<bool>,
}

impl VolumeDirectory {
    /// Read a directory from the disk and build its free bitmap
    pub fn open(disk: &Disk, directory_type: DirectoryType) -> Result<Self> {
        let start_block = directory_type.start_block();
        let mut directory = Self {
            directory_type,
            start_block,
            data: [0u8; DIRECTORY_BYTES],
            free_bitmap: Vec::new(),
        };
        disk.read_blocks(start_block, BLOCKS_PER_DIRECTORY, &mut directory.data)?;
        directory.rebuild_free_bitmap();
        Ok(directory)
    }

    /// Which directory this is
    pub fn directory_type(&self) -> DirectoryType {
        self.directory_type
    }

    /// First block of this directory on disk
    pub fn start_block(&self) -> u16 {
        self.start_block
    }

    /// View one entry slot
    pub fn entry(&self, index: usize) -> Option<DirectoryEntry<'_>> {
        (index < ENTRIES_PER_DIRECTORY).then(|| DirectoryEntry::new(self, index))
    }

    /// Iterate all 48 entry slots in index order
    ///
    /// Deleted and never-used slots are included; callers filter by
    /// [`EntryStatus`].
    pub fn entries(&self) -> impl Iterator<Item = DirectoryEntry<'_>> {
        (0..ENTRIES_PER_DIRECTORY).map(move |index| DirectoryEntry::new(self, index))
    }

    /// Slot indices of VALID entries whose filename matches the pattern
    pub fn find_entries(&self, pattern: &Filename) -> Vec<usize> {
        self.entries()
            .filter(|e| e.status() == EntryStatus::Valid && pattern.matches(&e.filename()))
            .map(|e| e.index())
            .collect()
    }

    /// Volume size in blocks
    pub fn volume_size_blocks(&self) -> usize {
        self.read_u16(layout::PMAXB) as usize + 1
    }

    /// Number of free blocks on the volume
    pub fn volume_free_blocks(&self) -> usize {
        self.free_bitmap.iter().filter(|&&free| free).count()
    }

    /// All free extents in ascending block order
    pub fn free_extents(&self) -> Vec<FreeExtent> {
        let mut extents = Vec::new();
        let mut block = 0;
        while block < self.free_bitmap.len() {
            if self.free_bitmap[block] {
                let start = block;
                while block < self.free_bitmap.len() && self.free_bitmap[block] {
                    block += 1;
                }
                extents.push(FreeExtent {
                    start: start as u16,
                    count: (block - start) as u16,
                });
            } else {
                block += 1;
            }
        }
        extents
    }

    /// Find the first free extent of at least `requested_block_count`
    /// blocks, first-fit by ascending block number
    ///
    /// `None` means no extent is large enough; that is an ordinary result
    /// the caller must handle, not an error.
    pub fn find_free_blocks(&self, requested_block_count: u16) -> Option<u16> {
        self.free_extents()
            .into_iter()
            .find(|extent| extent.count >= requested_block_count)
            .map(|extent| extent.start)
    }

    /// Find the first unused entry slot
    pub fn allocate_entry(&self) -> Result<usize> {
        self.entries()
            .find(|e| e.status() == EntryStatus::Invalid)
            .map(|e| e.index())
            .ok_or(ApexError::DirectoryFull)
    }

    /// Fill an unused entry slot with a new file record
    ///
    /// Fails with [`ApexError::EntryInUse`] unless the slot's status is
    /// INVALID. The filename is canonicalized to uppercase, the directory
    /// is flagged unsorted, the free bitmap is rebuilt and all four blocks
    /// are written back to the disk.
    pub fn replace(
        &mut self,
        disk: &mut Disk,
        index: usize,
        status: EntryStatus,
        filename: &Filename,
        first_block: u16,
        last_block: u16,
        date: Date,
    ) -> Result<()> {
        if self.status_raw(index) != EntryStatus::Invalid.to_raw() {
            return Err(ApexError::EntryInUse { index });
        }
        self.data[layout::STATUS + index] = status.to_raw();

        let filename = filename.to_uppercase();
        let name_offset = layout::FILENAME + index * (FILENAME_CHARS + EXTENSION_CHARS);
        self.data[name_offset..name_offset + FILENAME_CHARS].copy_from_slice(filename.name());
        self.data[name_offset + FILENAME_CHARS..name_offset + FILENAME_CHARS + EXTENSION_CHARS]
            .copy_from_slice(filename.ext());

        self.write_u16(layout::FIRST_BLOCK + index * 2, first_block);
        self.write_u16(layout::LAST_BLOCK + index * 2, last_block);
        self.write_u16(layout::FDATE + index * 2, date.raw());

        self.set_unsorted(true);
        self.rebuild_free_bitmap();
        self.persist(disk)
    }

    /// Mark an entry as deleted
    pub fn delete_file(&mut self, disk: &mut Disk, index: usize) -> Result<()> {
        self.data[layout::STATUS + index] = EntryStatus::Invalid.to_raw();
        self.rebuild_free_bitmap();
        self.persist(disk)
    }

    /// Write a new file to the volume
    ///
    /// Allocates the first unused entry slot and the first free extent
    /// large enough for `data`, writes the blocks (the last one
    /// zero-padded) and fills in the entry. Fails with
    /// [`ApexError::DirectoryFull`] when no slot is free and
    /// [`ApexError::DiskFull`] when no extent is large enough.
    pub fn write_file(
        &mut self,
        disk: &mut Disk,
        filename: &Filename,
        data: &[u8],
        date: Date,
    ) -> Result<()> {
        let block_count = data.len().div_ceil(BYTES_PER_BLOCK) as u16;
        let index = self.allocate_entry()?;
        let start_block = self
            .find_free_blocks(block_count)
            .ok_or(ApexError::DiskFull {
                blocks: block_count,
            })?;

        let mut block = [0u8; BYTES_PER_BLOCK];
        for (block_index, chunk) in data.chunks(BYTES_PER_BLOCK).enumerate() {
            block[..chunk.len()].copy_from_slice(chunk);
            block[chunk.len()..].fill(0);
            disk.write_blocks(start_block + block_index as u16, 1, &block)?;
        }

        self.replace(
            disk,
            index,
            EntryStatus::Valid,
            filename,
            start_block,
            start_block + block_count - 1,
            date,
        )
    }

    /// Format a freshly zeroed directory
    ///
    /// Only non-zero fields need writing: the max block number, the volume
    /// id, today's date, an empty title, a blank default filename and the
    /// unsorted and unlocked flags.
    pub fn initialize(
        &mut self,
        disk: &mut Disk,
        block_count: u16,
        volume_number: u16,
    ) -> Result<()> {
        self.write_u16(layout::PMAXB, block_count - 1);
        self.write_u16(layout::VOLUME, volume_number);
        self.write_u16(layout::DIRDAT, Date::today().raw());
        // High-bit carriage return marks an empty title
        self.data[layout::TITLE] = 0x8d;
        for i in 0..FILENAME_CHARS + EXTENSION_CHARS {
            self.data[layout::PRNAME + i] = b' ';
        }
        self.set_unsorted(true);
        self.set_locked(false);
        self.rebuild_free_bitmap();
        self.persist(disk)
    }

    /// The volume's unique id
    pub fn volume_number(&self) -> u16 {
        self.read_u16(layout::VOLUME)
    }

    /// The volume date
    pub fn date(&self) -> Date {
        Date::from_raw(self.read_u16(layout::DIRDAT))
    }

    /// Set the volume date and persist the directory
    pub fn set_date(&mut self, disk: &mut Disk, date: Date) -> Result<()> {
        self.write_u16(layout::DIRDAT, date.raw());
        self.persist(disk)
    }

    /// The volume title
    ///
    /// Terminated by a byte with the high bit set; a lone high-bit
    /// carriage return means the title is empty.
    pub fn title(&self) -> String {
        let mut title = String::new();
        for i in 0..MAX_TITLE_CHARS {
            let b = self.data[layout::TITLE + i];
            if b == 0x8d {
                break;
            }
            title.push((b & 0x7f) as char);
            if b & 0x80 != 0 {
                break;
            }
        }
        title
    }

    /// Set the volume title (at most 32 bytes used) and persist
    pub fn set_title(&mut self, disk: &mut Disk, new_title: &str) -> Result<()> {
        let bytes = if new_title.is_empty() {
            b"\r" as &[u8]
        } else {
            new_title.as_bytes()
        };
        for (i, &b) in bytes.iter().take(MAX_TITLE_CHARS).enumerate() {
            let last = i == bytes.len() - 1 || i == MAX_TITLE_CHARS - 1;
            self.data[layout::TITLE + i] = if last { b | 0x80 } else { b };
        }
        self.persist(disk)
    }

    /// Flag the directory as unsorted
    ///
    /// Apex 1.7 trusts the directory ordering unless DIRCHG is non-zero,
    /// so any mutation must raise this flag.
    pub fn set_unsorted(&mut self, unsorted: bool) {
        self.data[layout::DIRCHG] = if unsorted { 0xff } else { 0x00 };
    }

    /// Set the volume locked flag (zero means locked)
    pub fn set_locked(&mut self, locked: bool) {
        self.data[layout::FLAG_LOCK] = if locked { 0x00 } else { 0xff };
    }

    pub(crate) fn read_u16(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.data[offset], self.data[offset + 1]])
    }

    fn write_u16(&mut self, offset: usize, value: u16) {
        self.data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn status_raw(&self, index: usize) -> u8 {
        self.data[layout::STATUS + index]
    }

    pub(crate) fn filename_bytes(&self, index: usize) -> &[u8] {
        let offset = layout::FILENAME + index * (FILENAME_CHARS + EXTENSION_CHARS);
        &self.data[offset..offset + FILENAME_CHARS + EXTENSION_CHARS]
    }

    /// Recompute the free bitmap from the directory bytes
    ///
    /// A block is free iff it is in the file area and no VALID entry
    /// claims it. Overlapping or out-of-range claims are reported but the
    /// bitmap stays usable (last writer wins).
    fn rebuild_free_bitmap(&mut self) {
        let size = self.volume_size_blocks();
        self.free_bitmap.clear();
        self.free_bitmap.resize(size, false);
        for free in self.free_bitmap.iter_mut().skip(FILE_AREA_START_BLOCK) {
            *free = true;
        }

        let mut consistent = true;
        for index in 0..ENTRIES_PER_DIRECTORY {
            if self.status_raw(index) != EntryStatus::Valid.to_raw() {
                continue;
            }
            let first = self.read_u16(layout::FIRST_BLOCK + index * 2);
            let last = self.read_u16(layout::LAST_BLOCK + index * 2);
            for block in first..=last {
                match self.free_bitmap.get_mut(block as usize) {
                    Some(free) => {
                        if !*free {
                            consistent = false;
                        }
                        *free = false;
                    }
                    None => consistent = false,
                }
            }
        }
        if !consistent {
            log::warn!(
                "{:?} directory inconsistent - file block ranges incorrect or overlap",
                self.directory_type
            );
        }
    }

    /// Write all four directory blocks back to the disk
    fn persist(&self, disk: &mut Disk) -> Result<()> {
        disk.write_blocks(self.start_block, BLOCKS_PER_DIRECTORY, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::ImageFormat;

    fn fresh_disk() -> Disk {
        let mut disk = Disk::new(ImageFormat::Raw);
        disk.initialize(560, Some(1234)).unwrap();
        disk
    }

    #[test]
    fn test_initialize_metadata() {
        let disk = fresh_disk();
        let dir = disk.directory(DirectoryType::Primary).unwrap();
        assert_eq!(dir.volume_size_blocks(), 560);
        assert_eq!(dir.volume_free_blocks(), 560 - FILE_AREA_START_BLOCK);
        assert_eq!(dir.volume_number(), 1234);
        assert_eq!(dir.title(), "");
        assert_eq!(dir.entries().count(), ENTRIES_PER_DIRECTORY);
        assert!(dir
            .entries()
            .all(|e| e.status() == EntryStatus::Invalid));
    }

    #[test]
    fn test_backup_directory_matches_primary() {
        let disk = fresh_disk();
        let primary = disk.directory(DirectoryType::Primary).unwrap();
        let backup = disk.directory(DirectoryType::Backup).unwrap();
        assert_eq!(backup.volume_size_blocks(), primary.volume_size_blocks());
        assert_eq!(backup.volume_number(), primary.volume_number());
        assert_eq!(backup.start_block(), 13);
    }

    #[test]
    fn test_replace_and_find() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let filename = Filename::parse("hello.bas").unwrap();
        let date = Date::new(1983, 5, 20).unwrap();

        let slot = dir.allocate_entry().unwrap();
        dir.replace(&mut disk, slot, EntryStatus::Valid, &filename, 17, 20, date)
            .unwrap();

        let entry = dir.entry(slot).unwrap();
        assert_eq!(entry.status(), EntryStatus::Valid);
        // Stored uppercase
        assert_eq!(entry.filename().to_string(), "HELLO.BAS");
        assert_eq!(entry.first_block(), 17);
        assert_eq!(entry.last_block(), 20);
        assert_eq!(entry.block_count(), 4);
        assert_eq!(entry.date(), date);
        assert_eq!(dir.volume_free_blocks(), 543 - 4);

        // Matching is case-insensitive
        let pattern = Filename::parse("HE*.BAS").unwrap();
        assert_eq!(dir.find_entries(&pattern), vec![slot]);
    }

    #[test]
    fn test_replace_occupied_slot_fails() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let filename = Filename::parse("A.B").unwrap();
        let date = Date::new(1980, 1, 1).unwrap();

        dir.replace(&mut disk, 0, EntryStatus::Valid, &filename, 17, 17, date)
            .unwrap();
        let result = dir.replace(&mut disk, 0, EntryStatus::Valid, &filename, 18, 18, date);
        assert!(matches!(result, Err(ApexError::EntryInUse { index: 0 })));
    }

    #[test]
    fn test_delete_then_replace_overwrites() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let date = Date::new(1980, 1, 1).unwrap();

        let old = Filename::parse("OLD.DAT").unwrap();
        dir.replace(&mut disk, 0, EntryStatus::Valid, &old, 17, 30, date)
            .unwrap();
        dir.delete_file(&mut disk, 0).unwrap();
        assert_eq!(dir.entry(0).unwrap().status(), EntryStatus::Invalid);
        assert_eq!(dir.volume_free_blocks(), 543);

        let new = Filename::parse("NEW.DAT").unwrap();
        let new_date = Date::new(1999, 12, 31).unwrap();
        dir.replace(&mut disk, 0, EntryStatus::Valid, &new, 40, 41, new_date)
            .unwrap();
        let entry = dir.entry(0).unwrap();
        assert_eq!(entry.filename().to_string(), "NEW.DAT");
        assert_eq!(entry.first_block(), 40);
        assert_eq!(entry.last_block(), 41);
        assert_eq!(entry.date(), new_date);
    }

    #[test]
    fn test_allocate_entry_exhaustion() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let date = Date::new(1980, 1, 1).unwrap();
        for i in 0..ENTRIES_PER_DIRECTORY {
            let filename = Filename::parse(&format!("F{}", i)).unwrap();
            let block = 17 + i as u16;
            let slot = dir.allocate_entry().unwrap();
            assert_eq!(slot, i);
            dir.replace(&mut disk, slot, EntryStatus::Valid, &filename, block, block, date)
                .unwrap();
        }
        assert!(matches!(dir.allocate_entry(), Err(ApexError::DirectoryFull)));
    }

    #[test]
    fn test_first_fit_extent_selection() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let date = Date::new(1980, 1, 1).unwrap();
        let filler = Filename::parse("GAP").unwrap();

        // Free extents of 3, 5 and 10 blocks separated by used gaps,
        // with the rest of the volume claimed by a tail file.
        // 17..20 free (3), 20..25 used, 25..30 free (5), 30..35 used,
        // 35..45 free (10), 45..560 used.
        dir.replace(&mut disk, 0, EntryStatus::Valid, &filler, 20, 24, date)
            .unwrap();
        dir.replace(&mut disk, 1, EntryStatus::Valid, &filler, 30, 34, date)
            .unwrap();
        dir.replace(&mut disk, 2, EntryStatus::Valid, &filler, 45, 559, date)
            .unwrap();

        let extents = dir.free_extents();
        assert_eq!(
            extents,
            vec![
                FreeExtent { start: 17, count: 3 },
                FreeExtent { start: 25, count: 5 },
                FreeExtent { start: 35, count: 10 },
            ]
        );

        assert_eq!(dir.find_free_blocks(3), Some(17));
        assert_eq!(dir.find_free_blocks(4), Some(25));
        assert_eq!(dir.find_free_blocks(10), Some(35));
        assert_eq!(dir.find_free_blocks(11), None);
    }

    #[test]
    fn test_overlap_is_reported_not_fatal() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let date = Date::new(1980, 1, 1).unwrap();
        let filename = Filename::parse("A").unwrap();

        dir.replace(&mut disk, 0, EntryStatus::Valid, &filename, 17, 25, date)
            .unwrap();
        dir.replace(&mut disk, 1, EntryStatus::Valid, &filename, 20, 30, date)
            .unwrap();

        // The overlapped bitmap is still usable: blocks 17-30 are used
        assert_eq!(dir.volume_free_blocks(), 543 - 14);
        assert_eq!(dir.find_free_blocks(1), Some(31));
    }

    #[test]
    fn test_inverted_block_range_reads_as_empty() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let filename = Filename::parse("BROKEN").unwrap();
        let date = Date::new(1980, 1, 1).unwrap();

        // first > last, as a corrupt directory might carry
        dir.replace(&mut disk, 0, EntryStatus::Valid, &filename, 20, 18, date)
            .unwrap();

        let entry = dir.entry(0).unwrap();
        assert_eq!(entry.block_count(), 0);
        assert!(entry.read(&disk).unwrap().is_empty());
        // The inverted range claims no blocks
        assert_eq!(dir.volume_free_blocks(), 543);
    }

    #[test]
    fn test_out_of_range_claim_is_clamped() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let filename = Filename::parse("WILD").unwrap();
        let date = Date::new(1980, 1, 1).unwrap();

        // Claim runs past the 560-block volume; only the in-range part
        // is marked used.
        dir.replace(&mut disk, 0, EntryStatus::Valid, &filename, 550, 600, date)
            .unwrap();

        assert_eq!(dir.volume_free_blocks(), 543 - 10);
        assert_eq!(dir.find_free_blocks(533), Some(17));
        assert_eq!(dir.find_free_blocks(534), None);
    }

    #[test]
    fn test_set_date_persists() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let date = Date::new(2001, 9, 9).unwrap();
        dir.set_date(&mut disk, date).unwrap();
        assert_eq!(dir.date(), date);

        let reopened = disk.directory(DirectoryType::Primary).unwrap();
        assert_eq!(reopened.date(), date);
    }

    #[test]
    fn test_title_round_trip() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        dir.set_title(&mut disk, "SYSTEM DISK").unwrap();
        assert_eq!(dir.title(), "SYSTEM DISK");

        // Persisted: reopen from disk
        let reopened = disk.directory(DirectoryType::Primary).unwrap();
        assert_eq!(reopened.title(), "SYSTEM DISK");

        dir.set_title(&mut disk, "").unwrap();
        assert_eq!(dir.title(), "");
    }

    #[test]
    fn test_title_truncated_to_32() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let long = "X".repeat(40);
        dir.set_title(&mut disk, &long).unwrap();
        assert_eq!(dir.title(), "X".repeat(32));
    }

    #[test]
    fn test_write_and_read_file() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let filename = Filename::parse("DATA.BIN").unwrap();
        let date = Date::new(1985, 7, 4).unwrap();
        let free_before = dir.volume_free_blocks();

        let payload: Vec<u8> = (0..300u16).map(|i| i as u8).collect();
        dir.write_file(&mut disk, &filename, &payload, date).unwrap();

        // 300 bytes round up to 2 blocks
        assert_eq!(dir.volume_free_blocks(), free_before - 2);
        let matches = dir.find_entries(&filename);
        assert_eq!(matches.len(), 1);
        let entry = dir.entry(matches[0]).unwrap();
        assert_eq!(entry.block_count(), 2);
        assert_eq!(entry.first_block(), 17);

        let contents = dir.entry(matches[0]).unwrap().read(&disk).unwrap();
        assert_eq!(contents.len(), 512);
        assert_eq!(&contents[..300], &payload[..]);
        // Last block is zero padded
        assert!(contents[300..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_file_disk_full() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let date = Date::new(1980, 1, 1).unwrap();
        let filler = Filename::parse("BIG").unwrap();
        // Claim every file-area block except one
        dir.replace(&mut disk, 0, EntryStatus::Valid, &filler, 17, 558, date)
            .unwrap();

        let filename = Filename::parse("TOOBIG").unwrap();
        let result = dir.write_file(&mut disk, &filename, &[0u8; 600], date);
        assert!(matches!(result, Err(ApexError::DiskFull { blocks: 3 })));
    }

    #[test]
    fn test_directory_persists_through_disk() {
        let mut disk = fresh_disk();
        let mut dir = disk.directory(DirectoryType::Primary).unwrap();
        let filename = Filename::parse("KEEP.ME").unwrap();
        let date = Date::new(1990, 3, 15).unwrap();
        dir.replace(&mut disk, 5, EntryStatus::Valid, &filename, 100, 109, date)
            .unwrap();

        let reopened = disk.directory(DirectoryType::Primary).unwrap();
        let entry = reopened.entry(5).unwrap();
        assert_eq!(entry.status(), EntryStatus::Valid);
        assert_eq!(entry.filename().to_string(), "KEEP.ME");
        assert_eq!(entry.block_count(), 10);
        assert_eq!(reopened.volume_free_blocks(), 543 - 10);
    }
}
