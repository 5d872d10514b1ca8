/*!
# apexdisk

A Rust library for reading and writing Apex floppy disk images with volume
directory support.

## Features

- Read and write raw, DOS, ProDOS, CP/M and Apex ordered sector images
- Logical block addressing over the canonical deinterleaved buffer
- Full volume directory support: listing, matching, insertion, deletion
- 8.3 filenames with `?` and `*` wildcard matching
- Idiomatic Rust API with comprehensive error handling

## Quick Start

```rust,no_run
use apexdisk::{Date, DirectoryType, Disk, Filename, ImageFormat};

// Open an existing image
let mut disk = Disk::open(ImageFormat::ApexOrder, "volume.dsk")?;

// List the files in the primary directory
let dir = disk.directory(DirectoryType::Primary)?;
for entry in dir.entries() {
    if entry.status() == apexdisk::EntryStatus::Valid {
        println!("{:12} {:6} blocks", entry.filename().to_string(), entry.block_count());
    }
}

// Insert a file
let mut dir = disk.directory(DirectoryType::Primary)?;
let filename = Filename::parse("HELLO.TXT")?;
dir.write_file(&mut disk, &filename, b"hello, world", Date::today())?;

// Save changes
disk.save(ImageFormat::ApexOrder, "volume.dsk")?;
# Ok::<(), apexdisk::ApexError>(())
```

## Volume layout

A standard volume is 560 blocks of 256 bytes: boot area in blocks 0-8, the
primary directory in blocks 9-12, the backup directory in blocks 13-16 and
the file area from block 17 up. Each directory holds 48 fixed-position
entries plus volume metadata; files occupy a single contiguous block range.

## Modules

- `format`: image formats, geometry and sector permutation tables
- `image`: whole-image byte buffer with format-aware load/save
- `disk`: logical block layer and volume initialization
- `directory`: volume directories, entries and the free-block allocator
- `filename`: 8.3 filenames and wildcard patterns
- `date`: packed on-disk dates
- `map`: block map visualization
- `error`: error types and Result alias
*/

#![warn(missing_docs)]

/// Packed on-disk dates
pub mod date;
/// Volume directory and free-space management
pub mod directory;
/// Apex volume on top of a disk image
pub mod disk;
/// Error types and Result alias
pub mod error;
/// 8.3 filenames and wildcard patterns
pub mod filename;
/// Disk image formats and sector geometry
pub mod format;
/// Disk image data structures
pub mod image;
/// Block map visualization
pub mod map;

// Re-export common types
pub use date::Date;
pub use directory::{
    DirectoryEntry, EntryStatus, FreeExtent, VolumeDirectory, BYTES_PER_BLOCK,
    ENTRIES_PER_DIRECTORY, FILE_AREA_START_BLOCK,
};
pub use disk::{DirectoryType, Disk};
pub use error::{ApexError, Result};
pub use filename::Filename;
pub use format::{Geometry, ImageFormat};
pub use image::DiskImage;
