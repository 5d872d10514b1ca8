/// Byte offsets within the 1024-byte directory
///
/// Load-bearing for interoperability: these must match the on-disk
/// structure bit for bit. Per-file tables are indexed by entry slot;
/// all multi-byte fields are little-endian.

/// Name/extension table, 11 bytes per entry
pub const FILENAME: usize = 0x000;
/// Status byte per entry
pub const STATUS: usize = 0x210;
/// First block of each file, 2 bytes per entry
pub const FIRST_BLOCK: usize = 0x240;
/// Last block (inclusive) of each file, 2 bytes per entry
pub const LAST_BLOCK: usize = 0x2a0;

/// First empty block table (v1.7), 12 bytes
pub const FEMBLK: usize = 0x300;
/// Last empty block table (v1.7), 12 bytes
pub const LEMBLK: usize = 0x30c;
/// Sort table (v1.7), 48 bytes
pub const STAB: usize = 0x318;
/// Number of valid entries (v1.7), 1 byte
pub const NUMVAL: usize = 0x348;
/// Non-zero when the directory has not been sorted, 1 byte
pub const DIRCHG: usize = 0x349;

/// Device associated with the default filename, 1 byte
pub const PRDEV: usize = 0x34a;
/// Highest block number on the volume, 2 bytes
pub const PMAXB: usize = 0x34b;
/// Default filename, 11 bytes
pub const PRNAME: usize = 0x34d;
/// Volume title, 32 bytes, high-bit terminated
pub const TITLE: usize = 0x358;

/// Volume unique id, 2 bytes
pub const VOLUME: usize = 0x394;
/// Volume date, 2 bytes
pub const DIRDAT: usize = 0x396;
/// Modification date of each file, 2 bytes per entry
pub const FDATE: usize = 0x398;

/// Advisory pack flag
pub const FLAG_PACK: usize = 0x3f8;
/// Advisory backup flag
pub const FLAG_BACKUP: usize = 0x3f9;
/// Advisory check flag
pub const FLAG_CHECK: usize = 0x3fa;
/// Volume locked flag (v1.7), zero means locked
pub const FLAG_LOCK: usize = 0x3fb;
