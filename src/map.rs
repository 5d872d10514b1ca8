/// Block map visualization

use crate::directory::{VolumeDirectory, FILE_AREA_START_BLOCK};
use crate::format::SECTORS_PER_TRACK;

/// ANSI color codes for the block map
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BRIGHT_WHITE: &str = "\x1b[97m";
    pub const DARK_WHITE: &str = "\x1b[37m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

/// Draw a visual map of used and free blocks for a volume
///
/// One column per track, one row per block within the track, system area
/// (boot blocks and both directories) in cyan.
pub fn draw_block_map(directory: &VolumeDirectory) {
    let size = directory.volume_size_blocks();
    let mut free = vec![false; size];
    for extent in directory.free_extents() {
        for block in extent.start..extent.start + extent.count {
            free[block as usize] = true;
        }
    }

    let num_tracks = size.div_ceil(SECTORS_PER_TRACK);
    const BLOCK_FREE: &str = "\u{2591}"; // ░ - Light shade
    const BLOCK_USED: &str = "\u{2593}"; // ▓ - Dark shade

    println!("=== Block Map ===");
    println!(
        "Legend: {}Used{} {}Free{} {}System{}",
        colors::BRIGHT_WHITE,
        colors::RESET,
        colors::DARK_WHITE,
        colors::RESET,
        colors::BRIGHT_CYAN,
        colors::RESET
    );
    println!();

    // Rows are block positions within a track, bottom to top
    for position in (0..SECTORS_PER_TRACK).rev() {
        print!("{:>2} ", position);
        for track in 0..num_tracks {
            let block = track * SECTORS_PER_TRACK + position;
            if block >= size {
                print!(" ");
            } else if block < FILE_AREA_START_BLOCK {
                print!("{}{}{}", colors::BRIGHT_CYAN, BLOCK_USED, colors::RESET);
            } else if free[block] {
                print!("{}{}{}", colors::DARK_WHITE, BLOCK_FREE, colors::RESET);
            } else {
                print!("{}{}{}", colors::BRIGHT_WHITE, BLOCK_USED, colors::RESET);
            }
        }
        println!();
    }

    // Track number axis
    print!("   ");
    let mut printed_cols = vec![false; num_tracks];
    for track in 0..num_tracks {
        if track % 5 == 0 && !printed_cols[track] {
            for (i, digit) in track.to_string().chars().enumerate() {
                if track + i < num_tracks {
                    print!("{}", digit);
                    printed_cols[track + i] = true;
                }
            }
        } else if !printed_cols[track] {
            print!(" ");
        }
    }
    println!();
}
