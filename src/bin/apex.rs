/// Interactive Apex volume console application

use apexdisk::*;
use chrono::{DateTime, Datelike, Local};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::path::Path;

/// Command completer for the REPL
struct CommandCompleter {
    commands: Vec<&'static str>,
}

impl CommandCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                "cat",
                "date",
                "dir",
                "exit",
                "extract",
                "free",
                "help",
                "info",
                "init",
                "insert",
                "load",
                "ls",
                "map",
                "open",
                "quit",
                "rm",
                "save",
                "title",
            ],
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only complete the first word (command name)
        let line_to_cursor = &line[..pos];
        if line_to_cursor.contains(' ') {
            // Already past the command, don't complete
            return Ok((pos, vec![]));
        }

        let prefix = line_to_cursor.to_lowercase();
        let matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// Get the path to the history file
fn history_path() -> Option<std::path::PathBuf> {
    dirs::home_dir().map(|mut p| {
        p.push(".apexdisk_history");
        p
    })
}

fn main() {
    env_logger::init();

    println!("=== ApexDisk ===");
    println!("Interactive console for exploring Apex format disk images.");
    println!("Type 'help' for available commands\n");

    let mut rl = Editor::new().expect("Failed to create editor");
    rl.set_helper(Some(CommandCompleter::new()));

    // Load history if available
    if let Some(history_path) = history_path() {
        let _ = rl.load_history(&history_path);
    }

    let mut disk: Option<Disk> = None;
    let mut image_path: Option<String> = None;
    let mut image_format = ImageFormat::ApexOrder;

    loop {
        let readline = rl.readline("> ");
        let input = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Save history before exiting
                if let Some(history_path) = history_path() {
                    let _ = rl.save_history(&history_path);
                }
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        // Add to history
        let _ = rl.add_history_entry(input);

        let parts = parse_command_line(input);
        if parts.is_empty() {
            continue;
        }
        let command = parts[0].to_lowercase();

        match command.as_str() {
            "help" => {
                print_help();
            }
            "quit" | "exit" => {
                // Save history before exiting
                if let Some(history_path) = history_path() {
                    let _ = rl.save_history(&history_path);
                }
                println!("Goodbye!");
                break;
            }
            "open" | "load" => {
                if parts.len() < 2 {
                    println!("Usage: open <path> [raw|dos|prodos|cpm|apex]");
                    continue;
                }
                let format = match parse_format(&parts, 2, ImageFormat::ApexOrder) {
                    Some(format) => format,
                    None => {
                        println!("Unknown format: {}", parts[2]);
                        continue;
                    }
                };
                match Disk::open(format, &parts[1]) {
                    Ok(opened) => {
                        println!("Opened: {} ({})", parts[1], format.name());
                        disk = Some(opened);
                        image_path = Some(parts[1].clone());
                        image_format = format;
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "save" => {
                if let Some(ref disk) = disk {
                    let path = if parts.len() > 1 {
                        Some(parts[1].clone())
                    } else {
                        image_path.clone()
                    };
                    let path = match path {
                        Some(path) => path,
                        None => {
                            println!("Usage: save <path> [raw|dos|prodos|cpm|apex]");
                            continue;
                        }
                    };
                    let format = match parse_format(&parts, 2, image_format) {
                        Some(format) => format,
                        None => {
                            println!("Unknown format: {}", parts[2]);
                            continue;
                        }
                    };
                    match disk.save(format, &path) {
                        Ok(()) => {
                            println!("Saved: {} ({})", path, format.name());
                            image_path = Some(path);
                            image_format = format;
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No disk loaded.");
                }
            }
            "init" => {
                let block_count: u16 = if parts.len() > 1 {
                    parts[1].parse().unwrap_or(560)
                } else {
                    560
                };
                let volume_number: Option<u16> =
                    parts.get(2).and_then(|part| part.parse().ok());

                let mut new_disk = Disk::new(image_format);
                match new_disk.initialize(block_count, volume_number) {
                    Ok(()) => {
                        println!("Initialized {} block volume", block_count);
                        disk = Some(new_disk);
                        image_path = None;
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "ls" | "dir" | "cat" => {
                if let Some(ref disk) = disk {
                    let patterns = match parse_patterns(&parts, "*.*") {
                        Some(patterns) => patterns,
                        None => continue,
                    };
                    match disk.directory(DirectoryType::Primary) {
                        Ok(dir) => list_files(&dir, &patterns),
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No disk loaded. Use 'open <path>' or 'init' first.");
                }
            }
            "extract" => {
                if let Some(ref disk) = disk {
                    if parts.len() < 2 {
                        println!("Usage: extract <pattern> [pattern ...]");
                        continue;
                    }
                    let patterns = match parse_patterns(&parts, "*.*") {
                        Some(patterns) => patterns,
                        None => continue,
                    };
                    match disk.directory(DirectoryType::Primary) {
                        Ok(dir) => extract_files(disk, &dir, &patterns),
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No disk loaded.");
                }
            }
            "insert" => {
                if let Some(ref mut disk) = disk {
                    if parts.len() < 2 {
                        println!("Usage: insert <file> [file ...]");
                        continue;
                    }
                    for path in parts.iter().skip(1) {
                        insert_file(disk, path);
                    }
                } else {
                    println!("No disk loaded.");
                }
            }
            "rm" => {
                if let Some(ref mut disk) = disk {
                    if parts.len() < 2 {
                        println!("Usage: rm <pattern> [pattern ...]");
                        continue;
                    }
                    let patterns = match parse_patterns(&parts, "") {
                        Some(patterns) => patterns,
                        None => continue,
                    };
                    remove_files(disk, &patterns);
                } else {
                    println!("No disk loaded.");
                }
            }
            "free" => {
                if let Some(ref disk) = disk {
                    match disk.directory(DirectoryType::Primary) {
                        Ok(dir) => {
                            for extent in dir.free_extents() {
                                println!(
                                    "{:>5} free blocks at {}",
                                    extent.count, extent.start
                                );
                            }
                            println!(
                                "{} of {} blocks free",
                                dir.volume_free_blocks(),
                                dir.volume_size_blocks()
                            );
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No disk loaded.");
                }
            }
            "map" => {
                if let Some(ref disk) = disk {
                    match disk.directory(DirectoryType::Primary) {
                        Ok(dir) => apexdisk::map::draw_block_map(&dir),
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No disk loaded.");
                }
            }
            "title" => {
                if let Some(ref mut disk) = disk {
                    match disk.directory(DirectoryType::Primary) {
                        Ok(mut dir) => {
                            if parts.len() > 1 {
                                let title = parts[1..].join(" ");
                                match dir.set_title(disk, &title) {
                                    Ok(()) => println!("Title set to: {}", title),
                                    Err(e) => println!("Error: {}", e),
                                }
                            } else {
                                let title = dir.title();
                                if title.is_empty() {
                                    println!("Volume has no title.");
                                } else {
                                    println!("Title: {}", title);
                                }
                            }
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No disk loaded.");
                }
            }
            "date" => {
                if let Some(ref mut disk) = disk {
                    match disk.directory(DirectoryType::Primary) {
                        Ok(mut dir) => {
                            if parts.len() > 1 {
                                match parse_date(&parts[1]) {
                                    Ok(date) => match dir.set_date(disk, date) {
                                        Ok(()) => println!("Volume date set to: {}", date),
                                        Err(e) => println!("Error: {}", e),
                                    },
                                    Err(e) => println!("Error: {}", e),
                                }
                            } else {
                                println!("Volume date: {}", dir.date());
                            }
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No disk loaded.");
                }
            }
            "info" => {
                if let Some(ref disk) = disk {
                    match disk.directory(DirectoryType::Primary) {
                        Ok(dir) => print_info(&dir, image_format, image_path.as_deref()),
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No disk loaded.");
                }
            }
            _ => {
                println!("Unknown command: {}. Type 'help' for available commands.", command);
            }
        }
    }
}

/// List directory entries matching any of the given patterns
fn list_files(dir: &VolumeDirectory, patterns: &[Filename]) {
    let mut shown = 0;
    let mut blocks = 0u32;
    println!("{:<14} {:>6} {:>10}", "Name", "Blocks", "Date");
    println!("{}", "-".repeat(32));
    for entry in dir.entries() {
        if entry.status() != EntryStatus::Valid {
            continue;
        }
        let filename = entry.filename();
        if !patterns.iter().any(|pattern| pattern.matches(&filename)) {
            continue;
        }
        println!(
            "{:<14} {:>6} {:>10}",
            filename.to_string(),
            entry.block_count(),
            entry.date().to_string()
        );
        shown += 1;
        blocks += entry.block_count() as u32;
    }
    if shown == 0 {
        println!("No files found.");
    } else {
        println!(
            "{} file(s), {} block(s), {} block(s) free",
            shown,
            blocks,
            dir.volume_free_blocks()
        );
    }
}

/// Copy matching files out to the host filesystem, lowercasing the names
fn extract_files(disk: &Disk, dir: &VolumeDirectory, patterns: &[Filename]) {
    let mut extracted = 0;
    for entry in dir.entries() {
        if entry.status() != EntryStatus::Valid {
            continue;
        }
        let filename = entry.filename();
        if !patterns.iter().any(|pattern| pattern.matches(&filename)) {
            continue;
        }
        let host_name = filename.to_string().to_lowercase();
        match entry.read(disk) {
            Ok(data) => match std::fs::write(&host_name, &data) {
                Ok(()) => {
                    println!("Extracted {} ({} bytes)", host_name, data.len());
                    extracted += 1;
                }
                Err(e) => println!("Error writing {}: {}", host_name, e),
            },
            Err(e) => println!("Error reading {}: {}", filename, e),
        }
    }
    if extracted == 0 {
        println!("No files matched.");
    }
}

/// Copy a host file into the volume, dated from its modification time
fn insert_file(disk: &mut Disk, path: &str) {
    let host_name = match Path::new(path).file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => {
            println!("Error: {} has no usable filename", path);
            return;
        }
    };
    let filename = match Filename::parse(host_name) {
        Ok(filename) if !filename.has_wildcard() => filename,
        Ok(_) => {
            println!("Error: {} is not a plain filename", host_name);
            return;
        }
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            println!("Error reading {}: {}", path, e);
            return;
        }
    };
    let date = file_date(path);

    let mut dir = match disk.directory(DirectoryType::Primary) {
        Ok(dir) => dir,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    match dir.write_file(disk, &filename, &data, date) {
        Ok(()) => println!("Inserted {} ({} bytes, {})", filename, data.len(), date),
        Err(e) => println!("Error inserting {}: {}", filename, e),
    }
}

/// Delete matching files from the primary directory
fn remove_files(disk: &mut Disk, patterns: &[Filename]) {
    let mut dir = match disk.directory(DirectoryType::Primary) {
        Ok(dir) => dir,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    let mut matched: Vec<(usize, String)> = Vec::new();
    for pattern in patterns {
        for index in dir.find_entries(pattern) {
            if !matched.iter().any(|(i, _)| *i == index) {
                let name = match dir.entry(index) {
                    Some(entry) => entry.filename().to_string(),
                    None => continue,
                };
                matched.push((index, name));
            }
        }
    }
    if matched.is_empty() {
        println!("No files matched.");
        return;
    }
    for (index, name) in matched {
        match dir.delete_file(disk, index) {
            Ok(()) => println!("Deleted {}", name),
            Err(e) => println!("Error deleting {}: {}", name, e),
        }
    }
}

/// Parse a yyyy-mm-dd argument
fn parse_date(text: &str) -> apexdisk::Result<Date> {
    let mut fields = text.split('-');
    let year = fields.next().and_then(|f| f.parse::<u16>().ok());
    let month = fields.next().and_then(|f| f.parse::<u8>().ok());
    let day = fields.next().and_then(|f| f.parse::<u8>().ok());
    match (year, month, day, fields.next()) {
        (Some(year), Some(month), Some(day), None) => Date::new(year, month, day),
        _ => Err(ApexError::date(format!("expected yyyy-mm-dd, got '{}'", text))),
    }
}

/// The host file's modification date, falling back to today
fn file_date(path: &str) -> Date {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|mtime| {
            let local: DateTime<Local> = mtime.into();
            Date::new(local.year() as u16, local.month() as u8, local.day() as u8).ok()
        })
        .unwrap_or_else(Date::today)
}

/// Turn trailing command arguments into patterns, or a single default
fn parse_patterns(parts: &[String], default: &str) -> Option<Vec<Filename>> {
    if parts.len() < 2 {
        if default.is_empty() {
            return Some(vec![]);
        }
        return match Filename::parse(default) {
            Ok(pattern) => Some(vec![pattern]),
            Err(_) => None,
        };
    }
    let mut patterns = Vec::new();
    for part in parts.iter().skip(1) {
        match Filename::parse(part) {
            Ok(pattern) => patterns.push(pattern),
            Err(e) => {
                println!("Error: {}", e);
                return None;
            }
        }
    }
    Some(patterns)
}

/// Image format from an optional argument position
fn parse_format(parts: &[String], position: usize, default: ImageFormat) -> Option<ImageFormat> {
    match parts.get(position) {
        Some(name) => ImageFormat::from_name(name),
        None => Some(default),
    }
}

/// Parse command line input, respecting quoted strings
fn parse_command_line(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
            }
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    parts.push(current.clone());
                    current.clear();
                }
            }
            _ => {
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

fn print_help() {
    println!("Available commands:");
    println!("  open <path> [format]        - Open a disk image (format: raw, dos, prodos, cpm, apex)");
    println!("  save [path] [format]        - Save the disk image");
    println!("  init [blocks] [volume]      - Initialize a fresh volume (default 560 blocks)");
    println!("  ls [pattern ...]            - List files (aliases: dir, cat)");
    println!("  extract <pattern ...>       - Copy matching files to the host filesystem");
    println!("  insert <file ...>           - Copy host files into the volume");
    println!("  rm <pattern ...>            - Delete matching files");
    println!("  free                        - List free block extents");
    println!("  map                         - Draw a block usage map");
    println!("  title [text]                - Show or set the volume title");
    println!("  date [yyyy-mm-dd]           - Show or set the volume date");
    println!("  info                        - Show volume information");
    println!("  help                        - Show this help");
    println!("  quit, exit                  - Exit the console");
    println!();
    println!("Patterns use 8.3 names with '?' (one character) and '*' (rest of component).");
}

fn print_info(dir: &VolumeDirectory, format: ImageFormat, path: Option<&str>) {
    println!("=== Volume Information ===");
    if let Some(path) = path {
        println!("Image: {}", path);
    }
    println!("Format: {}", format.name());
    let title = dir.title();
    if !title.is_empty() {
        println!("Title: {}", title);
    }
    println!("Volume number: {}", dir.volume_number());
    println!("Directory date: {}", dir.date());
    println!("Size: {} blocks ({} KB)", dir.volume_size_blocks(), dir.volume_size_blocks() * BYTES_PER_BLOCK / 1024);
    println!("Free: {} blocks ({} KB)", dir.volume_free_blocks(), dir.volume_free_blocks() * BYTES_PER_BLOCK / 1024);
    let files = dir
        .entries()
        .filter(|entry| entry.status() == EntryStatus::Valid)
        .count();
    println!("Files: {} of {} entries used", files, ENTRIES_PER_DIRECTORY);
}
