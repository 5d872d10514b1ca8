/// 8.3 filenames and wildcard patterns

use crate::error::{ApexError, Result};
use std::fmt;

/// Characters in the name component
pub const FILENAME_CHARS: usize = 8;
/// Characters in the extension component
pub const EXTENSION_CHARS: usize = 3;

/// An 8.3 filename or wildcard pattern
///
/// Both components are fixed width and space padded, matching the on-disk
/// name table. Patterns may contain `?` (match exactly one character) and
/// `*` (match the remainder of the component; must be the component's last
/// character). Names are stored uppercase on disk but matching is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filename {
    name: [u8; FILENAME_CHARS],
    ext: [u8; EXTENSION_CHARS],
    has_wildcard: bool,
}

impl Filename {
    /// Parse a filename or wildcard pattern string
    ///
    /// Letters, digits (not at the start of a component), `?` and `*` are
    /// allowed, with at most one `.` separating name from extension.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut filename = Self {
            name: [b' '; FILENAME_CHARS],
            ext: [b' '; EXTENSION_CHARS],
            has_wildcard: false,
        };
        let mut in_ext = false;
        let mut index = 0;
        let mut have_star = false;
        for c in pattern.bytes() {
            match c {
                b'A'..=b'Z' | b'a'..=b'z' | b'?' | b'*' => {}
                b'0'..=b'9' if index != 0 => {}
                b'.' => {
                    if in_ext {
                        return Err(ApexError::filename("can only have one extension"));
                    }
                    in_ext = true;
                    index = 0;
                    have_star = false;
                    continue;
                }
                _ => {
                    return Err(ApexError::filename(format!(
                        "character '{}' not allowed in filespec",
                        c as char
                    )));
                }
            }
            let part: &mut [u8] = if in_ext {
                &mut filename.ext
            } else {
                &mut filename.name
            };
            if index >= part.len() {
                return Err(ApexError::filename("filename component too long"));
            }
            if have_star {
                return Err(ApexError::filename(
                    "filename component has characters after star",
                ));
            }
            part[index] = c;
            index += 1;
            filename.has_wildcard |= c == b'?' || c == b'*';
            have_star = c == b'*';
        }
        Ok(filename)
    }

    /// Reconstruct a filename from its raw on-disk form
    ///
    /// Must be exactly 11 bytes: name then extension, space padded, no
    /// separator.
    pub fn from_raw(data: &[u8]) -> Result<Self> {
        if data.len() != FILENAME_CHARS + EXTENSION_CHARS {
            return Err(ApexError::filename(format!(
                "raw filespec must be exactly {} characters",
                FILENAME_CHARS + EXTENSION_CHARS
            )));
        }
        let mut name = [0u8; FILENAME_CHARS];
        let mut ext = [0u8; EXTENSION_CHARS];
        name.copy_from_slice(&data[..FILENAME_CHARS]);
        ext.copy_from_slice(&data[FILENAME_CHARS..]);
        Ok(Self {
            name,
            ext,
            has_wildcard: false,
        })
    }

    /// Build a filename from an 11-byte directory slice; callers
    /// guarantee the length
    pub(crate) fn from_parts(data: &[u8]) -> Self {
        let mut name = [b' '; FILENAME_CHARS];
        let mut ext = [b' '; EXTENSION_CHARS];
        name.copy_from_slice(&data[..FILENAME_CHARS]);
        ext.copy_from_slice(&data[FILENAME_CHARS..FILENAME_CHARS + EXTENSION_CHARS]);
        Self {
            name,
            ext,
            has_wildcard: false,
        }
    }

    /// Does this filename contain `?` or `*`?
    pub fn has_wildcard(&self) -> bool {
        self.has_wildcard
    }

    /// The raw space-padded name component
    pub fn name(&self) -> &[u8; FILENAME_CHARS] {
        &self.name
    }

    /// The raw space-padded extension component
    pub fn ext(&self) -> &[u8; EXTENSION_CHARS] {
        &self.ext
    }

    /// Match a candidate filename against this pattern
    ///
    /// Name and extension are matched independently; both must succeed.
    pub fn matches(&self, other: &Filename) -> bool {
        part_match(&self.name, &other.name) && part_match(&self.ext, &other.ext)
    }

    /// Copy of this filename with both components uppercased
    pub fn to_uppercase(&self) -> Filename {
        let mut upper = self.clone();
        upper.name.make_ascii_uppercase();
        upper.ext.make_ascii_uppercase();
        upper
    }
}

/// Match one fixed-width component left to right
fn part_match(pat: &[u8], candidate: &[u8]) -> bool {
    for (i, &p) in pat.iter().enumerate() {
        match p {
            // wildcard match for the entire remainder
            b'*' => return true,
            // wildcard match for one character position
            b'?' => continue,
            // matched up to trailing space fill
            b' ' => return candidate[i] == b' ',
            _ => {
                if !p.eq_ignore_ascii_case(&candidate[i]) {
                    return false;
                }
            }
        }
    }
    true
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = trim_part(&self.name);
        let ext = trim_part(&self.ext);
        if ext.is_empty() {
            write!(f, "{}", name)
        } else {
            write!(f, "{}.{}", name, ext)
        }
    }
}

fn trim_part(part: &[u8]) -> &str {
    let end = part
        .iter()
        .rposition(|&b| b != b' ')
        .map(|p| p + 1)
        .unwrap_or(0);
    std::str::from_utf8(&part[..end]).unwrap_or("")
}
