// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! POSIX permission encoding.
//!
//! [`PosixPermissions`] is four [`PermissionTriad`]s: special bits, user,
//! group, and other. In the special triad the read/write/execute slots hold
//! setuid/setgid/sticky respectively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tcutils_core::TcutilsError;

/// One octal digit of a permission mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PermissionTriad {
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl PermissionTriad {
    pub const fn new(read: bool, write: bool, execute: bool) -> Self {
        Self {
            read,
            write,
            execute,
        }
    }

    /// Octal digit value, `0..=7`.
    pub const fn to_octal(self) -> u8 {
        ((self.read as u8) << 2) | ((self.write as u8) << 1) | (self.execute as u8)
    }

    /// Build from an octal digit value.
    pub fn from_digit(digit: u8) -> Result<Self, TcutilsError> {
        if digit > 7 {
            return Err(TcutilsError::InvalidPermissions(format!(
                "octal digit out of range: {digit}"
            )));
        }
        Ok(Self::new(digit & 4 != 0, digit & 2 != 0, digit & 1 != 0))
    }

    /// Parse a single octal character such as `"5"`.
    pub fn from_octal(input: &str) -> Result<Self, TcutilsError> {
        let mut chars = input.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                let digit = c.to_digit(8).ok_or_else(|| {
                    TcutilsError::InvalidPermissions(format!("`{c}` is not an octal digit"))
                })?;
                Self::from_digit(digit as u8)
            }
            _ => Err(TcutilsError::InvalidPermissions(format!(
                "expected a single octal digit, got `{input}`"
            ))),
        }
    }

    /// `ls`-style rendering. `special` is the matching setuid/setgid/sticky
    /// bit and `letter` its lowercase symbol.
    fn symbolic(self, special: bool, letter: char) -> [char; 3] {
        let exec = match (special, self.execute) {
            (false, true) => 'x',
            (false, false) => '-',
            (true, true) => letter,
            (true, false) => letter.to_ascii_uppercase(),
        };
        [
            if self.read { 'r' } else { '-' },
            if self.write { 'w' } else { '-' },
            exec,
        ]
    }
}

/// A full POSIX permission mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PosixPermissions {
    pub special: PermissionTriad,
    pub user: PermissionTriad,
    pub group: PermissionTriad,
    pub other: PermissionTriad,
}

impl PosixPermissions {
    /// Parse three or four octal digits, e.g. `"644"` or `"1777"`.
    pub fn from_octal(input: &str) -> Result<Self, TcutilsError> {
        let digits = input.trim();
        let digits = digits.strip_prefix("0o").unwrap_or(digits);
        if !(3..=4).contains(&digits.len()) {
            return Err(TcutilsError::InvalidPermissions(format!(
                "expected 3 or 4 octal digits, got `{input}`"
            )));
        }

        let mut triads = digits
            .chars()
            .map(|c| PermissionTriad::from_octal(c.encode_utf8(&mut [0; 4])))
            .collect::<Result<Vec<_>, _>>()?;
        if triads.len() == 3 {
            triads.insert(0, PermissionTriad::default());
        }

        Ok(Self {
            special: triads[0],
            user: triads[1],
            group: triads[2],
            other: triads[3],
        })
    }

    /// Build from a numeric mode; bits above `0o7777` are ignored.
    pub fn from_mode(mode: u32) -> Self {
        let digit = |shift: u32| {
            let bits = (mode >> shift) & 0o7;
            PermissionTriad::new(bits & 4 != 0, bits & 2 != 0, bits & 1 != 0)
        };
        Self {
            special: digit(9),
            user: digit(6),
            group: digit(3),
            other: digit(0),
        }
    }

    /// Numeric mode, e.g. `0o755`.
    pub fn to_octal(self) -> u32 {
        (u32::from(self.special.to_octal()) << 9)
            | (u32::from(self.user.to_octal()) << 6)
            | (u32::from(self.group.to_octal()) << 3)
            | u32::from(self.other.to_octal())
    }

    /// Four-digit octal string, e.g. `"0755"`.
    pub fn to_octal_str(self) -> String {
        format!("{:04o}", self.to_octal())
    }

    /// `ls -l` style rendering, e.g. `rwxr-xr-t`.
    pub fn symbolic(self) -> String {
        let user = self.user.symbolic(self.special.read, 's');
        let group = self.group.symbolic(self.special.write, 's');
        let other = self.other.symbolic(self.special.execute, 't');
        user.iter().chain(&group).chain(&other).collect()
    }

    /// Apply the mode to `path`.
    #[cfg(unix)]
    pub fn apply(self, path: impl AsRef<std::path::Path>) -> Result<(), TcutilsError> {
        use std::os::unix::fs::PermissionsExt;

        std::fs::set_permissions(path, std::fs::Permissions::from_mode(self.to_octal()))?;
        Ok(())
    }
}

impl fmt::Display for PosixPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_octal_str())
    }
}

impl FromStr for PosixPermissions {
    type Err = TcutilsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_octal(s)
    }
}

impl Serialize for PosixPermissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_octal_str())
    }
}

impl<'de> Deserialize<'de> for PosixPermissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Config files commonly write modes unquoted (`mode: 755`), which
        // arrives as a decimal integer whose digits are the octal mode.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u32),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => format!("{number:03}"),
        };
        Self::from_octal(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triad_to_octal() {
        let cases = [
            (false, false, false, 0),
            (false, false, true, 1),
            (false, true, false, 2),
            (true, false, false, 4),
            (false, true, true, 3),
            (true, false, true, 5),
            (true, true, false, 6),
            (true, true, true, 7),
        ];
        for (read, write, execute, octal) in cases {
            assert_eq!(PermissionTriad::new(read, write, execute).to_octal(), octal);
            assert_eq!(
                PermissionTriad::from_octal(&octal.to_string()).unwrap().to_octal(),
                octal
            );
        }
    }

    #[test]
    fn triad_rejects_bad_digits() {
        assert!(PermissionTriad::from_octal("8").is_err());
        assert!(PermissionTriad::from_octal("77").is_err());
        assert!(PermissionTriad::from_octal("").is_err());
        assert!(PermissionTriad::from_digit(9).is_err());
    }

    #[test]
    fn permissions_from_octal_strings() {
        let cases = [
            ("000", "0000"),
            ("100", "0100"),
            ("010", "0010"),
            ("001", "0001"),
            ("775", "0775"),
            ("644", "0644"),
            ("1775", "1775"),
            ("640", "0640"),
            ("700", "0700"),
            ("1777", "1777"),
        ];
        for (input, expected) in cases {
            let perm = PosixPermissions::from_octal(input).unwrap();
            assert_eq!(perm.to_octal_str(), expected);
            assert_eq!(perm.to_octal(), u32::from_str_radix(expected, 8).unwrap());
            assert_eq!(PosixPermissions::from_mode(perm.to_octal()), perm);
        }
    }

    #[test]
    fn permissions_reject_malformed_input() {
        for bad in ["", "75", "77777", "789", "rwx"] {
            assert!(PosixPermissions::from_octal(bad).is_err(), "accepted `{bad}`");
        }
    }

    #[test]
    fn symbolic_rendering() {
        assert_eq!(PosixPermissions::from_octal("755").unwrap().symbolic(), "rwxr-xr-x");
        assert_eq!(PosixPermissions::from_octal("640").unwrap().symbolic(), "rw-r-----");
        assert_eq!(PosixPermissions::from_octal("1777").unwrap().symbolic(), "rwxrwxrwt");
        assert_eq!(PosixPermissions::from_octal("1776").unwrap().symbolic(), "rwxrwxrwT");
        assert_eq!(PosixPermissions::from_octal("4755").unwrap().symbolic(), "rwsr-xr-x");
        assert_eq!(PosixPermissions::from_octal("2644").unwrap().symbolic(), "rw-r-Sr--");
    }

    #[test]
    fn display_and_parse() {
        let perm: PosixPermissions = "644".parse().unwrap();
        assert_eq!(perm.to_string(), "0644");
    }

    #[test]
    fn serde_accepts_strings_and_bare_numbers() {
        let perm: PosixPermissions = serde_json::from_str("\"0750\"").unwrap();
        assert_eq!(perm.to_octal(), 0o750);

        let perm: PosixPermissions = serde_json::from_str("755").unwrap();
        assert_eq!(perm.to_octal(), 0o755);

        assert_eq!(serde_json::to_string(&perm).unwrap(), "\"0755\"");
    }

    #[cfg(unix)]
    #[test]
    fn apply_sets_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let file = tempfile::NamedTempFile::new().unwrap();
        PosixPermissions::from_octal("640").unwrap().apply(file.path()).unwrap();
        let mode = std::fs::metadata(file.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o7777, 0o640);
    }
}
