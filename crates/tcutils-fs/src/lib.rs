// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filesystem helpers for tcutils.
//!
//! - [`paths`]: cross-platform path normalization with environment variable
//!   and home directory expansion.
//! - [`filename`]: whitelist-based filename cleaning.
//! - [`permissions`]: POSIX permission octal encoding.
//! - [`user`]: current login name.

pub mod filename;
pub mod paths;
pub mod permissions;
pub mod user;

pub use filename::{
    DEFAULT_REPLACEMENT_CHAR, VALID_FILENAME_CHARS, clean_filename, clean_filename_with,
    unique_path,
};
pub use paths::{
    NormalizeOptions, check_path, create_dirs, current_dir, default_expandvars, get_path,
    join_paths, normalize_path,
};
pub use permissions::{PermissionTriad, PosixPermissions};
pub use user::current_user_name;
