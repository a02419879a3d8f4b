// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filename sanitization.

use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

/// Characters kept by [`clean_filename`].
pub const VALID_FILENAME_CHARS: &str =
    "-_.() abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Character substituted for each character listed in `replace`.
pub const DEFAULT_REPLACEMENT_CHAR: char = '_';

/// Clean `filename` with the default whitelist, replacing spaces.
pub fn clean_filename(filename: &str) -> String {
    clean_filename_with(filename, VALID_FILENAME_CHARS, " ", DEFAULT_REPLACEMENT_CHAR)
}

/// Clean `filename`.
///
/// Every character in `replace` becomes `replacement`, accents are
/// decomposed (NFKD) and anything outside ASCII is dropped, then only
/// characters found in `whitelist` are kept.
pub fn clean_filename_with(
    filename: &str,
    whitelist: &str,
    replace: &str,
    replacement: char,
) -> String {
    filename
        .chars()
        .map(|c| if replace.contains(c) { replacement } else { c })
        .collect::<String>()
        .nfkd()
        .filter(|c| c.is_ascii() && whitelist.contains(*c))
        .collect()
}

/// Return `path` if it is free, otherwise the first free `stem_N.ext`.
pub fn unique_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1u64..)
        .map(|n| path.with_file_name(format!("{stem}_{n}{extension}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}
