// SPDX-FileCopyrightText: 2026 tcutils Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Current user lookup.

use std::env;

const LOGIN_VARS: [&str; 3] = ["USER", "LOGNAME", "USERNAME"];

/// Login name of the current user, taken from the login environment.
pub fn current_user_name() -> Option<String> {
    LOGIN_VARS
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|name| !name.is_empty())
}
