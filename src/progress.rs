// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Terminal spinner shown while the collectors walk the API.

use indicatif::{ProgressBar, ProgressStyle};

const SPINNER_TEMPLATE: &str = "{spinner:.yellow} [{elapsed_precise}] {msg}";

/// Creates a spinner with the shared template and an initial message.
///
/// The bar is hidden automatically when stderr is not a terminal.
pub fn spinner(message: impl Into<String,>,) -> ProgressBar
{
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE,)
            .unwrap_or_else(|_| ProgressStyle::default_spinner(),),
    );
    pb.set_message(message.into(),);
    pb
}
