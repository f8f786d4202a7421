use indicatif::ProgressStyle;

/// Creates a configured progress bar style for image downloads.
///
/// Format: `Spinner [Elapsed] [Bar] Done/Total (ETA)`
/// Uses cyan/blue colors for the bar and green for the spinner.
pub fn style_download_bar() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap()
        .progress_chars("#>-")
}

/// Creates a spinner style for indeterminate states (e.g., walking the
/// archive index).
///
/// Format: `Spinner Message`
pub fn style_spinner() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.blue} {msg}")
        .unwrap()
}
