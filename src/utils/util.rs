pub type Result<T> = std::result::Result<T, String>;

pub fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}

/// Strips a leading `chr` so that `chr7` and `7` address the same contig.
pub fn normalize_contig(contig: &str) -> &str {
    contig.strip_prefix("chr").unwrap_or(contig)
}

pub fn parse_field<T: std::str::FromStr>(value: &str, name: &str) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid {} value: '{}'", name, value))
}
