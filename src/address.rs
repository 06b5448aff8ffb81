/// Returns true iff `address` is a `0x`-prefixed, 40-hex-digit account
/// identifier. Case-insensitive, no network access.
pub fn is_valid_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(digits) => digits.len() == 40 && hex::decode(digits).is_ok(),
        None => false,
    }
}

/// Narrows a string into an address for API calls. The input is returned
/// unchanged when valid; callers must not assume canonicalization.
pub fn format_address(address: &str) -> Option<&str> {
    if is_valid_address(address) {
        Some(address)
    } else {
        None
    }
}
