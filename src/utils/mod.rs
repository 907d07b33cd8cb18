pub mod url;

/// Draws a random alphanumeric code of the given length.
///
/// 62-symbol alphabet: uppercase, lowercase, digits. Collision handling is
/// the caller's concern; this function is a pure draw.
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}
