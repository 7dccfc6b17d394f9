//! Format-string fingerprinting.
//!
//! The encoder deduplicates format strings by a short deterministic digest
//! rather than by the full literal. This module provides a CRC-16 usable in
//! const context, so the `binary_log!` macro can fold the fingerprint of a
//! literal at compile time and every call site of the same literal is
//! guaranteed the same value.
//!
//! A fingerprint is a lookup key, not an identity: 16 bits collide, and the
//! format registry compares the stored literal before trusting a hit.

/// CRC-16/CCITT-FALSE polynomial.
const POLY: u16 = 0x1021;

/// Computes the 16-bit fingerprint of a format string literal.
///
/// Deterministic for identical input within and across sessions.
///
/// # Examples
///
/// ```
/// use binary_log::fingerprint::fingerprint;
///
/// const FP: u16 = fingerprint(b"x={}");
/// assert_eq!(FP, fingerprint(b"x={}"));
/// assert_ne!(FP, fingerprint(b"y={}"));
/// ```
pub const fn fingerprint(bytes: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    let mut i = 0;
    while i < bytes.len() {
        crc ^= (bytes[i] as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLY;
            } else {
                crc <<= 1;
            }
            bit += 1;
        }
        i += 1;
    }
    crc
}
