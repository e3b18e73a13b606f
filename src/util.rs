use bstr::BString;

/// Strip the trailing padding of a space padded field.
///
/// Some writers pad with NUL instead of spaces, so both are accepted.
pub(crate) fn trim_spaces(buf: &[u8]) -> BString {
    let end = buf
        .iter()
        .rposition(|&b| b != b' ' && b != 0)
        .map_or(0, |pos| pos + 1);
    BString::from(&buf[..end])
}

/// Strip trailing NUL bytes only (`TInfoS`).
pub(crate) fn zero_trim(buf: &[u8]) -> BString {
    let end = buf.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
    BString::from(&buf[..end])
}

/// Pad with spaces, or cut, to exactly `len` bytes.
pub(crate) fn sauce_pad(str: &BString, len: usize) -> Vec<u8> {
    let mut data = str.to_vec();
    data.resize(len, b' ');
    data
}

/// Pad with NUL, or cut, to exactly `len` bytes.
pub(crate) fn zero_pad(str: &BString, len: usize) -> Vec<u8> {
    let mut data = str.to_vec();
    data.resize(len, 0);
    data
}

/// Drop any run of DOS end-of-file bytes (0x1A) at the end of `data`.
pub(crate) fn trim_eof_markers(data: &[u8]) -> &[u8] {
    let end = data
        .iter()
        .rposition(|&b| b != crate::EOF_CHAR)
        .map_or(0, |pos| pos + 1);
    &data[..end]
}
