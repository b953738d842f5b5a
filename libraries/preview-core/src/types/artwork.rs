//! Artwork URL helpers

const SIZE_SUFFIX: &str = "bb.jpg";
const LARGE_ARTWORK: &str = "400x400bb.jpg";

/// Rewrite catalog artwork size segments to the 400x400 rendition
///
/// Every `<width>x<height>bb.jpg` occurrence is replaced with `400x400bb.jpg`.
/// URLs without such a segment are returned unchanged.
pub fn large_artwork_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut rest = url;

    while let Some(pos) = rest.find(SIZE_SUFFIX) {
        let head = &rest[..pos];
        match size_segment_start(head) {
            Some(start) => {
                out.push_str(&head[..start]);
                out.push_str(LARGE_ARTWORK);
            }
            None => {
                out.push_str(head);
                out.push_str(SIZE_SUFFIX);
            }
        }
        rest = &rest[pos + SIZE_SUFFIX.len()..];
    }

    out.push_str(rest);
    out
}

/// Byte offset where a trailing `<digits>x<digits>` run begins, if `head` ends with one
fn size_segment_start(head: &str) -> Option<usize> {
    let bytes = head.as_bytes();
    let mut i = bytes.len();

    let height_end = i;
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i == height_end || i == 0 || bytes[i - 1] != b'x' {
        return None;
    }
    i -= 1;

    let width_end = i;
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i == width_end {
        return None;
    }

    Some(i)
}
