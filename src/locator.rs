//! Contains the logic for finding the sync-token cut points within a document.

/// The marker ending the synchronized header region of a document.
pub const HEAD_TOKEN: &str = "@SyncTokenHead";

/// The marker starting the synchronized footer region of a document.
pub const FOOT_TOKEN: &str = "@SyncTokenFoot";

/// The pair of marker literals in effect for one run.
#[derive(Debug, Clone, Copy)]
pub struct SyncTokens<'a> {
    pub head: &'a str,
    pub foot: &'a str,
}

impl Default for SyncTokens<'_> {
    fn default() -> Self {
        Self {
            head: HEAD_TOKEN,
            foot: FOOT_TOKEN,
        }
    }
}

/// Byte offsets delimiting a document's own header and footer regions.
///
/// `head_cut` is the offset of the first character *after* the line containing
/// the first occurrence of the head token. `foot_cut` is the offset of the
/// newline *preceding* the line containing the last occurrence of the foot
/// token, so the footer slice starting there carries that newline with it.
/// A missing token, a token whose line never ends, or a token starting at
/// offset 0 all leave the corresponding cut at `None`; none of these are
/// errors. The two cuts are computed independently and `foot_cut` is not
/// guaranteed to lie beyond `head_cut`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CutPoints {
    pub head_cut: Option<usize>,
    pub foot_cut: Option<usize>,
}

/// Finds the cut points for one document.
///
/// Pure function over the document text: no I/O, no failure modes. Offsets
/// always land immediately after or at a `\n`, so slicing the text at a cut
/// point is safe regardless of any multi-byte content on the token lines.
pub fn locate(text: &str, tokens: SyncTokens<'_>) -> CutPoints {
    let bytes = text.as_bytes();
    let mut cuts = CutPoints::default();

    if let Some(start) = text.find(tokens.head) {
        // A head token at offset 0 is treated as absent.
        if start > 0 {
            cuts.head_cut = bytes[start..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|i| start + i + 1);
        }
    }

    if let Some(start) = text.rfind(tokens.foot) {
        if start > 0 {
            // Scan backward for the newline that ends the previous line.
            // Offset 0 is never inspected: a newline there does not count.
            let mut i = start;
            while i > 0 {
                if bytes[i] == b'\n' {
                    cuts.foot_cut = Some(i);
                    break;
                }
                i -= 1;
            }
        }
    }

    cuts
}
