//! Contains the logic for carving a source document and rebuilding targets.

use crate::error::SyncError;
use crate::locator::{CutPoints, HEAD_TOKEN};

/// The shared regions carved out of the source document.
///
/// `header` runs from the start of the source through the head-token line,
/// newline included. `footer` runs from the newline before the foot-token
/// line through the end of the source, or is empty when the source has no
/// foot token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceParts<'a> {
    pub header: &'a str,
    pub footer: &'a str,
}

/// The per-target result of applying the update policy.
#[derive(Debug, PartialEq, Eq)]
pub enum SpliceOutcome {
    /// The target's replacement text.
    Updated(String),
    /// The target has no head token; it must be left untouched.
    TokenMissing,
}

/// Splits the source document into its header and footer regions.
///
/// A source without a locatable head cut is unusable and aborts the run; a
/// missing foot cut merely yields an empty footer.
pub fn carve<'a>(source: &'a str, cuts: CutPoints) -> Result<SourceParts<'a>, SyncError> {
    let head_cut = cuts.head_cut.ok_or(SyncError::HeadTokenMissing(HEAD_TOKEN))?;

    Ok(SourceParts {
        header: &source[..head_cut],
        footer: cuts.foot_cut.map_or("", |foot_cut| &source[foot_cut..]),
    })
}

/// Rebuilds one target document from the source parts and the target's own
/// cut points.
///
/// The target keeps its own body between its cuts. A target with a head cut
/// but no foot cut keeps its entire tail verbatim and gets NO footer: missing
/// the foot token opts that file out of footer synchronization. This
/// asymmetry is intentional.
pub fn splice(parts: SourceParts<'_>, target: &str, cuts: CutPoints) -> SpliceOutcome {
    let Some(head_cut) = cuts.head_cut else {
        return SpliceOutcome::TokenMissing;
    };

    let mut updated =
        String::with_capacity(parts.header.len() + target.len() + parts.footer.len());
    updated.push_str(parts.header);

    match cuts.foot_cut {
        Some(foot_cut) => {
            // A foot cut before the head cut leaves an empty body; the cuts
            // are never validated against each other.
            updated.push_str(target.get(head_cut..foot_cut).unwrap_or(""));
            updated.push_str(parts.footer);
        }
        None => updated.push_str(&target[head_cut..]),
    }

    SpliceOutcome::Updated(updated)
}

/// The content of a brand-new document: the source's header and footer with
/// no body in between.
pub fn new_document(parts: SourceParts<'_>) -> String {
    let mut content = String::with_capacity(parts.header.len() + parts.footer.len());
    content.push_str(parts.header);
    content.push_str(parts.footer);
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{locate, SyncTokens};

    const SOURCE_HTML: &str = "<head>\n<title>Site</title>\n</head>\n<body>\n<!-- @SyncTokenHead -->\n<p>Source body</p>\n<!-- @SyncTokenFoot -->\n<footer>shared</footer>\n</body>";

    fn source_parts(source: &str) -> SourceParts<'_> {
        carve(source, locate(source, SyncTokens::default())).unwrap()
    }

    #[test]
    fn test_s1_carve_header_and_footer() {
        // S1 (Carve): header ends with the head-token line, footer starts
        // with the newline before the foot-token line.
        let parts = source_parts(SOURCE_HTML);

        assert!(parts.header.starts_with("<head>\n"));
        assert!(parts.header.ends_with("<!-- @SyncTokenHead -->\n"));
        assert!(parts.footer.starts_with("\n<!-- @SyncTokenFoot -->"));
        assert!(parts.footer.ends_with("</body>"));
    }

    #[test]
    fn test_s2_carve_without_foot_token_yields_empty_footer() {
        let source = "<h1>X</h1>\n<!-- @SyncTokenHead -->\n<p>Tail</p>\n";
        let parts = source_parts(source);
        assert_eq!(parts.header, "<h1>X</h1>\n<!-- @SyncTokenHead -->\n");
        assert_eq!(parts.footer, "");
    }

    #[test]
    fn test_s3_carve_without_head_token_fails() {
        let source = "<p>no tokens here</p>\n";
        let result = carve(source, locate(source, SyncTokens::default()));
        assert!(matches!(result, Err(SyncError::HeadTokenMissing(_))));
    }

    #[test]
    fn test_s4_splice_replaces_header_and_footer_keeps_body() {
        // S4 (Both tokens): replacement = source header + target body +
        // source footer.
        let parts = source_parts(SOURCE_HTML);
        let target = "<head>\n<title>Old</title>\n</head>\n<body>\n<!-- @SyncTokenHead -->\n<p>Old</p>\n<!-- @SyncTokenFoot -->\n<footer>stale</footer>\n</body>";
        let cuts = locate(target, SyncTokens::default());

        let outcome = splice(parts, target, cuts);

        // The footer slice carries the newline that ended the body line.
        let expected = format!("{}{}{}", parts.header, "<p>Old</p>", parts.footer);
        assert_eq!(outcome, SpliceOutcome::Updated(expected));
    }

    #[test]
    fn test_s5_splice_footer_opt_out() {
        // S5 (Footer opt-out): a target with no foot token keeps its whole
        // tail and never receives the source footer.
        let parts = source_parts(SOURCE_HTML);
        let target =
            "<head>\n</head>\n<body>\n<!-- @SyncTokenHead -->\n<p>Keep</p>\n</body>";
        let cuts = locate(target, SyncTokens::default());

        let outcome = splice(parts, target, cuts);

        let expected = format!("{}{}", parts.header, "<p>Keep</p>\n</body>");
        assert_eq!(outcome, SpliceOutcome::Updated(expected));

        if let SpliceOutcome::Updated(text) = outcome {
            assert!(!text.contains("@SyncTokenFoot"));
        }
    }

    #[test]
    fn test_s6_splice_without_head_token_skips() {
        let parts = source_parts(SOURCE_HTML);
        let target = "<p>untagged page</p>\n";
        let cuts = locate(target, SyncTokens::default());

        assert_eq!(splice(parts, target, cuts), SpliceOutcome::TokenMissing);
    }

    #[test]
    fn test_s7_splice_is_idempotent() {
        // S7 (Idempotence): splicing an already-synchronized target again
        // yields byte-identical text.
        let parts = source_parts(SOURCE_HTML);
        let target = "<head>\n</head>\n<body>\n<!-- @SyncTokenHead -->\n<p>Body</p>\n<!-- @SyncTokenFoot -->\n<footer>old</footer>\n</body>";

        let first = match splice(parts, target, locate(target, SyncTokens::default())) {
            SpliceOutcome::Updated(text) => text,
            SpliceOutcome::TokenMissing => panic!("target has both tokens"),
        };
        let second = match splice(parts, &first, locate(&first, SyncTokens::default())) {
            SpliceOutcome::Updated(text) => text,
            SpliceOutcome::TokenMissing => panic!("synchronized target keeps its tokens"),
        };

        assert_eq!(first, second);
    }

    #[test]
    fn test_s8_splice_with_inverted_cuts_empties_body() {
        // S8 (Inverted cuts): a foot token above the head token produces an
        // empty body rather than a failure.
        let parts = source_parts(SOURCE_HTML);
        let target = "<x>\n<!-- @SyncTokenFoot -->\n<p>odd</p>\n<!-- @SyncTokenHead -->\n<p>tail</p>\n";
        let cuts = locate(target, SyncTokens::default());
        assert!(cuts.foot_cut.unwrap() < cuts.head_cut.unwrap());

        let outcome = splice(parts, target, cuts);

        let expected = format!("{}{}", parts.header, parts.footer);
        assert_eq!(outcome, SpliceOutcome::Updated(expected));
    }

    #[test]
    fn test_s9_new_document_is_header_plus_footer() {
        let parts = source_parts(SOURCE_HTML);
        let content = new_document(parts);
        assert_eq!(content, format!("{}{}", parts.header, parts.footer));
    }

    #[test]
    fn test_s10_new_document_without_footer_is_header_only() {
        let source = "<h1>X</h1>\n<!-- @SyncTokenHead -->\n<p>C</p>\n<h2>End</h2>\n</body>";
        let parts = source_parts(source);
        assert_eq!(
            new_document(parts),
            "<h1>X</h1>\n<!-- @SyncTokenHead -->\n"
        );
    }
}
