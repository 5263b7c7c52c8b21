//! Family and style renaming by ordered literal substitution.
//!
//! Rules run one after another over the whole text, so longer patterns must come
//! before the shorter patterns they contain. Where a short pattern also hits text
//! that has to stay, a later rule puts that text back.

use anyhow::{Result, bail};

use crate::config::{FontFamily, Replacement};

#[derive(Debug, Clone, Default)]
pub struct NameRewriter {
    rules: Vec<Replacement>,
}

impl NameRewriter {
    pub fn new(rules: Vec<Replacement>) -> Result<Self> {
        if let Some(rule) = rules.iter().find(|r| r.from.is_empty()) {
            bail!("Empty rename pattern (-> {:?})", rule.to);
        }
        Ok(Self { rules })
    }

    /// All rules of all families, in family order.
    pub fn from_families(families: &[FontFamily]) -> Result<Self> {
        Self::new(families.iter().flat_map(|f| f.rules.iter().cloned()).collect())
    }

    pub fn rules(&self) -> &[Replacement] {
        &self.rules
    }

    pub fn rewrite(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| acc.replace(&rule.from, &rule.to))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::config::{plemol_jp, udev_gothic};

    fn default_rewriter() -> NameRewriter {
        let root = Path::new("/fonts");
        NameRewriter::from_families(&[udev_gothic(root), plemol_jp(root)]).unwrap()
    }

    #[test]
    fn test_rule_order() {
        let from: Vec<_> = default_rewriter().rules().iter().map(|r| r.from.clone()).collect();
        assert_eq!(
            from,
            [
                "UDEV Gothic 35JPDOC",
                "UDEV Gothic JPDOC",
                "UDEVGothic35JPDOC",
                "UDEVGothicJPDOC",
                "PlemolJP35",
                "PlemolJP",
                "[Plemo]",
            ]
        );
    }

    #[test]
    fn test_rewrite_file_names() {
        let rewriter = default_rewriter();
        assert_eq!(rewriter.rewrite("UDEVGothicJPDOC-Regular.ttf"), "Udev-Regular.ttf");
        assert_eq!(rewriter.rewrite("UDEVGothic35JPDOC-BoldItalic.ttf"), "Udev39-BoldItalic.ttf");
        assert_eq!(rewriter.rewrite("PlemolJP-Italic.ttf"), "Plemo-Italic.ttf");
        assert_eq!(rewriter.rewrite("PlemolJP35-Bold.ttf"), "Plemo39-Bold.ttf");
        assert_eq!(rewriter.rewrite("Example-Regular.ttf"), "Example-Regular.ttf");
    }

    #[test]
    fn test_rewrite_spaced_names() {
        let rewriter = default_rewriter();
        assert_eq!(rewriter.rewrite("UDEV Gothic 35JPDOC Bold"), "Udev39 Bold");
        assert_eq!(rewriter.rewrite("UDEV Gothic JPDOC Bold"), "Udev Bold");
    }

    #[test]
    fn test_bracketed_family_is_restored() {
        let rewriter = default_rewriter();
        let text = "<namerecord nameID=\"1\">PlemolJP35 Bold</namerecord>\n\
                    <namerecord nameID=\"3\">1.500;[PlemolJP];PlemolJP35-Bold</namerecord>";
        let out = rewriter.rewrite(text);
        assert_eq!(
            out,
            "<namerecord nameID=\"1\">Plemo39 Bold</namerecord>\n\
             <namerecord nameID=\"3\">1.500;[PlemolJP];Plemo39-Bold</namerecord>"
        );
    }

    #[test]
    fn test_rewrite_twice_is_stable() {
        let rewriter = default_rewriter();
        for name in [
            "UDEVGothicJPDOC-Regular.ttf",
            "UDEV Gothic 35JPDOC Italic",
            "PlemolJP35-BoldItalic.ttf",
            "Copyright [PlemolJP] PlemolJP",
            "Example-Regular.ttf",
        ] {
            let once = rewriter.rewrite(name);
            assert_eq!(rewriter.rewrite(&once), once, "{name}");
        }
    }

    #[test]
    fn test_order_matters() {
        // Shorter pattern first swallows the narrow variant.
        let wrong = NameRewriter::new(vec![
            Replacement::new("PlemolJP", "Plemo"),
            Replacement::new("PlemolJP35", "Plemo39"),
        ])
        .unwrap();
        assert_eq!(wrong.rewrite("PlemolJP35-Bold"), "Plemo35-Bold");
        assert_eq!(default_rewriter().rewrite("PlemolJP35-Bold"), "Plemo39-Bold");
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(NameRewriter::new(vec![Replacement::new("", "x")]).is_err());
    }
}
