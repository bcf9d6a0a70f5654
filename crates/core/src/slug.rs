use std::collections::HashMap;

/// Fallback used when a title has no sluggable characters.
const FALLBACK_SLUG: &str = "comparison";

/// Github-slugger style anchor generator, unique within one document.
#[derive(Debug, Default)]
pub struct Slugger {
    counts: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the next unique slug for `text`, suffixing repeats with `-1`, `-2`, ...
    ///
    /// Suffixed slugs are recorded too, so a later title that slugs to
    /// `loops-1` cannot collide with the second `loops`.
    pub fn next_slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();
        while self.counts.contains_key(&slug) {
            let seen = self.counts.entry(base.clone()).or_insert(0);
            *seen += 1;
            slug = format!("{base}-{seen}");
        }
        self.counts.insert(slug.clone(), 0);
        slug
    }
}

/// Lowercases, keeps alphanumerics, `-` and `_`, turns spaces into hyphens,
/// and drops everything else.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.trim().chars() {
        if ch.is_alphanumeric() || ch == '-' || ch == '_' {
            slug.extend(ch.to_lowercase());
        } else if ch == ' ' {
            slug.push('-');
        }
    }

    if slug.is_empty() {
        slug.push_str(FALLBACK_SLUG);
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_titles() {
        assert_eq!(slugify("Variable Declarations"), "variable-declarations");
        assert_eq!(slugify("Error handling: if err != nil"), "error-handling-if-err--nil");
    }

    #[test]
    fn unicode_kept() {
        assert_eq!(slugify("并发 Goroutines"), "并发-goroutines");
    }

    #[test]
    fn empty_falls_back() {
        assert_eq!(slugify("  ?! "), "comparison");
    }

    #[test]
    fn repeats_are_suffixed() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.next_slug("Loops"), "loops");
        assert_eq!(slugger.next_slug("Loops"), "loops-1");
        assert_eq!(slugger.next_slug("loops"), "loops-2");
        assert_eq!(slugger.next_slug("Maps"), "maps");
    }

    #[test]
    fn suffixed_slugs_are_reserved() {
        let mut slugger = Slugger::new();
        let anchors: Vec<_> = ["Loops", "Loops", "Loops 1"]
            .into_iter()
            .map(|title| slugger.next_slug(title))
            .collect();
        assert_eq!(anchors, ["loops", "loops-1", "loops-1-1"]);

        assert_eq!(slugger.next_slug("Loops"), "loops-2");
        assert_eq!(slugger.next_slug("Loops 1"), "loops-1-2");
    }
}
