//! Simple compound selectors: `tag`, `#id`, `.class` and combinations such
//! as `a.nav-link`. Enough to match elements in the headless page and to
//! emit markup that a configured selector will find.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimpleSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl SimpleSelector {
    pub fn parse(selector: &str) -> Self {
        let mut out = Self::default();
        let mut current = String::new();
        let mut kind = 't';
        let flush = |kind: char, part: &mut String, out: &mut SimpleSelector| {
            if !part.is_empty() {
                match kind {
                    '#' => out.id = Some(std::mem::take(part)),
                    '.' => out.classes.push(std::mem::take(part)),
                    _ => out.tag = Some(std::mem::take(part).to_ascii_lowercase()),
                }
            }
        };
        for ch in selector.trim().chars() {
            if ch == '#' || ch == '.' {
                flush(kind, &mut current, &mut out);
                kind = ch;
            } else {
                current.push(ch);
            }
        }
        flush(kind, &mut current, &mut out);
        out
    }

    /// Whether an element with these properties matches.
    pub fn matches(&self, tag: &str, id: Option<&str>, has_class: impl Fn(&str) -> bool) -> bool {
        if self.tag.as_deref().is_some_and(|t| t != tag) {
            return false;
        }
        if self.id.is_some() && self.id.as_deref() != id {
            return false;
        }
        self.classes.iter().all(|c| has_class(c))
    }

    /// ` id="..." class="..."` attributes (leading space) for markup the
    /// selector will match, plus any extra classes.
    pub fn attributes(&self, extra_classes: &[&str]) -> String {
        let mut out = String::new();
        if let Some(id) = &self.id {
            out.push_str(&format!(" id=\"{id}\""));
        }
        let classes: Vec<&str> = self
            .classes
            .iter()
            .map(String::as_str)
            .chain(extra_classes.iter().copied())
            .collect();
        if !classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", classes.join(" ")));
        }
        out
    }

    /// Tag to emit: the selector's own, or `default`.
    pub fn tag_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.tag.as_deref().unwrap_or(default)
    }
}
