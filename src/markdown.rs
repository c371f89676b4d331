//! HTML to Markdown conversion.
//!
//! A deterministic structural transform over the parsed DOM:
//! - headings render in ATX style (`#`, `##`, ...)
//! - code blocks render fenced, with the language hint taken from the
//!   `<code>` element's `language-*` class (empty when there is none):
//!   ` ```<lang>\n<trimmed code>\n```\n\n `
//! - the usual inline and block mappings for p/strong/em/a/img/lists/
//!   blockquote/hr/br and inline code
//!
//! Unknown elements fall through to their children, and bare text passes
//! through unchanged, so Markdown-only input converts to itself.
//!
//! A converter carries a list of skip selectors; matching elements (and
//! their subtrees) are dropped. The article scraper uses this to shed page
//! boilerplate before conversion.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

static CODE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("code").unwrap());
static EXTRA_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// HTML→Markdown converter with an optional element-skip list.
#[derive(Debug, Default)]
pub struct MarkdownConverter {
    skip: Vec<Selector>,
}

impl MarkdownConverter {
    /// Build a converter that drops any element matching one of
    /// `skip_selectors` (plus its subtree).
    pub fn new<'a, I>(skip_selectors: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let skip = skip_selectors
            .into_iter()
            .filter_map(|s| Selector::parse(s).ok())
            .collect();
        Self { skip }
    }

    /// Convert an HTML fragment string to Markdown.
    pub fn convert_fragment(&self, html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        normalize_output(self.render_children(fragment.root_element()))
    }

    /// Convert the contents of an already-located element to Markdown.
    pub fn convert_element(&self, element: ElementRef<'_>) -> String {
        normalize_output(self.render_children(element))
    }

    fn skipped(&self, element: &ElementRef<'_>) -> bool {
        self.skip.iter().any(|s| s.matches(element))
    }

    fn render_children(&self, element: ElementRef<'_>) -> String {
        let mut out = String::new();
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push_str(&text.text),
                Node::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        self.render_element(child_el, &mut out);
                    }
                }
                _ => {}
            }
        }
        out
    }

    fn render_element(&self, el: ElementRef<'_>, out: &mut String) {
        if self.skipped(&el) {
            return;
        }
        let name = el.value().name();
        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = name[1..].parse::<usize>().unwrap_or(1);
                let text = self.render_children(el);
                out.push_str(&"#".repeat(level));
                out.push(' ');
                out.push_str(text.trim());
                out.push_str("\n\n");
            }
            "p" | "div" | "section" | "article" | "figure" | "figcaption" => {
                let text = self.render_children(el);
                let text = text.trim();
                if !text.is_empty() {
                    out.push_str(text);
                    out.push_str("\n\n");
                }
            }
            "br" => out.push('\n'),
            "hr" => out.push_str("---\n\n"),
            "strong" | "b" => inline_wrap(out, "**", &self.render_children(el)),
            "em" | "i" => inline_wrap(out, "*", &self.render_children(el)),
            "del" | "s" => inline_wrap(out, "~~", &self.render_children(el)),
            "a" => {
                let href = el.value().attr("href").unwrap_or("");
                let text = self.render_children(el);
                out.push_str(&format!("[{}]({})", text.trim(), href));
            }
            "img" => {
                let src = el.value().attr("src").unwrap_or("");
                let alt = el.value().attr("alt").unwrap_or("");
                out.push_str(&format!("![{alt}]({src})\n\n"));
            }
            "pre" => self.render_code_block(el, out),
            "code" => {
                // Inline code; fenced blocks are handled by the pre branch.
                let text: String = el.text().collect();
                out.push('`');
                out.push_str(text.trim());
                out.push('`');
            }
            "ul" => self.render_list(el, out, false),
            "ol" => self.render_list(el, out, true),
            "blockquote" => {
                let inner = normalize_output(self.render_children(el));
                for line in inner.lines() {
                    out.push_str("> ");
                    out.push_str(line);
                    out.push('\n');
                }
                out.push('\n');
            }
            "script" | "style" | "noscript" | "iframe" => {}
            _ => out.push_str(&self.render_children(el)),
        }
    }

    /// Fenced code block with the language hint from the nested `<code>`
    /// element's `language-*` class.
    fn render_code_block(&self, el: ElementRef<'_>, out: &mut String) {
        let language = el
            .select(&CODE_SELECTOR)
            .next()
            .and_then(|code| code.value().attr("class"))
            .and_then(|class| {
                class
                    .split_whitespace()
                    .find_map(|c| c.strip_prefix("language-"))
            })
            .unwrap_or("");
        let code: String = el.text().collect();
        out.push_str(&format!("```{}\n{}\n```\n\n", language, code.trim()));
    }

    fn render_list(&self, el: ElementRef<'_>, out: &mut String, ordered: bool) {
        let mut index = 1usize;
        for child in el.children() {
            let Some(li) = ElementRef::wrap(child) else {
                continue;
            };
            if li.value().name() != "li" || self.skipped(&li) {
                continue;
            }
            let body = self.render_children(li);
            let body = body.trim();
            if ordered {
                out.push_str(&format!("{index}. {body}\n"));
                index += 1;
            } else {
                out.push_str(&format!("- {body}\n"));
            }
        }
        out.push('\n');
    }
}

fn inline_wrap(out: &mut String, marker: &str, inner: &str) {
    out.push_str(marker);
    out.push_str(inner.trim());
    out.push_str(marker);
}

fn normalize_output(s: String) -> String {
    EXTRA_BLANK_LINES.replace_all(&s, "\n\n").trim().to_string()
}
