//! Turning a repository readme into html that is safe to show.
use crate::github;
use crate::models::Readme;
use crate::templates::ToHtml;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Node};
use std::io::{self, Write};
use std::sync::LazyLock;

/// Get the text of a readme from its (base64 encoded) content.
pub fn readme_text(readme: &Readme) -> Result<String, github::Error> {
    if readme.encoding != "base64" {
        return Err(github::Error::BadContent(format!(
            "{} encoded as {:?}",
            readme.name, readme.encoding,
        )));
    }
    // GitHub wraps the encoded content in lines.
    let encoded = readme
        .content
        .split_ascii_whitespace()
        .collect::<String>();
    let data = STANDARD
        .decode(encoded)
        .map_err(|e| github::Error::BadContent(e.to_string()))?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Base url for the raw files of a repository branch.
pub fn raw_base(owner: &str, repo: &str, branch: &str) -> String {
    format!("https://raw.githubusercontent.com/{owner}/{repo}/{branch}")
}

/// Make relative links and image sources in `html` absolute.
///
/// Links relative to the repository root (starting with a single
/// slash) are also resolved against `base`.
pub fn rewrite_relative_links(html: &str, base: &str) -> String {
    static LINK: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r#"(\s)(href|src)="([^"]*)""#).unwrap()
    });
    LINK.replace_all(html, |caps: &Captures| {
        let url = &caps[3];
        if is_relative(url) {
            let path = url.trim_start_matches("./").trim_start_matches('/');
            format!("{}{}=\"{}/{}\"", &caps[1], &caps[2], base, path)
        } else {
            caps[0].to_string()
        }
    })
    .into_owned()
}

fn is_relative(url: &str) -> bool {
    static SCHEME: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").unwrap());
    !(url.is_empty()
        || url.starts_with('#')
        || url.starts_with("//")
        || SCHEME.is_match(url))
}

/// Elements kept when sanitizing.
const ALLOWED: &[&str] = &[
    "a", "abbr", "b", "blockquote", "br", "caption", "cite", "code", "dd",
    "del", "details", "div", "dl", "dt", "em", "figcaption", "figure", "h1",
    "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "ins", "kbd", "li",
    "mark", "ol", "p", "picture", "pre", "q", "rp", "rt", "ruby", "s",
    "samp", "section", "small", "source", "span", "strike", "strong", "sub",
    "summary", "sup", "table", "tbody", "td", "tfoot", "th", "thead", "tr",
    "tt", "u", "ul", "var", "wbr",
];

/// Elements removed together with their content.
const DROPPED: &[&str] = &[
    "base", "button", "datalist", "embed", "fieldset", "form", "frame",
    "frameset", "head", "iframe", "input", "label", "legend", "link",
    "math", "meta", "noscript", "object", "optgroup", "option", "output",
    "script", "select", "style", "svg", "template", "textarea", "title",
];

const VOID: &[&str] = &["br", "hr", "img", "source", "wbr"];

const ATTRIBUTES: &[&str] = &[
    "align", "alt", "class", "colspan", "dir", "height", "href", "id",
    "lang", "media", "name", "open", "rowspan", "src", "start", "title",
    "type", "width",
];

/// Html that has been reduced to a safe subset of elements and
/// attributes.
///
/// Elements not on the allow list are unwrapped (their content is
/// kept), except for things like scripts, styles and forms that are
/// removed completely.
pub struct SafeHtml(Html);

impl SafeHtml {
    pub fn parse(html: &str) -> Self {
        SafeHtml(Html::parse_fragment(html))
    }
}

impl ToHtml for SafeHtml {
    fn to_html(&self, out: &mut dyn Write) -> io::Result<()> {
        write_children(out, self.0.root_element())
    }
}

fn write_children(out: &mut dyn Write, parent: ElementRef) -> io::Result<()> {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => {
                let text: &str = text;
                text.to_html(out)?;
            }
            Node::Element(_) => {
                if let Some(elem) = ElementRef::wrap(child) {
                    write_element(out, elem)?;
                }
            }
            _ => (),
        }
    }
    Ok(())
}

fn write_element(out: &mut dyn Write, elem: ElementRef) -> io::Result<()> {
    let name = elem.value().name();
    if DROPPED.contains(&name) {
        return Ok(());
    }
    if !ALLOWED.contains(&name) {
        return write_children(out, elem);
    }
    write!(out, "<{name}")?;
    for (attr, value) in elem.value().attrs() {
        if ATTRIBUTES.contains(&attr) && safe_value(attr, value) {
            write!(out, " {attr}=\"")?;
            value.to_html(out)?;
            out.write_all(b"\"")?;
        }
    }
    out.write_all(b">")?;
    if VOID.contains(&name) {
        return Ok(());
    }
    write_children(out, elem)?;
    write!(out, "</{name}>")
}

/// Reject urls that would run code in or replace the page.
fn safe_value(attr: &str, value: &str) -> bool {
    if attr != "href" && attr != "src" {
        return true;
    }
    let url = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect::<String>()
        .to_ascii_lowercase();
    if url.starts_with("javascript:") || url.starts_with("vbscript:") {
        false
    } else if url.starts_with("data:") {
        attr == "src" && url.starts_with("data:image/")
    } else {
        true
    }
}
