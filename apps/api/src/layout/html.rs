//! HTML rendering of the paged screen preview.
//!
//! Box sizes in the stylesheet come from the same `ScreenStyle` the measurement pass
//! uses, so a section occupies the height it was packed with.

use crate::layout::measure::ScreenStyle;
use crate::layout::paginator::ScreenPreview;
use crate::sections::content::{
    EntryBlock, HeaderContent, LinePair, SectionBody, SectionContent, BULLET_GLYPH,
};

/// Renders a self-contained HTML document with one fixed-size `div` per preview page.
pub fn render_preview_html(
    preview: &ScreenPreview,
    header: &HeaderContent,
    sections: &[SectionContent],
    style: &ScreenStyle,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
    html.push_str(&format!("<title>{}</title>", escape_html(&header.name)));
    html.push_str("<style>");
    html.push_str(&stylesheet(style));
    html.push_str("</style></head><body>\n");

    for page in &preview.pages {
        html.push_str(&format!(
            "<div class=\"page\" data-page=\"{}\">\n",
            page.index + 1
        ));
        if page.has_header {
            render_header(header, &mut html);
        }
        for id in &page.sections {
            if let Some(section) = sections.iter().find(|s| s.id == *id) {
                render_section(section, &mut html);
            }
        }
        html.push_str("</div>\n");
    }

    html.push_str("</body></html>\n");
    html
}

fn stylesheet(s: &ScreenStyle) -> String {
    format!(
        "body{{margin:0;background:#e5e5e5;font-family:Helvetica,Arial,sans-serif;color:#111}}\
         .page{{box-sizing:border-box;width:{pw}px;height:{ph}px;padding:{pad}px;margin:24px auto;background:#fff;overflow:visible}}\
         .header{{text-align:center;margin-bottom:{hg}px}}\
         .name{{font-size:{ns}px;font-weight:bold;line-height:{lh}}}\
         .contact{{font-size:{cs}px;line-height:{lh}}}\
         .section{{display:flow-root;margin-bottom:{sg}px}}\
         .title{{font-size:{ts}px;font-weight:bold;text-transform:uppercase;line-height:{lh};border-bottom:{rule}px solid #111;margin-bottom:{tg}px}}\
         .text,.row,.bullets{{font-size:{bs}px;line-height:{lh}}}\
         .entry{{margin-bottom:{eg}px}}\
         .row{{display:flex;justify-content:space-between;white-space:nowrap;overflow:hidden}}\
         .row.heading{{font-weight:bold}}.row.sub{{font-style:italic}}\
         .bullets{{list-style:none;margin:0;padding:0}}\
         .bullets li{{position:relative;padding-left:{bi}px}}\
         .bullets li::before{{content:'{glyph}';position:absolute;left:4px}}",
        pw = s.page_width,
        ph = s.page_height,
        pad = s.padding,
        hg = s.header_gap,
        ns = s.name_size,
        cs = s.contact_size,
        lh = s.line_height,
        sg = s.section_gap,
        ts = s.title_size,
        rule = s.title_rule,
        tg = s.title_gap,
        bs = s.body_size,
        eg = s.entry_gap,
        bi = s.bullet_indent,
        glyph = BULLET_GLYPH,
    )
}

fn render_header(header: &HeaderContent, html: &mut String) {
    let contact = header.contact_line();
    if header.name.is_empty() && contact.is_empty() {
        return;
    }
    html.push_str("<div class=\"header\">");
    if !header.name.is_empty() {
        html.push_str(&format!(
            "<div class=\"name\">{}</div>",
            escape_html(&header.name)
        ));
    }
    if !contact.is_empty() {
        html.push_str(&format!(
            "<div class=\"contact\">{}</div>",
            escape_html(&contact)
        ));
    }
    html.push_str("</div>\n");
}

fn render_section(section: &SectionContent, html: &mut String) {
    html.push_str(&format!(
        "<section class=\"section\" data-section=\"{}\"><div class=\"title\">{}</div>",
        section.id.as_str(),
        escape_html(&section.title)
    ));
    match &section.body {
        SectionBody::Text(paragraphs) => {
            for p in paragraphs {
                html.push_str(&format!("<div class=\"text\">{}</div>", escape_html(p)));
            }
        }
        SectionBody::Entries(entries) => {
            for entry in entries {
                render_entry(entry, html);
            }
        }
    }
    html.push_str("</section>\n");
}

fn render_entry(entry: &EntryBlock, html: &mut String) {
    html.push_str("<div class=\"entry\">");
    if let Some(heading) = &entry.heading {
        render_row(heading, "heading", html);
    }
    if let Some(sub) = &entry.subheading {
        render_row(sub, "sub", html);
    }
    if !entry.bullets.is_empty() {
        html.push_str("<ul class=\"bullets\">");
        for b in &entry.bullets {
            html.push_str(&format!("<li>{}</li>", escape_html(b)));
        }
        html.push_str("</ul>");
    }
    html.push_str("</div>");
}

fn render_row(pair: &LinePair, class: &str, html: &mut String) {
    html.push_str(&format!(
        "<div class=\"row {class}\"><span>{}</span><span>{}</span></div>",
        escape_html(&pair.left),
        escape_html(&pair.right)
    ));
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
