use pulldown_cmark::{Parser, html};
use pulldown_cmark_escape::{escape_href, escape_html};
use std::io::Write;

use crate::importer::JournalEntry;
use crate::utils::{ExportConfig, TitleSource};

/// Write the complete HTML page for `entries`, in slice order, to `writer`.
///
/// The head carries the charset declaration and the configured stylesheet
/// reference; the body is one block per entry. Structural tags are indented
/// two spaces per level, rendered Markdown fragments keep their own lines.
pub fn render_document<W: Write>(
    writer: &mut W,
    entries: &[JournalEntry],
    config: &ExportConfig,
) -> std::io::Result<()> {
    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html>")?;
    writeln!(writer, "  <head>")?;
    writeln!(writer, "    <meta charset=\"utf-8\">")?;
    writeln!(
        writer,
        "    <link rel=\"stylesheet\" href=\"{}\" type=\"text/css\">",
        escaped_href(&config.stylesheet)
    )?;
    writeln!(writer, "  </head>")?;
    writeln!(writer, "  <body>")?;

    for entry in entries {
        render_entry(writer, entry, config)?;
    }

    writeln!(writer, "  </body>")?;
    writeln!(writer, "</html>")?;
    Ok(())
}

fn render_entry<W: Write>(
    writer: &mut W,
    entry: &JournalEntry,
    config: &ExportConfig,
) -> std::io::Result<()> {
    writeln!(writer, "    <div class=\"entry\">")?;
    writeln!(
        writer,
        "      <h1>{}</h1>",
        escaped(&entry_title(entry, config.title_source))
    )?;

    if let Some(address) = &entry.address {
        writeln!(writer, "      <h5>{}</h5>", escaped(address))?;
    }

    if !entry.photos.is_empty() {
        writeln!(writer, "      <div class=\"photos\">")?;
        for photo in &entry.photos {
            writeln!(
                writer,
                "        <img src=\"{}\" width=\"600\">",
                escaped_href(photo)
            )?;
        }
        writeln!(writer, "      </div>")?;
    }

    if config.render_markdown {
        let mut fragment = String::new();
        html::push_html(&mut fragment, Parser::new(&entry.text));
        writeln!(writer, "      <div class=\"text\">")?;
        writer.write_all(fragment.as_bytes())?;
        writeln!(writer, "      </div>")?;
    } else {
        writeln!(writer, "      <p>{}</p>", escaped(&entry.text))?;
    }

    writeln!(writer, "    </div>")?;
    Ok(())
}

fn entry_title(entry: &JournalEntry, source: TitleSource) -> String {
    match source {
        TitleSource::Date => entry.display_date.clone(),
        TitleSource::TextPrefix => {
            derived_title(&entry.text).unwrap_or_else(|| entry.display_date.clone())
        }
    }
}

/// First words of the body, the way the app itself titles untitled entries.
fn derived_title(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().take(5).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn escaped(text: &str) -> String {
    let mut out = String::new();
    escape_html(&mut out, text).expect("writing to a String does not fail");
    out
}

fn escaped_href(href: &str) -> String {
    let mut out = String::new();
    escape_href(&mut out, href).expect("writing to a String does not fail");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::EntryOrder;
    use std::path::PathBuf;

    fn mk_config() -> ExportConfig {
        ExportConfig {
            source: PathBuf::from("backup"),
            output: None,
            stylesheet: "journey.css".into(),
            title_source: TitleSource::Date,
            render_markdown: true,
            order: EntryOrder::Date,
            verbose: false,
            quiet: true,
        }
    }

    fn mk_entry(text: &str) -> JournalEntry {
        JournalEntry {
            text: text.into(),
            photos: Vec::new(),
            address: None,
            date_journal: 1_509_022_007_088,
            display_date: "October 26, 2017 12:46".into(),
            file_name: "entry.json".into(),
        }
    }

    fn render(entries: &[JournalEntry], config: &ExportConfig) -> String {
        let mut out = Vec::new();
        render_document(&mut out, entries, config).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn one_block_per_entry() {
        let entries = vec![mk_entry("one"), mk_entry("two"), mk_entry("three")];
        let page = render(&entries, &mk_config());
        assert_eq!(page.matches("<div class=\"entry\">").count(), 3);
    }

    #[test]
    fn head_declares_charset_and_stylesheet() {
        let page = render(&[], &mk_config());
        assert!(page.contains("<meta charset=\"utf-8\">"));
        assert!(page.contains("<link rel=\"stylesheet\" href=\"journey.css\" type=\"text/css\">"));
    }

    #[test]
    fn markdown_is_rendered_to_html() {
        let page = render(&[mk_entry("Hello **world**")], &mk_config());
        assert!(page.contains("Hello <strong>world</strong>"));
    }

    #[test]
    fn plain_text_mode_keeps_the_raw_markup() {
        let mut config = mk_config();
        config.render_markdown = false;
        let page = render(&[mk_entry("Hello **world**")], &config);
        assert!(page.contains("<p>Hello **world**</p>"));
        assert!(!page.contains("<strong>"));
    }

    #[test]
    fn date_title_uses_the_display_date() {
        let page = render(&[mk_entry("whatever")], &mk_config());
        assert!(page.contains("<h1>October 26, 2017 12:46</h1>"));
    }

    #[test]
    fn text_prefix_title_takes_the_first_five_words() {
        let mut config = mk_config();
        config.title_source = TitleSource::TextPrefix;
        let page = render(
            &[mk_entry("A long walk through the old town today")],
            &config,
        );
        assert!(page.contains("<h1>A long walk through the</h1>"));
    }

    #[test]
    fn empty_text_falls_back_to_the_date_title() {
        let mut config = mk_config();
        config.title_source = TitleSource::TextPrefix;
        let page = render(&[mk_entry("   ")], &config);
        assert!(page.contains("<h1>October 26, 2017 12:46</h1>"));
    }

    #[test]
    fn missing_address_renders_no_address_line() {
        let page = render(&[mk_entry("text")], &mk_config());
        assert!(!page.contains("<h5>"));
    }

    #[test]
    fn address_is_escaped() {
        let mut entry = mk_entry("text");
        entry.address = Some("Fish & Chips <shop>".into());
        let page = render(&[entry], &mk_config());
        assert!(page.contains("<h5>Fish &amp; Chips &lt;shop&gt;</h5>"));
    }

    #[test]
    fn photos_render_at_fixed_width() {
        let mut entry = mk_entry("text");
        entry.photos = vec!["a.jpg".into(), "b.jpg".into()];
        let page = render(&[entry], &mk_config());
        assert!(page.contains("<img src=\"a.jpg\" width=\"600\">"));
        assert!(page.contains("<img src=\"b.jpg\" width=\"600\">"));
    }

    #[test]
    fn no_photos_renders_no_gallery() {
        let page = render(&[mk_entry("text")], &mk_config());
        assert!(!page.contains("class=\"photos\""));
    }
}
