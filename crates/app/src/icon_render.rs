//! Inline SVG recolouring for device icons.
//!
//! The icon assets mark their background shapes with the `bg` class. Rendering
//! an icon sizes the root `<svg>` element and forces the fill of every
//! background shape, leaving the rest of the document untouched.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesStart, Event};

use zabdash_domain::severity::FillColor;

/// Edge length, in pixels, of a rendered device icon.
pub const ICON_SIZE: &str = "50";

/// Class that marks recolourable background shapes.
pub const BACKGROUND_CLASS: &str = "bg";

/// Failure to rewrite an icon document.
#[derive(Debug, thiserror::Error)]
pub enum IconRenderError {
    #[error("malformed SVG document")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed SVG attribute")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("failed to write SVG document")]
    Io(#[from] std::io::Error),

    #[error("SVG output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("document has no <svg> root element")]
    MissingRoot,
}

/// Size the icon to [`ICON_SIZE`] and paint its background shapes with `fill`.
///
/// # Errors
///
/// Returns [`IconRenderError`] if the input is not well-formed XML or has no
/// `<svg>` element.
pub fn colorize(svg: &str, fill: FillColor) -> Result<String, IconRenderError> {
    let mut reader = Reader::from_str(svg);
    let mut writer = Writer::new(Vec::with_capacity(svg.len() + 64));
    let mut seen_root = false;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(elem) => {
                let elem = rewrite(&elem, fill, &mut seen_root)?;
                writer.write_event(Event::Start(elem))?;
            }
            Event::Empty(elem) => {
                let elem = rewrite(&elem, fill, &mut seen_root)?;
                writer.write_event(Event::Empty(elem))?;
            }
            other => writer.write_event(other)?,
        }
    }

    if !seen_root {
        return Err(IconRenderError::MissingRoot);
    }
    Ok(String::from_utf8(writer.into_inner())?)
}

fn rewrite(
    elem: &BytesStart<'_>,
    fill: FillColor,
    seen_root: &mut bool,
) -> Result<BytesStart<'static>, IconRenderError> {
    let name = String::from_utf8_lossy(elem.name().as_ref()).into_owned();
    let is_root = !*seen_root && local_name(&name) == "svg";
    if is_root {
        *seen_root = true;
    }

    let mut attrs: Vec<(String, String)> = Vec::new();
    for attr in elem.attributes() {
        let attr = attr?;
        attrs.push((
            String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            String::from_utf8_lossy(&attr.value).into_owned(),
        ));
    }

    if is_root {
        set_attr(&mut attrs, "width", ICON_SIZE.to_string());
        set_attr(&mut attrs, "height", ICON_SIZE.to_string());
    }

    let is_background = attrs.iter().any(|(key, value)| {
        key == "class"
            && value
                .split_ascii_whitespace()
                .any(|class| class == BACKGROUND_CLASS)
    });
    if is_background {
        let style = attrs
            .iter()
            .find(|(key, _)| key == "style")
            .map_or("", |(_, value)| value.as_str());
        let style = with_fill(style, fill);
        set_attr(&mut attrs, "style", style);
    }

    let mut out = BytesStart::new(name);
    for (key, value) in &attrs {
        // Values are still escaped as read, so they are written back raw.
        out.push_attribute((key.as_bytes(), value.as_bytes()));
    }
    Ok(out)
}

fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

fn set_attr(attrs: &mut Vec<(String, String)>, key: &str, value: String) {
    match attrs.iter_mut().find(|(existing, _)| existing == key) {
        Some((_, slot)) => *slot = value,
        None => attrs.push((key.to_string(), value)),
    }
}

/// Replace any `fill` declaration in an inline style with `fill`.
fn with_fill(style: &str, fill: FillColor) -> String {
    let mut decls: Vec<&str> = style
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter(|decl| {
            decl.split_once(':')
                .is_none_or(|(prop, _)| !prop.trim().eq_ignore_ascii_case("fill"))
        })
        .collect();
    let fill_decl = format!("fill:{}", fill.hex());
    decls.push(&fill_decl);
    decls.join(";")
}
