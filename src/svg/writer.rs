//! SVG serialization of a rounded [`Document`]

use super::{Element, XmlNode};
use crate::document::{Defs, Document, Node};
use crate::error::Result;
use crate::models::{Attributes, Geometry, MaskDef, Point, Rect, Shape};
use quick_xml::escape::escape;
use std::fmt::Write;
use std::path::Path;

const XML_DECLARATION: &str = "<?xml version='1.0' encoding='utf-8'?>";

/// Serialize the document, `<defs>` first, then the live nodes in paint order.
pub fn write_svg(document: &Document) -> String {
    let mut svg = String::new();
    let _ = writeln!(svg, "{XML_DECLARATION}");
    let _ = writeln!(
        svg,
        "<{}{}>",
        document.root_name(),
        attr_string(document.root_attrs())
    );

    if !document.defs().is_empty() {
        write_defs(&mut svg, document, document.defs());
    }

    for node in document.nodes() {
        svg.push_str("  ");
        match node {
            Node::Shape(shape) => write_shape(&mut svg, document, shape),
            Node::Layer(shapes) => {
                let g = document.qualify("g");
                let _ = write!(svg, "<{g}>");
                for shape in shapes {
                    write_shape(&mut svg, document, shape);
                }
                let _ = write!(svg, "</{g}>");
            }
            Node::Markup(markup) => write_xml_node(&mut svg, markup),
        }
        svg.push('\n');
    }

    let _ = writeln!(svg, "</{}>", document.root_name());
    svg
}

/// Write the serialized document to `path`.
pub fn save_svg<P: AsRef<Path>>(document: &Document, path: P) -> Result<()> {
    std::fs::write(path, write_svg(document))?;
    Ok(())
}

fn write_defs(svg: &mut String, document: &Document, defs: &Defs) {
    let name = document.qualify("defs");
    let _ = write!(svg, "  <{}{}>", name, attr_string(&defs.attrs));
    for node in &defs.existing {
        write_xml_node(svg, node);
    }
    for mask in &defs.masks {
        write_mask(svg, document, mask);
    }
    let _ = writeln!(svg, "</{name}>");
}

fn write_mask(svg: &mut String, document: &Document, mask: &MaskDef) {
    let background = mask.background();
    let _ = write!(
        svg,
        r#"<{} id="{}">"#,
        document.qualify("mask"),
        escape(mask.id.as_str())
    );
    let _ = write!(
        svg,
        r#"<{} x="{}" y="{}" width="{}" height="{}" fill="white"/>"#,
        document.qualify("rect"),
        background.origin.x,
        background.origin.y,
        background.width,
        background.height
    );
    write_circle(svg, document, mask.center, mask.hole, r#" fill="black""#);
    let _ = write!(svg, "</{}>", document.qualify("mask"));
}

fn write_shape(svg: &mut String, document: &Document, shape: &Shape) {
    let attrs = pass_through_string(&shape.attrs);
    match &shape.geometry {
        Geometry::Square(rect) | Geometry::HalfPanel(rect) => {
            write_rect(svg, document, rect, &attrs);
        }
        Geometry::Circle(circle) => {
            write_circle(svg, document, circle.center, circle.r, &attrs);
        }
        Geometry::CornerPolygon(polygon) => {
            let points: Vec<String> = polygon
                .points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect();
            let _ = write!(
                svg,
                r#"<{} points="{}"{}/>"#,
                document.qualify("polygon"),
                points.join(" "),
                attrs
            );
        }
        Geometry::RegistrationMark(mark) => {
            let g = document.qualify("g");
            let _ = write!(svg, "<{g}{attrs}>");
            let masked = format!(
                r#" fill="black" mask="url(#{})""#,
                escape(mark.mask_id.as_str())
            );
            write_circle(svg, document, mark.center, mark.outer, &masked);
            write_circle(svg, document, mark.center, mark.inner, r#" fill="black""#);
            let _ = write!(svg, "</{g}>");
        }
    }
}

fn write_rect(svg: &mut String, document: &Document, rect: &Rect, extra: &str) {
    let _ = write!(
        svg,
        r#"<{} x="{}" y="{}" width="{}" height="{}"{}/>"#,
        document.qualify("rect"),
        rect.origin.x,
        rect.origin.y,
        rect.width,
        rect.height,
        extra
    );
}

fn write_circle(svg: &mut String, document: &Document, center: Point, r: i32, extra: &str) {
    let _ = write!(
        svg,
        r#"<{} cx="{}" cy="{}" r="{}"{}/>"#,
        document.qualify("circle"),
        center.x,
        center.y,
        r,
        extra
    );
}

/// Verbatim re-emission of untouched markup
fn write_xml_node(svg: &mut String, node: &XmlNode) {
    match node {
        XmlNode::Element(el) => write_element(svg, el),
        XmlNode::Text(text) => svg.push_str(&escape(text.as_str())),
        XmlNode::CData(text) => {
            let _ = write!(svg, "<![CDATA[{text}]]>");
        }
        XmlNode::Comment(text) => {
            let _ = write!(svg, "<!--{text}-->");
        }
    }
}

fn write_element(svg: &mut String, el: &Element) {
    let _ = write!(svg, "<{}{}", el.name, attr_string(&el.attrs));
    if el.children.is_empty() {
        svg.push_str("/>");
        return;
    }
    svg.push('>');
    for child in &el.children {
        write_xml_node(svg, child);
    }
    let _ = write!(svg, "</{}>", el.name);
}

fn attr_string(attrs: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in attrs {
        let _ = write!(out, r#" {}="{}""#, key, escape(value.as_str()));
    }
    out
}

fn pass_through_string(attrs: &Attributes) -> String {
    let mut out = String::new();
    for (key, value) in attrs.iter() {
        let _ = write!(out, r#" {}="{}""#, key, escape(value));
    }
    out
}
