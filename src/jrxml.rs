//! Layout document serialization
//!
//! A [`ReportLayout`] is written out as a JasperReports style `.jrxml`
//! report definition. The document is assembled as a tree of
//! [`XmlElement`]s and serialized in one pass, so every attribute value and
//! text node is escaped on the way out.

use crate::layout::{Band, Element, ElementContent, FieldKind, ReportLayout};
use std::fmt::Write as _;

const NAMESPACE: &str = "http://jasperreports.sourceforge.net/jasperreports";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://jasperreports.sourceforge.net/jasperreports http://jasperreports.sourceforge.net/xsd/jasperreport.xsd";
const CONNECTION_ID_PROPERTY: &str = "com.jaspersoft.studio.spreadsheet.connectionID";
const DATA_ADAPTER_PROPERTY: &str = "com.jaspersoft.studio.data.defaultdataadapter";

/// A node in an XML document
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
}

/// An XML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute
    pub fn attr<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    /// Add a child element
    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Add an escaped text node
    pub fn text<S: Into<String>>(mut self, text: S) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// Add a CDATA section
    pub fn cdata<S: Into<String>>(mut self, text: S) -> Self {
        self.children.push(XmlNode::CData(text.into()));
        self
    }

    /// Value of the first attribute with this name
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements with this name
    pub fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter_map(move |node| match node {
            XmlNode::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// Serialize as a standalone document with an XML declaration
    pub fn to_document(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.write(&mut out, 0);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        indent(out, depth);
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape(value, true));
        }

        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push('>');

        let only_inline = self
            .children
            .iter()
            .all(|c| !matches!(c, XmlNode::Element(_)));
        if only_inline {
            for child in &self.children {
                write_inline(child, out);
            }
        } else {
            out.push('\n');
            for child in &self.children {
                match child {
                    XmlNode::Element(e) => e.write(out, depth + 1),
                    inline => {
                        indent(out, depth + 1);
                        write_inline(inline, out);
                        out.push('\n');
                    }
                }
            }
            indent(out, depth);
        }

        let _ = writeln!(out, "</{}>", self.name);
    }
}

fn write_inline(node: &XmlNode, out: &mut String) {
    match node {
        XmlNode::Text(text) => out.push_str(&escape(text, false)),
        XmlNode::CData(text) => {
            // "]]>" cannot appear inside a section, so close and reopen around it
            out.push_str("<![CDATA[");
            let text: String = text.chars().map(xml_char).collect();
            out.push_str(&text.replace("]]>", "]]]]><![CDATA[>"));
            out.push_str("]]>");
        }
        XmlNode::Element(_) => {}
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

/// Escape markup characters; quotes only matter inside attribute values
///
/// Characters XML 1.0 does not allow at all, such as most control
/// characters, are replaced with U+FFFD. Line breaks and tabs in attribute
/// values are written as character references so parsers keep them.
pub fn escape(value: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            '\'' if attribute => escaped.push_str("&apos;"),
            '\t' if attribute => escaped.push_str("&#9;"),
            '\n' if attribute => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            _ => escaped.push(xml_char(ch)),
        }
    }
    escaped
}

/// Map characters XML 1.0 forbids to the replacement character
fn xml_char(ch: char) -> char {
    match ch {
        '\t' | '\n' | '\r' => ch,
        '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => char::REPLACEMENT_CHARACTER,
        _ => ch,
    }
}

impl ReportLayout {
    /// Build the `.jrxml` document tree for this layout
    pub fn to_xml(&self) -> XmlElement {
        let mut root = XmlElement::new("jasperReport")
            .attr("xmlns", NAMESPACE)
            .attr("xmlns:xsi", XSI_NAMESPACE)
            .attr("xsi:schemaLocation", SCHEMA_LOCATION)
            .attr("name", &self.name)
            .attr("pageWidth", self.page_width)
            .attr("pageHeight", self.page_height)
            .attr("columnWidth", self.column_width)
            .attr("leftMargin", self.margins.left)
            .attr("rightMargin", self.margins.right)
            .attr("topMargin", self.margins.top)
            .attr("bottomMargin", self.margins.bottom)
            .attr("uuid", self.id)
            .child(property(DATA_ADAPTER_PROPERTY, "CSV Adapter"))
            .child(XmlElement::new("queryString").cdata(""));

        for field in &self.fields {
            let class = match field.kind {
                FieldKind::Text => "java.lang.String",
            };
            root = root.child(
                XmlElement::new("field")
                    .attr("name", &field.name)
                    .attr("class", class),
            );
        }

        for (name, band) in self.bands() {
            root = root.child(XmlElement::new(name).child(band_xml(band, name != "background")));
        }

        root
    }

    /// Serialize the layout as a `.jrxml` document
    pub fn to_jrxml(&self) -> String {
        self.to_xml().to_document()
    }
}

fn property(name: &str, value: impl ToString) -> XmlElement {
    XmlElement::new("property")
        .attr("name", name)
        .attr("value", value)
}

fn band_xml(band: &Band, with_height: bool) -> XmlElement {
    let mut xml = XmlElement::new("band");
    if with_height {
        xml = xml.attr("height", band.height);
    }
    xml = xml.attr("splitType", "Stretch");
    for element in &band.elements {
        xml = xml.child(element_xml(element));
    }
    xml
}

fn element_xml(element: &Element) -> XmlElement {
    let g = element.geometry;
    let report_element = XmlElement::new("reportElement")
        .attr("x", g.x)
        .attr("y", g.y)
        .attr("width", g.width)
        .attr("height", g.height)
        .attr("uuid", element.id)
        .child(property(CONNECTION_ID_PROPERTY, element.connection_id));

    match &element.content {
        ElementContent::StaticText(text) => XmlElement::new("staticText")
            .child(report_element)
            .child(XmlElement::new("text").cdata(text.as_str())),
        ElementContent::TextField(field) => XmlElement::new("textField")
            .child(report_element)
            .child(XmlElement::new("textFieldExpression").cdata(field.to_string())),
    }
}
