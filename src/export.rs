// src/export.rs
//
// XLSX export of a filtered view. An .xlsx file is a zip of a handful
// of OOXML parts; with inline strings and a single sheet the whole
// package is five small XML files, so we write them directly instead
// of pulling in a spreadsheet crate.

use std::io::{self, Cursor, Write};

use serde_json::Value;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::json::display_string;
use crate::data::TableView;

/// Sheet title shown in the workbook tab.
pub const EXPORT_SHEET_NAME: &str = "Données filtrées";
/// Suggested download file name.
pub const EXPORT_FILE_NAME: &str = "données_filtrées.xlsx";
/// Media type for the produced bytes.
pub const EXPORT_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

fn workbook_xml() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        ),
        xml_escape(EXPORT_SHEET_NAME)
    )
}

/// Package the view as a complete .xlsx file in memory.
/// The header row is always present, even for an empty view.
pub fn encode(view: &TableView<'_>) -> io::Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options: FileOptions<()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    let add_part = |zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, body: &str| {
        zip.start_file(name, options).map_err(io::Error::other)?;
        zip.write_all(body.as_bytes())
    };

    add_part(&mut zip, "[Content_Types].xml", CONTENT_TYPES)?;
    add_part(&mut zip, "_rels/.rels", ROOT_RELS)?;
    add_part(&mut zip, "xl/workbook.xml", &workbook_xml())?;
    add_part(&mut zip, "xl/_rels/workbook.xml.rels", WORKBOOK_RELS)?;
    add_part(&mut zip, "xl/worksheets/sheet1.xml", &sheet_xml(view))?;

    let cursor = zip.finish().map_err(io::Error::other)?;
    Ok(cursor.into_inner())
}

fn sheet_xml(view: &TableView<'_>) -> String {
    let table = view.table();
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        "\n",
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        "<sheetData>",
    ));

    // Row 1: column headers.
    xml.push_str(r#"<row r="1">"#);
    for (c, name) in table.columns.iter().enumerate() {
        push_inline_str(&mut xml, c, 1, name);
    }
    xml.push_str("</row>");

    for i in 0..view.len() {
        let Some(row) = view.row(i) else { continue };
        let r = i + 2;
        xml.push_str(&format!(r#"<row r="{r}">"#));
        for (c, cell) in row.iter().enumerate() {
            push_cell(&mut xml, c, r, cell);
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

/// One cell. Numbers keep their type, booleans become 0/1, null stays
/// an absent cell, everything else lands as an inline string.
fn push_cell(xml: &mut String, col: usize, row: usize, cell: &Value) {
    match cell {
        Value::Null => {}
        Value::Number(n) => {
            let r = cell_ref(col, row);
            xml.push_str(&format!(r#"<c r="{r}"><v>{n}</v></c>"#));
        }
        Value::Bool(b) => {
            let r = cell_ref(col, row);
            let v = if *b { 1 } else { 0 };
            xml.push_str(&format!(r#"<c r="{r}" t="b"><v>{v}</v></c>"#));
        }
        other => push_inline_str(xml, col, row, &display_string(Some(other))),
    }
}

fn push_inline_str(xml: &mut String, col: usize, row: usize, text: &str) {
    let r = cell_ref(col, row);
    xml.push_str(&format!(
        r#"<c r="{r}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        xml_escape(text)
    ));
}

/// A1-style reference for a zero-based column and one-based row.
fn cell_ref(col: usize, row: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.reverse();
    let mut out = String::from_utf8(letters).expect("ASCII column letters");
    out.push_str(&row.to_string());
    out
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
