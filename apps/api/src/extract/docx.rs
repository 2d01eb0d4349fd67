//! DOCX body-paragraph extraction.
//!
//! A `.docx` file is a zip archive; the body lives in `word/document.xml`. Only
//! top-level body paragraphs count: paragraphs nested inside tables are skipped.
//! Text, tabs and breaks are read from runs (`w:r`) only, so paragraph properties
//! such as tab-stop definitions contribute nothing.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

pub fn extract_paragraphs(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(format!("not a zip archive: {e}")))?;

    let mut xml = Vec::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Docx(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_end(&mut xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;

    paragraphs_from_xml(&xml)
}

fn paragraphs_from_xml(xml: &[u8]) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut table_depth = 0usize;
    let mut paragraph_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| ExtractError::Docx(format!("malformed XML: {e}")))?;

        let collecting = table_depth == 0 && paragraph_depth > 0 && run_depth > 0;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"p" if table_depth == 0 => {
                    if paragraph_depth == 0 {
                        current.clear();
                    }
                    paragraph_depth += 1;
                }
                b"r" => run_depth += 1,
                b"t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"p" if table_depth == 0 && paragraph_depth > 0 => {
                    paragraph_depth -= 1;
                    if paragraph_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if table_depth == 0 && paragraph_depth == 0 => paragraphs.push(String::new()),
                b"tab" if collecting => current.push('\t'),
                b"br" | b"cr" if collecting => current.push('\n'),
                _ => {}
            },
            Event::Text(e) if collecting && in_text => {
                let text = e
                    .decode()
                    .map_err(|err| ExtractError::Docx(format!("bad text encoding: {err}")))?;
                current.push_str(&text);
            }
            Event::CData(e) if collecting && in_text => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Event::GeneralRef(e) if collecting && in_text => {
                if let Ok(Some(ch)) = e.resolve_char_ref() {
                    current.push(ch);
                } else {
                    let name = e
                        .decode()
                        .map_err(|err| ExtractError::Docx(format!("bad entity: {err}")))?;
                    if let Some(resolved) = quick_xml::escape::resolve_xml_entity(&name) {
                        current.push_str(resolved);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
