use anyhow::{bail, Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Produces the ordered paragraphs of a source document
pub trait DocumentLoader {
    fn load_paragraphs(&self, path: &Path) -> Result<Vec<String>>;
}

/// Reads paragraph text out of a .docx package
pub struct DocxLoader;

/// Treats every line of a text file as a paragraph
pub struct PlainTextLoader;

/// Pick a loader from the file extension
pub fn loader_for(path: &Path) -> Result<Box<dyn DocumentLoader>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "docx" => Ok(Box::new(DocxLoader)),
        "txt" | "md" => Ok(Box::new(PlainTextLoader)),
        other => bail!("Unsupported document type: '{}'", other),
    }
}

impl DocumentLoader for PlainTextLoader {
    fn load_paragraphs(&self, path: &Path) -> Result<Vec<String>> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(text.lines().map(str::to_string).collect())
    }
}

impl DocumentLoader for DocxLoader {
    fn load_paragraphs(&self, path: &Path) -> Result<Vec<String>> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let mut archive = zip::ZipArchive::new(file)
            .with_context(|| format!("{} is not a valid DOCX package", path.display()))?;
        let document = archive
            .by_name("word/document.xml")
            .context("DOCX package has no word/document.xml")?;

        read_document_xml(BufReader::new(document))
    }
}

/// Collect `<w:p>` paragraphs from WordprocessingML, joining their `<w:t>` runs.
/// Text box content (`<w:txbxContent>`) is skipped along with the paragraphs nested in it.
pub(crate) fn read_document_xml<R: BufRead>(source: R) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut paragraph_depth = 0usize;
    let mut text_box_depth = 0usize;
    let mut in_text = false;

    loop {
        buf.clear();
        let event = reader
            .read_event_into(&mut buf)
            .context("Malformed document.xml")?;

        if text_box_depth > 0 {
            match event {
                Event::Start(e) if e.local_name().as_ref() == b"txbxContent" => text_box_depth += 1,
                Event::End(e) if e.local_name().as_ref() == b"txbxContent" => text_box_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => {
                    if paragraph_depth == 0 {
                        current.clear();
                    }
                    paragraph_depth += 1;
                }
                b"t" => in_text = true,
                b"txbxContent" => {
                    text_box_depth = 1;
                    in_text = false;
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if paragraph_depth == 0 => paragraphs.push(String::new()),
                b"tab" if paragraph_depth > 0 => current.push('\t'),
                b"br" | b"cr" if paragraph_depth > 0 => current.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                    if paragraph_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(e) if in_text => current.push_str(&String::from_utf8_lossy(&e)),
            Event::CData(e) if in_text => current.push_str(&String::from_utf8_lossy(&e)),
            Event::GeneralRef(e) if in_text => {
                if let Some(resolved) = resolve_reference(&String::from_utf8_lossy(&e)) {
                    current.push(resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Resolve the name inside `&...;` to a character
fn resolve_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>CHAPTER 1</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Fever </w:t></w:r><w:r><w:t>&amp; chills</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>Dose</w:t><w:tab/><w:t>10 mg/kg</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_read_document_xml_paragraphs() {
        let paragraphs = read_document_xml(DOCUMENT_XML.as_bytes()).unwrap();
        assert_eq!(
            paragraphs,
            vec!["CHAPTER 1", "Fever & chills", "", "Dose\t10 mg/kg"]
        );
    }

    #[test]
    fn test_text_box_content_is_skipped() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
            xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006"
            xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape">
  <w:body>
    <w:p>
      <w:r><w:t>Give artesunate before referral</w:t></w:r>
      <w:r><mc:AlternateContent><mc:Choice><wps:txbx><w:txbxContent>
        <w:p><w:r><w:t>Box note</w:t></w:r></w:p>
        <w:p/>
      </w:txbxContent></wps:txbx></mc:Choice></mc:AlternateContent></w:r>
      <w:r><w:t xml:space="preserve"> and monitor.</w:t></w:r>
    </w:p>
    <w:p><w:r><w:t>Next paragraph</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let paragraphs = read_document_xml(xml.as_bytes()).unwrap();
        assert_eq!(
            paragraphs,
            vec!["Give artesunate before referral and monitor.", "Next paragraph"]
        );
    }

    #[test]
    fn test_resolve_reference() {
        assert_eq!(resolve_reference("amp"), Some('&'));
        assert_eq!(resolve_reference("#39"), Some('\''));
        assert_eq!(resolve_reference("#x2019"), Some('\u{2019}'));
        assert_eq!(resolve_reference("nbsp"), None);
    }

    #[test]
    fn test_docx_loader_reads_package() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guidelines.docx");
        {
            let file = File::create(&path).unwrap();
            let mut zip = zip::ZipWriter::new(file);
            let options = zip::write::SimpleFileOptions::default();
            zip.start_file("word/document.xml", options).unwrap();
            zip.write_all(DOCUMENT_XML.as_bytes()).unwrap();
            zip.finish().unwrap();
        }

        let loader = loader_for(&path).unwrap();
        let paragraphs = loader.load_paragraphs(&path).unwrap();
        assert_eq!(paragraphs[0], "CHAPTER 1");
        assert_eq!(paragraphs.len(), 4);
    }

    #[test]
    fn test_docx_loader_rejects_non_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, "not a zip").unwrap();

        assert!(DocxLoader.load_paragraphs(&path).is_err());
    }

    #[test]
    fn test_plain_text_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Chapter 1\nBody line\n").unwrap();

        let paragraphs = loader_for(&path).unwrap().load_paragraphs(&path).unwrap();
        assert_eq!(paragraphs, vec!["Chapter 1", "Body line"]);
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(loader_for(Path::new("guidelines.pdf")).is_err());
        assert!(loader_for(Path::new("guidelines")).is_err());
    }
}
