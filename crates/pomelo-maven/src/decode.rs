//! Byte-stream decoding for pom.xml files.
//!
//! POMs found inside container layers come in whatever encoding the build
//! machine produced. Decoding never hard-fails on bad bytes: an XML
//! declaration label wins, then statistical charset detection, then a
//! lossy UTF-8 pass that substitutes U+FFFD so parsing can proceed.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

use crate::pom::{self, Pom};

/// Decode raw pom.xml bytes, parse the XML, and normalize coordinates.
///
/// Fails with `MalformedXml` when the stream is not well-formed XML and
/// with `IncompleteCoordinate` when the coordinate is still missing parts
/// after parent fallback.
pub fn decode_pom(bytes: &[u8]) -> miette::Result<Pom> {
    let text = to_utf8(bytes);
    let mut pom = pom::parse_pom(&text)?;
    pom.normalize()?;
    Ok(pom)
}

/// Normalize arbitrary bytes to UTF-8 text.
pub fn to_utf8(bytes: &[u8]) -> String {
    // An explicit <?xml encoding="..."?> declaration takes precedence.
    if let Some(label) = declared_encoding(bytes) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            let (text, _, _) = encoding.decode(bytes);
            return text.into_owned();
        }
        tracing::debug!("unknown charset label '{label}' in XML declaration");
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _, had_errors) = encoding.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }

    // Detection produced garbage; keep whatever is valid and substitute
    // the rest with U+FFFD.
    String::from_utf8_lossy(bytes).into_owned()
}

/// Extract the encoding label from a leading `<?xml ... encoding="..."?>`
/// declaration, if one is present and readable as ASCII.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(256)];
    let head = String::from_utf8_lossy(head);
    let start = head.find("<?xml")?;
    let end = head[start..].find("?>")? + start;
    let decl = &head[start..end];

    let pos = decl.find("encoding")?;
    let rest = decl[pos + "encoding".len()..].trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &rest[1..];
    let close = rest.find(quote)?;
    Some(rest[..close].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_passes_through() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
  <groupId>org.example</groupId>
  <artifactId>café</artifactId>
  <version>1.0</version>
</project>"#;
        let pom = decode_pom(xml.as_bytes()).unwrap();
        assert_eq!(pom.artifact_id.as_deref(), Some("café"));
    }

    #[test]
    fn declared_latin1_is_transcoded() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n");
        bytes.extend_from_slice(b"<project>\n  <groupId>org.example</groupId>\n");
        bytes.extend_from_slice(b"  <artifactId>caf\xe9</artifactId>\n");
        bytes.extend_from_slice(b"  <version>1.0</version>\n</project>");

        let pom = decode_pom(&bytes).unwrap();
        assert_eq!(pom.artifact_id.as_deref(), Some("caf\u{e9}"));
    }

    #[test]
    fn utf16le_bom_is_honored() {
        let xml = "<project><groupId>g</groupId><artifactId>a</artifactId>\
                   <version>1</version></project>";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in xml.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }

        let pom = decode_pom(&bytes).unwrap();
        assert_eq!(pom.artifact_id.as_deref(), Some("a"));
    }

    #[test]
    fn declared_encoding_extraction() {
        assert_eq!(
            declared_encoding(b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><project/>"),
            Some("ISO-8859-1".to_string())
        );
        assert_eq!(
            declared_encoding(b"<?xml version='1.0' encoding='utf-8'?>"),
            Some("utf-8".to_string())
        );
        assert_eq!(declared_encoding(b"<?xml version=\"1.0\"?><project/>"), None);
        assert_eq!(declared_encoding(b"<project/>"), None);
    }

    #[test]
    fn unknown_label_falls_back_to_detection() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"no-such-charset\"?>\
                      <project><groupId>g</groupId><artifactId>a</artifactId>\
                      <version>1</version></project>";
        let pom = decode_pom(bytes).unwrap();
        assert_eq!(pom.group_id.as_deref(), Some("g"));
    }

    #[test]
    fn garbage_never_panics() {
        // Not valid XML in any charset: decoding must survive, parsing
        // reports MalformedXml or IncompleteCoordinate.
        let bytes = [0xFF, 0xFE, 0xFF, 0x00, 0x01, 0x02];
        assert!(decode_pom(&bytes).is_err());
    }
}
