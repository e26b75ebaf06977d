//! Text armor: base64url body wrapped at 76 columns between a
//! PEM-style header and footer.

use base64::alphabet;
use base64::engine::general_purpose::PAD;
use base64::engine::GeneralPurpose;
use base64::Engine;

use super::error::{Error, Result};

const WRAP_COLUMN: usize = 76;

const ENGINE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PAD);

/// Which kind of blob is being armored; fixes the header/footer label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Label {
    Message,
    PublicKey,
    PrivateKey,
}

impl Label {
    fn text(self) -> &'static str {
        match self {
            Label::Message => "FINCRYPT MESSAGE",
            Label::PublicKey => "FINCRYPT PUBLIC KEY",
            Label::PrivateKey => "FINCRYPT PRIVATE KEY",
        }
    }
}

/// Wrap `blob` in armor with the header/footer appropriate for `label`.
pub fn armor(blob: &[u8], label: Label) -> String {
    let body = ENGINE.encode(blob);
    let mut out = String::new();
    out.push_str("----- BEGIN ");
    out.push_str(label.text());
    out.push_str(" -----\n");
    for line in body.as_bytes().chunks(WRAP_COLUMN) {
        out.push_str(std::str::from_utf8(line).expect("base64 is ASCII"));
        out.push('\n');
    }
    out.push_str("----- END ");
    out.push_str(label.text());
    out.push_str(" -----\n");
    out
}

/// Parse armored text back into its label and raw bytes.
pub fn dearmor(text: &str) -> Result<(Label, Vec<u8>)> {
    let text = text.trim();
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| Error::MalformedMessage("empty armored text".into()))?;

    let label = [Label::Message, Label::PublicKey, Label::PrivateKey]
        .into_iter()
        .find(|l| header_matches(header, "BEGIN", l.text()))
        .ok_or_else(|| Error::MalformedMessage("unrecognized armor header".into()))?;

    let mut body = String::new();
    let mut found_footer = false;
    for line in lines {
        if header_matches(line, "END", label.text()) {
            found_footer = true;
            break;
        }
        body.push_str(line.trim());
    }
    if !found_footer {
        return Err(Error::MalformedMessage("missing armor footer".into()));
    }

    let bytes = ENGINE
        .decode(body.as_bytes())
        .map_err(|e| Error::MalformedMessage(format!("invalid base64 in armor: {e}")))?;
    Ok((label, bytes))
}

fn header_matches(line: &str, keyword: &str, label: &str) -> bool {
    let line = line.trim();
    let expected = format!("{keyword} {label}");
    line.trim_matches('-').trim() == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armor_dearmor_round_trips_for_every_label() {
        for label in [Label::Message, Label::PublicKey, Label::PrivateKey] {
            let blob: Vec<u8> = (0..200u16).map(|x| x as u8).collect();
            let text = armor(&blob, label);
            let (parsed_label, parsed_blob) = dearmor(&text).unwrap();
            assert_eq!(parsed_label, label);
            assert_eq!(parsed_blob, blob);
        }
    }

    #[test]
    fn armor_wraps_body_at_76_columns() {
        let blob = vec![0xAB; 200];
        let text = armor(&blob, Label::Message);
        for line in text.lines().skip(1) {
            if line.starts_with("-----") {
                break;
            }
            assert!(line.len() <= 76);
        }
    }

    #[test]
    fn dearmor_rejects_missing_footer() {
        let text = "----- BEGIN FINCRYPT MESSAGE -----\nQUJD\n";
        assert!(dearmor(text).is_err());
    }

    #[test]
    fn dearmor_rejects_unknown_label() {
        let text = "----- BEGIN PGP MESSAGE -----\nQUJD\n----- END PGP MESSAGE -----\n";
        assert!(dearmor(text).is_err());
    }
}
