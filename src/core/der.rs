//! A minimal DER/BER tag-length-value codec.
//!
//! Only the three constructs the containers need: `SEQUENCE` (0x30),
//! `INTEGER` (0x02, unsigned, minimally encoded), and `OCTET STRING`
//! (0x04). Definite-length short and long forms are both supported on
//! decode; encode always emits the shortest valid form.

use num_bigint::BigUint;

use super::error::{Error, Result};

const TAG_INTEGER: u8 = 0x02;
const TAG_OCTET_STRING: u8 = 0x04;
const TAG_SEQUENCE: u8 = 0x30;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Integer(BigUint),
    OctetString(Vec<u8>),
    Sequence(Vec<Value>),
}

impl Value {
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Value::Integer(n) => tlv(TAG_INTEGER, &encode_integer_content(n)),
            Value::OctetString(bytes) => tlv(TAG_OCTET_STRING, bytes),
            Value::Sequence(items) => {
                let mut content = Vec::new();
                for item in items {
                    content.extend(item.encode());
                }
                tlv(TAG_SEQUENCE, &content)
            }
        }
    }

    pub fn as_integer(&self) -> Option<&BigUint> {
        match self {
            Value::Integer(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_octet_string(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

fn encode_integer_content(n: &BigUint) -> Vec<u8> {
    if n == &BigUint::from(0u32) {
        return vec![0x00];
    }
    let mut bytes = n.to_bytes_be();
    // DER integers are two's-complement; an unsigned value whose
    // highest bit is set needs a leading 0x00 so it doesn't read as
    // negative.
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0x00);
    }
    bytes
}

fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend(encode_length(content.len()));
    out.extend_from_slice(content);
    out
}

fn encode_length(len: usize) -> Vec<u8> {
    if len < 0x80 {
        vec![len as u8]
    } else {
        let bytes = len.to_be_bytes();
        let first_nonzero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
        let trimmed = &bytes[first_nonzero..];
        let mut out = vec![0x80 | trimmed.len() as u8];
        out.extend_from_slice(trimmed);
        out
    }
}

/// Decode exactly one TLV value, requiring that it consume the entire
/// input (no trailing bytes, which would indicate a malformed or
/// truncated container).
pub fn decode_one(input: &[u8]) -> Result<Value> {
    let (value, consumed) = decode(input)?;
    if consumed != input.len() {
        return Err(Error::MalformedMessage("trailing bytes after DER value".into()));
    }
    Ok(value)
}

fn decode(input: &[u8]) -> Result<(Value, usize)> {
    if input.is_empty() {
        return Err(Error::MalformedMessage("empty DER input".into()));
    }
    let tag = input[0];
    let (len, len_bytes) = decode_length(&input[1..])?;
    let header_len = 1 + len_bytes;
    let total = header_len
        .checked_add(len)
        .ok_or_else(|| Error::MalformedMessage("DER length overflow".into()))?;
    if input.len() < total {
        return Err(Error::MalformedMessage("truncated DER value".into()));
    }
    let content = &input[header_len..total];

    let value = match tag {
        TAG_INTEGER => {
            if content.is_empty() {
                return Err(Error::MalformedMessage("empty INTEGER".into()));
            }
            Value::Integer(BigUint::from_bytes_be(content))
        }
        TAG_OCTET_STRING => Value::OctetString(content.to_vec()),
        TAG_SEQUENCE => {
            let mut items = Vec::new();
            let mut offset = 0;
            while offset < content.len() {
                let (item, used) = decode(&content[offset..])?;
                items.push(item);
                offset += used;
            }
            Value::Sequence(items)
        }
        other => {
            return Err(Error::MalformedMessage(format!("unsupported DER tag 0x{other:02x}")));
        }
    };

    Ok((value, total))
}

fn decode_length(input: &[u8]) -> Result<(usize, usize)> {
    let first = *input
        .first()
        .ok_or_else(|| Error::MalformedMessage("truncated DER length".into()))?;
    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }
    let num_bytes = (first & 0x7f) as usize;
    if num_bytes == 0 || num_bytes > 8 {
        return Err(Error::MalformedMessage("unsupported DER length form".into()));
    }
    if input.len() < 1 + num_bytes {
        return Err(Error::MalformedMessage("truncated DER long-form length".into()));
    }
    let mut len_bytes = [0u8; 8];
    len_bytes[8 - num_bytes..].copy_from_slice(&input[1..1 + num_bytes]);
    let len = u64::from_be_bytes(len_bytes) as usize;
    Ok((len, 1 + num_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_round_trips_including_high_bit_values() {
        for n in [0u32, 1, 127, 128, 255, 256, 65535] {
            let value = Value::Integer(BigUint::from(n));
            let encoded = value.encode();
            let decoded = decode_one(&encoded).unwrap();
            assert_eq!(decoded.as_integer().unwrap(), &BigUint::from(n));
        }
    }

    #[test]
    fn octet_string_round_trips() {
        let value = Value::OctetString(b"hello".to_vec());
        let encoded = value.encode();
        let decoded = decode_one(&encoded).unwrap();
        assert_eq!(decoded.as_octet_string().unwrap(), b"hello");
    }

    #[test]
    fn sequence_round_trips() {
        let value = Value::Sequence(vec![
            Value::Integer(BigUint::from(1u32)),
            Value::Integer(BigUint::from(2u32)),
        ]);
        let encoded = value.encode();
        let decoded = decode_one(&encoded).unwrap();
        let items = decoded.as_sequence().unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn long_form_length_round_trips_for_large_content() {
        let value = Value::OctetString(vec![0xAB; 300]);
        let encoded = value.encode();
        assert_eq!(encoded[1], 0x82); // two length bytes follow
        let decoded = decode_one(&encoded).unwrap();
        assert_eq!(decoded.as_octet_string().unwrap().len(), 300);
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let value = Value::Integer(BigUint::from(1u32));
        let mut encoded = value.encode();
        encoded.push(0xFF);
        assert!(decode_one(&encoded).is_err());
    }

    #[test]
    fn truncated_input_is_rejected() {
        let value = Value::OctetString(vec![1, 2, 3, 4]);
        let encoded = value.encode();
        assert!(decode_one(&encoded[..encoded.len() - 1]).is_err());
    }
}
