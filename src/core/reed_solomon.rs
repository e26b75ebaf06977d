//! A Reed-Solomon codec over GF(256), parameterized by parity-symbol
//! count.
//!
//! Classical RS is limited to 255-byte codewords; arbitrarily long
//! input is handled by chunking it into blocks of `255 - parity` data
//! bytes, each framed independently, the same chunking convention the
//! reference implementation's `reedsolo.RSCodec` uses.

use std::sync::LazyLock;

use super::error::{Error, Result};

const FIELD_SIZE: usize = 256;
const GENERATOR: u8 = 0x02;
const PRIM_POLY: u16 = 0x11D;
const BLOCK_SIZE: usize = 255;

struct GfTables {
    exp: [u8; 512],
    log: [u8; FIELD_SIZE],
}

static GF: LazyLock<GfTables> = LazyLock::new(|| {
    let mut exp = [0u8; 512];
    let mut log = [0u8; FIELD_SIZE];
    let mut x: u16 = 1;
    for i in 0..255usize {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIM_POLY;
        }
    }
    for i in 255..512 {
        exp[i] = exp[i - 255];
    }
    GfTables { exp, log }
});

fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let sum = GF.log[a as usize] as usize + GF.log[b as usize] as usize;
    GF.exp[sum]
}

fn gf_div(a: u8, b: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let diff = GF.log[a as usize] as i32 - GF.log[b as usize] as i32;
    GF.exp[diff.rem_euclid(255) as usize]
}

fn gf_pow(x: u8, power: i32) -> u8 {
    if x == 0 {
        return 0;
    }
    let e = (GF.log[x as usize] as i32 * power).rem_euclid(255);
    GF.exp[e as usize]
}

fn gf_inverse(x: u8) -> u8 {
    GF.exp[(255 - GF.log[x as usize] as i32).rem_euclid(255) as usize]
}

/// Coefficients in descending-degree order (`poly[0]` is the
/// highest-degree term), matching the reference codec's convention.
fn gf_poly_mul(p: &[u8], q: &[u8]) -> Vec<u8> {
    let mut result = vec![0u8; p.len() + q.len() - 1];
    for (j, &qj) in q.iter().enumerate() {
        if qj == 0 {
            continue;
        }
        for (i, &pi) in p.iter().enumerate() {
            if pi == 0 {
                continue;
            }
            result[i + j] ^= gf_mul(pi, qj);
        }
    }
    result
}

fn gf_poly_add(p: &[u8], q: &[u8]) -> Vec<u8> {
    let len = p.len().max(q.len());
    let mut r = vec![0u8; len];
    r[len - p.len()..].copy_from_slice(p);
    for (i, &c) in q.iter().enumerate() {
        r[i + len - q.len()] ^= c;
    }
    r
}

fn gf_poly_scale(p: &[u8], x: u8) -> Vec<u8> {
    p.iter().map(|&c| gf_mul(c, x)).collect()
}

fn gf_poly_eval(poly: &[u8], x: u8) -> u8 {
    let mut y = poly[0];
    for &coef in &poly[1..] {
        y = gf_mul(y, x) ^ coef;
    }
    y
}

/// Synthetic polynomial division: returns `(quotient, remainder)`.
fn gf_poly_div(dividend: &[u8], divisor: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let mut msg_out = dividend.to_vec();
    for i in 0..dividend.len().saturating_sub(divisor.len() - 1) {
        let coef = msg_out[i];
        if coef != 0 {
            for (j, &dj) in divisor.iter().enumerate().skip(1) {
                if dj != 0 {
                    msg_out[i + j] ^= gf_mul(dj, coef);
                }
            }
        }
    }
    let separator = msg_out.len() - (divisor.len() - 1);
    let remainder = msg_out.split_off(separator);
    (msg_out, remainder)
}

fn generator_poly(nsym: usize) -> Vec<u8> {
    let mut g = vec![1u8];
    for i in 0..nsym {
        g = gf_poly_mul(&g, &[1, gf_pow(GENERATOR, i as i32)]);
    }
    g
}

fn encode_block(data: &[u8], nsym: usize) -> Vec<u8> {
    let gen = generator_poly(nsym);
    let mut msg_out = vec![0u8; data.len() + nsym];
    msg_out[..data.len()].copy_from_slice(data);
    for i in 0..data.len() {
        let coef = msg_out[i];
        if coef != 0 {
            for (j, &gj) in gen.iter().enumerate() {
                msg_out[i + j] ^= gf_mul(gj, coef);
            }
        }
    }
    msg_out[..data.len()].copy_from_slice(data);
    msg_out
}

fn calc_syndromes(msg: &[u8], nsym: usize) -> Vec<u8> {
    (0..nsym)
        .map(|i| gf_poly_eval(msg, gf_pow(GENERATOR, i as i32)))
        .collect()
}

fn find_error_locator(synd: &[u8], nsym: usize) -> Result<Vec<u8>> {
    let mut err_loc = vec![1u8];
    let mut old_loc = vec![1u8];
    for i in 0..nsym {
        let mut delta = synd[i];
        for j in 1..err_loc.len() {
            delta ^= gf_mul(err_loc[err_loc.len() - 1 - j], synd[i - j]);
        }
        old_loc.push(0);
        if delta != 0 {
            if old_loc.len() > err_loc.len() {
                let new_loc = gf_poly_scale(&old_loc, delta);
                old_loc = gf_poly_scale(&err_loc, gf_inverse(delta));
                err_loc = new_loc;
            }
            err_loc = gf_poly_add(&err_loc, &gf_poly_scale(&old_loc, delta));
        }
    }
    let first_nonzero = err_loc.iter().position(|&x| x != 0).unwrap_or(err_loc.len());
    let err_loc = err_loc[first_nonzero..].to_vec();
    let errs = err_loc.len().saturating_sub(1);
    if errs * 2 > nsym {
        return Err(Error::MalformedMessage("too many errors to correct".into()));
    }
    Ok(err_loc)
}

fn find_errors(err_loc: &[u8], block_len: usize) -> Option<Vec<usize>> {
    let errs = err_loc.len() - 1;
    let mut err_pos = Vec::new();
    for i in 0..block_len {
        if gf_poly_eval(err_loc, gf_pow(GENERATOR, i as i32)) == 0 {
            err_pos.push(block_len - 1 - i);
        }
    }
    if err_pos.len() != errs {
        return None;
    }
    Some(err_pos)
}

fn find_error_evaluator(synd_desc: &[u8], err_loc: &[u8], nsym: usize) -> Vec<u8> {
    let mut divisor = vec![0u8; nsym + 2];
    divisor[0] = 1;
    let (_, remainder) = gf_poly_div(&gf_poly_mul(synd_desc, err_loc), &divisor);
    remainder
}

fn correct_errata(msg: &[u8], synd: &[u8], err_pos: &[usize]) -> Result<Vec<u8>> {
    let coef_pos: Vec<usize> = err_pos.iter().map(|&p| msg.len() - 1 - p).collect();
    let mut errata_loc = vec![1u8];
    for &p in &coef_pos {
        errata_loc = gf_poly_mul(&errata_loc, &[gf_pow(GENERATOR, p as i32), 1]);
    }

    let synd_desc: Vec<u8> = synd.iter().rev().copied().collect();
    let err_eval = find_error_evaluator(&synd_desc, &errata_loc, errata_loc.len() - 1);

    let x: Vec<u8> = coef_pos.iter().map(|&p| gf_pow(GENERATOR, p as i32)).collect();

    let mut e = vec![0u8; msg.len()];
    for (i, &xi) in x.iter().enumerate() {
        let xi_inv = gf_inverse(xi);
        let mut errata_loc_prime = 1u8;
        for (j, &xj) in x.iter().enumerate() {
            if j != i {
                errata_loc_prime = gf_mul(errata_loc_prime, 1 ^ gf_mul(xi_inv, xj));
            }
        }
        if errata_loc_prime == 0 {
            return Err(Error::MalformedMessage("could not find error magnitude".into()));
        }
        let y = gf_mul(xi, gf_poly_eval(&err_eval, xi_inv));
        e[err_pos[i]] = gf_div(y, errata_loc_prime);
    }

    Ok(gf_poly_add(msg, &e))
}

fn decode_block(block: &[u8], nsym: usize) -> Result<Vec<u8>> {
    if block.len() <= nsym {
        return Err(Error::MalformedMessage("block shorter than parity length".into()));
    }
    let synd = calc_syndromes(block, nsym);
    if synd.iter().all(|&s| s == 0) {
        return Ok(block[..block.len() - nsym].to_vec());
    }

    let err_loc = find_error_locator(&synd, nsym)?;
    let err_pos = find_errors(&err_loc, block.len())
        .ok_or_else(|| Error::MalformedMessage("could not locate errors".into()))?;
    let corrected = correct_errata(block, &synd, &err_pos)?;

    let verify = calc_syndromes(&corrected, nsym);
    if !verify.iter().all(|&s| s == 0) {
        return Err(Error::MalformedMessage("could not correct message".into()));
    }
    Ok(corrected[..corrected.len() - nsym].to_vec())
}

/// Systematically encode `data`, appending `nsym` parity symbols per
/// 255-byte block.
pub fn encode(data: &[u8], nsym: usize) -> Vec<u8> {
    if nsym == 0 {
        return data.to_vec();
    }
    let chunk_size = BLOCK_SIZE - nsym;
    let mut out = Vec::with_capacity(data.len() + data.len().div_ceil(chunk_size.max(1)) * nsym);
    if data.is_empty() {
        return out;
    }
    for chunk in data.chunks(chunk_size) {
        out.extend(encode_block(chunk, nsym));
    }
    out
}

/// Decode and correct up to `nsym / 2` symbol errors per 255-byte
/// block, stripping the parity symbols.
pub fn decode(framed: &[u8], nsym: usize) -> Result<Vec<u8>> {
    if nsym == 0 {
        return Ok(framed.to_vec());
    }
    let mut out = Vec::new();
    let mut offset = 0;
    while offset < framed.len() {
        let end = (offset + BLOCK_SIZE).min(framed.len());
        out.extend(decode_block(&framed[offset..end], nsym)?);
        offset = end;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trips_without_corruption() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let framed = encode(data, 8);
        let recovered = decode(&framed, 8).unwrap();
        assert_eq!(recovered, data);
    }

    #[test]
    fn corrects_up_to_half_parity_errors() {
        let data: Vec<u8> = (0..100u16).map(|x| x as u8).collect();
        let nsym = 8;
        let mut framed = encode(&data, nsym);
        for idx in [0usize, 27, 50, 99] {
            framed[idx] ^= 0xFF;
        }
        let recovered = decode(&framed, nsym).unwrap();
        assert_eq!(recovered, data);
    }

    #[test]
    fn fails_cleanly_beyond_correction_bound() {
        let data: Vec<u8> = (0..100u16).map(|x| x as u8).collect();
        let nsym = 8;
        let mut framed = encode(&data, nsym);
        for idx in 0..=nsym {
            framed[idx] ^= 0xFF;
        }
        let result = decode(&framed, nsym);
        assert!(result.is_err() || result.unwrap() != data);
    }

    #[test]
    fn empty_input_round_trips() {
        let framed = encode(b"", 8);
        assert!(framed.is_empty());
        assert_eq!(decode(&framed, 8).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn multi_block_input_round_trips() {
        let data = vec![0xABu8; 600];
        let framed = encode(&data, 30);
        let recovered = decode(&framed, 30).unwrap();
        assert_eq!(recovered, data);
    }
}
