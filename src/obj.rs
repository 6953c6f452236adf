//! Hand-rolled line-oriented Wavefront OBJ parser.
//!
//! Recognizes `v`/`vt`/`vn`/`f` lines only; everything else is ignored.
//! Malformed numeric fields on `v`/`vt`/`vn` abort that line; a malformed
//! `f` line is skipped silently.

use std::io::{BufRead, BufReader, Read};

use log::warn;

use crate::error::ObjError;
use crate::math::{Vec2, Vec3};

/// A face's indices into one of the three attribute arrays, 0-based.
/// `-1` marks an attribute absent for that face (no UV or normal given).
pub type IndexTriple = [i64; 3];

#[derive(Debug, Default)]
pub struct ParsedObj {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub idx_position: Vec<IndexTriple>,
    pub idx_uv: Vec<IndexTriple>,
    pub idx_norm: Vec<IndexTriple>,
}

pub fn parse(reader: impl Read) -> Result<ParsedObj, ObjError> {
    let mut out = ParsedObj::default();
    let reader = BufReader::new(reader);

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("v ") {
            match parse_floats3(rest) {
                Some(v) => out.positions.push(Vec3::new(v[0], v[1], v[2])),
                None => warn!("malformed v line, skipped: {}", line),
            }
        } else if let Some(rest) = line.strip_prefix("vt ") {
            match parse_floats_at_least2(rest) {
                Some(v) => out.uvs.push(Vec2::new(v[0], v[1])),
                None => warn!("malformed vt line, skipped: {}", line),
            }
        } else if let Some(rest) = line.strip_prefix("vn ") {
            match parse_floats3(rest) {
                Some(v) => out.normals.push(Vec3::new(v[0], v[1], v[2])),
                None => warn!("malformed vn line, skipped: {}", line),
            }
        } else if let Some(rest) = line.strip_prefix("f ") {
            match parse_face(rest) {
                Some((p, u, n)) => {
                    out.idx_position.push(p);
                    out.idx_uv.push(u);
                    out.idx_norm.push(n);
                }
                None => warn!("malformed f line, skipped: {}", line),
            }
        }
    }

    if out.positions.is_empty() {
        return Err(ObjError::NoVertices);
    }
    if out.idx_position.is_empty() {
        return Err(ObjError::NoFaces);
    }
    Ok(out)
}

fn parse_floats3(rest: &str) -> Option<[f32; 3]> {
    let mut it = rest.split_whitespace();
    let x: f32 = it.next()?.parse().ok()?;
    let y: f32 = it.next()?.parse().ok()?;
    let z: f32 = it.next()?.parse().ok()?;
    Some([x, y, z])
}

fn parse_floats_at_least2(rest: &str) -> Option<[f32; 2]> {
    let mut it = rest.split_whitespace();
    let u: f32 = it.next()?.parse().ok()?;
    let v: f32 = it.next()?.parse().ok()?;
    Some([u, v])
}

/// Parses a face line body into `(position, uv, normal)` index triples,
/// 0-based. The input's total slash count determines the per-vertex token
/// shape: 0 slashes is bare position indices, 3 is `pos/uv`, 6 is
/// `pos/uv/norm` with a `pos//norm` fallback when the UV field is empty.
fn parse_face(rest: &str) -> Option<(IndexTriple, IndexTriple, IndexTriple)> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() != 3 {
        return None;
    }
    let slashes: usize = tokens.iter().map(|t| t.matches('/').count()).sum();

    match slashes {
        0 => {
            let mut pos = [0i64; 3];
            for (i, t) in tokens.iter().enumerate() {
                pos[i] = t.parse::<i64>().ok()? - 1;
            }
            Some((pos, [-1, -1, -1], [-1, -1, -1]))
        }
        3 => {
            let mut pos = [0i64; 3];
            let mut uv = [0i64; 3];
            for (i, t) in tokens.iter().enumerate() {
                let mut parts = t.splitn(2, '/');
                pos[i] = parts.next()?.parse::<i64>().ok()? - 1;
                uv[i] = parts.next()?.parse::<i64>().ok()? - 1;
            }
            Some((pos, uv, [-1, -1, -1]))
        }
        6 => {
            if let Some(triples) = parse_face_pos_uv_norm(&tokens) {
                return Some(triples);
            }
            parse_face_pos_norm(&tokens)
        }
        _ => None,
    }
}

fn parse_face_pos_uv_norm(tokens: &[&str]) -> Option<(IndexTriple, IndexTriple, IndexTriple)> {
    let mut pos = [0i64; 3];
    let mut uv = [0i64; 3];
    let mut norm = [0i64; 3];
    for (i, t) in tokens.iter().enumerate() {
        let mut parts = t.split('/');
        pos[i] = parts.next()?.parse::<i64>().ok()? - 1;
        uv[i] = parts.next()?.parse::<i64>().ok()? - 1;
        norm[i] = parts.next()?.parse::<i64>().ok()? - 1;
    }
    Some((pos, uv, norm))
}

fn parse_face_pos_norm(tokens: &[&str]) -> Option<(IndexTriple, IndexTriple, IndexTriple)> {
    let mut pos = [0i64; 3];
    let mut norm = [0i64; 3];
    for (i, t) in tokens.iter().enumerate() {
        let mut parts = t.split('/');
        pos[i] = parts.next()?.parse::<i64>().ok()? - 1;
        let uv_field = parts.next()?;
        if !uv_field.is_empty() {
            return None;
        }
        norm[i] = parts.next()?.parse::<i64>().ok()? - 1;
    }
    Some((pos, [-1, -1, -1], norm))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_CORNER: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
f 1 2 3
";

    #[test]
    fn parses_bare_position_faces() {
        let parsed = parse(CUBE_CORNER.as_bytes()).unwrap();
        assert_eq!(parsed.positions.len(), 3);
        assert_eq!(parsed.idx_position[0], [0, 1, 2]);
        assert_eq!(parsed.idx_uv[0], [-1, -1, -1]);
    }

    #[test]
    fn parses_pos_uv_faces() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";
        let parsed = parse(obj.as_bytes()).unwrap();
        assert_eq!(parsed.idx_position[0], [0, 1, 2]);
        assert_eq!(parsed.idx_uv[0], [0, 1, 2]);
        assert_eq!(parsed.idx_norm[0], [-1, -1, -1]);
    }

    #[test]
    fn parses_pos_uv_norm_faces() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 1\n\
                   f 1/1/1 2/2/1 3/3/1\n";
        let parsed = parse(obj.as_bytes()).unwrap();
        assert_eq!(parsed.idx_uv[0], [0, 1, 2]);
        assert_eq!(parsed.idx_norm[0], [0, 0, 0]);
    }

    #[test]
    fn falls_back_to_pos_norm_when_uv_field_empty() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let parsed = parse(obj.as_bytes()).unwrap();
        assert_eq!(parsed.idx_position[0], [0, 1, 2]);
        assert_eq!(parsed.idx_uv[0], [-1, -1, -1]);
        assert_eq!(parsed.idx_norm[0], [0, 0, 0]);
    }

    #[test]
    fn malformed_face_line_is_skipped_not_fatal() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2\nf 1 2 3\n";
        let parsed = parse(obj.as_bytes()).unwrap();
        assert_eq!(parsed.idx_position.len(), 1);
    }

    #[test]
    fn no_vertices_is_an_error() {
        let obj = "f 1 2 3\n";
        assert!(matches!(parse(obj.as_bytes()), Err(ObjError::NoVertices)));
    }
}
