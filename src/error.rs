//! Crate-wide error types for the I/O-facing parsers.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ImageError {
    Io(io::Error),
    BadHeader,
    UnsupportedBpp(u8),
    UnsupportedDataType(u8),
    TruncatedRle,
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Io(e) => write!(f, "i/o error reading TGA: {}", e),
            ImageError::BadHeader => write!(f, "bad bpp or width/height in TGA header"),
            ImageError::UnsupportedBpp(bpp) => write!(f, "unsupported bits per pixel: {}", bpp),
            ImageError::UnsupportedDataType(code) => {
                write!(f, "unknown TGA data type code: {}", code)
            }
            ImageError::TruncatedRle => write!(f, "RLE stream ended before all pixels were read"),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ImageError {
    fn from(e: io::Error) -> Self {
        ImageError::Io(e)
    }
}

#[derive(Debug)]
pub enum ObjError {
    Io(io::Error),
    NoVertices,
    NoFaces,
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjError::Io(e) => write!(f, "failed to read OBJ file: {}", e),
            ObjError::NoVertices => write!(f, "OBJ file contains no vertex positions"),
            ObjError::NoFaces => write!(f, "OBJ file contains no faces"),
        }
    }
}

impl std::error::Error for ObjError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ObjError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ObjError {
    fn from(e: io::Error) -> Self {
        ObjError::Io(e)
    }
}
