//! TGA image buffer: decode, encode, and nearest-neighbour sampling.
//!
//! The codec mirrors the TGA variant the original renderer reads and
//! writes: uncompressed or RLE-compressed, 8/24/32 bpp, BGR storage order
//! on disk swapped to RGB in memory, with the usual descriptor-bit origin
//! flips.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use log::warn;

use crate::colour::Colour;
use crate::error::ImageError;

const HEADER_LEN: usize = 18;
const FOOTER: &[u8; 26] = b"\0\0\0\0\0\0\0\0TRUEVISION-XFILE.\0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Grayscale = 1,
    Rgb = 3,
    Rgba = 4,
}

impl Format {
    fn from_bytespp(bytespp: usize) -> Option<Format> {
        match bytespp {
            1 => Some(Format::Grayscale),
            3 => Some(Format::Rgb),
            4 => Some(Format::Rgba),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Image {
    width: usize,
    height: usize,
    bytespp: usize,
    data: Vec<u8>,
}

impl Image {
    pub fn new(width: usize, height: usize, format: Format) -> Self {
        let bytespp = format as usize;
        Self {
            width,
            height,
            bytespp,
            data: vec![0u8; width * height * bytespp],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bytespp(&self) -> usize {
        self.bytespp
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Fills every pixel with `c`.
    pub fn clear(&mut self, c: Colour<u8>) {
        let bytes = [c.r(), c.g(), c.b(), c.a()];
        for chunk in self.data.chunks_exact_mut(self.bytespp) {
            chunk.copy_from_slice(&bytes[..self.bytespp]);
        }
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        (x + y * self.width) * self.bytespp
    }

    pub fn get(&self, x: usize, y: usize) -> Colour<u8> {
        let off = self.offset(x, y);
        Colour::from_bytes(&self.data[off..off + self.bytespp])
    }

    pub fn set(&mut self, x: usize, y: usize, c: Colour<u8>) {
        let off = self.offset(x, y);
        let bytes = [c.r(), c.g(), c.b(), c.a()];
        self.data[off..off + self.bytespp].copy_from_slice(&bytes[..self.bytespp]);
    }

    /// Nearest-neighbour sample at UV `(u, v)`, clamped to the edge of the
    /// image for out-of-range coordinates.
    pub fn sample(&self, u: f32, v: f32) -> Colour<u8> {
        let x = ((u * self.width as f32) as i64).clamp(0, self.width as i64 - 1) as usize;
        let y = ((v * self.height as f32) as i64).clamp(0, self.height as i64 - 1) as usize;
        self.get(x, y)
    }

    pub fn flip_horizontally(&mut self) {
        let half = self.width / 2;
        for i in 0..half {
            for j in 0..self.height {
                let a = self.get(i, j);
                let b = self.get(self.width - 1 - i, j);
                self.set(i, j, b);
                self.set(self.width - 1 - i, j, a);
            }
        }
    }

    pub fn flip_vertically(&mut self) {
        let bytes_per_line = self.width * self.bytespp;
        let half = self.height / 2;
        for j in 0..half {
            let l1 = j * bytes_per_line;
            let l2 = (self.height - 1 - j) * bytes_per_line;
            for k in 0..bytes_per_line {
                self.data.swap(l1 + k, l2 + k);
            }
        }
    }

    /// Nearest-neighbour resize to `w`x`h` pixels using the classic
    /// scanline DDA: each destination pixel/scanline is filled by
    /// accumulating an error term against the source dimension and
    /// consuming source pixels/scanlines once it overflows.
    pub fn scale(&mut self, w: usize, h: usize) {
        if w == 0 || h == 0 {
            return;
        }
        let bytespp = self.bytespp;
        let mut tdata = vec![0u8; w * h * bytespp];
        let nlinebytes = w * bytespp;
        let olinebytes = self.width * bytespp;

        let mut nscanline = 0usize;
        let mut oscanline = 0usize;
        let mut erry: isize = 0;

        for _ in 0..self.height {
            let mut errx: isize = self.width as isize - w as isize;
            let mut nx: isize = -(bytespp as isize);
            let mut ox: isize = -(bytespp as isize);

            for _ in 0..self.width {
                ox += bytespp as isize;
                errx += w as isize;
                while errx >= self.width as isize {
                    errx -= self.width as isize;
                    nx += bytespp as isize;
                    let src = oscanline + ox as usize;
                    let dst = nscanline + nx as usize;
                    tdata[dst..dst + bytespp].copy_from_slice(&self.data[src..src + bytespp]);
                }
            }

            erry += h as isize;
            oscanline += olinebytes;
            while erry >= self.height as isize {
                if erry >= (self.height as isize) << 1 {
                    tdata.copy_within(nscanline..nscanline + nlinebytes, nscanline + nlinebytes);
                }
                erry -= self.height as isize;
                nscanline += nlinebytes;
            }
        }

        self.data = tdata;
        self.width = w;
        self.height = h;
    }

    pub fn read_tga_file(path: impl AsRef<Path>) -> Result<Image, ImageError> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| {
            warn!("can't open file {}: {}", path.display(), e);
            ImageError::Io(e)
        })?;
        Self::read_tga(&mut file)
    }

    pub fn read_tga(reader: &mut impl Read) -> Result<Image, ImageError> {
        let mut header = [0u8; HEADER_LEN];
        reader.read_exact(&mut header).map_err(|e| {
            warn!("an error occurred while reading the header: {}", e);
            ImageError::Io(e)
        })?;

        let datatypecode = header[2];
        let width = i16::from_le_bytes([header[12], header[13]]) as i32;
        let height = i16::from_le_bytes([header[14], header[15]]) as i32;
        let bitsperpixel = header[16];
        let imagedescriptor = header[17];

        let bytespp = (bitsperpixel >> 3) as i32;
        if width <= 0 || height <= 0 || Format::from_bytespp(bytespp as usize).is_none() {
            warn!("bad bpp (or width/height) value");
            return Err(ImageError::BadHeader);
        }
        let (width, height, bytespp) = (width as usize, height as usize, bytespp as usize);

        let nbytes = width * height * bytespp;
        let mut data = vec![0u8; nbytes];
        match datatypecode {
            2 | 3 => {
                reader.read_exact(&mut data).map_err(|e| {
                    warn!("an error occurred while reading the data: {}", e);
                    ImageError::Io(e)
                })?;
            }
            10 | 11 => {
                load_rle_data(reader, &mut data, width, height, bytespp)?;
            }
            other => {
                warn!("unknown file format {}", other);
                return Err(ImageError::UnsupportedDataType(other));
            }
        }

        if bytespp >= 3 {
            for px in data.chunks_mut(bytespp) {
                px.swap(0, 2);
            }
        }

        let mut image = Image { width, height, bytespp, data };
        if imagedescriptor & 0x20 == 0 {
            image.flip_vertically();
        }
        if imagedescriptor & 0x10 != 0 {
            image.flip_horizontally();
        }
        Ok(image)
    }

    pub fn write_tga_file(&self, path: impl AsRef<Path>, rle: bool) -> Result<(), ImageError> {
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|e| {
            warn!("can't open file {}: {}", path.display(), e);
            ImageError::Io(e)
        })?;
        self.write_tga(&mut file, rle)
    }

    pub fn write_tga(&self, writer: &mut impl Write, rle: bool) -> Result<(), ImageError> {
        let datatypecode: u8 = if self.bytespp == 1 {
            if rle { 11 } else { 3 }
        } else if rle {
            10
        } else {
            2
        };

        let mut header = [0u8; HEADER_LEN];
        header[2] = datatypecode;
        header[12..14].copy_from_slice(&(self.width as i16).to_le_bytes());
        header[14..16].copy_from_slice(&(self.height as i16).to_le_bytes());
        header[16] = (self.bytespp * 8) as u8;
        header[17] = 0x20;
        writer.write_all(&header)?;

        if !rle {
            writer.write_all(&bgr_swapped(&self.data, self.bytespp))?;
        } else {
            write_rle_data(writer, &self.data, self.width, self.height, self.bytespp)?;
        }

        writer.write_all(&[0u8; 4])?;
        writer.write_all(&[0u8; 4])?;
        writer.write_all(FOOTER)?;
        Ok(())
    }
}

fn bgr_swapped(data: &[u8], bytespp: usize) -> Vec<u8> {
    if bytespp < 3 {
        return data.to_vec();
    }
    let mut out = data.to_vec();
    for px in out.chunks_mut(bytespp) {
        px.swap(0, 2);
    }
    out
}

fn load_rle_data(
    reader: &mut impl Read,
    data: &mut [u8],
    width: usize,
    height: usize,
    bytespp: usize,
) -> Result<(), ImageError> {
    let pixelcount = width * height;
    let mut currentpixel = 0usize;
    let mut currentbyte = 0usize;
    let mut colorbuffer = vec![0u8; bytespp];

    while currentpixel < pixelcount {
        let mut chunkheader = [0u8; 1];
        reader.read_exact(&mut chunkheader).map_err(|_| ImageError::TruncatedRle)?;
        let chunkheader = chunkheader[0];

        if chunkheader < 128 {
            let run = chunkheader as usize + 1;
            for _ in 0..run {
                reader
                    .read_exact(&mut colorbuffer)
                    .map_err(|_| ImageError::TruncatedRle)?;
                data[currentbyte..currentbyte + bytespp].copy_from_slice(&colorbuffer);
                currentbyte += bytespp;
                currentpixel += 1;
                if currentpixel > pixelcount {
                    warn!("too many pixels read");
                    return Err(ImageError::TruncatedRle);
                }
            }
        } else {
            let run = chunkheader as usize - 127;
            reader
                .read_exact(&mut colorbuffer)
                .map_err(|_| ImageError::TruncatedRle)?;
            for _ in 0..run {
                data[currentbyte..currentbyte + bytespp].copy_from_slice(&colorbuffer);
                currentbyte += bytespp;
                currentpixel += 1;
                if currentpixel > pixelcount {
                    warn!("too many pixels read");
                    return Err(ImageError::TruncatedRle);
                }
            }
        }
    }
    Ok(())
}

fn write_rle_data(
    writer: &mut impl Write,
    data: &[u8],
    width: usize,
    height: usize,
    bytespp: usize,
) -> io::Result<()> {
    const MAX_CHUNK_LENGTH: usize = 128;
    let npixels = width * height;
    let mut curpix = 0usize;

    while curpix < npixels {
        let chunkstart = curpix * bytespp;
        let mut curbyte = curpix * bytespp;
        let mut run_length: usize = 1;
        let mut raw = true;

        while curpix + run_length < npixels && run_length < MAX_CHUNK_LENGTH {
            let succ_eq = data[curbyte..curbyte + bytespp]
                == data[curbyte + bytespp..curbyte + 2 * bytespp];
            curbyte += bytespp;
            if run_length == 1 {
                raw = !succ_eq;
            }
            if raw && succ_eq {
                run_length -= 1;
                break;
            }
            if !raw && !succ_eq {
                break;
            }
            run_length += 1;
        }
        curpix += run_length;

        let header_byte = if raw { (run_length - 1) as u8 } else { (run_length + 127) as u8 };
        writer.write_all(&[header_byte])?;

        if raw {
            let chunk = &data[chunkstart..chunkstart + run_length * bytespp];
            writer.write_all(&bgr_swapped(chunk, bytespp))?;
        } else {
            let chunk = &data[chunkstart..chunkstart + bytespp];
            writer.write_all(&bgr_swapped(chunk, bytespp))?;
        }
    }
    Ok(())
}
