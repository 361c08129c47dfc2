//! Raw binary matrix files.
//!
//! Layout: `rows` and `cols` as native-endian unsigned integers (8 bytes each
//! by default, see [`HeaderWidth`]), followed by `rows * cols` elements in
//! row-major order using their native in-memory representation.
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::mem;
use std::path::Path;

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};

use crate::config::{HeaderWidth, MatrixFileConfig};
use crate::math::DenseMatrix;

const READ_CHUNK_ELEMS: usize = 1 << 16;

impl<T: Pod> DenseMatrix<T> {
    /// Serialize the shape header followed by the element payload.
    pub fn write<W: Write>(&self, writer: W) -> io::Result<()> {
        self.write_with_config(writer, &MatrixFileConfig::default())
    }

    pub fn write_with_config<W: Write>(
        &self,
        mut writer: W,
        config: &MatrixFileConfig,
    ) -> io::Result<()> {
        write_header(&mut writer, self.shape(), config.header_width)?;
        writer.write_all(bytemuck::cast_slice(self.as_slice()))
    }

    /// Deserialize a new matrix from `reader`.
    ///
    /// A payload shorter than the header announces fails with
    /// `ErrorKind::UnexpectedEof`.
    pub fn read_from<R: Read>(reader: R) -> io::Result<Self> {
        Self::read_from_with_config(reader, &MatrixFileConfig::default())
    }

    pub fn read_from_with_config<R: Read>(mut reader: R, config: &MatrixFileConfig) -> io::Result<Self> {
        let (rows, cols) = read_header(&mut reader, config.header_width)?;
        let len = payload_len::<T>(rows, cols)?;

        // Grow in bounded steps so a corrupt header fails on EOF instead of
        // allocating the announced size up front.
        let mut data: Vec<T> = Vec::with_capacity(len.min(READ_CHUNK_ELEMS));
        while data.len() < len {
            let start = data.len();
            let end = start + (len - start).min(READ_CHUNK_ELEMS);
            data.resize(end, <T as Zeroable>::zeroed());
            reader.read_exact(bytemuck::cast_slice_mut(&mut data[start..end]))?;
        }
        Ok(DenseMatrix::from_parts(rows, cols, data))
    }

    /// Replace `self` with the matrix stored in `reader`. On error `self` is
    /// left as it was.
    pub fn read<R: Read>(&mut self, reader: R) -> io::Result<()> {
        self.read_with_config(reader, &MatrixFileConfig::default())
    }

    pub fn read_with_config<R: Read>(&mut self, reader: R, config: &MatrixFileConfig) -> io::Result<()> {
        *self = Self::read_from_with_config(reader, config)?;
        Ok(())
    }

    /// Write the matrix to `path`, creating or truncating the file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_with_config(path, &MatrixFileConfig::default())
    }

    pub fn save_with_config<P: AsRef<Path>>(&self, path: P, config: &MatrixFileConfig) -> Result<()> {
        let path = path.as_ref();
        log::debug!(
            "Saving {}x{} matrix ({} bytes) to {}",
            self.nrows(),
            self.ncols(),
            self.byte_size(),
            path.display()
        );

        let file = File::create(path)
            .with_context(|| format!("Failed to create matrix file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        self.write_with_config(&mut writer, config)
            .with_context(|| format!("Failed to write matrix file: {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush matrix file: {}", path.display()))?;
        Ok(())
    }

    /// Replace `self` with the matrix stored at `path`.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.load_with_config(path, &MatrixFileConfig::default())
    }

    pub fn load_with_config<P: AsRef<Path>>(&mut self, path: P, config: &MatrixFileConfig) -> Result<()> {
        *self = Self::load_from_file_with_config(path, config)?;
        Ok(())
    }

    /// Read a new matrix from the file at `path`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_from_file_with_config(path, &MatrixFileConfig::default())
    }

    pub fn load_from_file_with_config<P: AsRef<Path>>(path: P, config: &MatrixFileConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open matrix file: {}", path.display()))?;
        let matrix = Self::read_from_with_config(BufReader::new(file), config)
            .with_context(|| format!("Failed to read matrix file: {}", path.display()))?;
        log::debug!(
            "Loaded {}x{} matrix from {}",
            matrix.nrows(),
            matrix.ncols(),
            path.display()
        );
        Ok(matrix)
    }
}

fn write_header<W: Write>(writer: &mut W, shape: (usize, usize), width: HeaderWidth) -> io::Result<()> {
    let dims = [shape.0 as u64, shape.1 as u64];
    // Validate both fields first so a rejected shape leaves nothing behind.
    if let Some(&dim) = dims.iter().find(|&&dim| dim > width.max_dim()) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("dimension {} does not fit a {}-byte header field", dim, width.size()),
        ));
    }
    for dim in dims {
        match width {
            HeaderWidth::U32 => writer.write_all(&(dim as u32).to_ne_bytes())?,
            HeaderWidth::U64 => writer.write_all(&dim.to_ne_bytes())?,
        }
    }
    Ok(())
}

fn read_header<R: Read>(reader: &mut R, width: HeaderWidth) -> io::Result<(usize, usize)> {
    let rows = read_dim(reader, width)?;
    let cols = read_dim(reader, width)?;
    log::trace!("Matrix file header: {} rows, {} cols", rows, cols);
    Ok((rows, cols))
}

fn read_dim<R: Read>(reader: &mut R, width: HeaderWidth) -> io::Result<usize> {
    let dim = match width {
        HeaderWidth::U32 => {
            let mut buf = [0u8; 4];
            reader.read_exact(&mut buf)?;
            u32::from_ne_bytes(buf) as u64
        }
        HeaderWidth::U64 => {
            let mut buf = [0u8; 8];
            reader.read_exact(&mut buf)?;
            u64::from_ne_bytes(buf)
        }
    };
    usize::try_from(dim).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("dimension {} does not fit in usize", dim),
        )
    })
}

/// Element count for a `rows x cols` payload.
///
/// Each dimension on its own must describe a buffer that can be allocated,
/// so an empty payload cannot smuggle in a shape that later reductions or
/// transposes fail to allocate.
fn payload_len<T>(rows: usize, cols: usize) -> io::Result<usize> {
    let max_dim = isize::MAX as usize / mem::size_of::<T>().max(1);
    let too_large = || {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("matrix shape ({}, {}) is too large", rows, cols),
        )
    };
    if rows > max_dim || cols > max_dim {
        return Err(too_large());
    }
    rows.checked_mul(cols)
        .filter(|len| *len <= max_dim)
        .ok_or_else(too_large)
}
