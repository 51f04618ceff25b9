use std::io::{self, Read};

/// Reads exactly `len` bytes into a new buffer.
///
/// The buffer grows with the data actually read, so a corrupt length cannot force a large
/// up-front allocation.
pub fn read_exact_vec<R: Read>(reader: &mut R, len: u32) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let n_read = reader.by_ref().take(u64::from(len)).read_to_end(&mut buffer)?;
    if n_read != len as usize {
        return Err(short_read(n_read as u64, len));
    }
    Ok(buffer)
}

/// Advances the reader by exactly `len` bytes without keeping them.
pub fn skip_exact<R: Read>(reader: &mut R, len: u32) -> io::Result<()> {
    let n_read = io::copy(&mut reader.by_ref().take(u64::from(len)), &mut io::sink())?;
    if n_read != u64::from(len) {
        return Err(short_read(n_read, len));
    }
    Ok(())
}

fn short_read(n_read: u64, expected: u32) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("block declares {expected} bytes but only {n_read} remain"),
    )
}
