//! FASTA sequence source and alignment sink
//!
//! Reading goes through needletail (FASTA or FASTQ, plain or gzipped). Alignments are
//! written as two FASTA records under fixed labels.

use crate::types::Alignment;
use needletail::parse_fastx_file;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Header of the first alignment row in written FASTA output
pub const TOP_LABEL: &str = "string_1";
/// Header of the second alignment row in written FASTA output
pub const BOTTOM_LABEL: &str = "string_2";

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Empty file or no sequences found")]
    EmptyFile,
}

pub type FastaResult<T> = Result<T, FastaError>;

/// A single parsed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub id: String,
    pub seq: Vec<u8>,
}

/// Parse every record of a FASTA/FASTQ file
pub fn read_records<P: AsRef<Path>>(path: P) -> FastaResult<Vec<FastaRecord>> {
    let mut reader = parse_fastx_file(&path).map_err(|e| FastaError::Parse(e.to_string()))?;

    let mut records = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| FastaError::Parse(e.to_string()))?;
        records.push(FastaRecord {
            id: String::from_utf8_lossy(record.id()).to_string(),
            seq: record.seq().to_vec(),
        });
    }

    if records.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    log::debug!(
        "Read {} records from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

/// All sequence data of a file joined into one sequence, headers dropped
pub fn read_sequence<P: AsRef<Path>>(path: P) -> FastaResult<Vec<u8>> {
    let records = read_records(path)?;
    Ok(records.into_iter().flat_map(|record| record.seq).collect())
}

/// Write both alignment rows as FASTA records labelled [`TOP_LABEL`] and [`BOTTOM_LABEL`]
pub fn write_alignment<W: Write>(alignment: &Alignment, mut writer: W) -> FastaResult<()> {
    writeln!(writer, ">{}", TOP_LABEL)?;
    writer.write_all(&alignment.top)?;
    writeln!(writer)?;
    writeln!(writer, ">{}", BOTTOM_LABEL)?;
    writer.write_all(&alignment.bottom)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_alignment_file<P: AsRef<Path>>(alignment: &Alignment, path: P) -> FastaResult<()> {
    let file = File::create(&path)?;
    write_alignment(alignment, BufWriter::new(file))?;
    log::debug!("Wrote alignment to {}", path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_multiline_record() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">seq1 description").unwrap();
        writeln!(file, "ACGT").unwrap();
        writeln!(file, "TTGA").unwrap();
        file.as_file().sync_all().unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].seq, b"ACGTTTGA");
        assert!(records[0].id.starts_with("seq1"));
    }

    #[test]
    fn test_read_sequence_joins_records() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">a").unwrap();
        writeln!(file, "AC").unwrap();
        writeln!(file, ">b").unwrap();
        writeln!(file, "GT").unwrap();
        file.as_file().sync_all().unwrap();

        assert_eq!(read_sequence(file.path()).unwrap(), b"ACGT");
    }

    #[test]
    fn test_write_alignment() {
        let alignment = Alignment::new(b"AC-T".to_vec(), b"ACGT".to_vec());
        let mut out = Vec::new();
        write_alignment(&alignment, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            ">string_1\nAC-T\n>string_2\nACGT\n"
        );
    }

    #[test]
    fn test_write_then_read() {
        let alignment = Alignment::new(b"GAAC".to_vec(), b"CAAG".to_vec());
        let file = NamedTempFile::new().unwrap();
        write_alignment_file(&alignment, file.path()).unwrap();

        let records = read_records(file.path()).unwrap();
        assert_eq!(records[0].id, TOP_LABEL);
        assert_eq!(records[0].seq, b"GAAC");
        assert_eq!(records[1].id, BOTTOM_LABEL);
        assert_eq!(records[1].seq, b"CAAG");
    }
}
