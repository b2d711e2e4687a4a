//! Streaming of the rows of one CSV table
use crate::error::LineError;
use crate::Error;
use csv::StringRecord;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read};

const BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// Remembers the byte offset of every line break that went through it
///
/// csv does not count the blank lines it skips, so the physical line of a record is computed
/// from its byte offset instead.
struct LineBreaks<R> {
    inner: R,
    offset: u64,
    breaks: VecDeque<u64>,
}

impl<R: Read> Read for LineBreaks<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        for (i, b) in buf[..n].iter().enumerate() {
            if *b == b'\n' {
                self.breaks.push_back(self.offset + i as u64);
            }
        }
        self.offset += n as u64;
        Ok(n)
    }
}

/// Reads a table one row at a time, reusing the same [StringRecord]
pub struct TableReader<R: Read> {
    reader: csv::Reader<LineBreaks<BufReader<R>>>,
    file_name: String,
    headers: StringRecord,
    record: StringRecord,
    /// Line breaks before the last record read
    breaks_before: u64,
}

impl<R: Read> TableReader<R> {
    /// Reads the header of the table, skipping the UTF-8 BOM if there is one
    pub fn new(reader: R, file_name: &str, trim_fields: bool) -> Result<Self, Error> {
        let mut buf_reader = BufReader::new(reader);
        let has_bom = buf_reader
            .fill_buf()
            .map_err(|e| Error::NamedFileIO {
                file_name: file_name.to_owned(),
                source: Box::new(e),
            })?
            .starts_with(&BOM);
        if has_bom {
            buf_reader.consume(BOM.len());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(if trim_fields {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(LineBreaks {
                inner: buf_reader,
                offset: 0,
                breaks: VecDeque::new(),
            });
        // We keep the headers to be able to return them in case of errors
        let headers = reader
            .headers()
            .map_err(|e| Error::CSVError {
                file_name: file_name.to_owned(),
                source: e,
                line_in_error: None,
            })?
            .clone();

        Ok(Self {
            reader,
            file_name: file_name.to_owned(),
            headers,
            record: StringRecord::new(),
            breaks_before: 0,
        })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Reads the next row, false at the end of the table
    pub fn next_record(&mut self) -> Result<bool, Error> {
        match self.reader.read_record(&mut self.record) {
            Ok(read) => {
                let start = self.record.position().map_or(0, |p| p.byte());
                let breaks = &mut self.reader.get_mut().breaks;
                while breaks.front().map_or(false, |b| *b < start) {
                    breaks.pop_front();
                    self.breaks_before += 1;
                }
                Ok(read)
            }
            Err(e) => Err(Error::CSVError {
                file_name: self.file_name.clone(),
                source: e,
                line_in_error: Some(LineError {
                    headers: self.headers.iter().map(String::from).collect(),
                    values: self.record.iter().map(String::from).collect(),
                }),
            }),
        }
    }

    /// The last row read
    pub fn record(&self) -> &StringRecord {
        &self.record
    }

    /// Physical line of the last row read in the file, starting at 1 for the header.
    /// Blank lines are counted
    pub fn line(&self) -> u64 {
        self.breaks_before + 1
    }
}
