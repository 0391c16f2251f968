//! ESRI ASCII grid (AAIGrid) reader.
//!
//! The header is a run of `key value` pairs, keys case-insensitive, ending at
//! the first numeric token. Required keys are `ncols`, `nrows`, either
//! `xllcorner`/`yllcorner` or `xllcenter`/`yllcenter`, and either `cellsize`
//! or `dx`/`dy`. `nodata_value` is optional.

use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use tracing::{debug, warn};

use crate::consts::{AAIGRID_DEFAULT_NODATA, AAIGRID_MIN_FILL_PERCENT};
use crate::error::{BlobscanError, Result};
use crate::geo::GeoTransform;
use crate::grid::Grid;

const KNOWN_KEYS: [&str; 10] = [
    "ncols",
    "nrows",
    "xllcorner",
    "yllcorner",
    "xllcenter",
    "yllcenter",
    "cellsize",
    "dx",
    "dy",
    "nodata_value",
];

/// A parsed ASCII grid with its north-up geotransform.
#[derive(Clone, Debug)]
pub struct AsciiGrid {
    pub grid: Grid,
    pub transform: GeoTransform,
}

/// Read an ASCII grid from a file.
pub fn open_aaigrid(path: &Path) -> Result<AsciiGrid> {
    let file = File::open(path)?;
    read_aaigrid(BufReader::new(file))
}

/// Parse ASCII grid text.
pub fn parse_aaigrid(text: &str) -> Result<AsciiGrid> {
    read_aaigrid(text.as_bytes())
}

/// Read an ASCII grid from a buffered reader, one line at a time.
pub fn read_aaigrid<R: BufRead>(reader: R) -> Result<AsciiGrid> {
    let mut tokens = Tokens::new(reader);

    let mut header: HashMap<String, String> = HashMap::new();
    while let Some(token) = tokens.peek()? {
        if token.parse::<f64>().is_ok() {
            break;
        }
        let key = token.to_ascii_lowercase();
        if !KNOWN_KEYS.contains(&key.as_str()) {
            return Err(invalid(format!("unknown header key {token:?}")));
        }
        tokens.advance();
        let value = tokens
            .next_token()?
            .ok_or_else(|| invalid(format!("missing value for {key}")))?;
        header.insert(key, value);
    }

    let width = header_usize(&header, "ncols")?;
    let height = header_usize(&header, "nrows")?;
    let transform = header_transform(&header, height)?;
    let nodata = match header.get("nodata_value") {
        Some(value) => parse_f64("nodata_value", value)?,
        None => AAIGRID_DEFAULT_NODATA,
    };

    let expected = width
        .checked_mul(height)
        .ok_or_else(|| invalid(format!("dimensions {width}x{height} overflow")))?;
    let mut data = Vec::with_capacity(expected);
    tokens.try_for_each(|token| {
        if data.len() == expected {
            return Err(invalid(format!("unexpected trailing value {token:?}")));
        }
        let value = token
            .parse::<f64>()
            .map_err(|_| invalid(format!("bad cell value {token:?} at index {}", data.len())))?;
        data.push(value);
        Ok(())
    })?;

    if data.len() < expected {
        let minimum = expected * AAIGRID_MIN_FILL_PERCENT / 100;
        if data.len() < minimum {
            return Err(invalid(format!(
                "expected {expected} values, got {}",
                data.len()
            )));
        }
        warn!(
            expected,
            got = data.len(),
            "Short ASCII grid body, padding with NoData"
        );
        data.resize(expected, nodata);
    }

    debug!(width, height, nodata, "ASCII grid parsed");

    Ok(AsciiGrid {
        grid: Grid::new(width, height, Some(nodata), data)?,
        transform,
    })
}

/// Whitespace-separated tokens pulled from a reader line by line.
struct Tokens<R> {
    lines: Lines<R>,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: VecDeque::new(),
        }
    }

    fn peek(&mut self) -> Result<Option<&str>> {
        while self.pending.is_empty() {
            match self.lines.next() {
                Some(line) => self
                    .pending
                    .extend(line?.split_whitespace().map(str::to_owned)),
                None => return Ok(None),
            }
        }
        Ok(self.pending.front().map(String::as_str))
    }

    fn advance(&mut self) {
        self.pending.pop_front();
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        self.peek()?;
        Ok(self.pending.pop_front())
    }

    /// Feed every remaining token to `f`, stopping at the first error.
    fn try_for_each<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&str) -> Result<()>,
    {
        while let Some(token) = self.pending.pop_front() {
            f(&token)?;
        }
        for line in self.lines.by_ref() {
            let line = line?;
            for token in line.split_whitespace() {
                f(token)?;
            }
        }
        Ok(())
    }
}

fn header_transform(header: &HashMap<String, String>, height: usize) -> Result<GeoTransform> {
    let (cell_x, cell_y) = match header.get("cellsize") {
        Some(value) => {
            let size = parse_f64("cellsize", value)?;
            (size, size)
        }
        None => (header_f64(header, "dx")?, header_f64(header, "dy")?),
    };

    let (xll, yll) = if header.contains_key("xllcenter") || header.contains_key("yllcenter") {
        (
            header_f64(header, "xllcenter")? - cell_x / 2.0,
            header_f64(header, "yllcenter")? - cell_y / 2.0,
        )
    } else {
        (header_f64(header, "xllcorner")?, header_f64(header, "yllcorner")?)
    };

    let top = yll + height as f64 * cell_y;
    Ok(GeoTransform::north_up(xll, top, cell_x, cell_y))
}

fn header_usize(header: &HashMap<String, String>, key: &str) -> Result<usize> {
    let value = header.get(key).ok_or_else(|| invalid(format!("missing {key}")))?;
    let parsed = value
        .parse::<usize>()
        .map_err(|_| invalid(format!("{key}={value:?} is not a count")))?;
    if parsed == 0 {
        return Err(invalid(format!("{key} must be positive")));
    }
    Ok(parsed)
}

fn header_f64(header: &HashMap<String, String>, key: &str) -> Result<f64> {
    let value = header.get(key).ok_or_else(|| invalid(format!("missing {key}")))?;
    parse_f64(key, value)
}

fn parse_f64(key: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| invalid(format!("{key}={value:?} is not a number")))
}

fn invalid(msg: String) -> BlobscanError {
    BlobscanError::InvalidGrid(msg)
}
