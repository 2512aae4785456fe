// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// EAN-13 scanline decoder.
//
// Each scanned row is binarized with a global Otsu threshold and run-length
// encoded. Guard patterns fix the module width; every digit occupies four runs
// totalling seven modules and is matched against the L/G/R width tables by
// least summed deviation. The leading digit is recovered from the L/G parity
// pattern of the left half, then the check digit is verified.
//
// A valid EAN-13 without the 978/979 book prefix (the price and
// classification code stacked under Japanese ISBNs, for example) is kept
// apart from a book symbol so that it never ends the scan. EAN-8 symbols are
// recognised only far enough to report them as an unsupported symbology.

use image::GrayImage;
use imageproc::contrast::otsu_level;
use tracing::{debug, trace};

use super::is_isbn_symbol;

/// Runs in a full EAN-13 symbol: guard, 6 digits, middle guard, 6 digits, guard.
const EAN13_RUNS: usize = 3 + 6 * 4 + 5 + 6 * 4 + 3;
/// Runs in a full EAN-8 symbol.
const EAN8_RUNS: usize = 3 + 4 * 4 + 5 + 4 * 4 + 3;

/// Largest summed deviation (in modules) accepted for a digit match.
const MAX_DIGIT_ERROR: f32 = 1.2;
/// Minimum light run either side of the symbol, in modules.
const QUIET_ZONE_MODULES: f32 = 3.0;
/// Accepted range of a single guard bar/space relative to the module width.
const GUARD_TOLERANCE: (f32, f32) = (0.5, 1.7);

/// Bar/space widths in modules for the L (odd parity) code of digits 0–9.
///
/// Left-half digits start with a space. G codes are these widths reversed.
/// Right-half (R) digits use the same widths but start with a bar.
const L_PATTERNS: [[u8; 4]; 10] = [
    [3, 2, 1, 1],
    [2, 2, 2, 1],
    [2, 1, 2, 2],
    [1, 4, 1, 1],
    [1, 1, 3, 2],
    [1, 2, 3, 1],
    [1, 1, 1, 4],
    [1, 3, 1, 2],
    [1, 2, 1, 3],
    [3, 1, 1, 2],
];

/// L/G parity of the six left digits (MSB first, 1 = G) for leading digit 0–9.
const PARITY_PATTERNS: [u8; 10] = [
    0b000000, 0b001011, 0b001101, 0b001110, 0b010011, 0b011001, 0b011100, 0b010101, 0b010110,
    0b011010,
];

/// Result of scanning one row, or a whole image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolScan {
    /// A complete 978/979 EAN-13 symbol with a matching check digit.
    Isbn(String),
    /// A complete EAN-13 symbol with a matching check digit but no book prefix.
    NonBook(String),
    /// An EAN-13 symbol whose check digit does not match the other twelve.
    ChecksumMismatch(String),
    /// A complete symbol of another symbology (e.g. `"EAN-8"`).
    OtherSymbology(&'static str),
    NotFound,
}

impl SymbolScan {
    fn rank(&self) -> u8 {
        match self {
            Self::Isbn(_) => 4,
            Self::NonBook(_) => 3,
            Self::ChecksumMismatch(_) => 2,
            Self::OtherSymbology(_) => 1,
            Self::NotFound => 0,
        }
    }

    /// Keep whichever of two scans is more informative.
    ///
    /// A book symbol beats any other valid EAN-13, then come a checksum
    /// mismatch, another symbology, and nothing.
    pub fn prefer(self, other: SymbolScan) -> SymbolScan {
        if other.rank() > self.rank() { other } else { self }
    }

    /// Whether scanning can stop: only a book symbol ends it.
    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Isbn(_))
    }
}

/// Alternating dark/light run widths along one row.
#[derive(Debug, Clone)]
struct Runs {
    widths: Vec<u32>,
    first_dark: bool,
}

impl Runs {
    fn from_pixels(pixels: impl IntoIterator<Item = u8>, threshold: u8) -> Self {
        let mut widths = Vec::new();
        let mut first_dark = false;
        let mut current: Option<bool> = None;
        for value in pixels {
            let dark = value <= threshold;
            match current {
                Some(c) if c == dark => {
                    if let Some(last) = widths.last_mut() {
                        *last += 1;
                    }
                }
                _ => {
                    if current.is_none() {
                        first_dark = dark;
                    }
                    current = Some(dark);
                    widths.push(1);
                }
            }
        }
        Self { widths, first_dark }
    }

    fn len(&self) -> usize {
        self.widths.len()
    }

    fn is_dark(&self, index: usize) -> bool {
        (index % 2 == 0) == self.first_dark
    }

    fn reversed(&self) -> Self {
        let first_dark = match self.widths.len() {
            0 => false,
            n => self.is_dark(n - 1),
        };
        let mut widths = self.widths.clone();
        widths.reverse();
        Self { widths, first_dark }
    }
}

fn within_guard_tolerance(widths: &[u32], module: f32) -> bool {
    widths.iter().all(|&w| {
        let ratio = w as f32 / module;
        ratio >= GUARD_TOLERANCE.0 && ratio <= GUARD_TOLERANCE.1
    })
}

/// If a start guard begins at `start`, return the module width it implies.
fn start_guard(runs: &Runs, start: usize) -> Option<f32> {
    if start == 0 || start + 3 > runs.len() || !runs.is_dark(start) {
        return None;
    }
    let guard = &runs.widths[start..start + 3];
    let module = guard.iter().sum::<u32>() as f32 / 3.0;
    if !within_guard_tolerance(guard, module) {
        return None;
    }
    let quiet = runs.widths[start - 1] as f32;
    (quiet >= QUIET_ZONE_MODULES * module).then_some(module)
}

/// Best-matching digit for four run widths, with its summed deviation.
fn best_digit(widths: &[u32], module: f32, reversed: bool) -> Option<(u8, f32)> {
    let total: u32 = widths.iter().sum();
    let unit = total as f32 / 7.0;
    if unit < module * 0.6 || unit > module * 1.5 {
        return None;
    }

    let mut best: Option<(u8, f32)> = None;
    for (digit, pattern) in L_PATTERNS.iter().enumerate() {
        let error: f32 = (0..4)
            .map(|k| {
                let expected = if reversed { pattern[3 - k] } else { pattern[k] };
                (widths[k] as f32 / unit - f32::from(expected)).abs()
            })
            .sum();
        if best.is_none_or(|(_, e)| error < e) {
            best = Some((digit as u8, error));
        }
    }
    best.filter(|&(_, error)| error < MAX_DIGIT_ERROR)
}

/// Left-half digit: returns the digit and whether it used G parity.
fn match_left(widths: &[u32], module: f32) -> Option<(u8, bool)> {
    let l = best_digit(widths, module, false);
    let g = best_digit(widths, module, true);
    match (l, g) {
        (Some((dl, el)), Some((dg, eg))) => Some(if eg < el { (dg, true) } else { (dl, false) }),
        (Some((d, _)), None) => Some((d, false)),
        (None, Some((d, _))) => Some((d, true)),
        (None, None) => None,
    }
}

fn match_right(widths: &[u32], module: f32) -> Option<u8> {
    best_digit(widths, module, false).map(|(d, _)| d)
}

/// EAN check: weights alternate 1/3 from the right, check digit weighted 1.
fn checksum_ok(digits: &[u8]) -> bool {
    let n = digits.len();
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * if (n - 1 - i) % 2 == 0 { 1 } else { 3 })
        .sum();
    sum % 10 == 0
}

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| char::from(b'0' + d)).collect()
}

fn decode_ean13_at(runs: &Runs, start: usize, module: f32) -> Option<SymbolScan> {
    // One extra run is needed for the trailing quiet zone.
    if start + EAN13_RUNS >= runs.len() {
        return None;
    }
    let w = &runs.widths;
    let mut digits = [0u8; 13];
    let mut parity = 0u8;
    let mut pos = start + 3;

    for slot in digits.iter_mut().skip(1).take(6) {
        let (digit, g) = match_left(&w[pos..pos + 4], module)?;
        *slot = digit;
        parity = (parity << 1) | u8::from(g);
        pos += 4;
    }
    if !within_guard_tolerance(&w[pos..pos + 5], module) {
        return None;
    }
    pos += 5;
    for slot in digits.iter_mut().skip(7) {
        *slot = match_right(&w[pos..pos + 4], module)?;
        pos += 4;
    }
    if !within_guard_tolerance(&w[pos..pos + 3], module) {
        return None;
    }
    pos += 3;
    if (w[pos] as f32) < QUIET_ZONE_MODULES * module {
        return None;
    }

    // A parity pattern outside the table usually means the row was read backwards.
    let leading = PARITY_PATTERNS.iter().position(|&p| p == parity)?;
    digits[0] = leading as u8;

    let text = digits_to_string(&digits);
    if checksum_ok(&digits) && is_isbn_symbol(&text) {
        Some(SymbolScan::Isbn(text))
    } else if checksum_ok(&digits) {
        trace!(text = %text, "EAN-13 without a book prefix");
        Some(SymbolScan::NonBook(text))
    } else {
        trace!(text = %text, "EAN-13 check digit mismatch");
        Some(SymbolScan::ChecksumMismatch(text))
    }
}

fn decode_ean8_at(runs: &Runs, start: usize, module: f32) -> Option<SymbolScan> {
    if start + EAN8_RUNS >= runs.len() {
        return None;
    }
    let w = &runs.widths;
    let mut digits = [0u8; 8];
    let mut pos = start + 3;

    for slot in digits.iter_mut().take(4) {
        let (digit, g) = match_left(&w[pos..pos + 4], module)?;
        if g {
            return None;
        }
        *slot = digit;
        pos += 4;
    }
    if !within_guard_tolerance(&w[pos..pos + 5], module) {
        return None;
    }
    pos += 5;
    for slot in digits.iter_mut().skip(4) {
        *slot = match_right(&w[pos..pos + 4], module)?;
        pos += 4;
    }
    if !within_guard_tolerance(&w[pos..pos + 3], module) {
        return None;
    }
    pos += 3;
    if (w[pos] as f32) < QUIET_ZONE_MODULES * module || !checksum_ok(&digits) {
        return None;
    }
    trace!(text = %digits_to_string(&digits), "EAN-8 symbol found");
    Some(SymbolScan::OtherSymbology("EAN-8"))
}

fn scan_runs(runs: &Runs) -> SymbolScan {
    let mut best = SymbolScan::NotFound;
    for start in 1..runs.len() {
        let Some(module) = start_guard(runs, start) else {
            continue;
        };
        match decode_ean13_at(runs, start, module) {
            Some(found @ SymbolScan::Isbn(_)) => return found,
            Some(other) => {
                best = best.prefer(other);
                continue;
            }
            None => {}
        }
        if let Some(other) = decode_ean8_at(runs, start, module) {
            best = best.prefer(other);
        }
    }
    best
}

/// Scan a single row of grayscale pixels in both directions.
pub fn scan_row(row: &[u8], threshold: u8) -> SymbolScan {
    let forward = Runs::from_pixels(row.iter().copied(), threshold);
    let found = scan_runs(&forward);
    if found.is_decoded() {
        return found;
    }
    found.prefer(scan_runs(&forward.reversed()))
}

/// Scan `scan_lines` evenly spaced rows of `gray`.
///
/// Stops at the first row holding a book symbol; otherwise returns the most
/// informative result seen across all rows.
pub fn scan_image(gray: &GrayImage, scan_lines: u32) -> SymbolScan {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return SymbolScan::NotFound;
    }

    let threshold = otsu_level(gray);
    let lines = scan_lines.clamp(1, height);
    debug!(width, height, lines, threshold, "Scanning rows for EAN-13");

    let mut best = SymbolScan::NotFound;
    let mut row = Vec::with_capacity(width as usize);
    for k in 0..lines {
        let y = ((u64::from(k) + 1) * u64::from(height) / (u64::from(lines) + 1)) as u32;
        let y = y.min(height - 1);
        row.clear();
        row.extend((0..width).map(|x| gray.get_pixel(x, y).0[0]));

        let found = scan_row(&row, threshold);
        if found.is_decoded() {
            debug!(y, "ISBN symbol decoded");
            return found;
        }
        best = best.prefer(found);
    }
    best
}

/// Render an ideal EAN-13 (13 digits) or EAN-8 (8 digits) symbol.
///
/// The check digit is drawn as given, so a wrong one yields a symbol that
/// fails verification. Ten modules of quiet zone are added on each side.
/// Returns `None` for any other input. Used by tests and benchmarks.
pub fn render_symbol(digits: &str, module_px: u32, height: u32) -> Option<GrayImage> {
    let values: Vec<u8> = digits
        .bytes()
        .map(|b| b.is_ascii_digit().then(|| b - b'0'))
        .collect::<Option<_>>()?;
    if module_px == 0 || height == 0 {
        return None;
    }

    // (dark, modules)
    let mut bars: Vec<(bool, u8)> = vec![(false, 10)];
    let guard = |bars: &mut Vec<(bool, u8)>, start_dark: bool, count: usize| {
        for i in 0..count {
            bars.push((start_dark == (i % 2 == 0), 1));
        }
    };
    let digit = |bars: &mut Vec<(bool, u8)>, d: u8, start_dark: bool, reversed: bool| {
        let pattern = L_PATTERNS[d as usize];
        for k in 0..4 {
            let width = if reversed { pattern[3 - k] } else { pattern[k] };
            bars.push((start_dark == (k % 2 == 0), width));
        }
    };

    let (left, right, parity) = match values.len() {
        13 => (&values[1..7], &values[7..13], PARITY_PATTERNS[values[0] as usize]),
        8 => (&values[0..4], &values[4..8], 0),
        _ => return None,
    };

    guard(&mut bars, true, 3);
    for (i, &d) in left.iter().enumerate() {
        let g = (parity >> (left.len() - 1 - i)) & 1 == 1;
        digit(&mut bars, d, false, g);
    }
    guard(&mut bars, false, 5);
    for &d in right {
        digit(&mut bars, d, true, false);
    }
    guard(&mut bars, true, 3);
    bars.push((false, 10));

    let mut row = Vec::new();
    for (dark, modules) in bars {
        let value = if dark { 0u8 } else { 255u8 };
        row.extend(std::iter::repeat_n(value, modules as usize * module_px as usize));
    }
    let width = row.len() as u32;
    Some(GrayImage::from_fn(width, height, |x, _| image::Luma([row[x as usize]])))
}
