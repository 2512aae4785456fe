// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the bookscan-recognize crate.
// Covers the text extractor on a colophon-sized block and the EAN-13 scanner
// on a rendered symbol, both with and without a decodable row.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{GrayImage, Luma};

use bookscan_recognize::barcode::ean13::{render_symbol, scan_image};
use bookscan_recognize::isbn::extract_isbn;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Extract and validate the ISBN from a typical colophon page.
fn bench_extract_isbn(c: &mut Criterion) {
    let colophon = "\
        吾輩は猫である\n\
        2024年4月1日 初版第1刷発行\n\
        著者 夏目漱石\n\
        発行所 株式会社サンプル出版 東京都千代田区1-2-3\n\
        印刷・製本 サンプル印刷株式会社\n\
        ISBN 978-4-12-345678-9 C0093 ¥800E\n\
        落丁・乱丁本はお取り替えいたします。\n";

    c.bench_function("extract_isbn (colophon)", |b| {
        b.iter(|| black_box(extract_isbn(black_box(colophon))));
    });
}

/// Scan a clean rendered EAN-13 symbol (first row decodes).
fn bench_scan_symbol(c: &mut Criterion) {
    let Some(symbol) = render_symbol("9780306406157", 3, 120) else {
        return;
    };

    c.bench_function("scan_image (ean13, 3px modules)", |b| {
        b.iter(|| black_box(scan_image(black_box(&symbol), 24)));
    });
}

/// Scan a blank page: every row is examined and none decodes, which is the
/// worst case for the scanner.
fn bench_scan_blank(c: &mut Criterion) {
    let blank = GrayImage::from_pixel(400, 300, Luma([235u8]));

    c.bench_function("scan_image (blank 400x300)", |b| {
        b.iter(|| black_box(scan_image(black_box(&blank), 24)));
    });
}

criterion_group!(benches, bench_extract_isbn, bench_scan_symbol, bench_scan_blank);
criterion_main!(benches);
